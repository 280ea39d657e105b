// pfen-like 形式（列ごと・下から1文字ずつ、列は '/' 区切り）の変換

use crate::constants::{H, W};
use crate::domain::board::cell::{Cell, Color};
use crate::domain::board::grid::Grid;
use anyhow::{anyhow, Result};

const COLUMN_SEPARATOR: char = '/';

fn cell_from_pfen_char(ch: char) -> Result<Cell> {
    match ch.to_ascii_lowercase() {
        'o' => Ok(Cell::Ojama),
        _ => Color::from_char(ch)
            .map(Cell::Normal)
            .map_err(|_| anyhow!("pfenの文字が不正: {:?}", ch)),
    }
}

fn cell_to_pfen_char(cell: Cell) -> Result<char> {
    match cell {
        Cell::Normal(c) => Ok(c.to_char().to_ascii_lowercase()),
        Cell::Ojama => Ok('o'),
        other => Err(anyhow!("pfenで表現できないセル: {}", other)),
    }
}

/// pfen-like 文字列を盤面に変換
pub fn decode(pfen: &str) -> Result<Grid> {
    let columns: Vec<&str> = pfen.split(COLUMN_SEPARATOR).collect();
    // 末尾の '/' による空要素は許す
    if let Some(extra) = columns.iter().skip(W).find(|c| !c.is_empty()) {
        return Err(anyhow!("列が多すぎます: 余分な列 {:?}", extra));
    }

    let mut grid = Grid::new();
    for (x, column) in columns.iter().take(W).enumerate() {
        let len = column.chars().count();
        if len > H {
            return Err(anyhow!("{}列目が高すぎます: {} > {}", x + 1, len, H));
        }
        for (y, ch) in column.chars().enumerate() {
            let cell = cell_from_pfen_char(ch)
                .map_err(|e| anyhow!("{}列目の{}段目: {}", x + 1, y + 1, e))?;
            grid.set(H - 1 - y, x, cell);
        }
    }
    grid.recount_heights();
    Ok(grid)
}

/// 盤面を pfen-like 文字列に変換
pub fn encode(grid: &Grid) -> Result<String> {
    let mut out = String::new();
    for x in 0..W {
        for y in 0..grid.height_of(x) {
            out.push(cell_to_pfen_char(grid.get(H - 1 - y, x))?);
        }
        out.push(COLUMN_SEPARATOR);
    }
    Ok(out)
}
