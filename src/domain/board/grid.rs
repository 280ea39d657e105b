// Grid型 - 6×13の盤面と列の高さ

use crate::constants::{H, W};
use crate::domain::board::cell::Cell;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

pub type Cells = [[Cell; W]; H];

/// 6×13の盤面（row 0 が最上段の幽霊段）
///
/// `heights[col]` は列の下から数えた占有セル数。落下先の行を O(1) で求めるのに使う。
/// 座標の範囲外アクセスは内部ロジックの不具合なのでパニックする。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Cells,
    heights: [usize; W],
}

impl Grid {
    /// 空の盤面を作成
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; W]; H],
            heights: [0; W],
        }
    }

    /// セル配列から構築（高さは再計算する）
    pub fn from_cells(cells: Cells) -> Self {
        let mut grid = Self {
            cells,
            heights: [0; W],
        };
        grid.recount_heights();
        grid
    }

    /// テキスト13行（上の行から）から構築
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        if rows.len() != H {
            return Err(anyhow!("行数が不正: 期待{}、実際{}", H, rows.len()));
        }
        let mut cells = [[Cell::Empty; W]; H];
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != W {
                return Err(anyhow!(
                    "{}行目の文字数が不正: 期待{}、実際{}",
                    row,
                    W,
                    chars.len()
                ));
            }
            for (col, &ch) in chars.iter().enumerate() {
                cells[row][col] =
                    Cell::from_char(ch).with_context(|| format!("({}, {}) の文字", row, col))?;
            }
        }
        Ok(Self::from_cells(cells))
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < H && col < W, "座標が範囲外: ({}, {})", row, col);
        self.cells[row][col]
    }

    /// セルを設定（高さは変更しない）
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(row < H && col < W, "座標が範囲外: ({}, {})", row, col);
        self.cells[row][col] = cell;
    }

    #[inline]
    pub fn height_of(&self, col: usize) -> usize {
        self.heights[col]
    }

    pub fn heights(&self) -> &[usize; W] {
        &self.heights
    }

    pub(crate) fn raise_height(&mut self, col: usize) {
        self.heights[col] += 1;
    }

    pub(crate) fn lower_height(&mut self, col: usize) {
        debug_assert!(self.heights[col] > 0, "列{}の高さが負になる", col);
        self.heights[col] = self.heights[col].saturating_sub(1);
    }

    /// 各列の占有セル数から高さを数え直す
    pub fn recount_heights(&mut self) {
        for col in 0..W {
            self.heights[col] = (0..H).filter(|&row| !self.cells[row][col].is_empty()).count();
        }
    }

    /// 盤面の妥当性を検証（壁・消去予定セルがなく、各列が下から隙間なく詰まっている）
    pub fn validate(&self) -> Result<()> {
        for col in 0..W {
            let height = self.heights[col];
            if height > H {
                return Err(anyhow!("{}列目の高さが不正: {}", col + 1, height));
            }
            for row in 0..H {
                let cell = self.cells[row][col];
                match cell {
                    Cell::Vanishing(_) => {
                        return Err(anyhow!("消去予定のセルが残っています: ({}, {})", row, col));
                    }
                    Cell::Wall => {
                        return Err(anyhow!("盤面内に壁があります: ({}, {})", row, col));
                    }
                    _ => {}
                }
                let below_top = row >= H - height;
                if below_top == cell.is_empty() {
                    return Err(anyhow!(
                        "{}列目が下から詰まっていません: ({}, {})",
                        col + 1,
                        row,
                        col
                    ));
                }
            }
        }
        Ok(())
    }

    /// 空でないセルの総数
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// 不変のスナップショットを作成
    pub fn snapshot(&self) -> Snapshot {
        Snapshot { cells: self.cells }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Snapshot> for Grid {
    fn from(snapshot: &Snapshot) -> Self {
        Self::from_cells(snapshot.cells)
    }
}

/// 盤面の不変コピー（描画用の1フレーム）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    cells: Cells,
}

impl Snapshot {
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &Cells {
        &self.cells
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// 消去予定セルを含むか
    pub fn has_vanishing(&self) -> bool {
        self.cells
            .iter()
            .flatten()
            .any(|cell| matches!(cell, Cell::Vanishing(_)))
    }

    /// テキスト表現（上の行から、ログ・デバッグ用）
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}
