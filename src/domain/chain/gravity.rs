// 落下処理

use crate::constants::{H, W};
use crate::domain::board::{Cell, Grid};

/// 落下処理のユーティリティ
pub struct GravityCollapser;

impl GravityCollapser {
    /// 消去予定・空白を取り除いて各列を下に詰める（残るセルの順序は保つ）
    ///
    /// 列の高さは消去判定の時点で更新済みなので触らない。
    pub fn collapse(grid: &mut Grid) {
        for col in 0..W {
            let mut column = [Cell::Empty; H];
            let mut len = 0;
            for row in (0..H).rev() {
                let cell = grid.get(row, col);
                if cell.survives_gravity() {
                    column[len] = cell;
                    len += 1;
                }
            }
            for (i, &cell) in column.iter().enumerate() {
                grid.set(H - 1 - i, col, cell);
            }
        }
    }
}
