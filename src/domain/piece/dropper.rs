// ツモ配置ロジック

use super::decision::{Decision, Rotation};
use super::tumo::Tumo;
use crate::constants::H;
use crate::domain::board::{Cell, Grid};
use crate::vlog;

/// ツモ配置のユーティリティ
pub struct PieceDropper;

impl PieceDropper {
    /// 1個のぷよを列に落とす。列が埋まっていれば何もしない
    fn drop_single(grid: &mut Grid, cell: Cell, col: usize) -> bool {
        let height = grid.height_of(col);
        if height >= H {
            vlog!("[配置] 列{}が埋まっているため {} を置かない", col + 1, cell);
            return false;
        }
        grid.set(H - 1 - height, col, cell);
        grid.raise_height(col);
        true
    }

    /// 着手に従ってツモを置き、実際に置けた個数を返す
    pub fn drop(grid: &mut Grid, tumo: Tumo, decision: Decision) -> usize {
        // 下向きは子ぷよが下になるので、先に落とす側を入れ替える
        let tumo = match decision.rotation() {
            Rotation::Down => tumo.swapped(),
            _ => tumo,
        };
        let first = Self::drop_single(grid, Cell::Normal(tumo.axis), decision.axis_col());
        let second = Self::drop_single(grid, Cell::Normal(tumo.child), decision.child_col());
        usize::from(first) + usize::from(second)
    }
}
