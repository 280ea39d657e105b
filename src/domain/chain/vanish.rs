// 消去判定と印付け

use super::connectivity::ConnectivityAnalyzer;
use super::score::VanishStats;
use crate::constants::{GHOST_ROW, H, VANISH_THRESHOLD, W};
use crate::domain::board::{Cell, Grid};

/// 1回の消去判定の結果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VanishOutcome {
    pub chain: usize,
    pub stats: VanishStats,
    pub score: u64,
}

impl VanishOutcome {
    /// 何か消えたか（false なら連鎖終了）
    pub fn vanished_any(&self) -> bool {
        !self.stats.is_empty()
    }

    pub fn vanished(&self) -> usize {
        self.stats.vanished
    }
}

/// 消去判定のユーティリティ
pub struct VanishEvaluator;

impl VanishEvaluator {
    /// 4個以上つながったぷよを消去予定にし、chain 連鎖目としての得点を返す
    ///
    /// 消えるセルの列の高さはこの時点で減らす（セル自体は落下処理まで残る）。
    pub fn evaluate(grid: &mut Grid, chain: usize) -> VanishOutcome {
        let mut comps = ConnectivityAnalyzer::analyze(grid);
        let mut stats = VanishStats::default();

        for row in (GHOST_ROW + 1)..H {
            for col in 0..W {
                let cell = grid.get(row, col);
                let Cell::Normal(color) = cell else {
                    continue;
                };
                let size = comps.size_at(row, col);
                if size < VANISH_THRESHOLD {
                    continue;
                }
                grid.set(row, col, cell.into_vanishing());
                grid.lower_height(col);
                if comps.is_representative(row, col) {
                    stats.add_group(color, size);
                }
            }
        }

        VanishOutcome {
            chain,
            stats,
            score: stats.score(chain),
        }
    }
}
