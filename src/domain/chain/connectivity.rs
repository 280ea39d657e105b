// 同色連結成分の計算

use super::union_find::UnionFind;
use crate::constants::{GHOST_ROW, H, W};
use crate::domain::board::Grid;

#[inline]
fn index(row: usize, col: usize) -> usize {
    row * W + col
}

/// 盤面全体の連結成分
pub struct Components {
    uf: UnionFind,
}

impl Components {
    /// (row, col) を含む成分の大きさ
    pub fn size_at(&mut self, row: usize, col: usize) -> usize {
        self.uf.component_size(index(row, col))
    }

    /// (row, col) が成分の代表（根）か
    pub fn is_representative(&mut self, row: usize, col: usize) -> bool {
        let idx = index(row, col);
        self.uf.find(idx) == idx
    }

    pub fn connected(&mut self, a: (usize, usize), b: (usize, usize)) -> bool {
        self.uf.same(index(a.0, a.1), index(b.0, b.1))
    }
}

/// 連結判定のユーティリティ
pub struct ConnectivityAnalyzer;

impl ConnectivityAnalyzer {
    /// 幽霊段を除いた通常色ぷよの連結成分を作る
    ///
    /// 右と下だけ見れば全隣接を網羅できる。おじゃま・固ぷよは何ともつながらない。
    pub fn analyze(grid: &Grid) -> Components {
        let mut uf = UnionFind::new(H * W);
        for row in (GHOST_ROW + 1)..H {
            for col in 0..W {
                let cell = grid.get(row, col);
                if !cell.is_normal() {
                    continue;
                }
                if row + 1 < H && grid.get(row + 1, col) == cell {
                    uf.union(index(row, col), index(row + 1, col));
                }
                if col + 1 < W && grid.get(row, col + 1) == cell {
                    uf.union(index(row, col), index(row, col + 1));
                }
            }
        }
        Components { uf }
    }
}
