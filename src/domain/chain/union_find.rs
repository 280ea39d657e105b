// 素集合データ構造

/// Union-Find（根は要素数を負数で保持する）
#[derive(Clone, Debug)]
pub struct UnionFind {
    parents: Vec<i32>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parents: vec![-1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// 根を返す（経路圧縮あり、再帰なし）
    pub fn find(&mut self, a: usize) -> usize {
        let mut root = a;
        while self.parents[root] >= 0 {
            root = self.parents[root] as usize;
        }
        let mut cur = a;
        while self.parents[cur] >= 0 {
            let next = self.parents[cur] as usize;
            self.parents[cur] = root as i32;
            cur = next;
        }
        root
    }

    /// 併合する。既に同じ集合なら false
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return false;
        }
        // 大きい方を根に残す（同サイズなら a 側）
        if self.parents[ra] > self.parents[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parents[ra] += self.parents[rb];
        self.parents[rb] = ra as i32;
        true
    }

    pub fn component_size(&mut self, a: usize) -> usize {
        let root = self.find(a);
        (-self.parents[root]) as usize
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
