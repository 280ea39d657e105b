// 連鎖結果の定義

use crate::domain::board::Snapshot;
use serde::{Deserialize, Serialize};

/// 再生用の1フレーム
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub board: Snapshot,
    /// 累積得点
    pub score: u64,
    /// このフレームで加算された得点
    pub delta: u64,
    /// 連鎖番号（0 は着手直後）
    pub chain: usize,
}

impl Frame {
    pub fn new(board: Snapshot, score: u64, delta: u64, chain: usize) -> Self {
        Self {
            board,
            score,
            delta,
            chain,
        }
    }

    /// [累積得点, 加算された得点]
    pub fn scores(&self) -> [u64; 2] {
        [self.score, self.delta]
    }
}

/// 連鎖の1ステップ
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VanishStep {
    /// 連鎖番号（1始まり）
    pub chain: usize,
    /// 消去判定前の盤面
    pub before: Snapshot,
    /// 消去予定の印を付けた盤面
    pub marked: Snapshot,
    /// 落下後の盤面
    pub collapsed: Snapshot,
    /// このステップで消えたぷよの数
    pub vanished: usize,
    /// このステップの得点
    pub score: u64,
}

/// 1手分の連鎖結果
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DropTimeline {
    /// [着手直後, 消去1, 落下1, ..., 消去k, 落下k]
    pub frames: Vec<Frame>,
    pub steps: Vec<VanishStep>,
    /// 実際に盤面に置けたぷよの数
    pub placed: usize,
}

impl DropTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn add_step(&mut self, step: VanishStep) {
        self.steps.push(step);
    }

    /// 連鎖数
    pub fn chain_count(&self) -> usize {
        self.steps.len()
    }

    /// 消えたぷよの総数
    pub fn total_vanished(&self) -> usize {
        self.steps.iter().map(|s| s.vanished).sum()
    }

    /// この手で加算された得点
    pub fn gained(&self) -> u64 {
        self.steps.iter().map(|s| s.score).sum()
    }

    /// 最後のフレーム（落ち着いた盤面）
    pub fn settled(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Grid;

    fn step(chain: usize, vanished: usize, score: u64) -> VanishStep {
        let snap = Grid::new().snapshot();
        VanishStep {
            chain,
            before: snap,
            marked: snap,
            collapsed: snap,
            vanished,
            score,
        }
    }

    #[test]
    fn timeline_aggregates_steps() {
        let mut timeline = DropTimeline::new();
        timeline.add_step(step(1, 4, 40));
        timeline.add_step(step(2, 5, 360));
        assert_eq!(timeline.chain_count(), 2);
        assert_eq!(timeline.total_vanished(), 9);
        assert_eq!(timeline.gained(), 400);
    }

    #[test]
    fn frame_scores_tuple() {
        let frame = Frame::new(Grid::new().snapshot(), 1200, 360, 2);
        assert_eq!(frame.scores(), [1200, 360]);
    }

    #[test]
    fn settled_is_last_frame() {
        let mut timeline = DropTimeline::new();
        assert!(timeline.settled().is_none());
        timeline.push_frame(Frame::new(Grid::new().snapshot(), 0, 0, 0));
        timeline.push_frame(Frame::new(Grid::new().snapshot(), 40, 40, 1));
        assert_eq!(timeline.settled().unwrap().score, 40);
    }
}
