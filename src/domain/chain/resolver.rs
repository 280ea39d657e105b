// 1手分の着手→連鎖解決

use super::gravity::GravityCollapser;
use super::result::{DropTimeline, Frame, VanishStep};
use super::vanish::VanishEvaluator;
use crate::constants::MAX_CHAIN;
use crate::domain::board::Grid;
use crate::domain::piece::{Decision, PieceDropper, Tumo};
use crate::vlog;

/// 解決の段階
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolverPhase {
    AwaitingDrop,
    Dropped,
    Resolving,
    Settled,
}

/// 着手と連鎖解決を進める状態機械
///
/// 1手ごとに `drop_piece` → `step` を繰り返し → `reset` の順で使う。
/// 段階を守らない呼び出しは内部ロジックの不具合としてパニックする。
pub struct ChainResolver {
    grid: Grid,
    score: u64,
    phase: ResolverPhase,
    chain: usize,
}

impl ChainResolver {
    pub fn new(grid: Grid, score: u64) -> Self {
        Self {
            grid,
            score,
            phase: ResolverPhase::AwaitingDrop,
            chain: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// 累積得点
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn phase(&self) -> ResolverPhase {
        self.phase
    }

    /// 現在の盤面をフレームにする
    pub fn frame(&self, delta: u64) -> Frame {
        Frame::new(self.grid.snapshot(), self.score, delta, self.chain)
    }

    /// ツモを置き、着手直後のフレームを返す
    pub fn drop_piece(&mut self, tumo: Tumo, decision: Decision) -> (Frame, usize) {
        assert_eq!(
            self.phase,
            ResolverPhase::AwaitingDrop,
            "着手待ちでない状態で drop_piece が呼ばれた"
        );
        let placed = PieceDropper::drop(&mut self.grid, tumo, decision);
        self.chain = 0;
        self.phase = ResolverPhase::Dropped;
        (self.frame(0), placed)
    }

    /// 消去判定を1回行う。消えたら [消去予定, 落下後] の2フレーム分のステップを返す
    pub fn step(&mut self) -> Option<VanishStep> {
        assert!(
            matches!(self.phase, ResolverPhase::Dropped | ResolverPhase::Resolving),
            "解決中でない状態で step が呼ばれた: {:?}",
            self.phase
        );
        let chain = self.chain + 1;
        let before = self.grid.snapshot();
        let outcome = VanishEvaluator::evaluate(&mut self.grid, chain);
        if !outcome.vanished_any() {
            self.phase = ResolverPhase::Settled;
            return None;
        }
        debug_assert!(chain <= MAX_CHAIN, "連鎖数が上限を超えた: {}", chain);
        let marked = self.grid.snapshot();
        GravityCollapser::collapse(&mut self.grid);

        self.chain = chain;
        self.score += outcome.score;
        self.phase = ResolverPhase::Resolving;
        vlog!(
            "[連鎖] {}連鎖: {}個消去 +{} (累計{})",
            chain,
            outcome.vanished(),
            outcome.score,
            self.score
        );

        Some(VanishStep {
            chain,
            before,
            marked,
            collapsed: self.grid.snapshot(),
            vanished: outcome.vanished(),
            score: outcome.score,
        })
    }

    /// 次のツモを受け付けられる状態に戻す
    pub fn reset(&mut self) {
        assert_eq!(
            self.phase,
            ResolverPhase::Settled,
            "連鎖が終わる前に reset が呼ばれた"
        );
        self.chain = 0;
        self.phase = ResolverPhase::AwaitingDrop;
    }

    /// 1手分を最後まで解決する
    pub fn resolve(&mut self, tumo: Tumo, decision: Decision) -> DropTimeline {
        let mut timeline = DropTimeline::new();
        let (dropped, placed) = self.drop_piece(tumo, decision);
        timeline.placed = placed;
        timeline.push_frame(dropped);

        let mut running = self.score;
        while let Some(step) = self.step() {
            timeline.push_frame(Frame::new(step.marked, running, 0, step.chain));
            running += step.score;
            timeline.push_frame(Frame::new(step.collapsed, running, step.score, step.chain));
            timeline.add_step(step);
        }
        self.reset();
        timeline
    }
}
