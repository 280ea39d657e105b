// 棋譜全体の再構成

use super::config::ReplayConfig;
use crate::domain::board::{pfen, Grid};
use crate::domain::chain::{ChainResolver, Frame};
use crate::domain::piece::{Decision, DecisionRecord, Tumo};
use crate::vlog;
use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;

/// 再構成の入力
#[derive(Clone, Debug)]
pub struct ReplayInput {
    /// 初期盤面
    pub initial: Grid,
    /// 配ぷよ（循環して使う）
    pub tumos: Vec<Tumo>,
    /// 棋譜の着手（未検証）
    pub decisions: Vec<DecisionRecord>,
}

impl ReplayInput {
    /// 空の盤面から始める入力
    pub fn new(tumos: Vec<Tumo>, decisions: Vec<DecisionRecord>) -> Self {
        Self {
            initial: Grid::new(),
            tumos,
            decisions,
        }
    }

    pub fn with_initial(mut self, initial: Grid) -> Self {
        self.initial = initial;
        self
    }

    /// pfen-like 文字列の盤面から始める入力
    pub fn with_pfen(self, field: &str) -> Result<Self> {
        let initial = pfen::decode(field).context("初期盤面のpfenが不正です")?;
        Ok(self.with_initial(initial))
    }
}

/// 1手分の表示単位
#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub index: usize,
    /// 終端ターンでは None
    pub tumo: Option<Tumo>,
    pub decision: Option<Decision>,
    pub frames: Vec<Frame>,
    pub chain_count: usize,
}

impl Turn {
    pub fn is_terminal(&self) -> bool {
        self.decision.is_none()
    }

    /// 棋譜に書き戻す形の着手（終端ターンはダミー）
    pub fn record(&self) -> DecisionRecord {
        self.decision
            .map(Decision::to_record)
            .unwrap_or_else(DecisionRecord::terminal)
    }

    /// この手で加算された得点
    pub fn gained(&self) -> u64 {
        self.frames.iter().map(|f| f.delta).sum()
    }
}

/// 再構成結果
#[derive(Clone, Debug, PartialEq)]
pub struct Replay {
    pub initial: Frame,
    pub turns: Vec<Turn>,
    /// 最終的な累積得点
    pub score: u64,
}

impl Replay {
    /// 全フレームを時系列順に（初期盤面から）
    pub fn frames(&self) -> impl Iterator<Item = &Frame> + '_ {
        std::iter::once(&self.initial).chain(self.turns.iter().flat_map(|t| t.frames.iter()))
    }

    pub fn frame_count(&self) -> usize {
        1 + self.turns.iter().map(|t| t.frames.len()).sum::<usize>()
    }

    /// 最後に落ち着いた盤面
    pub fn final_frame(&self) -> &Frame {
        self.turns
            .iter()
            .rev()
            .find_map(|t| t.frames.last())
            .unwrap_or(&self.initial)
    }

    /// 最大連鎖数
    pub fn max_chain(&self) -> usize {
        self.turns.iter().map(|t| t.chain_count).max().unwrap_or(0)
    }
}

/// 棋譜から盤面と得点のタイムラインを作るサービス
pub struct ReplayReconstructor {
    config: ReplayConfig,
}

impl ReplayReconstructor {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// 入力の検証
    fn validate_input(&self, input: &ReplayInput) -> Result<()> {
        self.config.validate().context("設定が不正です")?;
        input.initial.validate().context("初期盤面が不正です")?;
        if input.tumos.is_empty() && !input.decisions.is_empty() {
            return Err(anyhow!(
                "配ぷよが空ですが着手が{}手あります",
                input.decisions.len()
            ));
        }
        Ok(())
    }

    /// 1つの棋譜を再構成
    pub fn reconstruct(&self, input: &ReplayInput) -> Result<Replay> {
        self.validate_input(input)?;

        let initial = Frame::new(input.initial.snapshot(), 0, 0, 0);
        let mut resolver = ChainResolver::new(input.initial.clone(), 0);
        let mut turns = Vec::with_capacity(input.decisions.len() + 1);

        for (i, &record) in input.decisions.iter().enumerate() {
            let tumo_index = i % input.tumos.len();
            let decision = Decision::try_from_record(record).with_context(|| {
                format!(
                    "{}手目の着手が不正です (decision_index={}, tumo_index={}, x={}, r={})",
                    i + 1,
                    i,
                    tumo_index,
                    record.x,
                    record.r
                )
            })?;
            let tumo = input.tumos[tumo_index];
            let timeline = resolver.resolve(tumo, decision);
            vlog!(
                "[再構成] {}手目 {} ({}, {}) {}連鎖 累計{}",
                i + 1,
                tumo,
                decision.column(),
                decision.rotation().index(),
                timeline.chain_count(),
                resolver.score()
            );
            turns.push(Turn {
                index: i,
                tumo: Some(tumo),
                decision: Some(decision),
                chain_count: timeline.chain_count(),
                frames: timeline.frames,
            });
        }

        let mut replay = Replay {
            initial,
            turns,
            score: resolver.score(),
        };

        if self.config.wants_terminal_turn(input.decisions.len()) {
            let last = *replay.final_frame();
            replay.turns.push(Turn {
                index: input.decisions.len(),
                tumo: None,
                decision: None,
                frames: vec![Frame::new(last.board, last.score, 0, 0)],
                chain_count: 0,
            });
        }

        Ok(replay)
    }

    /// 複数の棋譜を並列に再構成（1つの失敗が他に影響しない）
    pub fn reconstruct_batch(&self, inputs: &[ReplayInput]) -> Vec<Result<Replay>> {
        let results: Vec<Result<Replay>> = inputs
            .par_iter()
            .enumerate()
            .map(|(i, input)| {
                self.reconstruct(input)
                    .with_context(|| format!("{}番目の棋譜の再構成に失敗しました", i))
            })
            .collect();

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            vlog!("[再構成] {:#}", err);
        }
        let failed = results.iter().filter(|r| r.is_err()).count();
        vlog!(
            "[再構成] バッチ完了: {}件中 {}件失敗",
            results.len(),
            failed
        );
        results
    }
}

impl Default for ReplayReconstructor {
    fn default() -> Self {
        Self::new(ReplayConfig::default())
    }
}
