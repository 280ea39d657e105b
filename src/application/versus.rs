// 対戦棋譜のタイムライン（pfen盤面の展開と重複イベントの除去）

use crate::domain::board::{pfen, Snapshot};
use crate::infrastructure::kifu::{JsonEvent, JsonState};
use crate::vlog;
use anyhow::{Context, Result};

/// 片方のプレイヤーの1フレーム
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerFrame {
    pub tumo_index: usize,
    pub board: Snapshot,
    pub score: u64,
    pub ojama_fixed: usize,
    pub ojama_ongoing: usize,
    pub current_chain: usize,
}

impl PlayerFrame {
    fn from_state(state: &JsonState) -> Result<Self> {
        let grid = pfen::decode(&state.field)?;
        Ok(Self {
            tumo_index: state.tumo_index,
            board: grid.snapshot(),
            score: state.score,
            ojama_fixed: state.ojama_fixed,
            ojama_ongoing: state.ojama_ongoing,
            current_chain: state.current_chain,
        })
    }
}

/// 対戦の1フレーム
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchFrame {
    pub frame: u64,
    pub players: [PlayerFrame; 2],
}

/// 1試合分のタイムライン
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MatchTimeline {
    pub frames: Vec<MatchFrame>,
}

impl MatchTimeline {
    /// イベント列から作成
    ///
    /// 次のイベントとフレーム番号が同じ、または両者の状態が同じイベントは捨てる（後の方を残す）。
    /// 最後のイベントは必ず残る。
    pub fn from_events(events: &[JsonEvent]) -> Result<Self> {
        // 捨てるイベントも含めて全盤面を検証する
        let decoded = events
            .iter()
            .enumerate()
            .map(|(i, event)| -> Result<MatchFrame> {
                Ok(MatchFrame {
                    frame: event.frame,
                    players: [
                        PlayerFrame::from_state(&event.json_state_1p)
                            .with_context(|| format!("{}番目のイベントの1Pの盤面が不正です", i))?,
                        PlayerFrame::from_state(&event.json_state_2p)
                            .with_context(|| format!("{}番目のイベントの2Pの盤面が不正です", i))?,
                    ],
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let frames: Vec<MatchFrame> = decoded
            .into_iter()
            .enumerate()
            .filter(|(i, _)| match events.get(i + 1) {
                Some(next) => !is_superseded(&events[*i], next),
                None => true,
            })
            .map(|(_, frame)| frame)
            .collect();
        vlog!(
            "[対戦] イベント{}件 → フレーム{}件",
            events.len(),
            frames.len()
        );
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn is_superseded(event: &JsonEvent, next: &JsonEvent) -> bool {
    event.frame == next.frame
        || (event.json_state_1p == next.json_state_1p && event.json_state_2p == next.json_state_2p)
}
