// シミュレータが出力する棋譜JSONの型

use crate::application::replay::ReplayInput;
use crate::domain::piece::{DecisionRecord, Tumo};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// とこぷよ1手分の思考結果
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonDecision {
    pub think_ms: i64,
    #[serde(default)]
    pub log_output: String,
    /// 先頭が実際に打った手、以降は読み筋
    pub decisions: Vec<DecisionRecord>,
}

/// とこぷよ（1P）の棋譜
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kifu1P {
    pub date: String,
    pub score: u64,
    pub visible_tumos: usize,
    /// ["RR", "YG", ...]
    pub tumos: Vec<String>,
    pub json_decisions: Vec<JsonDecision>,
    #[serde(default)]
    pub url: String,
}

/// 結果一覧に表示する要約
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialSummary {
    pub turns: usize,
    pub score: u64,
    pub visible_tumos: usize,
    /// 平均思考時間（着手がなければ -1）
    pub average_think_ms: f64,
}

impl Kifu1P {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("1P棋譜のJSONが不正です")
    }

    /// 再構成の入力に変換（各手の先頭の着手を使う）
    pub fn to_replay_input(&self) -> Result<ReplayInput> {
        let tumos = Tumo::parse_seq(&self.tumos)?;
        let decisions = self
            .json_decisions
            .iter()
            .enumerate()
            .map(|(i, d)| {
                d.decisions
                    .first()
                    .copied()
                    .ok_or_else(|| anyhow!("{}手目の着手が空です (decision_index={})", i + 1, i))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ReplayInput::new(tumos, decisions))
    }

    pub fn summary(&self) -> TrialSummary {
        let turns = self.json_decisions.len();
        let average_think_ms = if turns == 0 {
            -1.0
        } else {
            let total: i64 = self.json_decisions.iter().map(|d| d.think_ms).sum();
            total as f64 / turns as f64
        };
        TrialSummary {
            turns,
            score: self.score,
            visible_tumos: self.visible_tumos,
            average_think_ms,
        }
    }
}

/// 対戦中の片方のプレイヤーの状態
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonState {
    pub tumo_index: usize,
    /// pfen-like の盤面
    pub field: String,
    pub score: u64,
    pub ojama_fixed: usize,
    pub ojama_ongoing: usize,
    pub current_chain: usize,
}

/// 対戦の1イベント
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEvent {
    pub frame: u64,
    pub json_state_1p: JsonState,
    pub json_state_2p: JsonState,
}

/// 1試合分
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JsonMatch {
    pub won_1p: bool,
    pub tumos: Vec<String>,
    pub json_events: Vec<JsonEvent>,
}

/// 対戦（2P）の棋譜
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kifu2P {
    pub date: String,
    pub win_count_1p: usize,
    pub win_count_2p: usize,
    pub visible_tumos: usize,
    pub json_matches: Vec<JsonMatch>,
}

/// 勝者
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "1P")]
    Player1,
    #[serde(rename = "2P")]
    Player2,
}

/// 試合一覧に表示する要約
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub winner: Winner,
    pub match_index: usize,
    /// 最後のイベントのフレーム番号
    pub frames: u64,
    pub score_1p: u64,
    pub score_2p: u64,
}

impl JsonMatch {
    /// 最後のイベントから要約を作る（イベントがなければエラー）
    pub fn summary(&self, match_index: usize) -> Result<MatchSummary> {
        let last = self
            .json_events
            .last()
            .ok_or_else(|| anyhow!("{}試合目にイベントがありません", match_index + 1))?;
        Ok(MatchSummary {
            winner: if self.won_1p {
                Winner::Player1
            } else {
                Winner::Player2
            },
            match_index,
            frames: last.frame,
            score_1p: last.json_state_1p.score,
            score_2p: last.json_state_2p.score,
        })
    }
}

impl Kifu2P {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("2P棋譜のJSONが不正です")
    }

    /// 全試合の要約
    pub fn summaries(&self) -> Result<Vec<MatchSummary>> {
        self.json_matches
            .iter()
            .enumerate()
            .map(|(i, m)| m.summary(i))
            .collect()
    }
}
