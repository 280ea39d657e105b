// 再構成の設定

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// 棋譜再構成の設定
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// 最後の盤面だけを表示する終端ターンを付け足すか
    pub terminal_turn: bool,
    /// 想定手数。指定があれば、棋譜がこれ以下の長さのときだけ終端ターンを付ける
    pub expected_turns: Option<usize>,
}

impl ReplayConfig {
    /// 終端ターンなし（コア部分のみ）
    pub fn core_only() -> Self {
        Self {
            terminal_turn: false,
            expected_turns: None,
        }
    }

    pub fn with_expected_turns(mut self, turns: usize) -> Self {
        self.expected_turns = Some(turns);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.expected_turns.is_some() && !self.terminal_turn {
            return Err(anyhow!(
                "想定手数は終端ターンを付ける場合にのみ指定できます"
            ));
        }
        Ok(())
    }

    /// decisions 手の棋譜に終端ターンを付けるか
    pub fn wants_terminal_turn(&self, decisions: usize) -> bool {
        self.terminal_turn && self.expected_turns.map_or(true, |n| decisions <= n)
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            terminal_turn: true,
            expected_turns: None,
        }
    }
}
