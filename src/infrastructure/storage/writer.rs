// 再構成結果の書き出し

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::replay::{Replay, Turn};
use crate::domain::board::Snapshot;
use crate::domain::piece::DecisionRecord;

/// 1手分の書き出し形式
#[derive(Serialize)]
struct TurnRecord<'a> {
    decision: DecisionRecord,
    boards: Vec<&'a Snapshot>,
    scores: Vec<[u64; 2]>,
}

impl<'a> From<&'a Turn> for TurnRecord<'a> {
    fn from(turn: &'a Turn) -> Self {
        Self {
            decision: turn.record(),
            boards: turn.frames.iter().map(|f| &f.board).collect(),
            scores: turn.frames.iter().map(|f| f.scores()).collect(),
        }
    }
}

/// タイムラインを書き出すためのtrait
pub trait ReplayWriter {
    /// 1手分を書き込む
    fn write_turn(&mut self, turn: &Turn) -> Result<()>;

    /// 再構成結果の全手を書き込む
    fn write_replay(&mut self, replay: &Replay) -> Result<()> {
        for turn in &replay.turns {
            self.write_turn(turn)?;
        }
        Ok(())
    }

    /// 書き込みを完了（フラッシュ）
    fn flush(&mut self) -> Result<()>;

    /// 書き込んだ手数
    fn count(&self) -> u64;
}

/// 出力フォーマット
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    /// JSON Lines形式（1行1手）
    #[default]
    JsonLines,
    /// JSON配列形式
    JsonArray,
}

/// JSONでの書き出し
pub struct JsonReplayWriter<W: Write> {
    writer: W,
    count: u64,
    format: ExportFormat,
    finished: bool,
}

impl<W: Write> JsonReplayWriter<W> {
    pub fn new(mut writer: W, format: ExportFormat) -> Result<Self> {
        if format == ExportFormat::JsonArray {
            writer.write_all(b"[\n")?;
        }
        Ok(Self {
            writer,
            count: 0,
            format,
            finished: false,
        })
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }
}

impl<W: Write> ReplayWriter for JsonReplayWriter<W> {
    fn write_turn(&mut self, turn: &Turn) -> Result<()> {
        if self.finished {
            anyhow::bail!("書き込み完了後に{}手目を書き込もうとしました", turn.index + 1);
        }
        let json = serde_json::to_string(&TurnRecord::from(turn))?;
        match self.format {
            ExportFormat::JsonLines => {
                writeln!(self.writer, "{}", json)?;
            }
            ExportFormat::JsonArray => {
                if self.count > 0 {
                    writeln!(self.writer, ",")?;
                }
                write!(self.writer, "  {}", json)?;
            }
        }
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.finished && self.format == ExportFormat::JsonArray {
            writeln!(self.writer, "\n]")?;
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<W: Write> Drop for JsonReplayWriter<W> {
    fn drop(&mut self) {
        let _ = ReplayWriter::flush(self);
    }
}

/// メモリ内への書き出し（テスト用）
#[derive(Default)]
pub struct MemoryReplayWriter {
    turns: Vec<Turn>,
}

impl MemoryReplayWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

impl ReplayWriter for MemoryReplayWriter {
    fn write_turn(&mut self, turn: &Turn) -> Result<()> {
        self.turns.push(turn.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn count(&self) -> u64 {
        self.turns.len() as u64
    }
}
