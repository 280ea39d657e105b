// タイムラインの書き出し

pub mod writer;

pub use writer::{ExportFormat, JsonReplayWriter, MemoryReplayWriter, ReplayWriter};
