// アプリケーション層 - 棋譜からタイムラインを組み立てる

pub mod replay;
pub mod versus;

pub use replay::{ReplayConfig, ReplayReconstructor};
pub use versus::MatchTimeline;
