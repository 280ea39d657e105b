// 棋譜フォーマット（文字列からの読み込みのみ）

pub mod format;

pub use format::{
    JsonDecision, JsonEvent, JsonMatch, JsonState, Kifu1P, Kifu2P, MatchSummary, TrialSummary,
    Winner,
};
