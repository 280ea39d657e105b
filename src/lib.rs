// ぷよぷよ棋譜の再構成 - ライブラリモジュール

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};

// 主要な型を再エクスポート
pub use application::replay::{Replay, ReplayConfig, ReplayInput, ReplayReconstructor, Turn};
pub use constants::{H, W};
pub use domain::board::{Cell, Color, Grid, Snapshot};
pub use domain::chain::{ChainResolver, Frame};
pub use domain::piece::{Decision, DecisionRecord, Tumo};
pub use logging::LogConfig;
