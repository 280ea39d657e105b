// 棋譜の再構成

pub mod config;
pub mod reconstructor;

pub use config::ReplayConfig;
pub use reconstructor::{Replay, ReplayInput, ReplayReconstructor, Turn};
