// インフラ層 - 棋譜の読み込みと結果の書き出し

pub mod kifu;
pub mod storage;

pub use kifu::{Kifu1P, Kifu2P};
pub use storage::{JsonReplayWriter, ReplayWriter};
