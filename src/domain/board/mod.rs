// 盤面関連のドメイン層

pub mod cell;
pub mod grid;
pub mod pfen;

pub use cell::{Cell, Color, ColorSet};
pub use grid::{Cells, Grid, Snapshot};
