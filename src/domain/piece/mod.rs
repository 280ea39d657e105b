// ツモと着手

pub mod decision;
pub mod dropper;
pub mod tumo;

pub use decision::{Decision, DecisionRecord, Rotation};
pub use dropper::PieceDropper;
pub use tumo::Tumo;
