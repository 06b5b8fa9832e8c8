pub mod constraint;
pub mod evaluation;
pub mod generation;
