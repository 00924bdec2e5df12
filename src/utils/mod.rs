pub mod sparse;
pub mod text;
