pub mod frame;
pub mod plan;
pub mod sequence;
