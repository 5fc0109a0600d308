pub mod global;
pub mod lanes;
