pub mod cue;
pub mod document;
pub mod schedule;
