// commands/mod.rs

pub mod check;
pub mod common_args;
pub mod merge;
