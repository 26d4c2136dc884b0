// utils/mod.rs

pub mod display;
pub mod logging;
