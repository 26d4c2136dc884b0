// core/mod.rs

//! # Core Module
//!
//! The value model, environment lookup, `${NAME}` substitution, argument
//! merging and the YAML loader that ties them together.

pub mod env;
pub mod loader;
pub mod merge;
pub mod substitution;
pub mod value;
