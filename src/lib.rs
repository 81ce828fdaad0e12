// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod lookup;
pub mod matcher;
pub mod model;
pub mod progress;
pub mod render;
pub mod sentences;
pub mod specs;
pub mod store;

pub use error::{Error, Result};
