// src/lib.rs

pub mod collect;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod log;
pub mod normalize;
pub mod progress;

pub use error::{Error, RecordError, Result};
