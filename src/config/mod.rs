//! Configuration management
//!
//! A single JSON file tunes the session heuristics and can switch the
//! forced-presentation path off entirely.

pub mod activation;

pub use activation::ActivatorConfig;
