//! Configuration module for register searches
//!
//! Provides `RegisterConfig` and its builder with validation and defaults
//! taken from `utils::constants`.

pub mod builder;
pub mod types;

pub use builder::RegisterConfigBuilder;
pub use types::{MatchModeHandling, RegisterConfig, RetryPolicy, StepTimeouts};
