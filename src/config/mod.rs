//! Configuration loading and management for the payroll engine.
//!
//! This module loads the organization's payroll settings and per-employee
//! salary overrides from YAML files. Settings are validated at load time so a
//! typo in the weekly-off day fails fast instead of changing every slip.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/plant").unwrap();
//! println!("Weekly off: {}", config.settings().weekly_off_day_name());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AdvanceScope, EmployeeRate, PayrollSettings, RecommitPolicy};
