//! Book catalog service used to exercise `errkit` over HTTP
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod logging;
pub mod routes;

pub use config::{CliOverrides, ConfigError, DemoConfig};
