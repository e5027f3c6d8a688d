//! Host telemetry snapshot collector for a self-hosted dashboard.
//!
//! The collectors read kernel pseudo-files and run `df` through the
//! [`ports`] traits, degrade to neutral values on failure, and are combined
//! by [`collector::Collector`] into one [`types::TelemetrySnapshot`].

pub mod collector;
pub mod config;
pub mod cpu;
pub mod distro;
pub mod error;
pub mod http;
pub mod memory;
pub mod mock;
pub mod ports;
pub mod state;
pub mod storage;
pub mod types;
