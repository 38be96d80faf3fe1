//! Weather guidance engine
//!
//! Turns a sequence of hourly forecast samples into window statistics,
//! categorized advisory items and a short badge summary, and exposes the
//! same pipeline as MCP tools.

pub mod advice;
pub mod apparent;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod service;
pub mod stats;

pub use advice::{build_advice, generate_advisory_items, AdvisoryKind};
pub use apparent::resolve_apparent_temperature;
pub use error::GuidanceError;
pub use models::{
    AdvisoryItem, AdvisorySummary, Category, HourlySample, RawWindowStats, Severity, WindowStats,
};
pub use service::WeatherGuidance;
pub use stats::{compute_apparent_aware_stats, compute_window_stats, WindowedStats};

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GuidanceError>;
