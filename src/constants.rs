/// Name reported to MCP clients
pub const SERVER_NAME: &str = "mcp-weather-guidance";

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "mcp_weather_guidance=info";

/// Prefix for environment variable overrides of the runtime config
pub const ENV_PREFIX: &str = "WEATHER_GUIDANCE";

/// Window used by the detailed statistics when the caller does not pick one
pub const DEFAULT_WINDOW_HOURS: usize = 12;

/// Upper bound for a requested window; forecast providers return 48 hourly points
pub const MAX_WINDOW_HOURS: usize = 48;

/// Relative humidity assumed when a sample does not carry one (%)
pub const DEFAULT_HUMIDITY: f64 = 50.0;

/// Window of the badge and sentence summary (hours)
pub const SUMMARY_WINDOW_HOURS: usize = 6;

/// Window used for precipitation onset in the summary (hours)
pub const ONSET_WINDOW_HOURS: usize = 3;

/// Summary text when there is nothing to summarize
pub const NO_DATA_TEXT: &str = "No weather data available for guidance.";
