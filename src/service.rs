use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use serde::Serialize;
use std::sync::Arc;

use crate::advice::{build_advice, generate_advisory_items};
use crate::apparent::resolve_apparent_temperature;
use crate::config::GuidanceConfig;
use crate::constants::{DEFAULT_HUMIDITY, SERVER_NAME};
use crate::error::GuidanceError;
use crate::formatters::{format_advice_summary, format_guidance};
use crate::models::{
    AdvisoryItem, AdvisorySummary, GetAdviceSummaryRequest, GetGuidanceRequest,
    ResolveApparentRequest, WindowStats,
};
use crate::stats::{compute_apparent_aware_stats, compute_window_stats};

/// Everything derived for one guidance request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceReport {
    pub window_hours: usize,
    pub apparent_resolved: bool,
    pub stats: WindowStats,
    pub items: Vec<AdvisoryItem>,
    pub summary: AdvisorySummary,
}

/// MCP service exposing the guidance engine as tools
#[derive(Clone)]
pub struct WeatherGuidance {
    config: Arc<GuidanceConfig>,
    tool_router: ToolRouter<Self>,
}

impl WeatherGuidance {
    /// Creates a new service with the given configuration
    pub fn new(config: GuidanceConfig) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Runs statistics, advisory rules and the summary over one request
    pub fn build_report(&self, request: &GetGuidanceRequest) -> Result<GuidanceReport, GuidanceError> {
        let window_hours = request
            .window_hours
            .unwrap_or(self.config.default_window_hours);
        let apparent_resolved = request
            .resolve_apparent
            .unwrap_or(self.config.resolve_apparent_by_default);

        let windowed = if apparent_resolved {
            compute_apparent_aware_stats(&request.hours, window_hours)?
        } else {
            compute_window_stats(&request.hours, window_hours)?
        };

        let items = generate_advisory_items(&windowed.stats);
        let summary = build_advice(&request.hours)?;

        Ok(GuidanceReport {
            window_hours: windowed.window.len(),
            apparent_resolved,
            stats: windowed.stats,
            items,
            summary,
        })
    }
}

fn to_mcp_error(err: GuidanceError) -> McpError {
    match err {
        GuidanceError::InvalidInput { message } => McpError::invalid_params(message, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {}", e), None)
    })
}

#[tool_handler]
impl ServerHandler for WeatherGuidance {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Turns hourly forecast samples into feels-like statistics, categorized \
                clothing and safety advice, and a short outlook with badges. \
                Supply the hourly samples yourself; this server does not fetch forecasts."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherGuidance {
    /// Statistics, advisory items and summary for the next hours
    #[tool(description = "Get weather guidance from hourly forecast samples (oldest first). Each sample needs timestamp, airTemperature (C), precipitationProbability (%), precipitationAmount (mm), windSpeed (km/h), uvIndex, and optionally apparentTemperature and relativeHumidity. window_hours picks how many leading hours feed the statistics; resolve_apparent recomputes feels-like temperatures from heat index and wind chill.")]
    async fn get_weather_guidance(
        &self,
        Parameters(request): Parameters<GetGuidanceRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Building guidance for {} hourly samples (window: {:?})",
            request.hours.len(),
            request.window_hours
        );

        let report = self.build_report(&request).map_err(|e| {
            tracing::warn!("Rejected guidance request: {}", e);
            to_mcp_error(e)
        })?;

        let formatted = format_guidance(
            request.hours.first().map(|sample| sample.wall_clock_date()),
            report.window_hours,
            &report.stats,
            &report.items,
            &report.summary,
        );

        Ok(CallToolResult::success(vec![
            Content::text(formatted),
            Content::text(to_json(&report)?),
        ]))
    }

    /// Badges and one-sentence outlook for the next 6 hours
    #[tool(description = "Get short advice badges and a one-sentence outlook for the next 6 hours from hourly forecast samples (oldest first).")]
    async fn get_advice_summary(
        &self,
        Parameters(request): Parameters<GetAdviceSummaryRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Building advice summary for {} hourly samples", request.hours.len());

        let summary = build_advice(&request.hours).map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![
            Content::text(format_advice_summary(&summary)),
            Content::text(to_json(&summary)?),
        ]))
    }

    /// Feels-like temperature for a single set of readings
    #[tool(description = "Resolve the apparent (feels-like) temperature in C. Uses measured_apparent when given, otherwise the heat index (air >= 27 C and humidity >= 40%), the wind chill (air <= 10 C and wind >= 4.8 m/s), or the air temperature. Wind speed is in m/s; humidity defaults to 50%.")]
    async fn resolve_apparent_temperature(
        &self,
        Parameters(request): Parameters<ResolveApparentRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Resolving apparent temperature for {} C, wind {} m/s",
            request.air_temperature,
            request.wind_speed_ms
        );

        let resolved = resolve_apparent_temperature(
            request.air_temperature,
            request.relative_humidity.unwrap_or(DEFAULT_HUMIDITY),
            request.wind_speed_ms,
            request.measured_apparent,
        )
        .map_err(to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Feels like {:.1}\u{00b0}C",
            resolved
        ))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HourlySample;
    use chrono::{Duration, TimeZone, Utc};
    use rmcp::model::ErrorCode;

    fn hours(count: usize, apparent: f64) -> Vec<HourlySample> {
        let start = Utc.with_ymd_and_hms(2024, 1, 20, 7, 0, 0).unwrap();
        (0..count)
            .map(|i| {
                HourlySample::new(start + Duration::hours(i as i64), apparent + 2.0)
                    .with_apparent(apparent)
                    .with_wind_kmh(18.0)
            })
            .collect()
    }

    fn request(hours: Vec<HourlySample>, window_hours: Option<usize>) -> GetGuidanceRequest {
        GetGuidanceRequest {
            hours,
            window_hours,
            resolve_apparent: None,
        }
    }

    #[test]
    fn test_report_uses_configured_default_window() {
        let service = WeatherGuidance::new(GuidanceConfig::default());
        let report = service.build_report(&request(hours(24, -2.0), None)).unwrap();

        assert_eq!(report.window_hours, 12);
        assert!(!report.apparent_resolved);
        assert_eq!(report.stats.min_apparent, -2);
        assert_eq!(report.items[0].id, "heavy-coat");
        assert!(report.summary.badges.contains(&"Wind caution".to_string()));
    }

    #[test]
    fn test_report_window_shrinks_to_available_hours() {
        let service = WeatherGuidance::new(GuidanceConfig::default());
        let report = service.build_report(&request(hours(4, 18.0), Some(48))).unwrap();
        assert_eq!(report.window_hours, 4);
    }

    #[test]
    fn test_report_for_empty_forecast() {
        let service = WeatherGuidance::new(GuidanceConfig::default());
        let report = service.build_report(&request(Vec::new(), Some(6))).unwrap();
        assert_eq!(report.stats, WindowStats::default());
        assert_eq!(report.summary.text, "No weather data available for guidance.");
    }

    #[test]
    fn test_zero_window_maps_to_invalid_params() {
        let service = WeatherGuidance::new(GuidanceConfig::default());
        let err = service
            .build_report(&request(hours(6, 10.0), Some(0)))
            .unwrap_err();
        assert!(err.is_invalid_input());

        let mcp_err = to_mcp_error(err);
        assert_eq!(mcp_err.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_report_serializes_for_clients() {
        let service = WeatherGuidance::new(GuidanceConfig::default());
        let report = service.build_report(&request(hours(6, 22.0), Some(6))).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(json["windowHours"], 6);
        assert_eq!(json["stats"]["avgApparent"], 22);
        assert!(json["items"].is_array());
        assert!(json["summary"]["text"].as_str().unwrap().starts_with("Weather conditions"));
    }

    #[test]
    fn test_server_info() {
        let service = WeatherGuidance::new(GuidanceConfig::default());
        let info = service.get_info();
        assert_eq!(info.server_info.name, SERVER_NAME);
    }
}
