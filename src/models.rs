use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::apparent::{round_half_up, round_to_tenth};
use crate::constants::DEFAULT_HUMIDITY;
use crate::error::{ensure_finite, ensure_in_range, ensure_non_negative, GuidanceError};

// ============================================================================
// Forecast Input Models
// ============================================================================

/// One hour of forecast data.
///
/// Sequences of samples are expected in ascending `timestamp` order; nothing
/// here sorts or de-duplicates them. Wind speed is carried in km/h, the unit
/// the advice thresholds are written against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlySample {
    /// Start of the hour, RFC 3339 or `YYYY-MM-DDTHH:MM` (read as UTC)
    #[serde(deserialize_with = "deserialize_timestamp")]
    #[schemars(with = "String")]
    pub timestamp: DateTime<Utc>,
    /// Measured air temperature in Celsius
    pub air_temperature: f64,
    /// Apparent temperature in Celsius, when the source provides one
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    /// Precipitation probability (0-100%)
    pub precipitation_probability: f64,
    /// Precipitation amount in mm
    pub precipitation_amount: f64,
    /// Wind speed in km/h
    #[serde(rename = "windSpeed")]
    pub wind_speed_kmh: f64,
    /// UV index
    pub uv_index: f64,
    /// Relative humidity (0-100%), defaults to 50 when absent
    #[serde(default)]
    pub relative_humidity: Option<f64>,
}

impl HourlySample {
    /// Create a calm, dry sample at the given air temperature
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, air_temperature: f64) -> Self {
        Self {
            timestamp,
            air_temperature,
            apparent_temperature: None,
            precipitation_probability: 0.0,
            precipitation_amount: 0.0,
            wind_speed_kmh: 0.0,
            uv_index: 0.0,
            relative_humidity: None,
        }
    }

    #[must_use]
    pub fn with_apparent(mut self, apparent: f64) -> Self {
        self.apparent_temperature = Some(apparent);
        self
    }

    #[must_use]
    pub fn with_precipitation(mut self, probability: f64, amount: f64) -> Self {
        self.precipitation_probability = probability;
        self.precipitation_amount = amount;
        self
    }

    #[must_use]
    pub fn with_wind_kmh(mut self, wind_speed_kmh: f64) -> Self {
        self.wind_speed_kmh = wind_speed_kmh;
        self
    }

    #[must_use]
    pub fn with_uv(mut self, uv_index: f64) -> Self {
        self.uv_index = uv_index;
        self
    }

    #[must_use]
    pub fn with_humidity(mut self, humidity: f64) -> Self {
        self.relative_humidity = Some(humidity);
        self
    }

    /// Relative humidity, or the 50% default when the source omitted it
    #[must_use]
    pub fn humidity_or_default(&self) -> f64 {
        self.relative_humidity.unwrap_or(DEFAULT_HUMIDITY)
    }

    /// Apparent temperature as delivered, falling back to air temperature
    #[must_use]
    pub fn apparent_or_air(&self) -> f64 {
        self.apparent_temperature
            .filter(|value| value.is_finite())
            .unwrap_or(self.air_temperature)
    }

    /// Calendar date of the sample.
    ///
    /// No timezone conversion is applied; the date is read straight off the
    /// stored timestamp.
    #[must_use]
    pub fn wall_clock_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Check every numeric field before it reaches an aggregate
    pub fn validate(&self) -> Result<(), GuidanceError> {
        ensure_finite("airTemperature", self.air_temperature)?;
        if let Some(apparent) = self.apparent_temperature {
            ensure_finite("apparentTemperature", apparent)?;
        }
        ensure_in_range(
            "precipitationProbability",
            self.precipitation_probability,
            0.0,
            100.0,
        )?;
        ensure_non_negative("precipitationAmount", self.precipitation_amount)?;
        ensure_non_negative("windSpeed", self.wind_speed_kmh)?;
        ensure_non_negative("uvIndex", self.uv_index)?;
        if let Some(humidity) = self.relative_humidity {
            ensure_in_range("relativeHumidity", humidity, 0.0, 100.0)?;
        }
        Ok(())
    }
}

/// Parse the timestamp formats hourly forecast providers emit
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, GuidanceError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| GuidanceError::invalid_input(format!("unrecognized timestamp '{raw}'")))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

// ============================================================================
// Statistics Models
// ============================================================================

/// Display statistics over a window, rounded for presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub min_apparent: i32,
    pub max_apparent: i32,
    pub avg_apparent: i32,
    pub max_precipitation_probability: i32,
    /// mm, one decimal
    pub total_precipitation: f64,
    #[serde(rename = "maxUV")]
    pub max_uv: i32,
    /// km/h
    pub max_wind: i32,
}

/// Unrounded aggregates, compared against thresholds before any rounding
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawWindowStats {
    pub min_apparent: f64,
    pub max_apparent: f64,
    pub avg_apparent: f64,
    pub max_precipitation_probability: f64,
    pub total_precipitation: f64,
    pub max_uv: f64,
    pub max_wind: f64,
}

impl RawWindowStats {
    /// Round to the presentation precision
    #[must_use]
    pub fn rounded(&self) -> WindowStats {
        WindowStats {
            min_apparent: round_half_up(self.min_apparent) as i32,
            max_apparent: round_half_up(self.max_apparent) as i32,
            avg_apparent: round_half_up(self.avg_apparent) as i32,
            max_precipitation_probability: round_half_up(self.max_precipitation_probability)
                as i32,
            total_precipitation: round_to_tenth(self.total_precipitation),
            max_uv: round_half_up(self.max_uv) as i32,
            max_wind: round_half_up(self.max_wind) as i32,
        }
    }
}

// ============================================================================
// Advice Models
// ============================================================================

/// Grouping of advisory items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Clothing,
    Accessories,
    Safety,
    Comfort,
}

impl Category {
    /// Order in which groups are presented
    pub const DISPLAY_ORDER: [Category; 4] = [
        Category::Clothing,
        Category::Accessories,
        Category::Safety,
        Category::Comfort,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Accessories => "Accessories",
            Category::Safety => "Safety",
            Category::Comfort => "Comfort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    #[must_use]
    pub fn display_label(self) -> &'static str {
        match self {
            Severity::High => "Important",
            Severity::Medium => "Recommended",
            Severity::Low => "Tip",
        }
    }
}

/// One recommendation, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryItem {
    pub id: &'static str,
    pub category: Category,
    pub severity: Severity,
    pub message: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Short badges plus a one-sentence outlook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisorySummary {
    pub badges: Vec<String>,
    pub text: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetGuidanceRequest {
    /// Hourly samples, oldest first
    pub hours: Vec<HourlySample>,
    /// Number of leading hours to aggregate
    pub window_hours: Option<usize>,
    /// Recompute apparent temperature from air temperature, humidity and wind
    pub resolve_apparent: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAdviceSummaryRequest {
    /// Hourly samples, oldest first
    pub hours: Vec<HourlySample>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ResolveApparentRequest {
    /// Air temperature in Celsius
    pub air_temperature: f64,
    /// Relative humidity (0-100%), defaults to 50
    pub relative_humidity: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed_ms: f64,
    /// Apparent temperature measured by the source, if any
    pub measured_apparent: Option<f64>,
}
