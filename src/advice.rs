//! Advice rule engine
//!
//! Two independent outputs are derived from the leading hours of a forecast:
//!
//! - [`generate_advisory_items`]: categorized recommendations driven by the
//!   display statistics of a caller-chosen window.
//! - [`build_advice`]: badges plus one sentence over a fixed 6-hour window,
//!   with a 3-hour sub-window for precipitation onset.
//!
//! The two rule sets use different thresholds (wind caution fires at 30 km/h
//! for items but at 10 km/h for badges). They are kept apart on purpose;
//! merging them would change what users see.

use crate::constants::{NO_DATA_TEXT, ONSET_WINDOW_HOURS, SUMMARY_WINDOW_HOURS};
use crate::error::GuidanceError;
use crate::models::{AdvisoryItem, AdvisorySummary, Category, HourlySample, Severity, WindowStats};
use crate::stats::{leading_window, raw_window_stats};

// Advisory item thresholds (display statistics: °C, %, mm, UV, km/h)
const COLD_EXTREME_C: i32 = 0;
const COLD_MODERATE_C: i32 = 10;
const HOT_EXTREME_C: i32 = 30;
const HOT_MODERATE_C: i32 = 25;
const SWING_C: i32 = 15;
const RAIN_HEAVY_POP: i32 = 70;
const RAIN_HEAVY_MM: f64 = 2.0;
const RAIN_LIGHT_POP: i32 = 40;
const RAIN_LIGHT_MM: f64 = 0.5;
const UV_EXTREME: i32 = 8;
const UV_MODERATE: i32 = 6;
const UV_MILD: i32 = 3;
const WIND_EXTREME_KMH: i32 = 50;
const WIND_MODERATE_KMH: i32 = 30;
const IDEAL_MIN_C: i32 = 20;
const IDEAL_MAX_C: i32 = 25;
const IDEAL_MAX_POP: i32 = 30;
const IDEAL_MAX_WIND_KMH: i32 = 20;

// Summary thresholds (unrounded aggregates)
const SUMMARY_RAIN_LIKELY_POP: f64 = 60.0;
const SUMMARY_RAIN_POSSIBLE_POP: f64 = 30.0;
const SUMMARY_RAIN_MIN_MM: f64 = 0.2;
const SUMMARY_UV: f64 = 6.0;
const SUMMARY_WIND_KMH: f64 = 10.0;
const SUMMARY_HOT_C: f64 = 25.0;
const SUMMARY_FREEZING_C: f64 = 0.0;
const SUMMARY_PLEASANT_C: f64 = 15.0;

pub const BADGE_UMBRELLA: &str = "Umbrella recommended";
pub const BADGE_SUNSCREEN: &str = "Sunscreen recommended";
pub const BADGE_WIND: &str = "Wind caution";
pub const BADGE_HEAT: &str = "Heat comfort tips";
pub const BADGE_LAYERS: &str = "Layered clothing recommended";

const SUMMARY_PREFIX: &str = "Weather conditions for the next 6 hours: ";

/// Every message template an advisory item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvisoryKind {
    HeavyCoat,
    WarmLayers,
    LightClothing,
    ComfortableClothing,
    LayeredClothing,
    UmbrellaRain,
    UmbrellaMaybe,
    SunscreenHigh,
    SunscreenMedium,
    Sunglasses,
    WindWarning,
    WindCaution,
    PerfectWeather,
}

impl AdvisoryKind {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            AdvisoryKind::HeavyCoat => "heavy-coat",
            AdvisoryKind::WarmLayers => "warm-layers",
            AdvisoryKind::LightClothing => "light-clothing",
            AdvisoryKind::ComfortableClothing => "comfortable-clothing",
            AdvisoryKind::LayeredClothing => "layered-clothing",
            AdvisoryKind::UmbrellaRain => "umbrella-rain",
            AdvisoryKind::UmbrellaMaybe => "umbrella-maybe",
            AdvisoryKind::SunscreenHigh => "sunscreen-high",
            AdvisoryKind::SunscreenMedium => "sunscreen-medium",
            AdvisoryKind::Sunglasses => "sunglasses",
            AdvisoryKind::WindWarning => "wind-warning",
            AdvisoryKind::WindCaution => "wind-caution",
            AdvisoryKind::PerfectWeather => "perfect-weather",
        }
    }

    #[must_use]
    pub fn category(self) -> Category {
        match self {
            AdvisoryKind::HeavyCoat
            | AdvisoryKind::WarmLayers
            | AdvisoryKind::LightClothing
            | AdvisoryKind::ComfortableClothing
            | AdvisoryKind::LayeredClothing => Category::Clothing,
            AdvisoryKind::UmbrellaRain | AdvisoryKind::UmbrellaMaybe => Category::Accessories,
            AdvisoryKind::SunscreenHigh
            | AdvisoryKind::SunscreenMedium
            | AdvisoryKind::WindWarning => Category::Safety,
            AdvisoryKind::Sunglasses | AdvisoryKind::WindCaution | AdvisoryKind::PerfectWeather => {
                Category::Comfort
            }
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            AdvisoryKind::HeavyCoat
            | AdvisoryKind::UmbrellaRain
            | AdvisoryKind::SunscreenHigh
            | AdvisoryKind::WindWarning => Severity::High,
            AdvisoryKind::WarmLayers
            | AdvisoryKind::LightClothing
            | AdvisoryKind::LayeredClothing
            | AdvisoryKind::UmbrellaMaybe
            | AdvisoryKind::SunscreenMedium
            | AdvisoryKind::WindCaution => Severity::Medium,
            AdvisoryKind::ComfortableClothing
            | AdvisoryKind::Sunglasses
            | AdvisoryKind::PerfectWeather => Severity::Low,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            AdvisoryKind::HeavyCoat => {
                "Freezing temperatures ahead. Wear a heavy coat, gloves and a warm hat."
            }
            AdvisoryKind::WarmLayers => "It will be chilly. Bring a jacket or warm layers.",
            AdvisoryKind::LightClothing => {
                "Hot conditions expected. Wear light, breathable clothing and stay hydrated."
            }
            AdvisoryKind::ComfortableClothing => {
                "Warm weather ahead. Light, comfortable clothing is a good choice."
            }
            AdvisoryKind::LayeredClothing => {
                "Large temperature swings expected. Dress in layers you can adjust."
            }
            AdvisoryKind::UmbrellaRain => "Rain is likely. Take an umbrella or a rain jacket.",
            AdvisoryKind::UmbrellaMaybe => {
                "Showers are possible. Consider carrying a compact umbrella."
            }
            AdvisoryKind::SunscreenHigh => {
                "Very high UV levels. Apply SPF 50+ sunscreen and avoid midday sun."
            }
            AdvisoryKind::SunscreenMedium => "High UV levels. Apply sunscreen before going out.",
            AdvisoryKind::Sunglasses => "Moderate UV. Sunglasses will keep you comfortable.",
            AdvisoryKind::WindWarning => {
                "Strong winds expected. Secure loose objects and take care outdoors."
            }
            AdvisoryKind::WindCaution => "Breezy conditions. A windproof layer will help.",
            AdvisoryKind::PerfectWeather => {
                "Near-perfect weather. A great time for outdoor activities."
            }
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            AdvisoryKind::HeavyCoat => "🧥",
            AdvisoryKind::WarmLayers => "🧣",
            AdvisoryKind::LightClothing => "👕",
            AdvisoryKind::ComfortableClothing => "👚",
            AdvisoryKind::LayeredClothing => "🧶",
            AdvisoryKind::UmbrellaRain => "☔",
            AdvisoryKind::UmbrellaMaybe => "🌂",
            AdvisoryKind::SunscreenHigh => "🧴",
            AdvisoryKind::SunscreenMedium => "🧴",
            AdvisoryKind::Sunglasses => "🕶️",
            AdvisoryKind::WindWarning => "🌪️",
            AdvisoryKind::WindCaution => "💨",
            AdvisoryKind::PerfectWeather => "🌤️",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            AdvisoryKind::HeavyCoat => "#1e3a8a",
            AdvisoryKind::WarmLayers => "#2563eb",
            AdvisoryKind::LightClothing => "#dc2626",
            AdvisoryKind::ComfortableClothing => "#f59e0b",
            AdvisoryKind::LayeredClothing => "#7c3aed",
            AdvisoryKind::UmbrellaRain => "#0369a1",
            AdvisoryKind::UmbrellaMaybe => "#0ea5e9",
            AdvisoryKind::SunscreenHigh => "#b91c1c",
            AdvisoryKind::SunscreenMedium => "#ea580c",
            AdvisoryKind::Sunglasses => "#ca8a04",
            AdvisoryKind::WindWarning => "#991b1b",
            AdvisoryKind::WindCaution => "#64748b",
            AdvisoryKind::PerfectWeather => "#16a34a",
        }
    }
}

impl From<AdvisoryKind> for AdvisoryItem {
    fn from(kind: AdvisoryKind) -> Self {
        Self {
            id: kind.id(),
            category: kind.category(),
            severity: kind.severity(),
            message: kind.message(),
            icon: kind.icon(),
            color: kind.color(),
        }
    }
}

/// Categorized advisory items for a window, in rule order: clothing, swing,
/// rain, UV, wind, ideal conditions.
#[must_use]
pub fn generate_advisory_items(stats: &WindowStats) -> Vec<AdvisoryItem> {
    let mut kinds = Vec::new();

    // at most one of the four temperature rules fires
    if stats.min_apparent <= COLD_EXTREME_C {
        kinds.push(AdvisoryKind::HeavyCoat);
    } else if stats.min_apparent <= COLD_MODERATE_C {
        kinds.push(AdvisoryKind::WarmLayers);
    } else if stats.max_apparent >= HOT_EXTREME_C {
        kinds.push(AdvisoryKind::LightClothing);
    } else if stats.max_apparent >= HOT_MODERATE_C {
        kinds.push(AdvisoryKind::ComfortableClothing);
    }

    if stats.max_apparent - stats.min_apparent > SWING_C {
        kinds.push(AdvisoryKind::LayeredClothing);
    }

    if stats.max_precipitation_probability >= RAIN_HEAVY_POP
        || stats.total_precipitation > RAIN_HEAVY_MM
    {
        kinds.push(AdvisoryKind::UmbrellaRain);
    } else if stats.max_precipitation_probability >= RAIN_LIGHT_POP
        || stats.total_precipitation > RAIN_LIGHT_MM
    {
        kinds.push(AdvisoryKind::UmbrellaMaybe);
    }

    if stats.max_uv >= UV_EXTREME {
        kinds.push(AdvisoryKind::SunscreenHigh);
    } else if stats.max_uv >= UV_MODERATE {
        kinds.push(AdvisoryKind::SunscreenMedium);
    } else if stats.max_uv >= UV_MILD {
        kinds.push(AdvisoryKind::Sunglasses);
    }

    if stats.max_wind >= WIND_EXTREME_KMH {
        kinds.push(AdvisoryKind::WindWarning);
    } else if stats.max_wind >= WIND_MODERATE_KMH {
        kinds.push(AdvisoryKind::WindCaution);
    }

    if (IDEAL_MIN_C..=IDEAL_MAX_C).contains(&stats.avg_apparent)
        && stats.max_precipitation_probability < IDEAL_MAX_POP
        && stats.max_wind < IDEAL_MAX_WIND_KMH
    {
        kinds.push(AdvisoryKind::PerfectWeather);
    }

    tracing::debug!(?kinds, "advisory rules fired");
    kinds.into_iter().map(AdvisoryItem::from).collect()
}

/// Badges and a one-sentence outlook for the next 6 hours.
///
/// An empty sequence is not an error; it yields no badges and a fixed
/// "no data" sentence.
pub fn build_advice(hours: &[HourlySample]) -> Result<AdvisorySummary, GuidanceError> {
    if hours.is_empty() {
        return Ok(AdvisorySummary {
            badges: Vec::new(),
            text: NO_DATA_TEXT.to_string(),
        });
    }

    let six = raw_window_stats(leading_window(hours, SUMMARY_WINDOW_HOURS))?;
    let onset = raw_window_stats(leading_window(hours, ONSET_WINDOW_HOURS))?;
    let max_pop_3h = onset.max_precipitation_probability;
    let total_precip_3h = onset.total_precipitation;

    let mut badges = Vec::new();
    if max_pop_3h >= SUMMARY_RAIN_LIKELY_POP && total_precip_3h >= SUMMARY_RAIN_MIN_MM {
        badges.push(BADGE_UMBRELLA.to_string());
    }
    if six.max_uv >= SUMMARY_UV {
        badges.push(BADGE_SUNSCREEN.to_string());
    }
    if six.max_wind >= SUMMARY_WIND_KMH {
        badges.push(BADGE_WIND.to_string());
    }
    if six.avg_apparent > SUMMARY_HOT_C {
        badges.push(BADGE_HEAT.to_string());
    }
    if six.avg_apparent < SUMMARY_FREEZING_C {
        badges.push(BADGE_LAYERS.to_string());
    }

    let mut text = String::from(SUMMARY_PREFIX);
    text.push_str(temperature_clause(six.avg_apparent));

    if max_pop_3h >= SUMMARY_RAIN_LIKELY_POP {
        text.push_str(", with rain likely in the next 3 hours");
    } else if max_pop_3h >= SUMMARY_RAIN_POSSIBLE_POP {
        text.push_str(", with possible precipitation");
    }
    if six.max_wind >= SUMMARY_WIND_KMH {
        text.push_str(", and notable wind activity");
    }
    if six.max_uv >= SUMMARY_UV {
        text.push_str(", with elevated UV exposure");
    }
    text.push('.');

    Ok(AdvisorySummary { badges, text })
}

fn temperature_clause(avg_apparent: f64) -> &'static str {
    if avg_apparent < SUMMARY_FREEZING_C {
        "very cold temperatures with possible wind chill effects"
    } else if avg_apparent > SUMMARY_HOT_C {
        "warm to hot conditions with elevated comfort concerns"
    } else if avg_apparent >= SUMMARY_PLEASANT_C {
        "pleasant temperatures suitable for most outdoor activities"
    } else {
        "cool conditions requiring appropriate clothing"
    }
}
