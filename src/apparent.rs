//! Apparent ("feels like") temperature
//!
//! Resolves a single apparent temperature from a measured value when the
//! source provides one, otherwise from the heat index (hot and humid), the
//! wind chill (cold and windy) or the air temperature itself, in that order.

use crate::error::{ensure_finite, GuidanceError};

/// Heat index applies from this air temperature (°C)...
pub const HEAT_INDEX_MIN_TEMP_C: f64 = 27.0;
/// ...at or above this relative humidity (%)
pub const HEAT_INDEX_MIN_HUMIDITY: f64 = 40.0;
/// Wind chill applies at or below this air temperature (°C)...
pub const WIND_CHILL_MAX_TEMP_C: f64 = 10.0;
/// ...at or above this wind speed (m/s)
pub const WIND_CHILL_MIN_WIND_MS: f64 = 4.8;

// Rothfusz regression, Celsius form
const HI_C1: f64 = -8.784_694_755_56;
const HI_C2: f64 = 1.611_394_11;
const HI_C3: f64 = 2.338_548_838_89;
const HI_C4: f64 = -0.146_116_05;
const HI_C5: f64 = -0.012_308_094;
const HI_C6: f64 = -0.016_424_827_777_8;
const HI_C7: f64 = 0.002_211_732;
const HI_C8: f64 = 0.000_725_46;
const HI_C9: f64 = -0.000_003_582;

/// Resolve the apparent temperature for one hour.
///
/// A finite `measured` value is returned unchanged. Computed values are
/// rounded to one decimal.
pub fn resolve_apparent_temperature(
    air_temp: f64,
    humidity: f64,
    wind_speed_ms: f64,
    measured: Option<f64>,
) -> Result<f64, GuidanceError> {
    ensure_finite("airTemperature", air_temp)?;
    ensure_finite("relativeHumidity", humidity)?;
    ensure_finite("windSpeed", wind_speed_ms)?;

    if let Some(measured) = measured.filter(|value| value.is_finite()) {
        return Ok(measured);
    }

    let resolved = if air_temp >= HEAT_INDEX_MIN_TEMP_C && humidity >= HEAT_INDEX_MIN_HUMIDITY {
        tracing::trace!(air_temp, humidity, "using heat index");
        heat_index(air_temp, humidity)
    } else if air_temp <= WIND_CHILL_MAX_TEMP_C && wind_speed_ms >= WIND_CHILL_MIN_WIND_MS {
        tracing::trace!(air_temp, wind_speed_ms, "using wind chill");
        wind_chill(air_temp, wind_speed_ms)
    } else {
        air_temp
    };

    Ok(round_to_tenth(resolved))
}

/// Heat index in °C for air temperature `t` (°C) and relative humidity `rh` (%)
#[must_use]
pub fn heat_index(t: f64, rh: f64) -> f64 {
    HI_C1
        + HI_C2 * t
        + HI_C3 * rh
        + HI_C4 * t * rh
        + HI_C5 * t * t
        + HI_C6 * rh * rh
        + HI_C7 * t * t * rh
        + HI_C8 * t * rh * rh
        + HI_C9 * t * t * rh * rh
}

/// Wind chill in °C for air temperature `t` (°C) and wind speed `v` (m/s)
#[must_use]
pub fn wind_chill(t: f64, v: f64) -> f64 {
    let v_pow = v.powf(0.16);
    13.12 + 0.6215 * t - 11.37 * v_pow + 0.3965 * t * v_pow
}

/// Round to the nearest integer, halves toward positive infinity (-2.5 -> -2)
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal, halves toward positive infinity
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

#[must_use]
pub fn kmh_to_ms(kmh: f64) -> f64 {
    kmh / 3.6
}

#[must_use]
pub fn ms_to_kmh(ms: f64) -> f64 {
    ms * 3.6
}
