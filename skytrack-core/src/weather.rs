//! Observing-site meteorology.
//!
//! Atmospheric refraction depends on the air density along the line of
//! sight, which the refraction stage models from the site temperature and
//! pressure. Humidity is carried for completeness; the Bennett formula the
//! engine uses does not consume it.

/// Site weather sample used by the refraction stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weather {
    /// Ambient temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Station pressure in hectopascals (millibars).
    pub pressure_hpa: f64,
    /// Relative humidity, 0.0 to 1.0.
    pub relative_humidity: f64,
}

impl Weather {
    pub fn new(temperature_c: f64, pressure_hpa: f64, relative_humidity: f64) -> Self {
        Self {
            temperature_c,
            pressure_hpa,
            relative_humidity,
        }
    }
}

/// Standard conditions: 10 C, 1010 hPa, 50% humidity — the reference
/// atmosphere the Bennett refraction constants are fitted to.
impl Default for Weather {
    fn default() -> Self {
        Self {
            temperature_c: 10.0,
            pressure_hpa: 1010.0,
            relative_humidity: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_atmosphere() {
        let w = Weather::default();
        assert_eq!(w.temperature_c, 10.0);
        assert_eq!(w.pressure_hpa, 1010.0);
    }
}
