use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

pub const MAX_FORECAST_COUNT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: String,
}

impl WeatherForecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: impl Into<String>) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: ((f64::from(temperature_c) / 0.5556) as i32).saturating_add(32),
            summary: summary.into(),
        }
    }
}

/// Query string of `POST /weatherforecast/generate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateForecastParams {
    pub count: Option<i64>,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl GenerateForecastParams {
    /// Returns `(count, min, max)`
    pub fn validate(&self) -> Result<(u32, i32, i32), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let count = match self.count {
            Some(n) if (1..=i64::from(MAX_FORECAST_COUNT)).contains(&n) => n as u32,
            _ => {
                errors.add("count", format!("'count' must be between 1 and {}.", MAX_FORECAST_COUNT));
                0
            }
        };

        let (min, max) = match (self.min, self.max) {
            (Some(min), Some(max)) if max > min => (min, max),
            (Some(min), Some(max)) => {
                errors.add("max", "'max' must be greater than 'min'.");
                (min, max)
            }
            (min, max) => {
                if min.is_none() {
                    errors.add("min", "'min' must not be empty.");
                }
                if max.is_none() {
                    errors.add("max", "'max' must not be empty.");
                }
                (0, 0)
            }
        };

        errors.into_result().map(|()| (count, min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(count: i64, min: i32, max: i32) -> GenerateForecastParams {
        GenerateForecastParams {
            count: Some(count),
            min: Some(min),
            max: Some(max),
        }
    }

    #[test]
    fn fahrenheit_is_derived() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(WeatherForecast::new(date, 0, "Cool").temperature_f, 32);
        assert_eq!(WeatherForecast::new(date, 100, "Scorching").temperature_f, 211);
        assert_eq!(WeatherForecast::new(date, -20, "Freezing").temperature_f, -3);
    }

    #[test]
    fn extreme_temperatures_saturate() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(WeatherForecast::new(date, 2_147_483_600, "Hot").temperature_f, i32::MAX);
        assert_eq!(WeatherForecast::new(date, i32::MIN, "Freezing").temperature_f, i32::MIN + 32);
    }

    #[test]
    fn generate_params_bounds() {
        assert_eq!(params(3, -5, 10).validate().unwrap(), (3, -5, 10));
        assert!(params(0, -5, 10).validate().unwrap_err().has_field("count"));
        assert!(params(101, -5, 10).validate().unwrap_err().has_field("count"));
        assert!(params(3, 10, 10).validate().unwrap_err().has_field("max"));
        assert!(GenerateForecastParams::default().validate().is_err());
    }
}
