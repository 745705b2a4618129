use chrono::{Days, NaiveDate, Utc};
use rand::Rng;

use crate::dto::WeatherForecast;

pub const SUMMARIES: [&str; 10] = [
    "Freezing", "Bracing", "Chilly", "Cool", "Mild", "Warm", "Balmy", "Hot", "Sweltering", "Scorching",
];

pub const DEFAULT_COUNT: u32 = 5;
pub const DEFAULT_MIN: i32 = -20;
pub const DEFAULT_MAX: i32 = 55;

#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherForecastService;

impl WeatherForecastService {
    pub fn new() -> Self {
        Self
    }

    /// Five forecasts in `[-20, 55)`
    pub fn get_default(&self) -> Vec<WeatherForecast> {
        self.get(DEFAULT_COUNT, DEFAULT_MIN, DEFAULT_MAX)
    }

    /// `count` forecasts starting tomorrow, temperatures uniform in `[min, max)`.
    /// Callers validate `max > min`.
    pub fn get(&self, count: u32, min: i32, max: i32) -> Vec<WeatherForecast> {
        self.get_from(Utc::now().date_naive(), count, min, max)
    }

    fn get_from(&self, today: NaiveDate, count: u32, min: i32, max: i32) -> Vec<WeatherForecast> {
        let mut rng = rand::thread_rng();
        (1..=count)
            .map(|day| {
                let date = today.checked_add_days(Days::new(u64::from(day))).unwrap_or(today);
                let temperature_c = if max > min { rng.gen_range(min..max) } else { min };
                let summary = SUMMARIES[rng.gen_range(0..SUMMARIES.len())];
                WeatherForecast::new(date, temperature_c, summary)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_forecast_shape() {
        let forecasts = WeatherForecastService::new().get_default();
        assert_eq!(forecasts.len(), 5);
        for f in &forecasts {
            assert!((DEFAULT_MIN..DEFAULT_MAX).contains(&f.temperature_c));
            assert!(SUMMARIES.contains(&f.summary.as_str()));
        }
    }

    #[test]
    fn dates_are_consecutive_from_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let forecasts = WeatherForecastService::new().get_from(today, 3, 0, 10);
        let dates: Vec<_> = forecasts.iter().map(|f| f.date.to_string()).collect();
        assert_eq!(dates, ["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn narrow_range_is_exact() {
        for f in WeatherForecastService::new().get(20, 7, 8) {
            assert_eq!(f.temperature_c, 7);
        }
    }
}
