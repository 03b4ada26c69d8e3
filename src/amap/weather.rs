//! 天气查询
//!
//! `extensions=base` 返回实况（lives），`extensions=all` 返回预报（forecasts），
//! 一次请求只会拿到其中一种。

use serde::{Deserialize, Serialize};

use super::client::AmapClient;
use super::models::{lenient_string, Cast, LiveWeather, WeatherResponse};
use crate::error::{AmapError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Live,
    Forecast,
}

impl WeatherKind {
    fn extensions(self) -> &'static str {
        match self {
            WeatherKind::Live => "base",
            WeatherKind::Forecast => "all",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeather {
    #[serde(deserialize_with = "lenient_string")]
    pub weather: String,
    #[serde(deserialize_with = "lenient_string")]
    pub temperature: String,
    #[serde(deserialize_with = "lenient_string")]
    pub humidity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_direction: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_power: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyForecast {
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub week: String,
    #[serde(deserialize_with = "lenient_string")]
    pub day_weather: String,
    #[serde(deserialize_with = "lenient_string")]
    pub night_weather: String,
    #[serde(deserialize_with = "lenient_string")]
    pub day_temp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub night_temp: String,
    #[serde(deserialize_with = "lenient_string")]
    pub day_wind: String,
    #[serde(deserialize_with = "lenient_string")]
    pub night_wind: String,
}

impl From<&Cast> for DailyForecast {
    fn from(cast: &Cast) -> Self {
        Self {
            date: cast.date.clone(),
            week: cast.week.clone(),
            day_weather: cast.day_weather.clone(),
            night_weather: cast.night_weather.clone(),
            day_temp: cast.day_temp.clone(),
            night_temp: cast.night_temp.clone(),
            day_wind: cast.day_wind.clone(),
            night_wind: cast.night_wind.clone(),
        }
    }
}

impl From<&LiveWeather> for CurrentWeather {
    fn from(live: &LiveWeather) -> Self {
        Self {
            weather: live.weather.clone(),
            temperature: live.temperature.clone(),
            humidity: live.humidity.clone(),
            wind_direction: live.wind_direction.clone(),
            wind_power: live.wind_power.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    #[serde(deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string")]
    pub adcode: String,
    #[serde(deserialize_with = "lenient_string")]
    pub report_time: String,
    pub current: Option<CurrentWeather>,
    pub forecast: Vec<DailyForecast>,
}

impl WeatherReport {
    pub fn from_response(resp: &WeatherResponse) -> Self {
        let mut report = WeatherReport::default();

        if let Some(live) = resp.lives.first() {
            report.province = live.province.clone();
            report.city = live.city.clone();
            report.adcode = live.adcode.clone();
            report.report_time = live.report_time.clone();
            report.current = Some(CurrentWeather::from(live));
        }

        if let Some(forecast) = resp.forecasts.first() {
            report.province = forecast.province.clone();
            report.city = forecast.city.clone();
            report.adcode = forecast.adcode.clone();
            report.report_time = forecast.report_time.clone();
            report.forecast = forecast.casts.iter().map(DailyForecast::from).collect();
        }

        report
    }
}

impl AmapClient {
    /// `city` 可以是城市名或 adcode
    pub fn weather(&self, city: &str, kind: WeatherKind) -> Result<WeatherReport> {
        let params = [
            ("city", city.to_string()),
            ("extensions", kind.extensions().to_string()),
            ("output", "JSON".to_string()),
        ];

        let resp: WeatherResponse = self.request("/weather/weatherInfo", &params)?;
        if resp.lives.is_empty() && resp.forecasts.is_empty() {
            return Err(AmapError::NoResult(format!("weather of '{}'", city)));
        }

        Ok(WeatherReport::from_response(&resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_live() {
        let resp: WeatherResponse = serde_json::from_str(
            r#"{"lives": [{"province": "北京", "city": "东城区", "adcode": "110101",
                "weather": "晴", "temperature": "26", "winddirection": "西南",
                "windpower": "≤3", "humidity": "41", "reporttime": "2024-05-01 14:00:00"}]}"#,
        )
        .unwrap();
        let report = WeatherReport::from_response(&resp);
        assert_eq!(report.city, "东城区");
        let current = report.current.unwrap();
        assert_eq!(current.temperature, "26");
        assert_eq!(current.wind_power, "≤3");
        assert!(report.forecast.is_empty());
    }

    #[test]
    fn test_report_from_forecast() {
        let resp: WeatherResponse = serde_json::from_str(
            r#"{"forecasts": [{"city": "杭州市", "reporttime": "2024-05-01 11:00:00", "casts": [
                {"date": "2024-05-01", "week": "3", "dayweather": "多云", "nightweather": "阴", "daytemp": "27", "nighttemp": "18"},
                {"date": "2024-05-02", "week": "4", "dayweather": "小雨", "nightweather": "小雨", "daytemp": "22", "nighttemp": "17"}
            ]}]}"#,
        )
        .unwrap();
        let report = WeatherReport::from_response(&resp);
        assert!(report.current.is_none());
        assert_eq!(report.forecast.len(), 2);
        assert_eq!(report.forecast[1].day_weather, "小雨");
    }
}
