//! Weather tool backed by Open-Meteo
//!
//! Two lookups per call: geocoding (city name to coordinates) and a 7-day
//! forecast. Both sit behind [`WeatherSource`] so the report shaping below
//! can be tested against canned data.

use async_trait::async_trait;
use chrono::{Duration, Local};
use conductor_domain::ToolCall;
use serde::Deserialize;
use tracing::warn;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// A geocoded location
#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub current: CurrentConditions,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub weather_code: u32,
}

/// Parallel arrays, one entry per forecast day
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weather_code: Vec<u32>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
}

/// Geocoding and forecast lookups
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Best match for a city name, if any
    async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>, String>;

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, String>;
}

pub struct OpenMeteoSource {
    client: reqwest::Client,
}

impl OpenMeteoSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeoLocation>,
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn geocode(&self, city: &str) -> Result<Option<GeoLocation>, String> {
        let response: GeocodingResponse = self
            .client
            .get(GEOCODING_URL)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "zh"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())?;
        Ok(response.results.into_iter().next())
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, String> {
        self.client
            .get(FORECAST_URL)
            .query(&[
                ("latitude", latitude.to_string().as_str()),
                ("longitude", longitude.to_string().as_str()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,weather_code",
                ),
                ("daily", "weather_code,temperature_2m_max,temperature_2m_min"),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())
    }
}

/// WMO weather code to condition label
fn condition_label(code: u32) -> &'static str {
    match code {
        0 => "晴",
        1..=3 => "多云",
        45..=48 => "雾",
        51..=67 => "雨",
        71..=77 => "雪",
        80..=82 => "雨",
        85..=86 => "雪",
        95.. => "雷雨",
        _ => "未知",
    }
}

fn condition_icon(code: u32) -> &'static str {
    match code {
        0 => "☀️",
        1..=3 => "⛅",
        45..=48 => "🌫️",
        51..=67 => "🌧️",
        71..=77 => "❄️",
        80..=82 => "🌧️",
        85..=86 => "❄️",
        95.. => "⛈️",
        _ => "🌡️",
    }
}

/// Label a forecast date: 今天/明天 for an exact match, otherwise month/day
fn date_label(date: &str, today: &str, tomorrow: &str) -> String {
    if date == today {
        return "今天".to_string();
    }
    if date == tomorrow {
        return "明天".to_string();
    }
    match chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => format!(
            "{}/{}",
            chrono::Datelike::month(&parsed),
            chrono::Datelike::day(&parsed)
        ),
        Err(_) => date.to_string(),
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Shape the forecast into the report payload. `None` when the daily
/// series arrives with mismatched lengths; the upstream contract is
/// parallel arrays, but a truncated response must not take down the call.
fn build_report(
    location: &str,
    forecast: &Forecast,
    today: &str,
    tomorrow: &str,
) -> Option<String> {
    let daily = &forecast.daily;
    if daily.weather_code.len() != daily.time.len()
        || daily.temperature_2m_max.len() != daily.time.len()
        || daily.temperature_2m_min.len() != daily.time.len()
    {
        return None;
    }

    let current = serde_json::json!({
        "temp": round(forecast.current.temperature_2m),
        "condition": condition_label(forecast.current.weather_code),
        "humidity": forecast.current.relative_humidity_2m,
        "icon": condition_icon(forecast.current.weather_code),
    });

    let days: Vec<serde_json::Value> = daily
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let code = daily.weather_code[i];
            let max = daily.temperature_2m_max[i];
            let min = daily.temperature_2m_min[i];
            serde_json::json!({
                "date": date_label(time, today, tomorrow),
                "temp": round((max + min) / 2.0),
                "condition": condition_label(code),
                "icon": condition_icon(code),
                "min_temp": round(min),
                "max_temp": round(max),
            })
        })
        .collect();

    Some(
        serde_json::json!({
            "location": location,
            "current": current,
            "forecast": days,
        })
        .to_string(),
    )
}

/// Run one `get_weather` call and return its result payload.
///
/// Every failure path yields a JSON object with an `error` field; the
/// caller embeds whatever comes back into the record as-is.
pub async fn run(source: &dyn WeatherSource, call: &ToolCall) -> String {
    let city = call.get_string("city").unwrap_or_default();
    if city.is_empty() {
        return serde_json::json!({"error": "缺少城市参数"}).to_string();
    }

    let location = match source.geocode(city).await {
        Ok(Some(location)) => location,
        Ok(None) => {
            return serde_json::json!({"error": format!("未找到城市: {}", city)}).to_string();
        }
        Err(e) => {
            warn!(city, error = %e, "geocoding failed");
            return serde_json::json!({"error": "获取天气失败，请稍后再试"}).to_string();
        }
    };

    let forecast = match source.forecast(location.latitude, location.longitude).await {
        Ok(forecast) => forecast,
        Err(e) => {
            warn!(city, error = %e, "forecast lookup failed");
            return serde_json::json!({"error": "获取天气失败，请稍后再试"}).to_string();
        }
    };

    let today = Local::now().format("%Y-%m-%d").to_string();
    let tomorrow = (Local::now() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let name = if location.name.is_empty() {
        city
    } else {
        location.name.as_str()
    };
    match build_report(name, &forecast, &today, &tomorrow) {
        Some(report) => report,
        None => {
            warn!(city, "forecast daily series lengths do not match");
            serde_json::json!({"error": "获取天气失败，请稍后再试"}).to_string()
        }
    }
}
