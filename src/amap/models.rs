//! 高德 Web 服务接口的响应结构
//!
//! 高德的 JSON 有几个固定的坑：
//! - 数值字段以字符串返回（"distance": "1234"）
//! - 空的文本字段返回 `[]`
//! - 空的嵌套对象也返回 `[]`（例如公交换乘中没有步行段时 "walking": []）
//!
//! 这里统一在反序列化时转成强类型字段，下游不再接触原始 JSON。

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::coords::Coordinate;
use crate::error::{AmapError, Result};

pub(crate) fn lenient_string<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join(";"),
        _ => String::new(),
    })
}

fn lenient_f64<'de, D>(d: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_u64<'de, D>(d: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.max(0.0) as u64))
                .unwrap_or(0)
        }
        _ => 0,
    })
}

fn object_or_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v).map_err(serde::de::Error::custom),
        _ => Ok(T::default()),
    }
}

fn object_or_none<'de, D, T>(d: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(d)? {
        v @ Value::Object(_) => serde_json::from_value(v)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn list_or_empty<'de, D, T>(d: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(d)? {
        v @ Value::Array(_) => serde_json::from_value(v).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// 解析接口返回的 "lon,lat" 字段
fn parse_location(field: &str, location: &str) -> Result<Coordinate> {
    Coordinate::parse(location)
        .ok_or_else(|| AmapError::Parse(format!("invalid {} location '{}'", field, location)))
}

// ---- 地理编码 /geocode/geo ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub geocodes: Vec<Geocode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geocode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatted_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
}

impl Geocode {
    pub fn coordinate(&self) -> Result<Coordinate> {
        parse_location("geocode", &self.location)
    }
}

// ---- 逆地理编码 /geocode/regeo ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegeocodeResponse {
    #[serde(default, deserialize_with = "object_or_none")]
    pub regeocode: Option<Regeocode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Regeocode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatted_address: String,
    #[serde(
        rename = "addressComponent",
        default,
        deserialize_with = "object_or_default"
    )]
    pub address_component: AddressComponent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub district: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub township: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adcode: String,
    #[serde(rename = "streetNumber", default, deserialize_with = "object_or_default")]
    pub street_number: StreetNumber,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreetNumber {
    #[serde(default, deserialize_with = "lenient_string")]
    pub street: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: String,
}

// ---- POI 搜索 /place/text ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoiSearchResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub pois: Vec<Poi>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Poi {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub distance: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tel: String,
}

// ---- IP 定位 /ip ----

/// 国外或局域网 IP 时各字段为空
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpLocation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rectangle: String,
}

// ---- 路径规划 /direction/* ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionResponse {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(default, deserialize_with = "object_or_default")]
    pub route: Route,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    #[serde(default, deserialize_with = "lenient_string")]
    pub origin: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub destination: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub taxi_cost: f64,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub paths: Vec<Path>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub transits: Vec<Transit>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Path {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub distance: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub strategy: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub tolls: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub toll_distance: u64,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient_string")]
    pub instruction: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub road: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub distance: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transit {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub distance: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub walking_distance: u64,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "object_or_default")]
    pub walking: Walking,
    #[serde(default, deserialize_with = "object_or_default")]
    pub bus: Bus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Walking {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub distance: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: u64,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Bus {
    #[serde(default, deserialize_with = "list_or_empty")]
    pub buslines: Vec<Busline>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Busline {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "object_or_default")]
    pub departure_stop: Stop,
    #[serde(default, deserialize_with = "object_or_default")]
    pub arrival_stop: Stop,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub via_num: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stop {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

// ---- 天气 /weather/weatherInfo ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherResponse {
    #[serde(default, deserialize_with = "list_or_empty")]
    pub lives: Vec<LiveWeather>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub forecasts: Vec<Forecast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveWeather {
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weather: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub temperature: String,
    #[serde(rename = "winddirection", default, deserialize_with = "lenient_string")]
    pub wind_direction: String,
    #[serde(rename = "windpower", default, deserialize_with = "lenient_string")]
    pub wind_power: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub humidity: String,
    #[serde(rename = "reporttime", default, deserialize_with = "lenient_string")]
    pub report_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Forecast {
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adcode: String,
    #[serde(rename = "reporttime", default, deserialize_with = "lenient_string")]
    pub report_time: String,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub casts: Vec<Cast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cast {
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub week: String,
    #[serde(rename = "dayweather", default, deserialize_with = "lenient_string")]
    pub day_weather: String,
    #[serde(rename = "nightweather", default, deserialize_with = "lenient_string")]
    pub night_weather: String,
    #[serde(rename = "daytemp", default, deserialize_with = "lenient_string")]
    pub day_temp: String,
    #[serde(rename = "nighttemp", default, deserialize_with = "lenient_string")]
    pub night_temp: String,
    #[serde(rename = "daywind", default, deserialize_with = "lenient_string")]
    pub day_wind: String,
    #[serde(rename = "nightwind", default, deserialize_with = "lenient_string")]
    pub night_wind: String,
}
