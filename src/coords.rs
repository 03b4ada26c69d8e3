//! 坐标类型
//! 高德接口统一使用 "经度,纬度" 字符串（GCJ02）

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// 解析 "lon,lat"
    ///
    /// 必须恰好两段且都能解析为有限浮点数，否则返回 None。
    /// 不做经纬度范围校验，越界的值原样保留。
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 2 {
            return None;
        }

        let lon: f64 = parts[0].trim().parse().ok()?;
        let lat: f64 = parts[1].trim().parse().ok()?;
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }

        Some(Self { lon, lat })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}
