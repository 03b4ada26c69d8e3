//! 地理编码 / 逆地理编码

use super::client::AmapClient;
use super::models::{Geocode, GeocodeResponse, Regeocode, RegeocodeResponse};
use crate::coords::Coordinate;
use crate::error::{AmapError, Result};

impl AmapClient {
    /// 地址转坐标，返回第一个候选
    ///
    /// 候选顺序由高德决定（相关度），这里不按距离重新挑选。
    pub fn geocode(&self, address: &str, city: Option<&str>) -> Result<Geocode> {
        let mut params = vec![("address", address.to_string())];
        if let Some(city) = city.filter(|c| !c.is_empty()) {
            params.push(("city", city.to_string()));
        }

        let resp: GeocodeResponse = self.request("/geocode/geo", &params)?;
        log::debug!("[amap] 地理编码 '{}' 返回 {} 个候选", address, resp.geocodes.len());

        resp.geocodes
            .into_iter()
            .next()
            .ok_or_else(|| AmapError::NoResult("the given address".to_string()))
    }

    pub fn reverse_geocode(&self, location: Coordinate) -> Result<Regeocode> {
        let params = [
            ("location", location.to_string()),
            ("extensions", "base".to_string()),
        ];

        let resp: RegeocodeResponse = self.request("/geocode/regeo", &params)?;
        resp.regeocode
            .ok_or_else(|| AmapError::NoResult("the given coordinates".to_string()))
    }
}
