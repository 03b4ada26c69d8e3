//! 关键字搜索 POI

use super::client::AmapClient;
use super::models::PoiSearchResponse;
use crate::coords::Coordinate;
use crate::error::{AmapError, Result};

pub const DEFAULT_RADIUS: u32 = 1000;

#[derive(Debug, Clone)]
pub struct PoiQuery {
    pub keywords: String,
    pub city: String,
    /// 不指定时以城市中心为准
    pub center: Option<Coordinate>,
    /// 米
    pub radius: u32,
}

impl PoiQuery {
    pub fn new(keywords: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            city: city.into(),
            center: None,
            radius: DEFAULT_RADIUS,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("keywords", self.keywords.clone()),
            ("city", self.city.clone()),
            ("radius", self.radius.to_string()),
        ];
        if let Some(center) = self.center {
            params.push(("location", center.to_string()));
        }
        params
    }
}

impl AmapClient {
    pub fn search_poi(&self, query: &PoiQuery) -> Result<PoiSearchResponse> {
        log::info!("[amap] 搜索: {} 城市: {}", query.keywords, query.city);

        let resp: PoiSearchResponse = self.request("/place/text", &query.params())?;
        if resp.pois.is_empty() {
            return Err(AmapError::NoResult(format!("POIs matching '{}'", query.keywords)));
        }

        log::info!("[amap] 找到 {} 个结果（共 {}）", resp.pois.len(), resp.count);
        Ok(resp)
    }
}
