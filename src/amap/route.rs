//! 路径规划
//!
//! 起终点各自解析成坐标（先起点后终点，串行），再按出行方式请求对应接口，
//! 始终取高德返回顺序中的第一个方案，不重新排序。

use std::fmt;
use std::str::FromStr;

use super::client::AmapClient;
use super::models::{DirectionResponse, Path, Transit};
use crate::coords::Coordinate;
use crate::error::{AmapError, Result};
use crate::location::LocationQuery;

/// 公交换乘默认的城市范围
pub const NATIONWIDE: &str = "全国";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Driving,
    Walking,
    Cycling,
    Ebicycle,
    Transit,
}

impl TransportMode {
    pub const ALL: [TransportMode; 5] = [
        TransportMode::Driving,
        TransportMode::Walking,
        TransportMode::Cycling,
        TransportMode::Ebicycle,
        TransportMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
            TransportMode::Ebicycle => "ebicycle",
            TransportMode::Transit => "transit",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            TransportMode::Driving => "/direction/driving",
            TransportMode::Walking => "/direction/walking",
            TransportMode::Cycling => "/direction/bicycling",
            TransportMode::Ebicycle => "/direction/ebicycling",
            TransportMode::Transit => "/direction/transit/integrated",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TransportMode::Driving => "Driving",
            TransportMode::Walking => "Walking",
            TransportMode::Cycling => "Cycling",
            TransportMode::Ebicycle => "E-bicycle",
            TransportMode::Transit => "Transit",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = AmapError;

    fn from_str(s: &str) -> Result<Self> {
        TransportMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AmapError::InvalidMode(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOptions {
    /// 公交起点城市
    pub city: String,
    /// 公交终点城市
    pub city_destination: String,
    /// 地址解析时的城市提示
    pub geocode_city: Option<String>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            city: NATIONWIDE.to_string(),
            city_destination: NATIONWIDE.to_string(),
            geocode_city: None,
        }
    }
}

/// 候选方案，按高德返回顺序
#[derive(Debug, Clone, PartialEq)]
pub enum RouteResult {
    Paths(Vec<Path>),
    Transits(Vec<Transit>),
}

impl RouteResult {
    pub fn len(&self) -> usize {
        match self {
            RouteResult::Paths(paths) => paths.len(),
            RouteResult::Transits(transits) => transits.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn resolve_endpoint(client: &AmapClient, text: &str, city: Option<&str>) -> Result<Coordinate> {
    LocationQuery::parse(text, city)
        .resolve(client)
        .map_err(|e| match e {
            e @ AmapError::Resolution { .. } => e,
            e => AmapError::Resolution {
                location: text.to_string(),
                source: Box::new(e),
            },
        })
}

fn route_params(
    mode: TransportMode,
    origin: Coordinate,
    destination: Coordinate,
    options: &RouteOptions,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("origin", origin.to_string()),
        ("destination", destination.to_string()),
    ];
    if mode == TransportMode::Transit {
        params.push(("city", options.city.clone()));
        params.push(("cityd", options.city_destination.clone()));
    }
    params
}

impl AmapClient {
    /// 按名称指定出行方式；未知名称在发出任何请求前失败
    pub fn plan_route(
        &self,
        origin: &str,
        destination: &str,
        mode: &str,
        options: &RouteOptions,
    ) -> Result<RouteResult> {
        let mode: TransportMode = mode.parse()?;
        self.plan_route_with_mode(origin, destination, mode, options)
    }

    pub fn plan_route_with_mode(
        &self,
        origin: &str,
        destination: &str,
        mode: TransportMode,
        options: &RouteOptions,
    ) -> Result<RouteResult> {
        let geocode_city = options.geocode_city.as_deref();
        let origin_coords = resolve_endpoint(self, origin, geocode_city)?;
        let dest_coords = resolve_endpoint(self, destination, geocode_city)?;

        log::info!(
            "[amap] 路径规划 {}: {} -> {}",
            mode,
            origin_coords,
            dest_coords
        );

        let params = route_params(mode, origin_coords, dest_coords, options);
        let resp: DirectionResponse = self.request(mode.endpoint(), &params)?;

        let result = match mode {
            TransportMode::Transit => RouteResult::Transits(resp.route.transits),
            _ => RouteResult::Paths(resp.route.paths),
        };
        if result.is_empty() {
            return Err(AmapError::NoRoute);
        }

        log::debug!("[amap] 共 {} 个候选方案，使用第一个", result.len());
        Ok(result)
    }
}
