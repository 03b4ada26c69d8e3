//! 地点解析
//!
//! 用户输入要么是 "经度,纬度"，要么是自由文本地址。
//! 地址通过地理编码取第一个候选的坐标。

use crate::amap::AmapClient;
use crate::coords::Coordinate;
use crate::error::{AmapError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Coordinate(Coordinate),
    Address { text: String, city: Option<String> },
}

impl LocationQuery {
    pub fn parse(text: &str, city: Option<&str>) -> Self {
        match Coordinate::parse(text) {
            Some(c) => LocationQuery::Coordinate(c),
            None => LocationQuery::Address {
                text: text.to_string(),
                city: city.map(str::to_string),
            },
        }
    }

    /// 坐标直接返回，不发请求；地址发一次地理编码请求
    ///
    /// 没有候选时返回 [`AmapError::NoResult`]，请求本身失败时包装为
    /// [`AmapError::Resolution`]。
    pub fn resolve(&self, client: &AmapClient) -> Result<Coordinate> {
        match self {
            LocationQuery::Coordinate(c) => {
                log::debug!("[amap] '{}' 是坐标，跳过地理编码", c);
                Ok(*c)
            }
            LocationQuery::Address { text, city } => {
                let geocode = match client.geocode(text, city.as_deref()) {
                    Ok(geocode) => geocode,
                    Err(e @ AmapError::NoResult(_)) => return Err(e),
                    Err(e) => {
                        return Err(AmapError::Resolution {
                            location: text.clone(),
                            source: Box::new(e),
                        })
                    }
                };
                let coordinate = geocode.coordinate()?;
                log::info!(
                    "[amap] '{}' -> {} ({})",
                    text,
                    coordinate,
                    geocode.formatted_address
                );
                Ok(coordinate)
            }
        }
    }
}

pub fn resolve(client: &AmapClient, text: &str, city: Option<&str>) -> Result<Coordinate> {
    LocationQuery::parse(text, city).resolve(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(
            LocationQuery::parse("116.481485,39.990464", None),
            LocationQuery::Coordinate(Coordinate::new(116.481485, 39.990464))
        );
    }

    #[test]
    fn test_parse_address_keeps_city_hint() {
        assert_eq!(
            LocationQuery::parse("阜通东大街6号", Some("北京市")),
            LocationQuery::Address {
                text: "阜通东大街6号".to_string(),
                city: Some("北京市".to_string()),
            }
        );
    }

    #[test]
    fn test_three_numbers_is_an_address() {
        assert!(matches!(
            LocationQuery::parse("1,2,3", None),
            LocationQuery::Address { .. }
        ));
    }
}
