//! 结果格式化
//!
//! 全部是纯函数，同样的输入总是得到同样的文本。

use crate::amap::models::{Geocode, IpLocation, Path, PoiSearchResponse, Regeocode, Transit};
use crate::amap::{RouteResult, WeatherReport};

pub const NO_ROUTE: &str = "No route found";

fn km(meters: u64) -> String {
    format!("{:.2}", meters as f64 / 1000.0)
}

fn minutes_seconds(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn format_route(result: &RouteResult) -> String {
    match result {
        RouteResult::Paths(paths) => format_driving(paths),
        RouteResult::Transits(transits) => format_transit(transits),
    }
}

/// 驾车、步行、骑行：只展示第一个方案的逐段导航
pub fn format_driving(paths: &[Path]) -> String {
    let Some(path) = paths.first() else {
        return NO_ROUTE.to_string();
    };

    let mut output = vec![
        "Route Summary:".to_string(),
        format!("  Distance: {}m ({}km)", path.distance, km(path.distance)),
        format!("  Duration: {}s ({})", path.duration, minutes_seconds(path.duration)),
    ];
    if path.tolls > 0.0 {
        output.push(format!("  Tolls: {}", path.tolls));
    }
    if path.toll_distance > 0 {
        output.push(format!("  Toll Road Distance: {}m", path.toll_distance));
    }

    output.push(format!("\nTurn-by-turn Directions ({} steps):", path.steps.len()));
    for (i, step) in path.steps.iter().enumerate() {
        output.push(format!("\n{}. {}", i + 1, step.instruction));
        output.push(format!(
            "   Distance: {}m, Duration: {}s",
            step.distance, step.duration
        ));
    }

    output.join("\n")
}

pub fn format_transit(transits: &[Transit]) -> String {
    let Some(transit) = transits.first() else {
        return NO_ROUTE.to_string();
    };

    let mut output = vec![
        "Transit Route Summary:".to_string(),
        format!("  Distance: {}m ({}km)", transit.distance, km(transit.distance)),
        format!(
            "  Duration: {}s ({})",
            transit.duration,
            minutes_seconds(transit.duration)
        ),
        format!("  Cost: ¥{:.2}", transit.cost),
    ];

    output.push(format!(
        "\nDetailed Itinerary ({} segments):",
        transit.segments.len()
    ));
    for (i, segment) in transit.segments.iter().enumerate() {
        let n = i + 1;
        if let Some(busline) = segment.bus.buslines.first() {
            output.push(format!("\n{}. {}", n, busline.name));
            output.push(format!(
                "   {} → {}",
                busline.departure_stop.name, busline.arrival_stop.name
            ));
            output.push(format!("   Stops: {}", busline.via_num));
        }

        let walking = &segment.walking;
        if !walking.steps.is_empty() {
            output.push(format!("\n{}. Walking", n));
            output.push(format!(
                "   Distance: {}m, Duration: {}s",
                walking.distance, walking.duration
            ));
        }
    }

    output.join("\n")
}

pub fn format_geocode(result: &Geocode) -> String {
    let mut output = vec![
        format!("Address: {}", result.formatted_address),
        format!("Coordinates: {}", result.location),
        format!("Level: {}", result.level),
    ];
    if !result.province.is_empty() {
        output.push(format!("Province: {}", result.province));
    }
    if !result.city.is_empty() {
        output.push(format!("City: {}", result.city));
    }
    if !result.district.is_empty() {
        output.push(format!("District: {}", result.district));
    }
    output.join("\n")
}

pub fn format_regeocode(result: &Regeocode) -> String {
    let component = &result.address_component;
    [
        format!("Address: {}", result.formatted_address),
        format!("Province: {}", component.province),
        format!("City: {}", component.city),
        format!("District: {}", component.district),
        format!("Street: {}", component.street_number.street),
        format!("Street Number: {}", component.street_number.number),
    ]
    .join("\n")
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn format_pois(data: &PoiSearchResponse, limit: usize) -> String {
    let count = data.count as usize;
    let total = count.min(data.pois.len());

    let mut output = vec![
        format!("Found {} POIs (showing {}):", count, total.min(limit)),
        "=".repeat(60),
    ];

    for (i, poi) in data.pois.iter().take(limit).enumerate() {
        output.push(format!("\n{}. {}", i + 1, or_na(&poi.name)));
        output.push(format!("   Address: {}", or_na(&poi.address)));
        output.push(format!("   Location: {}", or_na(&poi.location)));
        output.push(format!("   Distance: {}m", poi.distance));
        if !poi.tel.is_empty() {
            output.push(format!("   Phone: {}", poi.tel));
        }
        if !poi.kind.is_empty() {
            output.push(format!("   Type: {}", poi.kind));
        }
    }

    if count > limit {
        output.push(format!("\n... and {} more results", count - limit));
    }

    output.join("\n")
}

pub fn format_ip_location(ip: &str, location: &IpLocation) -> String {
    let mut output = vec![
        format!("IP Address: {}", ip),
        format!("Province: {}", or_na(&location.province)),
        format!("City: {}", or_na(&location.city)),
    ];
    if !location.rectangle.is_empty() {
        output.push(format!("Rectangle: {}", location.rectangle));
    }
    output.join("\n")
}

/// Markdown 天气摘要，预报最多 7 天
pub fn format_weather(report: &WeatherReport) -> String {
    let mut lines = vec![format!("### {} 天气预报", report.city)];

    if !report.report_time.is_empty() {
        lines.push(format!("*发布时间: {}*", report.report_time));
    }

    if let Some(current) = &report.current {
        lines.push(String::new());
        lines.push("#### 当前天气".to_string());
        lines.push(format!("- 天气: {}", or_na(&current.weather)));
        lines.push(format!("- 温度: {}°C", or_na(&current.temperature)));
        lines.push(format!("- 湿度: {}%", or_na(&current.humidity)));
        lines.push(format!(
            "- 风向: {} {}级",
            or_na(&current.wind_direction),
            current.wind_power
        ));
    }

    if !report.forecast.is_empty() {
        lines.push(String::new());
        lines.push("#### 天气预报".to_string());
        for day in report.forecast.iter().take(7) {
            lines.push(format!(
                "- **{} ({})**: {} → {}, {}°C ~ {}°C",
                day.date, day.week, day.day_weather, day.night_weather, day.night_temp, day.day_temp
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amap::models::{Bus, Busline, Poi, Segment, Step, Stop, Walking};
    use crate::amap::weather::{CurrentWeather, DailyForecast};

    fn sample_path() -> Path {
        Path {
            distance: 1500,
            duration: 125,
            strategy: "速度最快".to_string(),
            tolls: 10.0,
            toll_distance: 800,
            steps: vec![
                Step {
                    instruction: "向东行驶200米右转".to_string(),
                    road: "阜通东大街".to_string(),
                    distance: 200,
                    duration: 30,
                },
                Step {
                    instruction: "沿京密路行驶1.3千米到达目的地".to_string(),
                    road: "京密路".to_string(),
                    distance: 1300,
                    duration: 95,
                },
            ],
        }
    }

    fn sample_transit() -> Transit {
        Transit {
            distance: 12000,
            duration: 3725,
            cost: 4.0,
            walking_distance: 500,
            segments: vec![
                Segment {
                    walking: Walking {
                        distance: 300,
                        duration: 240,
                        steps: vec![Step {
                            instruction: "步行300米到达团结湖站".to_string(),
                            ..Default::default()
                        }],
                    },
                    bus: Bus {
                        buslines: vec![Busline {
                            name: "地铁10号线(外环)".to_string(),
                            departure_stop: Stop { name: "团结湖".to_string() },
                            arrival_stop: Stop { name: "国贸".to_string() },
                            via_num: 2,
                        }],
                    },
                },
                Segment {
                    walking: Walking {
                        distance: 200,
                        duration: 160,
                        steps: vec![Step::default()],
                    },
                    bus: Bus::default(),
                },
            ],
        }
    }

    #[test]
    fn test_driving_output() {
        let text = format_driving(&[sample_path()]);
        assert!(text.starts_with("Route Summary:"));
        assert!(text.contains("  Distance: 1500m (1.50km)"));
        assert!(text.contains("  Duration: 125s (2m 5s)"));
        assert!(text.contains("  Tolls: 10"));
        assert!(text.contains("  Toll Road Distance: 800m"));
        assert!(text.contains("Turn-by-turn Directions (2 steps):"));
        assert!(text.contains("\n2. 沿京密路行驶1.3千米到达目的地\n   Distance: 1300m, Duration: 95s"));
    }

    #[test]
    fn test_driving_hides_zero_tolls() {
        let mut path = sample_path();
        path.tolls = 0.0;
        path.toll_distance = 0;
        let text = format_driving(&[path]);
        assert!(!text.contains("Tolls"));
        assert!(!text.contains("Toll Road"));
    }

    #[test]
    fn test_only_first_candidate_is_rendered() {
        let mut second = sample_path();
        second.distance = 99_999;
        let text = format_driving(&[sample_path(), second]);
        assert!(!text.contains("99999"));
    }

    #[test]
    fn test_transit_output() {
        let text = format_transit(&[sample_transit()]);
        assert!(text.contains("  Cost: ¥4.00"));
        assert!(text.contains("  Duration: 3725s (62m 5s)"));
        assert!(text.contains("Detailed Itinerary (2 segments):"));
        assert!(text.contains("\n1. 地铁10号线(外环)\n   团结湖 → 国贸\n   Stops: 2"));
        assert!(text.contains("\n2. Walking\n   Distance: 200m, Duration: 160s"));
    }

    #[test]
    fn test_empty_candidates() {
        assert_eq!(format_route(&RouteResult::Paths(vec![])), NO_ROUTE);
        assert_eq!(format_route(&RouteResult::Transits(vec![])), NO_ROUTE);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let paths = RouteResult::Paths(vec![sample_path()]);
        assert_eq!(format_route(&paths), format_route(&paths));

        let transits = RouteResult::Transits(vec![sample_transit()]);
        assert_eq!(format_route(&transits), format_route(&transits));
    }

    #[test]
    fn test_geocode_skips_empty_parts() {
        let g = Geocode {
            formatted_address: "北京市朝阳区阜通东大街6号".to_string(),
            location: "116.482086,39.990496".to_string(),
            level: "门牌号".to_string(),
            province: "北京市".to_string(),
            ..Default::default()
        };
        let text = format_geocode(&g);
        assert!(text.contains("Coordinates: 116.482086,39.990496"));
        assert!(text.contains("Province: 北京市"));
        assert!(!text.contains("City:"));
    }

    #[test]
    fn test_pois_truncated() {
        let data = PoiSearchResponse {
            count: 15,
            pois: (1..=12)
                .map(|i| Poi {
                    name: format!("餐厅{}", i),
                    distance: i * 10,
                    ..Default::default()
                })
                .collect(),
        };
        let text = format_pois(&data, 10);
        assert!(text.starts_with("Found 15 POIs (showing 10):"));
        assert!(text.contains("\n10. 餐厅10"));
        assert!(!text.contains("餐厅11"));
        assert!(text.contains("   Address: N/A"));
        assert!(text.ends_with("... and 5 more results"));
    }

    #[test]
    fn test_ip_location_without_rectangle() {
        let text = format_ip_location("8.8.8.8", &IpLocation::default());
        assert_eq!(text, "IP Address: 8.8.8.8\nProvince: N/A\nCity: N/A");
    }

    #[test]
    fn test_weather_summary() {
        let report = WeatherReport {
            city: "杭州市".to_string(),
            report_time: "2024-05-01 11:00:00".to_string(),
            current: Some(CurrentWeather {
                weather: "晴".to_string(),
                temperature: "26".to_string(),
                humidity: "41".to_string(),
                wind_direction: "西南".to_string(),
                wind_power: "≤3".to_string(),
            }),
            forecast: (1..=9)
                .map(|d| DailyForecast {
                    date: format!("2024-05-{:02}", d),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        let text = format_weather(&report);
        assert!(text.starts_with("### 杭州市 天气预报\n*发布时间: 2024-05-01 11:00:00*"));
        assert!(text.contains("- 风向: 西南 ≤3级"));
        assert!(text.contains("2024-05-07"));
        assert!(!text.contains("2024-05-08"));
    }
}
