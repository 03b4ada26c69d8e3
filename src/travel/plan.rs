//! 旅行计划数据
//!
//! 由调用方（通常是一个 JSON 文件）提供，字段全部可缺省。
//! 数值和文本混用（预算可能写成 3000 也可能写成 "3000"），统一按文本读取。

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::amap::models::lenient_string;
use crate::amap::WeatherReport;
use crate::error::{AmapError, Result};

/// 字符串或数字，都按文本保存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Text(pub String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        lenient_string(d).map(Text)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelPlan {
    pub title: Option<Text>,
    pub destination: Option<Text>,
    /// 天数
    pub duration: Option<Text>,
    pub start_date: Option<Text>,
    pub end_date: Option<Text>,
    pub companions: Option<Text>,
    pub budget: Option<Text>,
    pub theme: Option<Text>,
    pub destination_info: Option<DestinationInfo>,
    pub itinerary: Vec<DayPlan>,
    pub hotels: Vec<Hotel>,
    pub food_recommendations: Vec<Restaurant>,
    pub transport_info: Option<TransportInfo>,
    pub budget_breakdown: Option<BudgetBreakdown>,
    pub notes: Vec<String>,
    pub weather: Option<WeatherReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationInfo {
    pub description: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub date: Option<Text>,
    pub morning: Option<Activity>,
    pub afternoon: Option<Activity>,
    pub evening: Option<Activity>,
    pub meals: Option<Meals>,
    pub transport: Option<DayTransport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub activity: Option<Text>,
    pub time: Option<Text>,
    pub address: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meals {
    pub breakfast: Option<Text>,
    pub lunch: Option<Text>,
    pub dinner: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayTransport {
    pub method: Option<Text>,
    pub details: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    pub name: Option<Text>,
    pub address: Option<Text>,
    /// 元/晚
    pub price: Option<Text>,
    pub rating: Option<Text>,
    pub features: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    pub name: Option<Text>,
    #[serde(rename = "type")]
    pub kind: Option<Text>,
    pub address: Option<Text>,
    pub price_per_person: Option<Text>,
    pub recommended_dishes: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportInfo {
    pub getting_there: GettingThere,
    pub local_transport: Vec<LocalTransport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GettingThere {
    pub method: Option<Text>,
    pub details: Option<Text>,
    pub duration: Option<Text>,
    pub cost: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalTransport {
    #[serde(rename = "type")]
    pub kind: Option<Text>,
    pub description: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetBreakdown {
    pub total: Option<Text>,
    pub transport: Option<Text>,
    pub accommodation: Option<Text>,
    pub food: Option<Text>,
    pub tickets: Option<Text>,
    pub shopping: Option<Text>,
    pub other: Option<Text>,
}

impl TravelPlan {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            AmapError::Config(format!("invalid travel plan {}: {}", path.display(), e))
        })
    }

    /// 默认输出文件名：travel_guide_{目的地}_{开始日期}.md
    pub fn default_file_name(&self) -> String {
        let destination = self
            .destination
            .as_ref()
            .map(|d| d.0.replace(' ', "_"))
            .unwrap_or_else(|| "travel".to_string());
        let start_date = self
            .start_date
            .as_ref()
            .map(|d| d.0.replace('-', ""))
            .unwrap_or_default();
        format!("travel_guide_{}_{}.md", destination, start_date)
    }
}
