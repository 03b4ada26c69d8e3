//! Markdown 旅游攻略
//!
//! 只做模板填充：有字段就输出，没有就输出占位文字。
//! 生成时间由调用方传入，同一份数据和时间总是得到同样的文档。

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

use super::plan::{Activity, Text, TravelPlan};
use crate::error::Result;

fn text_or<'a>(value: &'a Option<Text>, fallback: &'a str) -> &'a str {
    value.as_ref().map(|t| t.0.as_str()).unwrap_or(fallback)
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

const TOC: &[&str] = &[
    "- [1. 行程概览](#1-行程概览)",
    "- [2. 目的地信息](#2-目的地信息)",
    "- [3. 详细行程](#3-详细行程)",
    "- [4. 住宿推荐](#4-住宿推荐)",
    "- [5. 美食推荐](#5-美食推荐)",
    "- [6. 交通指南](#6-交通指南)",
    "- [7. 预算规划](#7-预算规划)",
    "- [8. 注意事项](#8-注意事项)",
    "- [9. 天气预报](#9-天气预报)",
];

fn push_activity(lines: &mut Vec<String>, label: &str, activity: &Option<Activity>) {
    let Some(activity) = activity else {
        return;
    };
    lines.push(format!("**{}**: {}", label, text_or(&activity.activity, "")));
    lines.push(format!("- 时间: {}", text_or(&activity.time, "")));
    lines.push(format!("- 地址: {}", text_or(&activity.address, "N/A")));
    lines.push(String::new());
}

fn header(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push(format!("# {}", text_or(&plan.title, "旅游攻略")));
    lines.push(String::new());
    lines.push(format!("**目的地**: {}  ", text_or(&plan.destination, "")));
    lines.push(format!("**行程天数**: {}天  ", text_or(&plan.duration, "")));
    lines.push(format!(
        "**出行时间**: {} - {}  ",
        text_or(&plan.start_date, ""),
        text_or(&plan.end_date, "")
    ));
    lines.push(format!("**同行人员**: {}  ", text_or(&plan.companions, "")));
    lines.push(format!("**总预算**: {}元  ", text_or(&plan.budget, "")));
    lines.push(format!("**旅行主题**: {}", text_or(&plan.theme, "")));
    lines.push(String::new());

    lines.push("## 目录".to_string());
    lines.push(String::new());
    lines.extend(TOC.iter().map(|s| s.to_string()));
    lines.push(String::new());
}

fn overview(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 1. 行程概览".to_string());
    lines.push(String::new());
    lines.push("| 项目 | 内容 |".to_string());
    lines.push("|:---|:---|".to_string());
    lines.push(format!("| 出行天数 | {}天 |", text_or(&plan.duration, "N/A")));
    lines.push(format!("| 同行人员 | {} |", text_or(&plan.companions, "N/A")));
    lines.push(format!("| 总预算 | {}元 |", text_or(&plan.budget, "N/A")));
    lines.push(format!("| 旅行主题 | {} |", text_or(&plan.theme, "N/A")));
    lines.push(String::new());

    lines.push("## 2. 目的地信息".to_string());
    lines.push(String::new());
    if let Some(info) = &plan.destination_info {
        lines.push(text_or(&info.description, "").to_string());
    }
    lines.push(String::new());
}

fn itinerary(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 3. 详细行程".to_string());
    lines.push(String::new());

    for (i, day) in plan.itinerary.iter().enumerate() {
        let n = i + 1;
        let date = day
            .date
            .as_ref()
            .map(|d| d.0.clone())
            .unwrap_or_else(|| format!("Day {}", n));
        lines.push(format!("### 第{}天: {}", n, date));
        lines.push(String::new());

        push_activity(lines, "上午", &day.morning);
        push_activity(lines, "下午", &day.afternoon);
        push_activity(lines, "晚上", &day.evening);

        if let Some(meals) = &day.meals {
            lines.push("**用餐**:".to_string());
            lines.push(format!("- 早餐: {}", text_or(&meals.breakfast, "自理")));
            lines.push(format!("- 午餐: {}", text_or(&meals.lunch, "自理")));
            lines.push(format!("- 晚餐: {}", text_or(&meals.dinner, "自理")));
            lines.push(String::new());
        }

        if let Some(transport) = &day.transport {
            lines.push(format!(
                "**交通**: {} - {}",
                text_or(&transport.method, ""),
                text_or(&transport.details, "")
            ));
            lines.push(String::new());
        }
    }
}

fn hotels_and_food(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 4. 住宿推荐".to_string());
    lines.push(String::new());
    if plan.hotels.is_empty() {
        lines.push("住宿规划中...".to_string());
        lines.push(String::new());
    }
    for (i, hotel) in plan.hotels.iter().enumerate() {
        lines.push(format!("### 推荐{}: {}", i + 1, text_or(&hotel.name, "N/A")));
        lines.push(String::new());
        lines.push(format!("- **地址**: {}", text_or(&hotel.address, "N/A")));
        lines.push(format!("- **价格**: {}元/晚", text_or(&hotel.price, "N/A")));
        lines.push(format!("- **评分**: {}分", text_or(&hotel.rating, "N/A")));
        lines.push(format!("- **特色**: {}", text_or(&hotel.features, "N/A")));
        lines.push(String::new());
    }

    lines.push("## 5. 美食推荐".to_string());
    lines.push(String::new());
    if plan.food_recommendations.is_empty() {
        lines.push("美食推荐规划中...".to_string());
        lines.push(String::new());
    }
    for (i, food) in plan.food_recommendations.iter().enumerate() {
        lines.push(format!("### {}. {}", i + 1, text_or(&food.name, "N/A")));
        lines.push(String::new());
        lines.push(format!("- **类型**: {}", text_or(&food.kind, "N/A")));
        lines.push(format!("- **地址**: {}", text_or(&food.address, "N/A")));
        lines.push(format!("- **人均**: {}元", text_or(&food.price_per_person, "N/A")));
        lines.push(format!(
            "- **推荐菜**: {}",
            text_or(&food.recommended_dishes, "N/A")
        ));
        lines.push(String::new());
    }
}

fn transport(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 6. 交通指南".to_string());
    lines.push(String::new());

    let Some(info) = &plan.transport_info else {
        lines.push("交通指南规划中...".to_string());
        lines.push(String::new());
        return;
    };

    let there = &info.getting_there;
    lines.push("### 到达方式".to_string());
    lines.push(String::new());
    lines.push(format!("- **方式**: {}", text_or(&there.method, "N/A")));
    lines.push(format!("- **详情**: {}", text_or(&there.details, "N/A")));
    lines.push(format!("- **预计时间**: {}", text_or(&there.duration, "N/A")));
    lines.push(format!("- **费用**: {}元", text_or(&there.cost, "N/A")));
    lines.push(String::new());

    if !info.local_transport.is_empty() {
        lines.push("### 当地交通".to_string());
        lines.push(String::new());
        for item in &info.local_transport {
            lines.push(format!(
                "- **{}**: {}",
                text_or(&item.kind, ""),
                text_or(&item.description, "")
            ));
        }
        lines.push(String::new());
    }
}

fn budget(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 7. 预算规划".to_string());
    lines.push(String::new());

    let Some(budget) = &plan.budget_breakdown else {
        lines.push("预算规划中...".to_string());
        lines.push(String::new());
        return;
    };

    lines.push(format!("**总预算**: {}元", text_or(&budget.total, "N/A")));
    lines.push(String::new());
    lines.push("| 类别 | 预算金额 |".to_string());
    lines.push("|:---|:---:|".to_string());
    let rows = [
        ("交通", &budget.transport),
        ("住宿", &budget.accommodation),
        ("餐饮", &budget.food),
        ("门票", &budget.tickets),
        ("购物", &budget.shopping),
        ("其他", &budget.other),
    ];
    for (label, amount) in rows {
        lines.push(format!("| {} | {}元 |", label, text_or(amount, "0")));
    }
    lines.push(String::new());
}

fn notes(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 8. 注意事项".to_string());
    lines.push(String::new());
    if plan.notes.is_empty() {
        lines.push("注意事项规划中...".to_string());
    }
    for note in &plan.notes {
        lines.push(format!("- [ ] {}", note));
    }
    lines.push(String::new());
}

fn weather(plan: &TravelPlan, lines: &mut Vec<String>) {
    lines.push("## 9. 天气预报".to_string());
    lines.push(String::new());

    let Some(weather) = &plan.weather else {
        lines.push("天气信息获取中...".to_string());
        lines.push(String::new());
        return;
    };

    lines.push(format!("**目的地**: {}", or_na(&weather.city)));
    lines.push(String::new());

    if let Some(current) = &weather.current {
        lines.push("### 当前天气".to_string());
        lines.push(String::new());
        lines.push(format!("- 天气: {}", or_na(&current.weather)));
        lines.push(format!("- 温度: {}°C", or_na(&current.temperature)));
        lines.push(format!("- 湿度: {}%", or_na(&current.humidity)));
        lines.push(format!(
            "- 风向: {} {}级",
            or_na(&current.wind_direction),
            or_na(&current.wind_power)
        ));
        lines.push(String::new());
    }

    if !weather.forecast.is_empty() {
        lines.push("### 天气预报".to_string());
        lines.push(String::new());
        lines.push("| 日期 | 星期 | 白天 | 夜间 | 温度 |".to_string());
        lines.push("|:---|:---|:---|:---|:---:|".to_string());
        for day in &weather.forecast {
            lines.push(format!(
                "| {} | {} | {} | {} | {}°C ~ {}°C |",
                day.date,
                day.week,
                day.day_weather,
                day.night_weather,
                or_na(&day.night_temp),
                or_na(&day.day_temp)
            ));
        }
        lines.push(String::new());
    }
}

pub fn render_markdown(plan: &TravelPlan, generated_at: NaiveDateTime) -> String {
    let mut lines = Vec::new();

    header(plan, &mut lines);
    overview(plan, &mut lines);
    itinerary(plan, &mut lines);
    hotels_and_food(plan, &mut lines);
    transport(plan, &mut lines);
    budget(plan, &mut lines);
    notes(plan, &mut lines);
    weather(plan, &mut lines);

    lines.push("---".to_string());
    lines.push(format!(
        "*生成时间: {} | Travel Planner*",
        generated_at.format("%Y-%m-%d %H:%M")
    ));

    lines.join("\n")
}

/// 写入文件，返回实际路径
pub fn write_markdown(
    plan: &TravelPlan,
    output: Option<&Path>,
    generated_at: NaiveDateTime,
) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(plan.default_file_name()));

    fs::write(&path, render_markdown(plan, generated_at))?;
    log::info!("已生成攻略: {}", path.display());
    Ok(path)
}
