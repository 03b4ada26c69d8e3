//! 旅游攻略生成

pub mod markdown;
pub mod plan;

pub use markdown::{render_markdown, write_markdown};
pub use plan::TravelPlan;
