//! 错误类型
//!
//! 所有失败都原样向上传递到命令行入口，由入口打印一行错误信息并以 1 退出。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AmapError>;

#[derive(Debug, Error)]
pub enum AmapError {
    /// 环境变量、配置文件都没有 Key，且用户输入为空
    #[error("API key cannot be empty")]
    EmptyCredential,

    /// 传输层失败（连接、超时、HTTP 状态码）
    #[error("Network error: {0}")]
    Network(String),

    /// 高德返回 status != "1"
    #[error("Amap API Error [{code}]: {message}")]
    Api { code: String, message: String },

    #[error("Invalid mode '{0}'. Must be one of: driving, walking, cycling, ebicycle, transit")]
    InvalidMode(String),

    /// 候选列表为空
    #[error("No results found for {0}")]
    NoResult(String),

    #[error("No route found")]
    NoRoute,

    /// 路线规划时地址解析失败
    #[error("Failed to resolve location '{location}': {source}")]
    Resolution {
        location: String,
        #[source]
        source: Box<AmapError>,
    },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AmapError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AmapError::Network(format!("request timed out: {}", e))
        } else {
            AmapError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AmapError {
    fn from(e: serde_json::Error) -> Self {
        AmapError::Parse(e.to_string())
    }
}

impl AmapError {
    /// 配额类错误码（与采集时判断额度耗尽的一组码一致）
    pub fn is_quota_exhausted(&self) -> bool {
        match self {
            AmapError::Api { code, .. } => {
                matches!(code.as_str(), "10003" | "10004" | "10005" | "10009" | "10044")
            }
            _ => false,
        }
    }
}
