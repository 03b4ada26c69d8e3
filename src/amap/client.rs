//! 高德 Web 服务 HTTP 封装
//!
//! 所有接口共用一个出口：拼 URL、附加 key、发起阻塞 GET、检查 `status`。
//! 不重试，不退避。

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::credential::ApiKey;
use crate::error::{AmapError, Result};

pub const BASE_URL_ENV: &str = "AMAP_BASE_URL";

/// 成功时 status 字段的值
const STATUS_OK: &str = "1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://restapi.amap.com/v3".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("amap-travel/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// 默认配置，`AMAP_BASE_URL` 可覆盖接口地址
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        config
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct AmapClient {
    client: Client,
    config: ClientConfig,
    api_key: ApiKey,
}

impl AmapClient {
    pub fn new(api_key: ApiKey, config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AmapError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `base_url + endpoint + ?params`，再追加 `key`
    pub fn build_url(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut url = Url::parse_with_params(&raw, params)
            .map_err(|e| AmapError::Config(format!("invalid URL '{}': {}", raw, e)))?;
        url.query_pairs_mut().append_pair("key", self.api_key.expose());
        Ok(url)
    }

    /// 发起请求并解码为 `T`
    ///
    /// 只要 `status` 不是 "1" 就返回 [`AmapError::Api`]，与 HTTP 状态码无关。
    pub fn request<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> Result<T> {
        let url = self.build_url(endpoint, params)?;
        log::debug!("[amap] GET {} {:?}", endpoint, params);

        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AmapError::Network(format!("HTTP {} from {}", status, endpoint)));
        }

        let data: Value = response.json()?;
        check_status(&data)?;

        serde_json::from_value(data).map_err(|e| {
            AmapError::Parse(format!("unexpected {} response: {}", endpoint, e))
        })
    }
}

/// 检查高德的 status/infocode/info
pub fn check_status(data: &Value) -> Result<()> {
    let status = data.get("status").and_then(|s| s.as_str()).unwrap_or("");
    if status == STATUS_OK {
        return Ok(());
    }

    let code = data
        .get("infocode")
        .and_then(|c| c.as_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let message = data
        .get("info")
        .and_then(|i| i.as_str())
        .unwrap_or("Unknown error")
        .to_string();
    log::warn!("[amap] 接口返回错误 [{}]: {}", code, message);
    Err(AmapError::Api { code, message })
}
