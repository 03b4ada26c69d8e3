//! API Key 获取
//!
//! 顺序：环境变量 `AMAP_API_KEY` → 配置文件中的 `amap` → 交互式输入（不回显）。
//! 进程内只解析一次，之后通过 `AmapClient` 传递。

use std::fmt;

use crate::error::{AmapError, Result};

pub const API_KEY_ENV: &str = "AMAP_API_KEY";

/// 不透明的 Key，Debug 输出不包含原文
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn preview(&self) -> String {
        Self::preview_of(&self.0)
    }

    /// 前 4 个字符加 "..."，空串返回空串
    pub fn preview_of(key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        let head: String = key.chars().take(4).collect();
        format!("{}...", head)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

pub trait SecretPrompt {
    /// 读取一行输入，不回显
    fn read_secret(&mut self, message: &str) -> Result<String>;
}

/// 终端输入
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn read_secret(&mut self, message: &str) -> Result<String> {
        eprintln!("{} environment variable not found.", API_KEY_ENV);
        Ok(rpassword::prompt_password(message)?)
    }
}

/// `stored_value` 只在环境变量缺失或为空时才被调用
pub fn resolve<F>(
    env_value: Option<String>,
    stored_value: F,
    prompt: &mut dyn SecretPrompt,
) -> Result<ApiKey>
where
    F: FnOnce() -> Option<String>,
{
    if let Some(key) = env_value.filter(|k| !k.is_empty()) {
        log::debug!("[amap] 使用环境变量中的 API Key");
        return Ok(ApiKey(key));
    }

    if let Some(key) = stored_value().filter(|k| !k.is_empty()) {
        log::debug!("[amap] 使用配置文件中的 API Key");
        return Ok(ApiKey(key));
    }

    let key = prompt.read_secret("Please enter your Amap API key: ")?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AmapError::EmptyCredential);
    }
    Ok(ApiKey(key.to_string()))
}

pub fn env_value() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}
