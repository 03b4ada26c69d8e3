//! 本地配置文件
//!
//! `$HOME/.config/travel-planner/config.json`，内容为 `{ 服务名: Key }`。
//! 没有文件锁，多个进程同时写入时以最后一次为准。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::credential::ApiKey;
use crate::error::{AmapError, Result};

/// 已知服务及说明
pub const KNOWN_SERVICES: &[(&str, &str)] = &[
    ("amap", "高德地图 (POI搜索、路线规划、地理编码)"),
    ("weather", "高德天气 (天气预报)"),
];

#[derive(Debug, Clone, Serialize)]
pub struct KeyStatus {
    pub service: String,
    pub name: String,
    pub configured: bool,
    pub key_preview: String,
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 默认位置，依赖 HOME 环境变量
    pub fn default_location() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or_else(|| AmapError::Config("HOME is not set".to_string()))?;
        Ok(Self::new(
            PathBuf::from(home)
                .join(".config")
                .join("travel-planner")
                .join("config.json"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    pub fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            AmapError::Config(format!("invalid settings file {}: {}", self.path.display(), e))
        })
    }

    pub fn save(&self, settings: &BTreeMap<String, String>) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// 读取某服务的 Key，不存在或为空时返回 None
    pub fn get_api_key(&self, service: &str) -> Result<Option<String>> {
        let settings = self.load()?;
        Ok(settings.get(service).filter(|k| !k.is_empty()).cloned())
    }

    pub fn set_api_key(&self, service: &str, key: &ApiKey) -> Result<()> {
        let mut settings = self.load()?;
        settings.insert(service.to_string(), key.expose().to_string());
        self.save(&settings)?;
        log::info!("已保存 {} 的 API Key 到 {}", service, self.path.display());
        Ok(())
    }

    pub fn check_api_keys(&self) -> Result<Vec<KeyStatus>> {
        let settings = self.load()?;
        Ok(KNOWN_SERVICES
            .iter()
            .map(|(service, name)| {
                let key = settings.get(*service).map(String::as_str).unwrap_or("");
                KeyStatus {
                    service: service.to_string(),
                    name: name.to_string(),
                    configured: !key.is_empty(),
                    key_preview: ApiKey::preview_of(key),
                }
            })
            .collect())
    }
}
