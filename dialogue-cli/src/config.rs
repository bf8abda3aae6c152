//! # Config 模块
//!
//! 命令行宿主的配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::{Path, PathBuf};

use dialogue_log::{LogStyle, StyleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, info, warn};

/// 宿主配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// 故事脚本路径（JSON）
    #[serde(default)]
    pub story_path: Option<PathBuf>,

    /// 日志渲染样式
    #[serde(default)]
    pub style: LogStyle,

    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            story_path: None,
            style: LogStyle::default(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        PendingConfig::read(path).finish()
    }

    /// 读取并解析配置文件，不输出日志
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 解析日志级别
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.style.validate()?;
        self.level()?;

        if let Some(story) = &self.story_path
            && !story.exists()
        {
            return Err(ConfigError::ValidationFailed(format!(
                "故事脚本不存在: {:?}",
                story
            )));
        }

        Ok(())
    }
}

/// 已读取但尚未记录结果的配置
///
/// 日志订阅器需要配置中的级别才能初始化，而加载失败的警告又必须在订阅器就绪后输出。
/// 先 [`read`](Self::read) 取得级别，初始化订阅器，再 [`finish`](Self::finish)。
#[derive(Debug)]
pub struct PendingConfig {
    path: PathBuf,
    loaded: Result<CliConfig, ConfigError>,
}

impl PendingConfig {
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let loaded = CliConfig::try_load(&path);
        Self { path, loaded }
    }

    /// 订阅器应使用的日志级别
    ///
    /// `verbose` 优先；配置不可用时为 `INFO`。
    pub fn level(&self, verbose: bool) -> Result<Level, ConfigError> {
        if verbose {
            return Ok(Level::DEBUG);
        }
        match &self.loaded {
            Ok(config) => config.level(),
            Err(_) => Ok(Level::INFO),
        }
    }

    /// 读取失败的原因
    pub fn error(&self) -> Option<&ConfigError> {
        self.loaded.as_ref().err()
    }

    /// 记录加载结果，失败时回退到默认配置
    pub fn finish(self) -> CliConfig {
        let path = self.path;
        match self.loaded {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(ConfigError::NotFound(_)) => {
                warn!(path = ?path, "配置文件不存在，使用默认配置");
                CliConfig::default()
            }
            Err(e) => {
                warn!(path = ?path, error = %e, "配置文件不可用，使用默认配置");
                CliConfig::default()
            }
        }
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {0:?}")]
    NotFound(PathBuf),

    /// 解析失败
    #[error("配置解析失败: {0}")]
    ParseFailed(String),

    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),

    /// 日志级别无效
    #[error("无效的日志级别: {0}")]
    InvalidLogLevel(String),

    /// 样式无效
    #[error("样式配置无效: {0}")]
    Style(#[from] StyleError),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
