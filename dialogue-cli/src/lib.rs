//! # Dialogue CLI
//!
//! 对话日志的无界面宿主：读取配置与故事脚本，驱动 `dialogue-log`，
//! 把渲染好的标记文本输出到标准输出。日志写到标准错误。

pub mod config;
pub mod session;

pub use config::{CliConfig, ConfigError, PendingConfig};
pub use session::{Transcript, load_story, play};
