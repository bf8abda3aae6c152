//! # Scripted 模块
//!
//! 以 JSON 描述的内存故事引擎。
//!
//! ## 格式
//!
//! ```text
//! {
//!   "start": "intro",
//!   "variables": { "name": "Mira" },
//!   "knots": {
//!     "intro": {
//!       "lines": [ { "text": "Hello.", "tags": ["Character"] } ],
//!       "choices": [ { "text": "Wave", "target": "wave" }, { "text": "Leave" } ]
//!     },
//!     "wave": { "lines": [ { "text": "You wave.", "tags": ["Player"] } ] }
//!   }
//! }
//! ```
//!
//! - 节点的所有行读完后才给出选项
//! - 选项的路径标识为 `{节点名}.c-{索引}`
//! - 缺省的 `target` 或 `"END"` 表示选择后故事结束

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{StoryChoice, StoryEngine, VarValue};
use crate::error::StoryError;

/// 表示故事结束的跳转目标
pub const END_TARGET: &str = "END";

/// 一行叙述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptLine {
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 一个选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptChoice {
    pub text: String,
    /// 跳转目标节点（None 或 `"END"` 表示结束）
    #[serde(default)]
    pub target: Option<String>,
}

impl ScriptChoice {
    /// 实际跳转的节点名，结束时返回 None
    pub fn target_knot(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| *t != END_TARGET)
    }
}

/// 故事节点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    #[serde(default)]
    pub lines: Vec<ScriptLine>,
    #[serde(default)]
    pub choices: Vec<ScriptChoice>,
}

/// 脚本检查问题
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptIssue {
    /// 起始节点不存在
    #[error("起始节点 '{0}' 不存在")]
    MissingStart(String),

    /// 选项指向不存在的节点
    #[error("节点 '{knot}' 的第 {choice} 个选项指向不存在的节点 '{target}'")]
    UnknownTarget {
        knot: String,
        choice: usize,
        target: String,
    },
}

/// 故事脚本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryScript {
    /// 起始节点名
    pub start: String,
    /// 故事变量
    #[serde(default)]
    pub variables: BTreeMap<String, VarValue>,
    /// 节点表
    pub knots: BTreeMap<String, Knot>,
}

impl StoryScript {
    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// 检查起始节点与所有跳转目标
    pub fn validate(&self) -> Vec<ScriptIssue> {
        let mut issues = Vec::new();

        if !self.knots.contains_key(&self.start) {
            issues.push(ScriptIssue::MissingStart(self.start.clone()));
        }

        for (name, knot) in &self.knots {
            for (i, choice) in knot.choices.iter().enumerate() {
                if let Some(target) = choice.target_knot()
                    && !self.knots.contains_key(target)
                {
                    issues.push(ScriptIssue::UnknownTarget {
                        knot: name.clone(),
                        choice: i,
                        target: target.to_string(),
                    });
                }
            }
        }

        issues
    }
}

/// 内存故事引擎
#[derive(Debug, Clone)]
pub struct ScriptedStory {
    script: StoryScript,
    /// 当前节点（None 表示故事已结束）
    knot: Option<String>,
    /// 当前节点内下一行的位置
    cursor: usize,
    /// 最近一行的标签
    tags: Vec<String>,
}

impl ScriptedStory {
    /// 从起始节点开始
    pub fn new(script: StoryScript) -> Result<Self, StoryError> {
        if !script.knots.contains_key(&script.start) {
            return Err(StoryError::MissingStart {
                knot: script.start.clone(),
            });
        }

        let knot = Some(script.start.clone());
        Ok(Self {
            script,
            knot,
            cursor: 0,
            tags: Vec::new(),
        })
    }

    /// 当前节点名
    pub fn current_knot(&self) -> Option<&str> {
        self.knot.as_deref()
    }

    pub fn script(&self) -> &StoryScript {
        &self.script
    }

    fn knot_data(&self) -> Option<&Knot> {
        self.knot.as_ref().and_then(|k| self.script.knots.get(k))
    }
}

impl StoryEngine for ScriptedStory {
    fn can_continue(&self) -> bool {
        self.knot_data()
            .is_some_and(|knot| self.cursor < knot.lines.len())
    }

    fn continue_once(&mut self) -> Result<String, StoryError> {
        let line = self
            .knot_data()
            .and_then(|knot| knot.lines.get(self.cursor))
            .cloned()
            .ok_or(StoryError::Exhausted)?;

        self.cursor += 1;
        self.tags = line.tags;
        Ok(line.text)
    }

    fn current_tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn current_choices(&self) -> Vec<StoryChoice> {
        if self.can_continue() {
            return Vec::new();
        }

        match (&self.knot, self.knot_data()) {
            (Some(name), Some(knot)) => knot
                .choices
                .iter()
                .enumerate()
                .map(|(i, c)| StoryChoice::new(i, c.text.clone(), format!("{name}.c-{i}")))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn choose_index(&mut self, index: usize) -> Result<(), StoryError> {
        if self.can_continue() {
            return Err(StoryError::NoChoicesPending);
        }

        let knot = self.knot_data().ok_or(StoryError::NoChoicesPending)?;
        if knot.choices.is_empty() {
            return Err(StoryError::NoChoicesPending);
        }

        let choice = knot
            .choices
            .get(index)
            .ok_or(StoryError::InvalidChoice {
                index,
                max: knot.choices.len(),
            })?;

        let next = match choice.target_knot() {
            None => None,
            Some(target) if self.script.knots.contains_key(target) => Some(target.to_string()),
            Some(target) => {
                return Err(StoryError::UnknownKnot {
                    knot: target.to_string(),
                });
            }
        };

        self.knot = next;
        self.cursor = 0;
        self.tags.clear();
        Ok(())
    }

    fn fetch_variable(&self, name: &str) -> Option<VarValue> {
        self.script.variables.get(name).cloned()
    }
}
