//! # Session 模块
//!
//! 无界面运行一段对话：按顺序提交给定的选择，返回最终的标记文本。

use std::fs;
use std::path::Path;

use anyhow::Context;
use dialogue_log::{LogStyle, ScriptedStory, StoryScript, TurnOrchestrator, TurnOutcome};
use tracing::{debug, info};

/// 运行结果
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// 最终渲染的标记文本
    pub markup: String,
    /// 故事是否已结束
    pub finished: bool,
    /// 已完成的叙述阶段数
    pub turns: usize,
}

/// 读取并检查故事脚本
pub fn load_story(path: impl AsRef<Path>) -> anyhow::Result<StoryScript> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("无法读取故事脚本: {}", path.display()))?;
    let script = StoryScript::from_json(&text)
        .with_context(|| format!("故事脚本解析失败: {}", path.display()))?;

    let issues = script.validate();
    if !issues.is_empty() {
        let report: Vec<String> = issues.iter().map(ToString::to_string).collect();
        anyhow::bail!("故事脚本检查失败:\n  {}", report.join("\n  "));
    }

    info!(path = %path.display(), knots = script.knots.len(), "故事脚本加载成功");
    Ok(script)
}

/// 从头运行故事，依次提交 `choices` 中的选择
pub fn play(script: StoryScript, style: LogStyle, choices: &[usize]) -> anyhow::Result<Transcript> {
    let story = ScriptedStory::new(script)?;
    let mut session = TurnOrchestrator::new(story, style)?;

    let mut outcome = session.start()?;
    for (step, &index) in choices.iter().enumerate() {
        debug!(step, index, "提交选择");
        outcome = session
            .select_choice(index)
            .with_context(|| format!("第 {} 次选择（索引 {}）失败", step + 1, index))?;
    }

    Ok(Transcript {
        markup: session.render(),
        finished: outcome == TurnOutcome::Finished,
        turns: session.turn_count(),
    })
}
