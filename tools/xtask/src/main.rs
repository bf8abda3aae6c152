//! # xtask - 开发辅助工具
//!
//! 对话日志 workspace 的门禁与故事检查命令。
//!
//! ## 命令
//!
//! - `check-all`: 依次运行 fmt、clippy、test
//! - `cov`: 生成 dialogue-log 的 HTML 覆盖率报告
//! - `story-check`: 检查故事脚本（JSON 格式、起始节点、跳转目标）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::Context;
use dialogue_log::{ScriptIssue, StoryScript};
use walkdir::WalkDir;

/// 门禁步骤：传给 cargo 的参数
const GATE: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    &["test", "--workspace"],
];

/// 覆盖率只统计渲染核心，宿主与 xtask 不计入
const COVERAGE: &[&str] = &["llvm-cov", "-p", "dialogue-log", "--html"];

/// 执行一次 cargo 调用，失败时带上完整命令行
fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = format!("cargo {}", args.join(" "));
    eprintln!("\n==> {line}");

    let status = Command::new("cargo").args(args).status()?;
    anyhow::ensure!(status.success(), "`{line}` 退出状态 {status}");
    Ok(())
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            for step in GATE {
                cargo(step)?;
            }
        }
        "cov" => {
            // 未安装 cargo-llvm-cov 时 cargo 会报 no such command
            cargo(COVERAGE).context("覆盖率运行失败（需要 cargo install cargo-llvm-cov）")?;
            eprintln!("\n报告: target/llvm-cov/html/index.html");
        }
        "story-check" => {
            let path = args.next();
            story_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("未知子命令: {other}（运行 `cargo xtask help` 查看用法）"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 对话日志开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       fmt + clippy + test
  cov             dialogue-log 覆盖率报告（需要 cargo-llvm-cov）
  story-check     检查故事脚本

STORY-CHECK:
  cargo xtask story-check [path]

  不带参数：检查 demos/ 下所有 .json 故事文件（跳过 config.json）
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 格式错误
    - 起始节点是否存在
    - 选项跳转目标是否存在
"#
    );
}

//=============================================================================
// story-check 命令实现
//=============================================================================

/// 默认故事目录（相对于 workspace root）
const DEFAULT_STORY_DIR: &str = "demos";

/// 故事检查结果
#[derive(Default)]
struct StoryCheckResult {
    /// 检查的故事数量
    stories_checked: usize,
    /// 解析错误数量
    parse_errors: usize,
    /// 检查出的问题
    issues: Vec<(String, ScriptIssue)>,
}

/// 执行故事检查
fn story_check(path: Option<&str>) -> anyhow::Result<()> {
    let root = PathBuf::from(path.unwrap_or(DEFAULT_STORY_DIR));

    let files = if root.is_file() {
        vec![root]
    } else if root.is_dir() {
        collect_story_files(&root)
    } else {
        anyhow::bail!(
            "路径不存在: {}\n请在 workspace 根目录运行，或指定故事路径",
            root.display()
        );
    };

    if files.is_empty() {
        eprintln!("未找到故事文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个故事文件...\n", files.len());

    let mut result = StoryCheckResult::default();
    for file in &files {
        check_story_file(file, &mut result);
    }

    print_check_result(&result);

    if result.parse_errors > 0 || !result.issues.is_empty() {
        anyhow::bail!("故事检查发现错误");
    }

    Ok(())
}

/// 收集目录下的所有故事文件
fn collect_story_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .filter(|p| p.file_name().is_some_and(|name| name != "config.json"))
        .collect();
    files.sort();
    files
}

/// 检查单个故事文件
fn check_story_file(file: &Path, result: &mut StoryCheckResult) {
    let story_id = file.display().to_string();
    result.stories_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}: 无法读取文件 - {}", story_id, e);
            result.parse_errors += 1;
            return;
        }
    };

    let script = match StoryScript::from_json(&content) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[ERROR] {}: {}", story_id, e);
            result.parse_errors += 1;
            return;
        }
    };

    for issue in script.validate() {
        result.issues.push((story_id.clone(), issue));
    }
}

/// 输出检查结果
fn print_check_result(result: &StoryCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个故事", result.stories_checked);
    eprintln!();

    for (story_id, issue) in &result.issues {
        eprintln!("[ERROR] {}: {}", story_id, issue);
    }

    let error_count = result.parse_errors + result.issues.len();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误", error_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
