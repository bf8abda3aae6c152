//! # dialogue-cli
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p dialogue-cli -- --story demos/lighthouse.json
//! cargo run -p dialogue-cli -- --story demos/lighthouse.json -c 0 -c 1
//! cargo run -p dialogue-cli -- --config config.json --verbose
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dialogue_cli::{PendingConfig, load_story, play};
use tracing::info;

#[derive(Parser)]
#[command(name = "dialogue-cli")]
#[command(about = "无界面运行互动小说对话，输出日志标记文本")]
#[command(version)]
struct Cli {
    /// 配置文件（默认：config.json）
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// 故事脚本，覆盖配置文件中的 story_path
    #[arg(short, long)]
    story: Option<PathBuf>,

    /// 依次提交的选择索引（从 0 开始，可重复）
    #[arg(short = 'c', long = "choose")]
    choices: Vec<usize>,

    /// 输出 debug 级别日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("dialogue-cli error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 先取级别初始化订阅器，再记录配置加载结果
    let pending = PendingConfig::read(&cli.config);
    tracing_subscriber::fmt()
        .with_max_level(pending.level(cli.verbose)?)
        .with_writer(std::io::stderr)
        .init();

    let mut config = pending.finish();
    if let Some(story) = cli.story {
        config.story_path = Some(story);
    }

    config.validate()?;

    let story_path = config
        .story_path
        .clone()
        .ok_or_else(|| anyhow::anyhow!("未指定故事脚本（--story 或配置文件 story_path）"))?;

    let script = load_story(&story_path)?;
    let transcript = play(script, config.style, &cli.choices)?;

    println!("{}", transcript.markup);
    info!(
        turns = transcript.turns,
        finished = transcript.finished,
        "运行完成"
    );

    Ok(())
}
