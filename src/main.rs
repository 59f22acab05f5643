use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use math_agent::services::extract_problems;
use math_agent::utils::logging;
use math_agent::{build_problem, Config, SolveFlow};
use serde_json::json;

/// 数学题分类与求解
///
/// 配置文件默认读取 `math_agent.toml`，可用环境变量 `MATH_AGENT_CONFIG` 指定。
#[derive(Parser, Debug)]
#[command(name = "math_agent")]
#[command(author, version, about = "数学题分类、求解与解答整理")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 只分类并抽取方程，不调用补全服务
    Classify {
        /// 题目文本
        text: String,
    },
    /// 求解一道题
    Solve {
        /// 题目文本
        text: String,

        /// 指定领域（无效名称时回退到自动分类）
        #[arg(long = "type", value_name = "TYPE")]
        problem_type: Option<String>,

        /// 会话密钥（优先于配置中的密钥）
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },
    /// 从文本文件中抽取题目并批量求解
    Batch {
        /// 文本文件路径
        file: PathBuf,

        /// 会话密钥（优先于配置中的密钥）
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },
    /// 健康检查
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config_path = std::env::var("MATH_AGENT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("math_agent.toml"));
    let config = Config::load(Some(config_path.as_path()))?;

    // 初始化日志
    logging::init(config.verbose_logging);

    match cli.command {
        Command::Health => {
            println!(
                "{}",
                json!({ "status": "healthy", "service": "Math Agent System" })
            );
        }
        Command::Classify { text } => {
            let problem = build_problem(&text, None)?;
            println!("{}", serde_json::to_string_pretty(&problem)?);
        }
        Command::Solve {
            text,
            problem_type,
            api_key,
        } => {
            logging::log_startup(&config.llm_model_name, 1);
            let flow = SolveFlow::from_config(config, api_key.as_deref())?;
            let report = flow.solve_text(&text, problem_type.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Batch { file, api_key } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("无法读取文件: {}", file.display()))?;

            let document = extract_problems(&text);
            if document.problems.is_empty() {
                tracing::warn!("⚠️ 文件中没有找到题目，程序结束");
                return Ok(());
            }

            logging::log_startup(&config.llm_model_name, config.max_concurrent_problems);
            let flow = SolveFlow::from_config(config, api_key.as_deref())?;
            let outcomes = flow.solve_batch(document.problems).await?;
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
    }

    Ok(())
}
