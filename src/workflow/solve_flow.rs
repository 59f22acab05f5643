//! 求解流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 原始文本 → `build_problem`（分类 + 方程抽取）
//! 2. 按领域选择代理 → 调用一次补全服务
//! 3. 回复 → `build_solution`（分段 + 公式生成）
//!
//! 批量求解时按 `max_concurrent_problems` 分批，每批内并发执行。

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::agents::Agent;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Problem, ProblemType, Solution, SolveReport};
use crate::services::{build_problem, CompletionClient, LlmService, ReportWriter};
use crate::utils::logging::{
    log_batch_complete, log_batch_start, print_final_stats, truncate_text,
};

/// 批量求解中单道题的结果
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// 题目序号（从1开始）
    pub index: usize,
    pub problem_type: ProblemType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SolveReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.report.is_some()
    }
}

/// 求解流程
///
/// - 编排 Problem → Agent → Solution
/// - 不解析补全服务的错误，原样返回
/// - 只通过 `CompletionClient` 访问外部服务
pub struct SolveFlow {
    config: Config,
    client: Arc<dyn CompletionClient>,
}

impl SolveFlow {
    /// 使用自定义补全服务创建
    pub fn new(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        Self { config, client }
    }

    /// 使用配置（及可选的会话密钥）创建基于 LLM API 的流程
    pub fn from_config(config: Config, session_key: Option<&str>) -> AppResult<Self> {
        config.validate(session_key)?;
        let client = Arc::new(LlmService::for_session(&config, session_key));
        Ok(Self::new(config, client))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 求解一段原始文本
    pub async fn solve_text(&self, text: &str, type_override: Option<&str>) -> AppResult<SolveReport> {
        info!("处理文本输入: {}", truncate_text(text.trim(), 100));

        let problem = build_problem(text, type_override)?;
        info!("识别的题目类型: {}", problem.problem_type);

        let solution = self.solve_problem(&problem).await?;
        Ok(SolveReport::new(problem.problem_type, solution))
    }

    /// 求解已构建的题目
    pub async fn solve_problem(&self, problem: &Problem) -> AppResult<Solution> {
        let agent = Agent::for_problem(problem);
        let solution = agent.solve(problem, self.client.as_ref()).await?;
        info!("✓ 题目求解成功 (置信度: {})", solution.confidence);
        Ok(solution)
    }

    /// 批量求解
    ///
    /// 结果顺序与输入一致；单题失败不会中断其他题目。
    pub async fn solve_batch(&self, problems: Vec<Problem>) -> AppResult<Vec<BatchOutcome>> {
        let writer = ReportWriter::with_path(&self.config.output_log_file);
        writer.init()?;

        let total = problems.len();
        let batch_size = self.config.max_concurrent_problems.max(1);
        let total_batches = total.div_ceil(batch_size);
        let mut outcomes = Vec::with_capacity(total);

        for (batch_idx, batch) in problems.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            log_batch_start(
                batch_idx + 1,
                total_batches,
                batch_start + 1,
                batch_start + batch.len(),
                total,
            );

            let batch_outcomes = self.process_batch(batch, batch_start).await;

            let success = batch_outcomes.iter().filter(|o| o.is_success()).count();
            log_batch_complete(batch_idx + 1, success, batch_outcomes.len());

            for outcome in &batch_outcomes {
                let line = match (&outcome.report, &outcome.error) {
                    (Some(report), _) => format!("成功: {}", report.explanation),
                    (None, Some(e)) => format!("失败: {}", e),
                    (None, None) => "失败".to_string(),
                };
                if let Err(e) = writer.write(outcome.index, outcome.problem_type, &line) {
                    warn!("写入求解日志失败: {}", e);
                }
            }

            outcomes.extend(batch_outcomes);
        }

        let success = outcomes.iter().filter(|o| o.is_success()).count();
        print_final_stats(success, total - success, total, writer.path());

        Ok(outcomes)
    }

    /// 处理单个批次，批内所有题目同时执行
    async fn process_batch(&self, batch: &[Problem], batch_start: usize) -> Vec<BatchOutcome> {
        let mut handles = Vec::with_capacity(batch.len());

        for (idx, problem) in batch.iter().enumerate() {
            let index = batch_start + idx + 1;
            let problem = problem.clone();
            let client = self.client.clone();

            let handle = tokio::spawn(async move {
                let agent = Agent::for_problem(&problem);
                agent.solve(&problem, client.as_ref()).await
            });
            handles.push((index, batch[idx].problem_type, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (index, problem_type, handle) in handles {
            let (report, error) = match handle.await {
                Ok(Ok(solution)) => (Some(SolveReport::new(problem_type, solution)), None),
                Ok(Err(e)) => {
                    error!("[题目 {}] ❌ 求解失败: {}", index, e);
                    (None, Some(e.to_string()))
                }
                Err(e) => {
                    error!("[题目 {}] 任务执行失败: {}", index, e);
                    (None, Some(e.to_string()))
                }
            };
            outcomes.push(BatchOutcome {
                index,
                problem_type,
                report,
                error,
            });
        }

        outcomes
    }
}
