//! # Math Agent
//!
//! 把自由文本数学题分类、交给外部补全服务求解，并把非结构化回复
//! 整理成结构化解答（解释、步骤、代码块、公式标记）。
//!
//! ## 架构设计
//!
//! ### ① 文本处理核心（Processing）
//! - `processing/` - 与 LLM 无关的纯函数：分类、方程抽取、回复分段、公式生成
//!
//! ### ② 业务能力层（Services）
//! - `ProblemBuilder` - 原始文本 → `Problem`
//! - `SolutionBuilder` - 补全回复 → `Solution`
//! - `LlmService` - 补全服务（`CompletionClient` 的默认实现）
//! - `document_service` - 文档文本 → 题目列表
//! - `ReportWriter` - 写批量求解日志
//!
//! ### ③ 求解代理（Agents）
//! - `Agent::{General, Probability}` - 按领域选择提示词与置信度
//!
//! ### ④ 流程层（Workflow）
//! - `SolveFlow` - 单题求解与批量求解
//!
//! ## 模块结构

pub mod agents;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use agents::Agent;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Problem, ProblemType, Solution, SolveReport};
pub use processing::{classify, extract_equations, segment_response, synthesize_formula};
pub use services::{build_problem, build_solution, CompletionClient, LlmService};
pub use workflow::{BatchOutcome, SolveFlow};
