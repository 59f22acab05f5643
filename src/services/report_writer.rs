//! 求解日志写入服务 - 业务能力层
//!
//! 只负责"把单道题的求解结果追加到日志文件"，不关心流程

use std::fs::OpenOptions;
use std::io::Write;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::ProblemType;
use crate::utils::logging::truncate_text;

/// 求解日志写入服务
pub struct ReportWriter {
    log_file_path: String,
}

impl ReportWriter {
    /// 使用指定文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.log_file_path
    }

    /// 写入日志头（覆盖已有内容）
    pub fn init(&self) -> AppResult<()> {
        let header = format!(
            "{}\n批量求解日志 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        std::fs::write(&self.log_file_path, header)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))
    }

    /// 追加一条求解记录
    ///
    /// # 参数
    /// - `problem_index`: 题目序号（从1开始）
    /// - `problem_type`: 题目领域
    /// - `outcome`: 结果描述（成功摘要或失败原因）
    pub fn write(&self, problem_index: usize, problem_type: ProblemType, outcome: &str) -> AppResult<()> {
        debug!("写入求解记录: 题目 {} | 类型 {}", problem_index, problem_type);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))?;

        let line = format!(
            "题目 {} | 类型 {} | {}\n",
            problem_index,
            problem_type,
            truncate_text(outcome, 120).replace('\n', " ")
        );

        file.write_all(line.as_bytes())
            .map_err(|e| AppError::file_write_failed(&self.log_file_path, e))
    }
}
