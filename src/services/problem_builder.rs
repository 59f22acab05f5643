//! 题目构建服务 - 业务能力层
//!
//! 只负责"原始文本 -> Problem"，不关心求解流程

use tracing::info;

use crate::error::{AppResult, ProblemError};
use crate::models::{Problem, ProblemContext};
use crate::processing::{extract_equations, extract_inline_latex, resolve_problem_type};
use crate::utils::logging::truncate_text;

/// 把原始文本构建为题目
///
/// # 参数
/// - `text`: 题目原文
/// - `type_override`: 调用方指定的领域名称（可选），无效时回退到自动识别
///
/// # 返回
/// 文本去除首尾空白后为空时返回 `ProblemError::EmptyText`
pub fn build_problem(text: &str, type_override: Option<&str>) -> AppResult<Problem> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ProblemError::EmptyText.into());
    }

    let problem_type = resolve_problem_type(text, type_override);
    let latex = extract_inline_latex(text);
    let equations = extract_equations(text);

    info!(
        "题目构建完成: type={}, has_latex={}, equations={} | {}",
        problem_type,
        latex.is_some(),
        equations.len(),
        truncate_text(text, 60)
    );

    Ok(Problem {
        text: text.to_string(),
        problem_type,
        latex,
        context: if equations.is_empty() {
            None
        } else {
            Some(ProblemContext { equations })
        },
        images: None,
    })
}
