//! 文档题目抽取服务 - 业务能力层
//!
//! 输入是已由外部抽取好的文档纯文本（PDF / 图片解码不在本模块范围内），
//! 按空行切分段落，挑出像题目的段落并构建为 `Problem`。

use tracing::{debug, info, warn};

use crate::models::{Problem, ProcessedDocument};
use crate::services::problem_builder::build_problem;

/// 题目特征词，出现任意一个即视为题目段落
const PROBLEM_INDICATORS: &[&str] = &[
    "solve",
    "find",
    "calculate",
    "compute",
    "determine",
    "evaluate",
    "prove",
    "show that",
    "what is",
    "probability",
    "expected value",
    "variance",
    "distribution",
    "equation",
    "integral",
    "derivative",
    "limit",
];

/// 段落是否像一道题
pub fn looks_like_problem(paragraph: &str) -> bool {
    let lower = paragraph.to_lowercase();
    PROBLEM_INDICATORS.iter().any(|kw| lower.contains(kw))
}

/// 从文档文本中抽取题目
pub fn extract_problems(text: &str) -> ProcessedDocument {
    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut problems: Vec<Problem> = Vec::new();
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        if !looks_like_problem(paragraph) {
            debug!("段落 {} 不像题目，跳过", idx + 1);
            continue;
        }

        match build_problem(paragraph, None) {
            Ok(problem) => problems.push(problem),
            Err(e) => warn!("段落 {} 构建题目失败: {}", idx + 1, e),
        }
    }

    info!(
        "✓ 文档处理完成: 段落 {} 个, 题目 {} 个",
        paragraphs.len(),
        problems.len()
    );

    ProcessedDocument {
        num_paragraphs: paragraphs.len(),
        num_problems: problems.len(),
        problems,
    }
}
