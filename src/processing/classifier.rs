//! 题目领域分类
//!
//! 按固定优先级依次检查关键词集合，第一个命中的集合即为结果（不是打分投票）。
//! 集合之间有重叠时由优先级决定，例如同时包含 "probability" 与 "equation"
//! 的文本归为概率。

use tracing::{debug, warn};

use crate::models::ProblemType;

/// 关键词规则，顺序即优先级
const KEYWORD_RULES: &[(ProblemType, &[&str])] = &[
    (
        ProblemType::Probability,
        &[
            "probability",
            "random",
            "distribution",
            "expected value",
            "variance",
            "standard deviation",
            "binomial",
            "normal",
            "poisson",
            "bernoulli",
        ],
    ),
    (
        ProblemType::Statistics,
        &[
            "mean",
            "median",
            "mode",
            "hypothesis",
            "confidence interval",
            "regression",
            "correlation",
            "t-test",
            "chi-square",
        ],
    ),
    (
        ProblemType::Calculus,
        &[
            "derivative",
            "integral",
            "limit",
            "differentiate",
            "integrate",
            "calculus",
            "d/dx",
            "∂/∂x",
        ],
    ),
    (
        ProblemType::LinearAlgebra,
        &[
            "matrix",
            "vector",
            "eigenvalue",
            "determinant",
            "linear transformation",
            "basis",
            "span",
        ],
    ),
    (
        ProblemType::Algebra,
        &[
            "solve",
            "equation",
            "simplify",
            "factor",
            "quadratic",
            "polynomial",
            "root",
            "zero",
        ],
    ),
];

/// 判断题目所属领域，未命中任何关键词时返回 `General`
pub fn classify(text: &str) -> ProblemType {
    let text_lower = text.to_lowercase();

    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text_lower.contains(kw)))
        .map(|(problem_type, _)| *problem_type)
        .unwrap_or_default()
}

/// 解析调用方指定的领域；名称无效时记录警告并回退到自动分类
pub fn resolve_problem_type(text: &str, type_override: Option<&str>) -> ProblemType {
    match type_override {
        Some(name) => match ProblemType::from_name(name) {
            Some(problem_type) => {
                debug!("使用指定的题目类型: {}", problem_type);
                problem_type
            }
            None => {
                warn!("无效的题目类型 '{}'，改为自动识别", name);
                classify(text)
            }
        },
        None => classify(text),
    }
}
