//! 方程抽取
//!
//! 从题目原文中按三种形态抽取候选方程，仅用于展示
//! （`Problem.context` / `Problem.latex`），不参与分类。

use std::sync::LazyLock;

use regex::Regex;

/// 简单赋值：`x = 5`，表达式在逗号、句号、文本结尾或 and/or 处截断。
///
/// `eq` 组只覆盖方程本身，截断符不计入，下一次搜索从 `eq` 结尾继续。
static SIMPLE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<eq>\b[a-zA-Z][a-zA-Z0-9]*\s*=\s*[^=]+?)\s*(?:,|\.|$|\band\b|\bor\b)")
        .expect("simple assignment pattern")
});

/// 函数定义：`f(x) = ...`，不截断
static FUNCTION_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z][a-zA-Z0-9]*\s*\([^)]+\)\s*=\s*[^=]+")
        .expect("function definition pattern")
});

/// 积分：`∫ ... dx`
static INTEGRAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"∫[^∫]+(?:dx|dy|dz|dt)").expect("integral pattern"));

/// 行内公式：`$...$`
static INLINE_LATEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(.*?)\$").expect("inline latex pattern"));

/// 抽取文本中的方程
///
/// 依次应用简单赋值、函数定义、积分三种形态，按顺序拼接；
/// 完全相同的字符串只保留第一次出现。无匹配时返回空列表。
pub fn extract_equations(text: &str) -> Vec<String> {
    let mut equations: Vec<String> = Vec::new();

    let mut push_unique = |candidate: &str| {
        if !equations.iter().any(|e| e == candidate) {
            equations.push(candidate.to_string());
        }
    };

    let mut start = 0;
    while let Some(caps) = SIMPLE_ASSIGNMENT.captures_at(text, start) {
        let Some(eq) = caps.name("eq") else { break };
        push_unique(eq.as_str());
        start = eq.end();
    }

    for m in FUNCTION_DEFINITION.find_iter(text) {
        push_unique(m.as_str().trim_end());
    }

    for m in INTEGRAL.find_iter(text) {
        push_unique(m.as_str());
    }

    equations
}

/// 抽取 `$...$` 行内公式并以空格拼接；没有时返回 `None`
pub fn extract_inline_latex(text: &str) -> Option<String> {
    let fragments: Vec<&str> = INLINE_LATEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(" "))
    }
}
