//! 回复分段
//!
//! 把补全服务返回的自由文本拆成三部分：解释、有序步骤、代码块。
//!
//! ## 处理流程
//!
//! 1. **代码围栏抽取**：按 ```` ``` ```` 切分，奇数段为围栏内容。
//!    标记为目标语言的围栏被取出作为 `code` 并从文本中删除；
//!    多个匹配时最后一个生效。其余非空段落以单个空格拼接。
//! 2. **逐行分类**：两状态机 `Explanation -> Steps`，进入 `Steps` 后不再返回。

use tracing::debug;

/// 默认目标代码语言
pub const DEFAULT_CODE_LANGUAGE: &str = "matlab";

/// 没有解释文字时使用的占位文本
pub const EXPLANATION_PLACEHOLDER: &str = "Solution provided below.";

const FENCE: &str = "```";

/// 分段结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentedResponse {
    pub explanation: String,
    pub steps: Vec<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Explanation,
    Steps,
}

/// 使用默认语言（MATLAB）分段
pub fn segment_response(raw: &str) -> SegmentedResponse {
    segment_response_for(raw, DEFAULT_CODE_LANGUAGE)
}

/// 按指定的目标代码语言分段
pub fn segment_response_for(raw: &str, code_language: &str) -> SegmentedResponse {
    let (prose, code) = extract_code(raw, code_language);

    let mut explanation: Vec<&str> = Vec::new();
    let mut steps: Vec<String> = Vec::new();
    let mut current_step: Vec<&str> = Vec::new();
    let mut state = LineState::Explanation;

    for line in prose.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_step_marker(line) {
            state = LineState::Steps;
            if !current_step.is_empty() {
                steps.push(current_step.join(" "));
            }
            current_step = vec![line];
            continue;
        }

        match state {
            LineState::Explanation => explanation.push(line),
            LineState::Steps => current_step.push(line),
        }
    }

    if !current_step.is_empty() {
        steps.push(current_step.join(" "));
    }

    let explanation = if explanation.is_empty() {
        EXPLANATION_PLACEHOLDER.to_string()
    } else {
        explanation.join(" ")
    };

    debug!(
        "回复分段完成: 步骤 {} 个, 代码块: {}",
        steps.len(),
        code.is_some()
    );

    SegmentedResponse {
        explanation,
        steps,
        code,
    }
}

/// 抽取目标语言的代码围栏，返回 (剩余文本, 代码)
fn extract_code(raw: &str, code_language: &str) -> (String, Option<String>) {
    let mut parts: Vec<&str> = raw.split(FENCE).collect();
    let mut code = None;

    for i in (1..parts.len()).step_by(2) {
        if let Some(body) = tagged_fence_body(parts[i - 1], parts[i], code_language) {
            code = Some(body.to_string());
            parts[i] = "";
        }
    }

    let prose = parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    (prose, code)
}

/// 判断围栏是否属于目标语言，是则返回去掉语言标记后的内容
///
/// 围栏首行若是单个标记（如 ```` ```matlab ````），以它为准；
/// 否则看前一段文字的最后一个词（如 "MATLAB:"）。
fn tagged_fence_body<'a>(preceding: &str, fenced: &'a str, code_language: &str) -> Option<&'a str> {
    if let Some((info, body)) = fenced.split_once('\n') {
        let info = info.trim();
        if !info.is_empty() && !info.contains(char::is_whitespace) {
            return info
                .eq_ignore_ascii_case(code_language)
                .then(|| body.trim());
        }
    }

    let trailing_token = preceding
        .split_whitespace()
        .last()
        .map(|token| token.trim_end_matches(':'));

    match trailing_token {
        Some(token) if token.eq_ignore_ascii_case(code_language) => Some(fenced.trim()),
        _ => None,
    }
}

/// 步骤标记：以 "Step" 开头，或在前五个字符内出现 "数字." 形式的序号
fn is_step_marker(line: &str) -> bool {
    if line.starts_with("Step") {
        return true;
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && digits < 5 && line.as_bytes().get(digits) == Some(&b'.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explanation_and_steps() {
        let segmented = segment_response("Intro text.\nStep 1: do X\nStep 2: do Y");
        assert_eq!(segmented.explanation, "Intro text.");
        assert_eq!(segmented.steps, vec!["Step 1: do X", "Step 2: do Y"]);
        assert_eq!(segmented.code, None);
    }

    #[test]
    fn test_no_markers_keeps_full_prose() {
        let segmented = segment_response("The answer is 4.\nBecause 2 + 2 = 4.\n\nDone.");
        assert!(segmented.steps.is_empty());
        assert_eq!(segmented.explanation, "The answer is 4. Because 2 + 2 = 4. Done.");
    }

    #[test]
    fn test_continuation_lines_join_current_step() {
        let raw = "Overview\n1. Expand the square\n(x+1)^2 = x^2 + 2x + 1\n2. Collect terms\n";
        let segmented = segment_response(raw);
        assert_eq!(segmented.explanation, "Overview");
        assert_eq!(
            segmented.steps,
            vec![
                "1. Expand the square (x+1)^2 = x^2 + 2x + 1",
                "2. Collect terms"
            ]
        );
    }

    #[test]
    fn test_multi_digit_enumerator() {
        let raw = "Intro\n9. nine\n10. ten\n12345. not a step";
        let segmented = segment_response(raw);
        assert_eq!(segmented.steps, vec!["9. nine", "10. ten 12345. not a step"]);
    }

    #[test]
    fn test_placeholder_when_steps_only() {
        let segmented = segment_response("Step 1: factor\nStep 2: solve");
        assert_eq!(segmented.explanation, EXPLANATION_PLACEHOLDER);
        assert_eq!(segmented.steps.len(), 2);
    }

    #[test]
    fn test_placeholder_for_empty_reply() {
        let segmented = segment_response("   \n\n");
        assert_eq!(segmented.explanation, EXPLANATION_PLACEHOLDER);
        assert!(segmented.steps.is_empty());
    }

    #[test]
    fn test_tagged_fence_is_extracted() {
        let raw = "We simulate it.\n```matlab\nx = rand(1, 10);\ndisp(mean(x));\n```\nStep 1: run the code";
        let segmented = segment_response(raw);
        assert_eq!(
            segmented.code.as_deref(),
            Some("x = rand(1, 10);\ndisp(mean(x));")
        );
        assert_eq!(segmented.explanation, "We simulate it.");
        assert_eq!(segmented.steps, vec!["Step 1: run the code"]);
        assert!(!segmented.explanation.contains("rand"));
    }

    #[test]
    fn test_fence_tagged_by_preceding_token() {
        let raw = "Code in MATLAB:\n```\ny = 2 * 3;\n```";
        let segmented = segment_response(raw);
        assert_eq!(segmented.code.as_deref(), Some("y = 2 * 3;"));
        assert_eq!(segmented.explanation, "Code in MATLAB:");
    }

    #[test]
    fn test_other_language_fence_stays_in_prose() {
        let raw = "Intro\n```python\nprint(1)\n```";
        let segmented = segment_response(raw);
        assert_eq!(segmented.code, None);
        assert!(segmented.explanation.contains("print(1)"));
    }

    #[test]
    fn test_last_tagged_fence_wins() {
        let raw = "A\n```matlab\nfirst\n```\nB\n```MATLAB\nsecond\n```\nC";
        let segmented = segment_response(raw);
        assert_eq!(segmented.code.as_deref(), Some("second"));
        assert_eq!(segmented.explanation, "A B C");
    }

    #[test]
    fn test_custom_language() {
        let raw = "Intro\n```python\nprint(1)\n```";
        let segmented = segment_response_for(raw, "python");
        assert_eq!(segmented.code.as_deref(), Some("print(1)"));
        assert_eq!(segmented.explanation, "Intro");
    }
}
