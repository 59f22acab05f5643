//! 公式标记生成
//!
//! 从分段后的步骤中生成 `align*` 公式块：
//! 1. 优先取每个步骤中 `$...$` 之间的片段；
//! 2. 没有任何片段时，取含 `=` 的步骤按等号拆成左右两边；
//! 3. 仍然为空时输出固定占位行。

pub const BLOCK_BEGIN: &str = "\\begin{align*}\n";
pub const BLOCK_END: &str = "\\end{align*}";
pub const PLAIN_TEXT_PLACEHOLDER: &str = "\\text{Solution steps provided in text format.}";

const LINE_BREAK: &str = " \\\\\n";

/// 根据步骤生成公式标记块
pub fn synthesize_formula(steps: &[String]) -> String {
    let mut lines = delimited_fragments(steps);

    if lines.is_empty() {
        lines = equation_lines(steps);
    }

    let mut markup = String::from(BLOCK_BEGIN);
    if lines.is_empty() {
        markup.push_str(PLAIN_TEXT_PLACEHOLDER);
        markup.push('\n');
    } else {
        for line in &lines {
            markup.push_str(line);
            markup.push_str(LINE_BREAK);
        }
    }
    markup.push_str(BLOCK_END);
    markup
}

/// `$` 之间的片段（按 `$` 切分后的奇数段），原样保留
///
/// 只要某个步骤含 `$` 就至少产生一个片段（可能为空串）。
fn delimited_fragments(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .flat_map(|step| step.split('$').skip(1).step_by(2))
        .map(str::to_string)
        .collect()
}

/// 含 `=` 的步骤：左边取第一个等号之前，右边取第一、第二个等号之间
fn equation_lines(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .filter_map(|step| equation_line(step))
        .collect()
}

fn equation_line(step: &str) -> Option<String> {
    let mut parts = step.split('=');
    let left = parts.next()?;
    let right = parts.next()?;
    Some(format!("{} = {}", brace_exponents(left.trim()), right.trim()))
}

/// 把左侧的指数写法转成花括号分组：`^` -> `^{`，空格 -> `} `，末尾补 `}`
fn brace_exponents(left: &str) -> String {
    let mut braced = left.replace('^', "^{").replace(' ', "} ");
    braced.push('}');
    braced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dollar_fragments() {
        let markup = synthesize_formula(&steps(&["The answer is $x=5$"]));
        assert!(markup.starts_with(BLOCK_BEGIN));
        assert!(markup.ends_with(BLOCK_END));
        assert!(markup.contains("x=5 \\\\\n"));
    }

    #[test]
    fn test_fragments_across_steps_keep_order() {
        let markup = synthesize_formula(&steps(&[
            "Step 1: write $a^2 + b^2$ and $c^2$",
            "Step 2: no math",
            "Step 3: so $c = 5$",
        ]));
        assert_eq!(
            markup,
            "\\begin{align*}\na^2 + b^2 \\\\\nc^2 \\\\\nc = 5 \\\\\n\\end{align*}"
        );
    }

    #[test]
    fn test_equals_fallback() {
        let markup = synthesize_formula(&steps(&["Step 1: x^2 = 9", "Step 2: take roots"]));
        assert_eq!(
            markup,
            "\\begin{align*}\nStep} 1:} x^{2} = 9 \\\\\n\\end{align*}"
        );
    }

    #[test]
    fn test_fragments_are_kept_verbatim() {
        let markup = synthesize_formula(&steps(&["so $ x = 5 $"]));
        assert_eq!(markup, "\\begin{align*}\n x = 5  \\\\\n\\end{align*}");
    }

    #[test]
    fn test_double_dollar_stays_on_fragment_path() {
        let markup = synthesize_formula(&steps(&["$$x=1$$"]));
        assert!(!markup.contains("$$"));
        assert!(!markup.contains("x}"));
        assert_eq!(
            markup,
            "\\begin{align*}\n \\\\\n \\\\\n\\end{align*}"
        );
    }

    #[test]
    fn test_equals_fallback_takes_text_between_first_two_signs() {
        let markup = synthesize_formula(&steps(&["a = b = c"]));
        assert_eq!(markup, "\\begin{align*}\na} = b \\\\\n\\end{align*}");
    }

    #[test]
    fn test_placeholder_without_math() {
        let markup = synthesize_formula(&steps(&["no math here"]));
        assert_eq!(
            markup,
            "\\begin{align*}\n\\text{Solution steps provided in text format.}\n\\end{align*}"
        );
    }

    #[test]
    fn test_placeholder_for_no_steps() {
        let markup = synthesize_formula(&[]);
        assert!(markup.contains(PLAIN_TEXT_PLACEHOLDER));
    }
}
