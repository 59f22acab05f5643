//! 文本处理核心
//!
//! 与 LLM 无关的确定性文本逻辑，全部为纯函数，可并发调用。
//!
//! - `equation_extractor` - 从题目文本中抽取方程
//! - `classifier` - 题目领域分类
//! - `response_segmenter` - 把回复拆成解释 / 步骤 / 代码
//! - `formula_synth` - 从步骤生成公式标记

pub mod classifier;
pub mod equation_extractor;
pub mod formula_synth;
pub mod response_segmenter;

pub use classifier::{classify, resolve_problem_type};
pub use equation_extractor::{extract_equations, extract_inline_latex};
pub use formula_synth::synthesize_formula;
pub use response_segmenter::{segment_response, segment_response_for, SegmentedResponse};
