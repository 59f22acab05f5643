//! 解答构建服务 - 业务能力层
//!
//! 只负责"补全回复 -> Solution"

use crate::models::Solution;
use crate::processing::{segment_response_for, synthesize_formula, SegmentedResponse};
use crate::processing::response_segmenter::DEFAULT_CODE_LANGUAGE;

/// 用默认代码语言把原始回复构建为解答
pub fn build_solution(raw: &str, confidence: f32) -> Solution {
    build_solution_for(raw, confidence, DEFAULT_CODE_LANGUAGE)
}

/// 按指定代码语言把原始回复构建为解答
///
/// `confidence` 由调用方（求解代理）给定，会被限制在 [0, 1]。
pub fn build_solution_for(raw: &str, confidence: f32, code_language: &str) -> Solution {
    let SegmentedResponse {
        explanation,
        steps,
        code,
    } = segment_response_for(raw, code_language);

    let formula_markup = synthesize_formula(&steps);

    Solution {
        explanation,
        steps,
        code,
        formula_markup,
        confidence: confidence.clamp(0.0, 1.0),
    }
}
