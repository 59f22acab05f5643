use serde::{Deserialize, Serialize};

use crate::models::problem_type::ProblemType;

/// 一道题的解答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// 解释文字，没有解释时为固定占位文本
    pub explanation: String,
    /// 按回复中出现顺序排列的步骤
    pub steps: Vec<String>,
    /// 代码块，仅在找到目标语言的代码围栏时存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub formula_markup: String,
    /// 由求解代理决定的固定置信度，取值 [0, 1]
    pub confidence: f32,
}

/// 返回给调用方的求解结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    pub problem_type: ProblemType,
    pub explanation: String,
    pub steps: Vec<String>,
    pub code: Option<String>,
    pub formula_markup: String,
    pub confidence: f32,
}

impl SolveReport {
    pub fn new(problem_type: ProblemType, solution: Solution) -> Self {
        Self {
            problem_type,
            explanation: solution.explanation,
            steps: solution.steps,
            code: solution.code,
            formula_markup: solution.formula_markup,
            confidence: solution.confidence,
        }
    }
}
