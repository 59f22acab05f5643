use serde::Serialize;

use crate::models::problem::Problem;

/// 文档文本的抽取结果
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    pub problems: Vec<Problem>,
    /// 非空段落数量
    pub num_paragraphs: usize,
    pub num_problems: usize,
}
