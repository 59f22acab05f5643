use serde::{Deserialize, Serialize};

use crate::models::problem_type::ProblemType;

/// 题目附加上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemContext {
    /// 从题目文本中抽取出的方程，按出现顺序排列
    pub equations: Vec<String>,
}

/// 一道数学题
///
/// 每个请求构建一次，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// 去除首尾空白后的题目文本（非空）
    pub text: String,
    #[serde(rename = "type")]
    pub problem_type: ProblemType,
    /// 文本中 `$...$` 片段以空格拼接的结果
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex: Option<String>,
    /// 未抽取到方程时为 `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ProblemContext>,
    /// 图片 URL，由文档抽取方提供
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl Problem {
    /// 已抽取的方程列表（可能为空）
    pub fn equations(&self) -> &[String] {
        self.context
            .as_ref()
            .map(|ctx| ctx.equations.as_slice())
            .unwrap_or_default()
    }

    /// 附加图片后返回新的题目
    pub fn with_images(self, images: Vec<String>) -> Self {
        Self {
            images: if images.is_empty() { None } else { Some(images) },
            ..self
        }
    }
}
