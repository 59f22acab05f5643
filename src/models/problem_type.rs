use phf::phf_map;

/// 题目领域枚举
///
/// 每道题恰好属于一个领域，`General` 为默认兜底值。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    /// 通用
    #[default]
    General,
    /// 代数
    Algebra,
    /// 微积分
    Calculus,
    /// 概率
    Probability,
    /// 统计
    Statistics,
    /// 线性代数
    LinearAlgebra,
}

static PROBLEM_TYPE_NAMES: phf::Map<&'static str, ProblemType> = phf_map! {
    "general" => ProblemType::General,
    "algebra" => ProblemType::Algebra,
    "calculus" => ProblemType::Calculus,
    "probability" => ProblemType::Probability,
    "statistics" => ProblemType::Statistics,
    "linear_algebra" => ProblemType::LinearAlgebra,
};

impl ProblemType {
    /// 获取标准名称
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemType::General => "general",
            ProblemType::Algebra => "algebra",
            ProblemType::Calculus => "calculus",
            ProblemType::Probability => "probability",
            ProblemType::Statistics => "statistics",
            ProblemType::LinearAlgebra => "linear_algebra",
        }
    }

    /// 从名称解析领域（忽略大小写与首尾空白）
    pub fn from_name(name: &str) -> Option<Self> {
        PROBLEM_TYPE_NAMES
            .get(name.trim().to_lowercase().as_str())
            .copied()
    }

    /// 是否属于概率统计类
    pub fn is_probabilistic(self) -> bool {
        matches!(self, ProblemType::Probability | ProblemType::Statistics)
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ProblemType::from_name("Probability"), Some(ProblemType::Probability));
        assert_eq!(
            ProblemType::from_name(" LINEAR_ALGEBRA "),
            Some(ProblemType::LinearAlgebra)
        );
        assert_eq!(ProblemType::from_name("geometry"), None);
    }

    #[test]
    fn test_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&ProblemType::LinearAlgebra).unwrap();
        assert_eq!(json, "\"linear_algebra\"");
        let parsed: ProblemType = serde_json::from_str("\"statistics\"").unwrap();
        assert_eq!(parsed, ProblemType::Statistics);
    }
}
