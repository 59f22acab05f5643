//! 求解代理
//!
//! 按题目领域选择求解策略。每个代理只决定提示词和置信度，
//! 回复解析与公式生成走共用的 `solution_builder`。

use tracing::info;

use crate::error::AppResult;
use crate::models::{Problem, ProblemType, Solution};
use crate::processing::response_segmenter::DEFAULT_CODE_LANGUAGE;
use crate::services::llm_service::CompletionClient;
use crate::services::solution_builder::build_solution_for;

const GENERAL_SYSTEM_PROMPT: &str = "You are a mathematics expert. Your task is to solve math problems step by step.
For each problem, provide:
1. A clear explanation of the problem and approach
2. Step-by-step solution with clear mathematical reasoning
3. MATLAB code to solve or simulate the problem (if applicable)
4. Mathematical formulas in LaTeX format

Format your response as follows:
- Start with a clear explanation
- Number each step clearly
- Put MATLAB code between ```matlab and ``` markers (if applicable)
- Put LaTeX formulas between $ markers

Use proper mathematical terminology and methods. Be thorough and accurate.";

const PROBABILITY_SYSTEM_PROMPT: &str = "You are a probability and statistics expert.
Analyze the problem and provide:
1. A clear explanation
2. Step-by-step solution
3. MATLAB code to solve or simulate the problem
4. Relevant formulas in LaTeX
Use proper statistical terminology and methods.";

const MATLAB_HEADER: &str = "% MATLAB Solution";

/// 求解代理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    /// 通用代理，可处理任意领域
    General,
    /// 概率统计代理
    Probability,
}

impl Agent {
    /// 按题目领域选择代理
    pub fn for_problem(problem: &Problem) -> Self {
        Self::for_type(problem.problem_type)
    }

    pub fn for_type(problem_type: ProblemType) -> Self {
        if problem_type.is_probabilistic() {
            Agent::Probability
        } else {
            Agent::General
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Agent::General => "GeneralAgent",
            Agent::Probability => "ProbabilityAgent",
        }
    }

    pub fn can_handle(self, problem: &Problem) -> bool {
        match self {
            Agent::General => true,
            Agent::Probability => problem.problem_type.is_probabilistic(),
        }
    }

    /// 固定置信度，不由回复内容推导
    pub fn confidence(self) -> f32 {
        match self {
            Agent::General => 0.85,
            Agent::Probability => 0.9,
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Agent::General => GENERAL_SYSTEM_PROMPT,
            Agent::Probability => PROBABILITY_SYSTEM_PROMPT,
        }
    }

    pub fn user_prompt(self, problem: &Problem) -> String {
        match self {
            Agent::General => format!("Please solve this mathematics problem:\n{}", problem.text),
            Agent::Probability => problem.text.clone(),
        }
    }

    /// 求解题目
    ///
    /// 调用一次补全服务并等待结果；补全服务的错误原样返回。
    pub async fn solve(
        self,
        problem: &Problem,
        client: &dyn CompletionClient,
    ) -> AppResult<Solution> {
        info!("使用 {} 求解 {} 题目", self.name(), problem.problem_type);

        let reply = client
            .complete(
                Some(self.system_prompt()),
                &self.user_prompt(problem),
                problem.images.as_deref(),
            )
            .await?;

        let solution = build_solution_for(&reply, self.confidence(), DEFAULT_CODE_LANGUAGE);

        info!("✓ {} 题目求解完成", problem.problem_type);

        Ok(Solution {
            code: solution.code.map(|code| format_matlab_code(&code)),
            ..solution
        })
    }
}

/// 整理 MATLAB 代码：去掉首尾空白，缺少注释头时补上
pub fn format_matlab_code(code: &str) -> String {
    let code = code.trim();
    if code.starts_with('%') {
        code.to_string()
    } else {
        format!("{}\n{}", MATLAB_HEADER, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, LlmError};
    use crate::services::problem_builder::build_problem;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 返回固定回复并记录提示词
    struct FakeClient {
        reply: String,
        prompts: Mutex<Vec<(Option<String>, String)>>,
    }

    impl FakeClient {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(
            &self,
            system_message: Option<&str>,
            user_message: &str,
            _images: Option<&[String]>,
        ) -> AppResult<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((system_message.map(str::to_string), user_message.to_string()));
            Ok(self.reply.clone())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(
            &self,
            _system_message: Option<&str>,
            _user_message: &str,
            _images: Option<&[String]>,
        ) -> AppResult<String> {
            Err(LlmError::EmptyContent {
                model: "fake".to_string(),
            }
            .into())
        }
    }

    #[test]
    fn test_agent_selection() {
        assert_eq!(Agent::for_type(ProblemType::Probability), Agent::Probability);
        assert_eq!(Agent::for_type(ProblemType::Statistics), Agent::Probability);
        assert_eq!(Agent::for_type(ProblemType::Calculus), Agent::General);
        assert_eq!(Agent::for_type(ProblemType::General), Agent::General);
    }

    #[test]
    fn test_format_matlab_code() {
        assert_eq!(format_matlab_code("  x = 1;  "), "% MATLAB Solution\nx = 1;");
        assert_eq!(format_matlab_code("% mine\nx = 1;"), "% mine\nx = 1;");
    }

    #[tokio::test]
    async fn test_general_agent_solve() {
        let client = FakeClient::new(
            "We expand.\nStep 1: $(x+1)^2 = x^2+2x+1$\n```matlab\nsyms x; expand((x+1)^2)\n```",
        );
        let problem = build_problem("Expand (x+1)^2", None).unwrap();
        let agent = Agent::for_problem(&problem);
        assert!(agent.can_handle(&problem));

        let solution = agent.solve(&problem, &client).await.unwrap();

        assert_eq!(solution.confidence, 0.85);
        assert_eq!(solution.explanation, "We expand.");
        assert_eq!(
            solution.code.as_deref(),
            Some("% MATLAB Solution\nsyms x; expand((x+1)^2)")
        );
        assert!(solution.formula_markup.contains("(x+1)^2 = x^2+2x+1 \\\\"));

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0.as_deref(), Some(GENERAL_SYSTEM_PROMPT));
        assert_eq!(
            prompts[0].1,
            "Please solve this mathematics problem:\nExpand (x+1)^2"
        );
    }

    #[tokio::test]
    async fn test_probability_agent_uses_raw_text() {
        let client = FakeClient::new("Step 1: P = 1/6");
        let problem = build_problem("What is the probability of rolling a 6?", None).unwrap();
        let agent = Agent::for_problem(&problem);
        assert_eq!(agent, Agent::Probability);

        let solution = agent.solve(&problem, &client).await.unwrap();
        assert_eq!(solution.confidence, 0.9);
        assert!(solution.code.is_none());
        assert_eq!(client.prompts.lock().unwrap()[0].1, problem.text);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let problem = build_problem("Solve x + 1 = 2", None).unwrap();
        let result = Agent::General.solve(&problem, &FailingClient).await;
        assert!(matches!(
            result,
            Err(AppError::Llm(LlmError::EmptyContent { .. }))
        ));
    }
}
