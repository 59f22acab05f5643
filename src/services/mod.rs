pub mod document_service;
pub mod llm_service;
pub mod problem_builder;
pub mod report_writer;
pub mod solution_builder;

pub use document_service::extract_problems;
pub use llm_service::{CompletionClient, LlmService};
pub use problem_builder::build_problem;
pub use report_writer::ReportWriter;
pub use solution_builder::{build_solution, build_solution_for};
