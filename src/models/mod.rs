pub mod document;
pub mod problem;
pub mod problem_type;
pub mod solution;

pub use document::ProcessedDocument;
pub use problem::{Problem, ProblemContext};
pub use problem_type::ProblemType;
pub use solution::{Solution, SolveReport};
