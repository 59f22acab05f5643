pub mod solve_flow;

pub use solve_flow::{BatchOutcome, SolveFlow};
