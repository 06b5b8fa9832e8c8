pub mod candidate_space;
pub mod constraint_solver;
pub mod minimax;

pub use candidate_space::CandidateSpace;
pub use constraint_solver::ConstraintSolver;
