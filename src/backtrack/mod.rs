//! Heuristic backtracking search for knight's tours.
//!
//! Depth-first search over partial tours. Candidate moves are ordered by
//! two classic CSP heuristics:
//!
//! - **MRV** (Warnsdorff's rule): prefer the square with the fewest onward
//!   moves, so squares about to become unreachable are visited first
//! - **LCV**: among equals, prefer the square leaving the most mobility to
//!   its neighbours
//!
//! With this ordering a tour from the corner is found without backtracking
//! on the 8×8 board; exhaustive backtracking only matters for proving that
//! a given prefix cannot be completed.
//!
//! # References
//!
//! - Warnsdorff (1823), *Des Rösselsprunges einfachste und allgemeinste Lösung*
//! - Russell & Norvig (2020), *Artificial Intelligence: A Modern Approach*, ch. 6

mod config;
mod solver;

pub use config::BacktrackConfig;
pub use solver::{
    lcv_score, mrv_score, order_successors, BacktrackResult, BacktrackSolver, SolveStatus,
};
