//! Depth-first tour search with MRV and LCV move ordering.

use super::config::BacktrackConfig;
use crate::artifact::TourArtifact;
use crate::board::{check_path, count_onward, successors, Position, Visited, SQUARES};
use crate::error::Result;
use log::{debug, info, warn};
use std::cmp::Reverse;
use std::time::Instant;

/// How often (in nodes) the wall clock is consulted.
const CLOCK_INTERVAL: u64 = 1024;

/// Outcome of a backtracking search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A complete tour was found.
    Solved,
    /// Every extension of the starting assignment was explored; no tour exists.
    Exhausted,
    /// A node or time limit stopped the search first.
    LimitReached,
}

/// Result of [`BacktrackSolver::solve`].
#[derive(Debug, Clone)]
pub struct BacktrackResult {
    pub status: SolveStatus,
    /// The tour when solved, otherwise the longest assignment reached.
    pub path: Vec<Position>,
    /// Search nodes expanded.
    pub nodes: u64,
    /// Wall-clock time in milliseconds.
    pub elapsed_ms: u64,
}

impl BacktrackResult {
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }

    /// Persistable record of the path.
    pub fn to_artifact(&self) -> TourArtifact {
        TourArtifact::from_path(self.path.clone())
    }
}

/// MRV score: onward moves left at `candidate` once it is visited.
///
/// Lower is tried first (Warnsdorff's rule).
pub fn mrv_score(candidate: Position, visited: &Visited) -> usize {
    count_onward(candidate, &visited.with(candidate))
}

/// LCV score: total onward mobility of `candidate`'s free neighbours once
/// `candidate` is visited.
///
/// Higher is tried first among candidates with equal MRV score.
pub fn lcv_score(candidate: Position, visited: &Visited) -> usize {
    let after = visited.with(candidate);
    successors(candidate, &after)
        .into_iter()
        .map(|n| count_onward(n, &after))
        .sum()
}

/// Legal successors of `current` in search order.
///
/// Sorted by ascending [`mrv_score`], then descending [`lcv_score`]; the
/// sort is stable so remaining ties keep direction order.
pub fn order_successors(current: Position, visited: &Visited) -> Vec<Position> {
    let mut scored: Vec<(usize, Reverse<usize>, Position)> = successors(current, visited)
        .into_iter()
        .map(|c| (mrv_score(c, visited), Reverse(lcv_score(c, visited)), c))
        .collect();
    scored.sort_by_key(|&(mrv, lcv, _)| (mrv, lcv));
    scored.into_iter().map(|(_, _, c)| c).collect()
}

/// Exact knight's tour search.
///
/// Plain recursive DFS: extend the assignment with each ordered successor,
/// recurse, and pop on failure. No memoisation is used since every visited
/// set is reached by a unique path prefix.
///
/// ```
/// use knights_tour::backtrack::BacktrackSolver;
///
/// let result = BacktrackSolver::default().solve();
/// assert!(result.is_solved());
/// assert_eq!(result.path.len(), 64);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackSolver {
    config: BacktrackConfig,
}

impl BacktrackSolver {
    pub fn new(config: BacktrackConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BacktrackConfig {
        &self.config
    }

    /// Searches for a tour starting from `[(0, 0)]`.
    pub fn solve(&self) -> BacktrackResult {
        self.search(vec![Position::ORIGIN])
    }

    /// Searches for a tour extending `prefix`.
    ///
    /// The prefix must be a legal partial tour from the origin (see
    /// [`check_path`]).
    pub fn solve_assignment(&self, prefix: Vec<Position>) -> Result<BacktrackResult> {
        check_path(&prefix)?;
        Ok(self.search(prefix))
    }

    fn search(&self, assignment: Vec<Position>) -> BacktrackResult {
        let started = Instant::now();
        let mut search = Search {
            visited: assignment.iter().copied().collect(),
            best: assignment.clone(),
            assignment,
            nodes: 0,
            config: &self.config,
            started,
        };

        let status = match search.extend() {
            Step::Found => SolveStatus::Solved,
            Step::DeadEnd => SolveStatus::Exhausted,
            Step::Aborted => SolveStatus::LimitReached,
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let path = match status {
            SolveStatus::Solved => search.assignment,
            _ => search.best,
        };

        match status {
            SolveStatus::Solved => info!(
                "tour found after {} nodes in {elapsed_ms} ms",
                search.nodes
            ),
            SolveStatus::Exhausted => info!(
                "no tour extends the assignment ({} nodes, best {} squares)",
                search.nodes,
                path.len()
            ),
            SolveStatus::LimitReached => warn!(
                "search limit reached after {} nodes, best {} squares",
                search.nodes,
                path.len()
            ),
        }

        BacktrackResult {
            status,
            path,
            nodes: search.nodes,
            elapsed_ms,
        }
    }
}

enum Step {
    Found,
    DeadEnd,
    Aborted,
}

/// Mutable search state. `visited` always equals the set of `assignment`.
struct Search<'a> {
    assignment: Vec<Position>,
    visited: Visited,
    best: Vec<Position>,
    nodes: u64,
    config: &'a BacktrackConfig,
    started: Instant,
}

impl Search<'_> {
    fn extend(&mut self) -> Step {
        self.nodes += 1;
        if self.assignment.len() > self.best.len() {
            self.best.clone_from(&self.assignment);
        }
        if self.assignment.len() == SQUARES {
            return Step::Found;
        }
        if self.limit_reached() {
            return Step::Aborted;
        }

        let Some(&current) = self.assignment.last() else {
            return Step::DeadEnd;
        };
        for next in order_successors(current, &self.visited) {
            self.assignment.push(next);
            self.visited.insert(next);
            match self.extend() {
                Step::DeadEnd => {
                    self.assignment.pop();
                    self.visited.remove(next);
                }
                done => return done,
            }
        }
        Step::DeadEnd
    }

    fn limit_reached(&self) -> bool {
        if self.config.node_limit.is_some_and(|n| self.nodes >= n) {
            debug!("node limit {} hit", self.nodes);
            return true;
        }
        if let Some(ms) = self.config.time_limit_ms {
            if self.nodes % CLOCK_INTERVAL == 0
                && self.started.elapsed().as_millis() >= u128::from(ms)
            {
                return true;
            }
        }
        false
    }
}
