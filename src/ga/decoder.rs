//! Genome-to-path decoding with in-place repair.
//!
//! Decoding walks the genome from the origin. A gene whose move is legal is
//! committed as-is. A blocked gene is repaired by probing the other seven
//! directions in cyclic order, and the first legal one is written back into
//! the genome. When all eight directions are blocked the decode halts.
//!
//! Decoding is greedy and never revisits committed genes, so its output is
//! fully determined by the genome content and the `cycle_forward` bit.

use super::types::Genome;
use crate::board::{apply, legal, Position, Visited};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the decoder does when a gene cannot be repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltPolicy {
    /// Keep the path as built so far.
    #[default]
    Stop,
    /// Drop the dead-end square the knight is stranded on, then stop.
    ///
    /// The origin is never removed.
    UndoLast,
}

/// Output of one decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Squares in visiting order, starting at the origin.
    pub path: Vec<Position>,
    /// Exactly the set of squares in `path`.
    pub visited: Visited,
    /// Gene index at which decoding halted, if it did.
    pub halted_at: Option<usize>,
    /// Number of genes rewritten by repair.
    pub repairs: usize,
}

/// Decodes `genome` into a path, persisting repaired genes.
///
/// `cycle_forward` selects the probe order for the whole decode: ascending
/// (`d+1, d+2, ...`) when `true`, descending (`d-1, d-2, ...`) otherwise.
pub fn decode(genome: &mut Genome, cycle_forward: bool, policy: HaltPolicy) -> Decoded {
    let mut position = Position::ORIGIN;
    let mut path = Vec::with_capacity(genome.len() + 1);
    path.push(position);
    let mut visited = Visited::new().with(position);
    let mut halted_at = None;
    let mut repairs = 0;

    for i in 0..genome.len() {
        let Some(original) = genome.get(i) else { break };

        let chosen = if legal(apply(position, original), &visited) {
            Some(original)
        } else {
            let repaired = (1..8)
                .map(|step| original.cycled(step, cycle_forward))
                .find(|&d| legal(apply(position, d), &visited));
            if let Some(d) = repaired {
                genome.set(i, d);
                repairs += 1;
            }
            repaired
        };

        match chosen {
            Some(d) => {
                position = apply(position, d);
                path.push(position);
                visited.insert(position);
            }
            None => {
                halted_at = Some(i);
                if policy == HaltPolicy::UndoLast && path.len() > 1 {
                    if let Some(dead_end) = path.pop() {
                        visited.remove(dead_end);
                    }
                }
                break;
            }
        }
    }

    Decoded {
        path,
        visited,
        halted_at,
        repairs,
    }
}

/// Decodes with a freshly drawn cycle direction.
pub fn decode_random<R: Rng>(genome: &mut Genome, policy: HaltPolicy, rng: &mut R) -> Decoded {
    let cycle_forward = rng.random_bool(0.5);
    decode(genome, cycle_forward, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtrack::BacktrackSolver;
    use crate::board::{is_knight_move, Direction, SQUARES};
    use crate::ga::GENOME_LEN;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn assert_valid_path(path: &[Position]) {
        assert_eq!(path[0], Position::ORIGIN);
        let distinct: HashSet<_> = path.iter().collect();
        assert_eq!(distinct.len(), path.len(), "path repeats a square");
        assert!(path.iter().all(|p| p.in_bounds()));
        for w in path.windows(2) {
            assert!(is_knight_move(w[0], w[1]), "{} -> {} is not a knight move", w[0], w[1]);
        }
    }

    fn genome_strategy() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(1u8..=8, GENOME_LEN)
    }

    #[test]
    fn test_first_move_repaired_from_corner() {
        // Direction 5 is (-2, -1): off the board from the origin.
        let mut genome = Genome::from_values(&[5; GENOME_LEN]).unwrap();
        let decoded = decode(&mut genome, true, HaltPolicy::Stop);
        assert!(decoded.path.len() > 1);
        assert!(decoded.repairs > 0);
        // Forward probing from 5 tries 6, 7, 8, 1: direction 1 is the first legal one.
        assert_eq!(genome.get(0), Some(Direction::new(1).unwrap()));
        assert_eq!(decoded.path[1], Position::new(2, 1));
    }

    #[test]
    fn test_backward_probe_order() {
        let mut genome = Genome::from_values(&[5; GENOME_LEN]).unwrap();
        let decoded = decode(&mut genome, false, HaltPolicy::Stop);
        // Backward from 5 tries 4, 3, 2: direction 2 is the first legal one.
        assert_eq!(genome.get(0), Some(Direction::new(2).unwrap()));
        assert_eq!(decoded.path[1], Position::new(1, 2));
    }

    #[test]
    fn test_full_tour_decodes_without_repair() {
        let tour = BacktrackSolver::default().solve().path;
        let mut genome = Genome::from_tour(&tour).unwrap();
        let decoded = decode(&mut genome, true, HaltPolicy::Stop);
        assert_eq!(decoded.path, tour);
        assert_eq!(decoded.repairs, 0);
        assert_eq!(decoded.halted_at, None);
        assert_eq!(decoded.visited.len(), SQUARES);
    }

    #[test]
    fn test_undo_last_drops_dead_end() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut checked = 0;
        for _ in 0..200 {
            let genome = Genome::random(&mut rng);
            let mut g_stop = genome.clone();
            let mut g_undo = genome;
            let stop = decode(&mut g_stop, true, HaltPolicy::Stop);
            let undo = decode(&mut g_undo, true, HaltPolicy::UndoLast);
            assert_eq!(g_stop, g_undo, "repairs do not depend on the halt policy");
            if stop.halted_at.is_some() {
                assert_eq!(undo.path.len(), stop.path.len() - 1);
                assert_eq!(&stop.path[..undo.path.len()], &undo.path[..]);
                assert!(!undo.visited.contains(*stop.path.last().unwrap()));
                checked += 1;
            } else {
                assert_eq!(undo.path, stop.path);
            }
        }
        assert!(checked > 0, "expected at least one blocked decode");
    }

    #[test]
    fn test_visited_matches_path() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut genome = Genome::random(&mut rng);
            let decoded = decode_random(&mut genome, HaltPolicy::Stop, &mut rng);
            let rebuilt: Visited = decoded.path.iter().copied().collect();
            assert_eq!(rebuilt, decoded.visited);
        }
    }

    proptest! {
        #[test]
        fn prop_decoded_paths_are_valid(values in genome_strategy(), forward in any::<bool>()) {
            let mut genome = Genome::from_values(&values).unwrap();
            for policy in [HaltPolicy::Stop, HaltPolicy::UndoLast] {
                let decoded = decode(&mut genome.clone(), forward, policy);
                assert_valid_path(&decoded.path);
                prop_assert!(decoded.path.len() >= 2);
            }
            let decoded = decode(&mut genome, forward, HaltPolicy::Stop);
            prop_assert_eq!(decoded.visited.len(), decoded.path.len());
        }

        #[test]
        fn prop_redecode_never_loses_fitness(values in genome_strategy(), forward in any::<bool>()) {
            for policy in [HaltPolicy::Stop, HaltPolicy::UndoLast] {
                let mut genome = Genome::from_values(&values).unwrap();
                let first = decode(&mut genome, forward, policy);
                let repaired = genome.clone();
                let second = decode(&mut genome, forward, policy);
                prop_assert!(second.path.len() >= first.path.len());
                prop_assert_eq!(&second.path, &first.path);
                prop_assert_eq!(second.repairs, 0);
                prop_assert_eq!(genome, repaired);
            }
        }
    }
}
