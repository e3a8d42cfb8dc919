use log::{debug, trace};
use serde::Serialize;

use super::*;
use crate::algorithm::*;

/// Counters collected while searching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Search nodes entered, including pruned ones
    pub explored: u64,
    /// Nodes whose subtree was cut off by the bound
    pub pruned: u64,
    /// Complete tours evaluated
    pub leaves: u64,
    /// Number of times the incumbent was replaced
    pub improvements: u64,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.explored += other.explored;
        self.pruned += other.pruned;
        self.leaves += other.leaves;
        self.improvements += other.improvements;
    }
}

/// One node on the search stack. `cost` is the cost of the route from city 0 up to `city`;
/// `cursor` is the smallest city that has not been tried as a successor yet.
#[derive(Clone, Copy, Debug)]
struct Frame {
    city: City,
    cost: Cost,
    cursor: City,
}

const DEFAULT_OPERATIONS_PER_STEP: usize = 1 << 12;

/// Depth-first branch-and-bound over all tours starting and ending at city 0.
///
/// The recursion is unrolled into an explicit stack of [`Frame`]s, but the exploration order is
/// exactly that of the recursive formulation: successors are tried in ascending order and a
/// node is processed as follows:
///  1. Entry: the city is marked visited and appended to the current route.
///  2. Bound: if the [`NodeBound`] prunes the node, it is left immediately.
///  3. Leaf: if all cities are visited, the cycle is closed and the incumbent updated iff the
///     tour is strictly cheaper. The node is left either way.
///  4. Branch: otherwise every unvisited city is pushed as a child; after a child returns, its
///     city is removed from the visited set and the route again.
///
/// Each call to [`IterativeAlgorithm::execute_step`] carries out a bounded number of stack
/// operations, so the search can be interrupted by a timeout or a termination signal.
pub struct TourSearch<'a, B: NodeBound> {
    matrix: &'a CostMatrix,
    bound: B,

    prefix: Vec<City>,
    stack: Vec<Frame>,
    visited: VisitedSet,
    route: Vec<City>,

    incumbent: Incumbent,
    shared: Option<&'a SharedIncumbent>,

    stats: SearchStats,
    operations_per_step: usize,
    started: bool,
}

impl<'a, B: NodeBound> TourSearch<'a, B> {
    pub fn new(matrix: &'a CostMatrix, bound: B) -> Self {
        Self::with_prefix(matrix, bound, vec![0])
    }

    /// Only explores tours whose route begins with `prefix`. The prefix has to start at city 0
    /// and may not repeat a city.
    pub fn with_prefix(matrix: &'a CostMatrix, bound: B, prefix: Vec<City>) -> Self {
        let n = matrix.number_of_cities();
        assert_eq!(prefix.first(), Some(&0));
        assert!(prefix.len() <= n);
        debug_assert!(VisitedSet::from_cities(n, prefix.iter().copied()).len() == prefix.len());

        Self {
            matrix,
            bound,
            prefix,
            stack: Vec::with_capacity(n),
            visited: VisitedSet::new(n),
            route: Vec::with_capacity(n),
            incumbent: Incumbent::new(),
            shared: None,
            stats: SearchStats::default(),
            operations_per_step: DEFAULT_OPERATIONS_PER_STEP,
            started: false,
        }
    }

    /// Additionally prunes against (and publishes improvements to) an incumbent shared with
    /// other searches.
    pub fn share_incumbent(mut self, shared: &'a SharedIncumbent) -> Self {
        self.shared = Some(shared);
        self
    }

    /// Number of push/pop operations carried out per call to [`IterativeAlgorithm::execute_step`]
    pub fn set_operations_per_step(&mut self, operations: usize) {
        assert!(operations > 0);
        self.operations_per_step = operations;
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn bound(&self) -> &B {
        &self.bound
    }

    pub fn incumbent(&self) -> &Incumbent {
        &self.incumbent
    }

    /// Runs the search to completion and returns the best tour
    pub fn solve(&mut self) -> Option<Tour> {
        self.run_to_completion()
    }

    fn best_cost(&self) -> Cost {
        let local = self.incumbent.cost();
        self.shared.map_or(local, |shared| local.min(shared.cost()))
    }

    fn start(&mut self) {
        self.started = true;

        // all but the last city of the prefix are fixed and never get a frame
        let mut cost = 0.0;
        let last = self.prefix.len() - 1;
        for i in 0..last {
            let (u, v) = (self.prefix[i], self.prefix[i + 1]);
            self.visited.insert(u);
            self.route.push(u);
            cost += self.matrix.cost(u, v);
        }

        self.descend(self.prefix[last], cost);
    }

    fn descend(&mut self, city: City, cost: Cost) {
        self.visited.insert(city);
        self.route.push(city);
        self.stats.explored += 1;

        let best = self.best_cost();
        if self.bound.prune(cost, &self.visited, best) {
            trace!("prune at {:?} with cost {cost} (best {best})", self.route);
            self.stats.pruned += 1;
            self.leave(city);
            return;
        }

        if self.visited.is_full() {
            let total = cost + self.matrix.cost(city, 0);
            self.stats.leaves += 1;

            if total < best && self.incumbent.try_improve(total, &self.route) {
                self.stats.improvements += 1;
                debug!("new incumbent {total}: {:?}", self.route);
                if let Some(shared) = self.shared {
                    shared.try_install(total, &self.route);
                }
            }

            self.leave(city);
            return;
        }

        self.stack.push(Frame {
            city,
            cost,
            cursor: 0,
        });
    }

    fn leave(&mut self, city: City) {
        let removed = self.route.pop();
        debug_assert_eq!(removed, Some(city));
        self.visited.remove(city);
    }
}

impl<B: NodeBound> IterativeAlgorithm<Tour> for TourSearch<'_, B> {
    fn execute_step(&mut self) {
        if !self.started {
            self.start();
        }

        for _ in 0..self.operations_per_step {
            let Some(frame) = self.stack.last_mut() else {
                break;
            };

            match self.visited.next_unvisited(frame.cursor) {
                Some(next) => {
                    frame.cursor = next + 1;
                    let cost = frame.cost + self.matrix.cost(frame.city, next);
                    self.descend(next, cost);
                }
                None => {
                    let city = frame.city;
                    self.stack.pop();
                    self.leave(city);
                }
            }
        }
    }

    fn is_completed(&self) -> bool {
        self.started && self.stack.is_empty()
    }

    fn best_known_solution(&mut self) -> Option<Tour> {
        self.incumbent.to_tour()
    }
}

impl<B: NodeBound> TerminatingIterativeAlgorithm<Tour> for TourSearch<'_, B> {}
