//! Exact tour search. [`TourSearch`] enumerates all tours depth-first and consults a
//! [`NodeBound`] at every node; [`solve`] wires it up for one of the [`Strategy`]s.

pub mod bound;
#[cfg(feature = "par")]
pub mod parallel;
pub mod shared;
pub mod tour;
pub mod tour_search;
pub mod visited;

pub use bound::*;
pub use shared::*;
pub use tour::*;
pub use tour_search::*;
pub use visited::*;

use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use log::{info, warn};
use serde::Serialize;

use crate::{algorithm::*, errors::SearchError, matrix::*, mst::MstEstimator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Plain depth-first enumeration without pruning
    Exhaustive,
    /// Prune once the partial route is as expensive as the incumbent
    PartialCost,
    /// Prune with partial route cost plus spanning tree estimate
    Mst,
}

impl Strategy {
    /// All strategies, from the slowest to the fastest
    pub const ALL: [Strategy; 3] = [Strategy::Exhaustive, Strategy::PartialCost, Strategy::Mst];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Exhaustive => NoBound::LABEL,
            Strategy::PartialCost => PartialCostBound::LABEL,
            Strategy::Mst => MstBound::LABEL,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::PartialCost => "partial-cost",
            Strategy::Mst => "mst",
        })
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhaustive" | "dfs" | "brute-force" => Ok(Strategy::Exhaustive),
            "partial-cost" | "bnb" | "bound" => Ok(Strategy::PartialCost),
            "mst" | "bnb-mst" => Ok(Strategy::Mst),
            _ => Err(format!(
                "unknown strategy {s:?}; expected exhaustive, partial-cost or mst"
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Use twice the spanning tree cost as an additional pruning ceiling ([`Strategy::Mst`] only)
    pub use_mst_ceiling: bool,

    /// Stop after this duration and report the best tour found so far
    pub timeout: Option<Duration>,

    /// Split the search at the second city and run the branches on the rayon pool.
    /// Ignored unless compiled with the `par` feature.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            use_mst_ceiling: true,
            timeout: None,
            parallel: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchOutcome {
    pub strategy: Strategy,
    pub tour: Tour,
    pub stats: SearchStats,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
    /// False iff the search was stopped early; the tour is then not necessarily optimal
    pub completed: bool,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Result of running a single search to completion or until the deadline
pub(crate) struct SearchRun {
    pub(crate) tour: Option<Tour>,
    pub(crate) stats: SearchStats,
    pub(crate) completed: bool,
}

/// Solves the instance with the given strategy. All strategies return a tour of the same
/// (optimal) cost unless the search is interrupted.
///
/// For [`Strategy::Mst`] the edge list is built and sorted once up front. The doubled spanning
/// tree ceiling is only an upper bound on the optimum if the costs satisfy the triangle
/// inequality. If the best tour found under the ceiling is more expensive than the ceiling (or
/// no tour was found at all), the ceiling may have cut off the optimum and the search is
/// repeated without it.
pub fn solve(
    matrix: &CostMatrix,
    strategy: Strategy,
    options: &SearchOptions,
) -> Result<SearchOutcome, SearchError> {
    info!(
        "Start {} on {} cities",
        strategy.label(),
        matrix.number_of_cities()
    );
    let start = Instant::now();
    let deadline = options.timeout.map(|t| start + t);

    let run = match strategy {
        Strategy::Exhaustive => drive(matrix, || NoBound, deadline, options.parallel),
        Strategy::PartialCost => drive(matrix, || PartialCostBound, deadline, options.parallel),
        Strategy::Mst => {
            let edges = EdgeList::sorted_upper_triangle(matrix);
            let estimator = MstEstimator::new(&edges);

            if options.use_mst_ceiling {
                let ceiling = estimator.initial_ceiling();
                let capped = drive(
                    matrix,
                    || MstBound::with_ceiling(estimator, ceiling),
                    deadline,
                    options.parallel,
                );

                let ceiling_held = capped
                    .tour
                    .as_ref()
                    .is_some_and(|tour| tour.cost() <= ceiling);

                if capped.completed && !ceiling_held {
                    warn!(
                        "Ceiling {ceiling} undercuts the optimum (costs violate the triangle inequality); restarting without ceiling"
                    );
                    let mut run = drive(
                        matrix,
                        || MstBound::new(estimator),
                        deadline,
                        options.parallel,
                    );
                    run.stats.merge(&capped.stats);
                    run
                } else {
                    capped
                }
            } else {
                drive(
                    matrix,
                    || MstBound::new(estimator),
                    deadline,
                    options.parallel,
                )
            }
        }
    };

    let elapsed = start.elapsed();
    info!(
        "{} finished after {}ms: explored {} nodes, pruned {}",
        strategy.label(),
        elapsed.as_millis(),
        run.stats.explored,
        run.stats.pruned
    );

    let tour = match run.tour {
        Some(tour) => tour,
        None if run.completed => return Err(SearchError::Exhausted),
        None => return Err(SearchError::Interrupted),
    };

    if !run.completed {
        warn!("Search stopped early; the reported tour may not be optimal");
    }

    Ok(SearchOutcome {
        strategy,
        tour,
        stats: run.stats,
        elapsed,
        completed: run.completed,
    })
}

fn drive<'a, B, F>(
    matrix: &'a CostMatrix,
    make_bound: F,
    deadline: Option<Instant>,
    parallel: bool,
) -> SearchRun
where
    B: NodeBound,
    F: Fn() -> B + Sync,
{
    #[cfg(feature = "par")]
    if parallel {
        return parallel::drive_parallel(matrix, make_bound, deadline);
    }

    #[cfg(not(feature = "par"))]
    if parallel {
        warn!("Compiled without par feature; running sequentially");
    }

    let mut search = TourSearch::new(matrix, make_bound());
    run_search(&mut search, deadline)
}

pub(crate) fn run_search<B: NodeBound>(
    search: &mut TourSearch<'_, B>,
    deadline: Option<Instant>,
) -> SearchRun {
    match deadline {
        Some(deadline) => search.run_while(|_| Instant::now() < deadline),
        None => {
            search.run_to_completion();
        }
    }

    SearchRun {
        tour: search.best_known_solution(),
        stats: search.stats(),
        completed: search.is_completed(),
    }
}
