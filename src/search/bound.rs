use super::VisitedSet;
use crate::{matrix::Cost, mst::MstEstimator};

/// Decides at every search node whether its subtree can be skipped. The node is entered before
/// the bound is consulted, i.e. `visited` already contains the current city and `partial_cost`
/// is the cost of the route from city 0 to it.
pub trait NodeBound {
    /// Name of the search this bound turns [`super::TourSearch`] into
    const LABEL: &'static str;

    /// Returns true iff no tour strictly cheaper than `best` can be found below this node.
    fn prune(&mut self, partial_cost: Cost, visited: &VisitedSet, best: Cost) -> bool;
}

/// Never prunes; the search degenerates into a full enumeration of all `(n-1)!` tours.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBound;

impl NodeBound for NoBound {
    const LABEL: &'static str = "Brute Force Depth-First Search";

    fn prune(&mut self, _partial_cost: Cost, _visited: &VisitedSet, _best: Cost) -> bool {
        false
    }
}

/// Prunes as soon as the partial route alone is at least as expensive as the incumbent.
#[derive(Clone, Copy, Debug, Default)]
pub struct PartialCostBound;

impl NodeBound for PartialCostBound {
    const LABEL: &'static str = "Depth-First Search Branch and Bound";

    fn prune(&mut self, partial_cost: Cost, _visited: &VisitedSet, best: Cost) -> bool {
        partial_cost >= best
    }
}

/// Evaluates `f(n) = g(n) + h(n)` with `g` the partial route cost and `h` the spanning tree
/// estimate of the remaining cities (see [`MstEstimator`]).
///
/// Optionally a ceiling is applied in addition: nodes whose evaluation strictly exceeds it are
/// pruned even before any tour is known. The ceiling is a hint; if it undercuts the optimum
/// the search may end without a tour.
#[derive(Clone, Copy, Debug)]
pub struct MstBound<'a> {
    estimator: MstEstimator<'a>,
    ceiling: Option<Cost>,
    last_evaluation: Cost,
}

impl<'a> MstBound<'a> {
    pub fn new(estimator: MstEstimator<'a>) -> Self {
        Self {
            estimator,
            ceiling: None,
            last_evaluation: 0.0,
        }
    }

    pub fn with_ceiling(estimator: MstEstimator<'a>, ceiling: Cost) -> Self {
        Self {
            ceiling: Some(ceiling),
            ..Self::new(estimator)
        }
    }

    pub fn ceiling(&self) -> Option<Cost> {
        self.ceiling
    }

    /// The evaluation computed by the most recent call to [`NodeBound::prune`]
    pub fn last_evaluation(&self) -> Cost {
        self.last_evaluation
    }
}

impl NodeBound for MstBound<'_> {
    const LABEL: &'static str = "Optimized Depth-First Search Branch and Bound";

    fn prune(&mut self, partial_cost: Cost, visited: &VisitedSet, best: Cost) -> bool {
        let evaluation = partial_cost + self.estimator.estimate(visited);
        self.last_evaluation = evaluation;

        evaluation >= best || self.ceiling.is_some_and(|ceiling| evaluation > ceiling)
    }
}
