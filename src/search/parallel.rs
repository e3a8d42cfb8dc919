//! Splits the search tree at its first level: for every choice of the second city an
//! independent [`TourSearch`] runs on the rayon pool. The searches prune against a common
//! [`SharedIncumbent`], so a good tour found in one branch speeds up all others.
//!
//! The optimal cost equals that of the sequential search. If several tours share the optimal
//! cost, the one reported may differ from the sequential run.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;

use super::*;

pub(crate) fn drive_parallel<B, F>(
    matrix: &CostMatrix,
    make_bound: F,
    deadline: Option<Instant>,
) -> SearchRun
where
    B: NodeBound,
    F: Fn() -> B + Sync,
{
    let shared = SharedIncumbent::new();

    let (stats, completed) = (1..matrix.number_of_cities())
        .into_par_iter()
        .map(|second| {
            let mut search = TourSearch::with_prefix(matrix, make_bound(), vec![0, second])
                .share_incumbent(&shared);
            let run = run_search(&mut search, deadline);
            debug!(
                "branch 0 -> {second} done: explored {} nodes, best {:?}",
                run.stats.explored,
                run.tour.as_ref().map(Tour::cost)
            );
            (run.stats, run.completed)
        })
        .reduce(
            || (SearchStats::default(), true),
            |(mut stats, completed), (other, other_completed)| {
                stats.merge(&other);
                (stats, completed && other_completed)
            },
        );

    SearchRun {
        tour: shared.snapshot(),
        stats,
        completed,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn matches_sequential_cost() {
        let mut rng = Pcg64::seed_from_u64(31);
        for matrix in random_symmetric_matrices(&mut rng, 2..9).take(30) {
            let sequential = solve(&matrix, Strategy::Mst, &SearchOptions::default()).unwrap();

            for strategy in Strategy::ALL {
                let options = SearchOptions {
                    parallel: true,
                    ..Default::default()
                };
                let parallel = solve(&matrix, strategy, &options).unwrap();
                assert!(parallel.completed);
                parallel.tour.validate(&matrix).unwrap();
                assert_eq!(parallel.tour.cost(), sequential.tour.cost());
            }
        }
    }
}
