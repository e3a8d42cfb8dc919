//! Lower bounds on the cost of completing a partial tour, obtained from minimum spanning trees.
//!
//! At a search node the cities on the current route are already connected. We contract all of
//! them into city 0 and compute a minimum spanning tree of the contracted instance using
//! Kruskal's algorithm on the pre-sorted [`EdgeList`]. Any completion of the route (a path from
//! the current city through all unvisited cities back to city 0) connects the contracted
//! instance, hence it costs at least as much as the spanning tree.

pub mod union_find;

pub use union_find::UnionFind;

use crate::{matrix::*, search::VisitedSet};
use log::debug;

#[derive(Clone, Copy, Debug)]
pub struct MstEstimator<'a> {
    edges: &'a EdgeList,
}

impl<'a> MstEstimator<'a> {
    pub fn new(edges: &'a EdgeList) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &'a EdgeList {
        self.edges
    }

    /// Cost of a minimum spanning tree after contracting all `visited` cities into city 0.
    /// The union-find structure is built from scratch for each call, so the result only depends
    /// on `visited`.
    ///
    /// # Example
    /// ```
    /// use tspbb::{matrix::*, mst::MstEstimator, search::VisitedSet};
    /// let matrix = CostMatrix::try_from_rows(vec![
    ///     vec![0.0, 10.0, 15.0, 20.0],
    ///     vec![10.0, 0.0, 35.0, 25.0],
    ///     vec![15.0, 35.0, 0.0, 30.0],
    ///     vec![20.0, 25.0, 30.0, 0.0],
    /// ]).unwrap();
    /// let edges = EdgeList::sorted_upper_triangle(&matrix);
    /// let estimator = MstEstimator::new(&edges);
    ///
    /// let mut visited = VisitedSet::new(4);
    /// assert_eq!(estimator.estimate(&visited), 45.0);
    ///
    /// visited.insert(0);
    /// visited.insert(1);
    /// assert_eq!(estimator.estimate(&visited), 35.0);
    /// ```
    pub fn estimate(&self, visited: &VisitedSet) -> Cost {
        let mut total = 0.0;
        self.kruskal(visited, |edge| total += edge.cost);
        total
    }

    /// The edges selected by [`MstEstimator::estimate`], reported with their uncollapsed endpoints
    pub fn spanning_tree(&self, visited: &VisitedSet) -> Vec<WeightedEdge> {
        let mut tree = Vec::new();
        self.kruskal(visited, |edge| tree.push(*edge));
        tree
    }

    /// Cost of a minimum spanning tree of the whole instance
    pub fn spanning_tree_cost(&self) -> Cost {
        self.estimate(&VisitedSet::new(self.edges.number_of_cities()))
    }

    /// Twice the spanning tree cost. For instances satisfying the triangle inequality this is
    /// an upper bound on the optimal tour (shortcutting a doubled spanning tree); in general it
    /// is only a heuristic.
    pub fn initial_ceiling(&self) -> Cost {
        let ceiling = 2.0 * self.spanning_tree_cost();
        debug!("Heuristic ceiling from doubled spanning tree: {ceiling}");
        ceiling
    }

    fn kruskal<F: FnMut(&WeightedEdge)>(&self, visited: &VisitedSet, mut on_tree_edge: F) {
        let n = self.edges.number_of_cities();
        debug_assert_eq!(visited.capacity(), n);

        let representative = |u: City| if visited.contains(u) { 0 } else { u };

        // number of distinct representatives; once they are all joined no edge can contribute
        let unvisited = n - visited.len();
        let mut remaining_joins =
            (unvisited + (!visited.is_empty() && visited.contains(0)) as usize).saturating_sub(1);

        let mut components = UnionFind::new(n);
        for edge in self.edges {
            if remaining_joins == 0 {
                break;
            }

            if components.union(representative(edge.from), representative(edge.to)) {
                on_tree_edge(edge);
                remaining_joins -= 1;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn four_cities() -> CostMatrix {
        CostMatrix::try_from_rows(vec![
            vec![0.0, 10.0, 15.0, 20.0],
            vec![10.0, 0.0, 35.0, 25.0],
            vec![15.0, 35.0, 0.0, 30.0],
            vec![20.0, 25.0, 30.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn hand_computed() {
        let matrix = four_cities();
        let edges = EdgeList::sorted_upper_triangle(&matrix);
        let estimator = MstEstimator::new(&edges);

        assert_eq!(estimator.spanning_tree_cost(), 45.0);
        assert_eq!(estimator.initial_ceiling(), 90.0);

        for (visited, expected) in [
            (vec![0], 45.0),
            (vec![0, 1], 35.0),
            (vec![0, 2], 30.0),
            (vec![0, 3], 25.0),
            (vec![0, 1, 2], 20.0),
            (vec![0, 1, 3], 15.0),
            (vec![0, 2, 3], 10.0),
            (vec![0, 1, 2, 3], 0.0),
        ] {
            let set = VisitedSet::from_cities(4, visited.iter().copied());
            assert_eq!(estimator.estimate(&set), expected, "visited: {visited:?}");
        }
    }

    #[test]
    fn tree_size() {
        let mut rng = Pcg64::seed_from_u64(0x5eed);
        for matrix in random_symmetric_matrices(&mut rng, 3..9).take(50) {
            let n = matrix.number_of_cities();
            let edges = EdgeList::sorted_upper_triangle(&matrix);
            let estimator = MstEstimator::new(&edges);

            assert_eq!(estimator.spanning_tree(&VisitedSet::new(n)).len(), n - 1);

            for prefix in 1..=n {
                let visited = VisitedSet::from_cities(n, 0..prefix);
                let tree = estimator.spanning_tree(&visited);
                assert_eq!(tree.len(), n - prefix);
                assert!(
                    (estimator.estimate(&visited) - tree.iter().map(|e| e.cost).sum::<Cost>())
                        .abs()
                        < 1e-9
                );
            }
        }
    }

    #[test]
    fn idempotent() {
        let mut rng = Pcg64::seed_from_u64(17);
        for matrix in random_symmetric_matrices(&mut rng, 4..8).take(20) {
            let n = matrix.number_of_cities();
            let edges = EdgeList::sorted_upper_triangle(&matrix);
            let estimator = MstEstimator::new(&edges);

            for visited in (1..n).powerset() {
                let set = VisitedSet::from_cities(n, std::iter::once(0).chain(visited));
                assert_eq!(estimator.estimate(&set), estimator.estimate(&set));
            }
        }
    }

    /// Every route prefix starting at city 0 must have its estimate bounded by the cheapest way
    /// to complete it into a tour.
    #[test]
    fn admissible_for_every_prefix() {
        let mut rng = Pcg64::seed_from_u64(1234);
        for matrix in random_symmetric_matrices(&mut rng, 2..8).take(40) {
            let n = matrix.number_of_cities();
            let edges = EdgeList::sorted_upper_triangle(&matrix);
            let estimator = MstEstimator::new(&edges);

            for prefix_len in 1..=n {
                for rest in (1..n).permutations(prefix_len - 1) {
                    let prefix = std::iter::once(0).chain(rest).collect_vec();
                    let visited = VisitedSet::from_cities(n, prefix.iter().copied());

                    let estimate = estimator.estimate(&visited);
                    let completion = brute_force_completion(&matrix, &prefix);
                    assert!(
                        estimate <= completion + 1e-9,
                        "prefix {prefix:?}: estimate {estimate} > completion {completion}"
                    );
                }
            }

            let (optimum, _) = brute_force_tour(&matrix);
            assert!(estimator.spanning_tree_cost() <= optimum + 1e-9);
        }
    }

    #[test]
    fn admissible_on_asymmetric_costs() {
        let mut rng = Pcg64::seed_from_u64(7);
        for matrix in random_asymmetric_matrices(&mut rng, 2..8).take(40) {
            let n = matrix.number_of_cities();
            let edges = EdgeList::sorted_upper_triangle(&matrix);
            let estimator = MstEstimator::new(&edges);
            assert_eq!(estimator.edges().len(), n * (n - 1) / 2);

            for prefix_len in 1..=n {
                for rest in (1..n).permutations(prefix_len - 1) {
                    let prefix = std::iter::once(0).chain(rest).collect_vec();
                    let visited = VisitedSet::from_cities(n, prefix.iter().copied());

                    let estimate = estimator.estimate(&visited);
                    let completion = brute_force_completion(&matrix, &prefix);
                    assert!(
                        estimate <= completion + 1e-9,
                        "prefix {prefix:?}: estimate {estimate} > completion {completion}"
                    );
                }
            }
        }
    }

    #[test]
    fn metric_ceiling_bounds_optimum() {
        let mut rng = Pcg64::seed_from_u64(99);
        for matrix in random_euclidean_matrices(&mut rng, 3..8).take(40) {
            let edges = EdgeList::sorted_upper_triangle(&matrix);
            let estimator = MstEstimator::new(&edges);
            let (optimum, _) = brute_force_tour(&matrix);
            assert!(optimum <= estimator.initial_ceiling() + 1e-9);
        }
    }
}
