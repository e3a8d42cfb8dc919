use super::*;

#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct WeightedEdge {
    pub from: City,
    pub to: City,
    pub cost: Cost,
}

impl WeightedEdge {
    pub fn new(from: City, to: City, cost: Cost) -> Self {
        Self { from, to, cost }
    }

    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    pub fn is_normalized(&self) -> bool {
        self.from <= self.to
    }
}

/// The edges of the upper triangle (`from < to`) of a [`CostMatrix`], sorted by non-decreasing
/// cost. An edge costs the cheaper of its two directions, so on asymmetric matrices spanning
/// trees still underestimate every directed completion. The list is built and sorted once and
/// never changes afterwards; ties keep row-major order since the sort is stable.
#[derive(Clone, Debug)]
pub struct EdgeList {
    number_of_cities: NumCities,
    edges: Vec<WeightedEdge>,
}

impl EdgeList {
    /// # Example
    /// ```
    /// use tspbb::matrix::{CostMatrix, EdgeList};
    /// let matrix = CostMatrix::try_from_rows(vec![
    ///     vec![0.0, 5.0, 1.0],
    ///     vec![5.0, 0.0, 2.0],
    ///     vec![1.0, 2.0, 0.0],
    /// ]).unwrap();
    /// let edges = EdgeList::sorted_upper_triangle(&matrix);
    /// let costs: Vec<_> = edges.iter().map(|e| e.cost).collect();
    /// assert_eq!(costs, vec![1.0, 2.0, 5.0]);
    /// ```
    pub fn sorted_upper_triangle(matrix: &CostMatrix) -> Self {
        let n = matrix.number_of_cities();
        let mut edges = Vec::with_capacity(n * (n - 1) / 2);
        for from in matrix.cities() {
            for to in from + 1..n {
                let cost = matrix.cost(from, to).min(matrix.cost(to, from));
                edges.push(WeightedEdge::new(from, to, cost));
            }
        }

        edges.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        Self {
            number_of_cities: n,
            edges,
        }
    }

    pub fn number_of_cities(&self) -> NumCities {
        self.number_of_cities
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeightedEdge> {
        self.edges.iter()
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a WeightedEdge;
    type IntoIter = std::slice::Iter<'a, WeightedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
