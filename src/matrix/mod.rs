pub mod edge;
pub mod random;

pub use edge::*;

use crate::errors::MatrixError;
use std::ops::Range;

pub type City = usize;
pub type NumCities = usize;
pub type Cost = f64;

/// Dense travel costs between all pairs of cities; `cost(i, j)` is the cost of going from `i` to
/// `j`. The matrix is immutable after construction and always has at least two cities. The
/// diagonal is stored but never read by the searches.
#[derive(Clone, Debug, PartialEq)]
pub struct CostMatrix {
    number_of_cities: NumCities,
    costs: Vec<Cost>,
}

impl CostMatrix {
    /// Builds a matrix from its rows.
    ///
    /// # Example
    /// ```
    /// use tspbb::matrix::CostMatrix;
    /// let matrix = CostMatrix::try_from_rows(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).unwrap();
    /// assert_eq!(matrix.number_of_cities(), 2);
    /// assert_eq!(matrix.cost(1, 0), 4.0);
    /// ```
    pub fn try_from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        if n < 2 {
            return Err(MatrixError::TooFewCities(n));
        }

        let mut costs = Vec::with_capacity(n * n);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(MatrixError::RowLength {
                    row: from,
                    expected: n,
                    found: row.len(),
                });
            }

            for (to, value) in row.into_iter().enumerate() {
                if !(value.is_finite() && value >= 0.0) {
                    return Err(MatrixError::InvalidCostValue { from, to, value });
                }
                costs.push(value);
            }
        }

        Ok(Self {
            number_of_cities: n,
            costs,
        })
    }

    /// Matrix where each off-diagonal entry equals `cost`
    pub fn uniform(n: NumCities, cost: Cost) -> Result<Self, MatrixError> {
        Self::try_from_rows(
            (0..n)
                .map(|i| (0..n).map(|j| if i == j { 0.0 } else { cost }).collect())
                .collect(),
        )
    }

    pub fn number_of_cities(&self) -> NumCities {
        self.number_of_cities
    }

    pub fn cities(&self) -> Range<City> {
        0..self.number_of_cities
    }

    /// Travel cost from `from` to `to`.
    /// ** Panics if either city is out of range **
    #[inline(always)]
    pub fn cost(&self, from: City, to: City) -> Cost {
        debug_assert!(from < self.number_of_cities && to < self.number_of_cities);
        self.costs[from * self.number_of_cities + to]
    }

    pub fn row(&self, from: City) -> &[Cost] {
        let n = self.number_of_cities;
        &self.costs[from * n..(from + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cost]> + '_ {
        self.costs.chunks_exact(self.number_of_cities)
    }

    pub fn is_symmetric(&self) -> bool {
        self.cities()
            .all(|i| (i + 1..self.number_of_cities).all(|j| self.cost(i, j) == self.cost(j, i)))
    }

    /// Cost of the closed cycle visiting `route` in order and returning to its first city.
    /// An empty route costs nothing.
    pub fn tour_cost(&self, route: &[City]) -> Cost {
        let Some(&first) = route.first() else {
            return 0.0;
        };

        let path: Cost = route.windows(2).map(|w| self.cost(w[0], w[1])).sum();
        path + self.cost(route[route.len() - 1], first)
    }
}
