use rand::Rng;

use super::*;

impl CostMatrix {
    /// Symmetric matrix with integral costs drawn uniformly from `costs`
    pub fn random_symmetric<R: Rng>(rng: &mut R, n: NumCities, costs: Range<u32>) -> Self {
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i + 1..n {
                let c = rng.gen_range(costs.clone()) as Cost;
                rows[i][j] = c;
                rows[j][i] = c;
            }
        }
        Self::from_valid_rows(rows)
    }

    /// Independent integral costs in both directions
    pub fn random_asymmetric<R: Rng>(rng: &mut R, n: NumCities, costs: Range<u32>) -> Self {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            0.0
                        } else {
                            rng.gen_range(costs.clone()) as Cost
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_valid_rows(rows)
    }

    /// Euclidean distances between `n` points placed uniformly in a `side x side` square;
    /// these instances satisfy the triangle inequality.
    pub fn random_euclidean<R: Rng>(rng: &mut R, n: NumCities, side: f64) -> Self {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
            .collect();

        let rows = points
            .iter()
            .map(|&(x1, y1)| {
                points
                    .iter()
                    .map(|&(x2, y2)| (x1 - x2).hypot(y1 - y2))
                    .collect()
            })
            .collect();
        Self::from_valid_rows(rows)
    }

    fn from_valid_rows(rows: Vec<Vec<Cost>>) -> Self {
        assert!(rows.len() >= 2, "random instances need at least two cities");
        let n = rows.len();
        Self {
            number_of_cities: n,
            costs: rows.into_iter().flatten().collect(),
        }
    }
}
