use super::{io::*, matrix::*};
use glob::glob;
use itertools::Itertools as _;
use rand::Rng;
use std::ops::Range;

pub fn random_symmetric_matrices(
    rng: &mut impl Rng,
    cities: Range<NumCities>,
) -> impl Iterator<Item = CostMatrix> {
    (0..).map(move |_| {
        let n = rng.gen_range(cities.clone());
        CostMatrix::random_symmetric(rng, n, 1..50)
    })
}

pub fn random_asymmetric_matrices(
    rng: &mut impl Rng,
    cities: Range<NumCities>,
) -> impl Iterator<Item = CostMatrix> {
    (0..).map(move |_| {
        let n = rng.gen_range(cities.clone());
        CostMatrix::random_asymmetric(rng, n, 1..50)
    })
}

pub fn random_euclidean_matrices(
    rng: &mut impl Rng,
    cities: Range<NumCities>,
) -> impl Iterator<Item = CostMatrix> {
    (0..).map(move |_| {
        let n = rng.gen_range(cities.clone());
        CostMatrix::random_euclidean(rng, n, 100.0)
    })
}

/// Enumerates all tours in lexicographic order and returns the cost and route of the first
/// cheapest one.
pub fn brute_force_tour(matrix: &CostMatrix) -> (Cost, Vec<City>) {
    let n = matrix.number_of_cities();
    let mut best = (Cost::INFINITY, Vec::new());

    for rest in (1..n).permutations(n - 1) {
        let route = std::iter::once(0).chain(rest).collect_vec();
        let cost = matrix.tour_cost(&route);
        if cost < best.0 {
            best = (cost, route);
        }
    }

    best
}

/// Cheapest path that starts at the last city of `prefix`, visits every city not on `prefix`
/// and ends at city 0.
pub fn brute_force_completion(matrix: &CostMatrix, prefix: &[City]) -> Cost {
    let n = matrix.number_of_cities();
    let last = *prefix.last().unwrap();
    let remaining = (0..n).filter(|u| !prefix.contains(u)).collect_vec();
    let k = remaining.len();

    remaining
        .into_iter()
        .permutations(k)
        .map(|order| {
            let mut cost = 0.0;
            let mut at = last;
            for u in order {
                cost += matrix.cost(at, u);
                at = u;
            }
            cost + matrix.cost(at, 0)
        })
        .fold(Cost::INFINITY, Cost::min)
}

/// Reads all instances matching `pattern`; the optimum is taken from a `# optimum <cost>` comment
pub fn get_test_instances_with_optimum(
    pattern: &str,
) -> impl Iterator<Item = (String, CostMatrix, Cost)> {
    glob(pattern)
        .expect("Failed to glob")
        .map(|r| r.expect("Failed to access globbed path"))
        .map(|path| {
            let filename = String::from(path.to_str().unwrap());
            let content = std::fs::read_to_string(&path)
                .unwrap_or_else(|_| panic!("Cannot read file {filename}"));

            let optimum = content
                .lines()
                .find_map(|line| line.strip_prefix("# optimum"))
                .unwrap_or_else(|| panic!("No optimum annotated in {filename}"))
                .trim()
                .parse()
                .unwrap();

            let matrix = CostMatrix::try_read_matrix(content.as_bytes())
                .unwrap_or_else(|e| panic!("Cannot parse {filename}: {e}"));

            (filename, matrix, optimum)
        })
}
