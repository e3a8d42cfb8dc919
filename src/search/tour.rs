use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::{errors::TourError, matrix::*};

/// A Hamiltonian cycle. The route lists every city once and starts at city 0; the closing edge
/// back to city 0 is implicit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tour {
    route: Vec<City>,
    cost: Cost,
}

impl Tour {
    pub fn new(route: Vec<City>, cost: Cost) -> Self {
        Self { route, cost }
    }

    pub fn from_route(matrix: &CostMatrix, route: Vec<City>) -> Self {
        let cost = matrix.tour_cost(&route);
        Self { route, cost }
    }

    pub fn route(&self) -> &[City] {
        &self.route
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn into_route(self) -> Vec<City> {
        self.route
    }

    /// Checks that the route is a permutation of all cities starting at city 0 and that the
    /// stored cost equals the cost of the closed cycle.
    pub fn validate(&self, matrix: &CostMatrix) -> Result<(), TourError> {
        let n = matrix.number_of_cities();
        if self.route.len() != n {
            return Err(TourError::WrongLength {
                expected: n,
                found: self.route.len(),
            });
        }

        if self.route[0] != 0 {
            return Err(TourError::WrongStart(self.route[0]));
        }

        let mut seen = vec![false; n];
        for &u in &self.route {
            if u >= n || std::mem::replace(&mut seen[u], true) {
                return Err(TourError::NotAPermutation(u));
            }
        }

        let actual = matrix.tour_cost(&self.route);
        if actual != self.cost {
            return Err(TourError::CostMismatch {
                reported: self.cost,
                actual,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Tour {
    /// Prints the closed cycle, e.g. `0 1 3 2 0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.route.iter().chain(self.route.first()).join(" ")
        )
    }
}

/// Best tour found so far. The cost never increases; route and cost are always replaced together.
#[derive(Clone, Debug)]
pub struct Incumbent {
    cost: Cost,
    route: Option<Vec<City>>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// No tour known; the cost is +infinity
    pub fn new() -> Self {
        Self {
            cost: Cost::INFINITY,
            route: None,
        }
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn route(&self) -> Option<&[City]> {
        self.route.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_none()
    }

    /// Installs the candidate iff it is strictly cheaper than the current incumbent; equally
    /// expensive tours found later are ignored.
    pub fn try_improve(&mut self, cost: Cost, route: &[City]) -> bool {
        if !(cost < self.cost) {
            return false;
        }

        self.cost = cost;
        match self.route.as_mut() {
            Some(best) => {
                best.clear();
                best.extend_from_slice(route);
            }
            None => self.route = Some(route.to_vec()),
        }
        true
    }

    pub fn to_tour(&self) -> Option<Tour> {
        self.route
            .as_ref()
            .map(|route| Tour::new(route.clone(), self.cost))
    }
}
