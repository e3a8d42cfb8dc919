use std::sync::{
    Mutex,
    atomic::{AtomicU64, Ordering},
};

use super::{Incumbent, Tour};
use crate::matrix::{City, Cost};

/// Incumbent shared between concurrently running searches.
///
/// The cost is mirrored in an atomic (as raw `f64` bits) for lock-free reads in the pruning
/// test; the mutex-protected [`Incumbent`] is the source of truth and only accepts strict
/// improvements, so the cost never increases even under concurrent writers.
#[derive(Debug)]
pub struct SharedIncumbent {
    cost_bits: AtomicU64,
    incumbent: Mutex<Incumbent>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedIncumbent {
    pub fn new() -> Self {
        Self {
            cost_bits: AtomicU64::new(Cost::INFINITY.to_bits()),
            incumbent: Mutex::new(Incumbent::new()),
        }
    }

    /// Cost of the best tour installed so far (+infinity if there is none). The value may lag
    /// behind a concurrent installation, but it is never below the true incumbent.
    #[inline]
    pub fn cost(&self) -> Cost {
        Cost::from_bits(self.cost_bits.load(Ordering::Relaxed))
    }

    /// Installs the tour iff it is strictly cheaper than the current incumbent
    pub fn try_install(&self, cost: Cost, route: &[City]) -> bool {
        if !(cost < self.cost()) {
            return false;
        }

        // the atomic is only a hint; decide under the lock
        let mut guard = self.incumbent.lock().unwrap_or_else(|e| e.into_inner());
        if !guard.try_improve(cost, route) {
            return false;
        }

        self.cost_bits.store(cost.to_bits(), Ordering::Relaxed);
        true
    }

    pub fn snapshot(&self) -> Option<Tour> {
        self.incumbent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .to_tour()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sequential_installs() {
        let shared = SharedIncumbent::new();
        assert_eq!(shared.cost(), Cost::INFINITY);
        assert!(shared.snapshot().is_none());

        assert!(shared.try_install(12.0, &[0, 1, 2]));
        assert!(!shared.try_install(12.0, &[0, 2, 1]));
        assert!(!shared.try_install(13.0, &[0, 2, 1]));
        assert!(shared.try_install(11.0, &[0, 2, 1]));

        assert_eq!(shared.cost(), 11.0);
        assert_eq!(shared.snapshot(), Some(Tour::new(vec![0, 2, 1], 11.0)));
    }

    #[test]
    fn concurrent_installs_keep_minimum() {
        let shared = SharedIncumbent::new();

        std::thread::scope(|s| {
            for t in 0..8u32 {
                let shared = &shared;
                s.spawn(move || {
                    for i in (0..200u32).rev() {
                        let cost = (i * 8 + t) as Cost;
                        shared.try_install(cost, &[0, t as City]);
                    }
                });
            }
        });

        assert_eq!(shared.cost(), 0.0);
        assert_eq!(shared.snapshot(), Some(Tour::new(vec![0, 0], 0.0)));
    }
}
