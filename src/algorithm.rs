//! The tour searches are implemented using the [`IterativeAlgorithm`] trait.
//!
//! An algorithm does a bounded amount of work per call and then yields, so that an external
//! driver can check a timeout or a termination signal between steps and resume later.

use super::utils::signal_handling;
use std::time::{Duration, Instant};

/// [`IterativeAlgorithm`] provides a consistent interface to execute all our searches. It does
/// not prescribe a constructor since each search has its own parameters; construction should be
/// cheap and must not start the actual search.
///
/// As an adopter of [`IterativeAlgorithm`], you have to implement at least the methods
///   [`IterativeAlgorithm::execute_step`],
///   [`IterativeAlgorithm::is_completed`] and [`IterativeAlgorithm::best_known_solution`].
///
/// If your algorithm is known to eventually terminate please also implement the marker trait
/// [`TerminatingIterativeAlgorithm`]. It offers an easy interface to run the algorithm to completion.
///
/// # Example
/// ```
/// use tspbb::algorithm::IterativeAlgorithm;
/// use tspbb::matrix::{CostMatrix, Cost};
///
/// struct IdentityTour<'a> {
///    matrix: &'a CostMatrix,
///    solution: Option<Cost>,
/// }
///
/// impl<'a> IterativeAlgorithm<Cost> for IdentityTour<'a> {
///     fn execute_step(&mut self) {
///         let route: Vec<_> = (0..self.matrix.number_of_cities()).collect();
///         self.solution = Some(self.matrix.tour_cost(&route));
///     }
///
///     fn is_completed(&self) -> bool {
///         self.solution.is_some()
///     }
///
///     fn best_known_solution(&mut self) -> Option<Cost> {
///         self.solution
///     }
/// }
/// ```
pub trait IterativeAlgorithm<Result> {
    /// Advances the computation of this algorithm. A single step should take at most a few
    /// milliseconds for expected inputs.
    fn execute_step(&mut self);

    /// Returns true iff the algorithm is completed and [`IterativeAlgorithm::execute_step`] may not
    /// be called again.
    fn is_completed(&self) -> bool;

    /// Returns the currently best known solution or None if no solution is known yet.
    fn best_known_solution(&mut self) -> Option<Result>;

    /// Execute the algorithm and keeps calling [`IterativeAlgorithm::execute_step`] until the
    /// `predicate` becomes false, a termination signal was received, or [`IterativeAlgorithm::is_completed`]
    /// becomes true. The function `predicate` is evaluated after each iteration, i.e. a step is
    /// carried out even if the predicate always returns false.
    fn run_while<F: FnMut(&mut Self) -> bool>(&mut self, mut predicate: F) {
        while !self.is_completed() && !signal_handling::received_ctrl_c() {
            self.execute_step();

            if !predicate(self) {
                break;
            }
        }
    }

    /// Execute the algorithm and keeps calling [`IterativeAlgorithm::execute_step`] until either a
    /// timeout occurred, a termination signal was received, or [`IterativeAlgorithm::is_completed`]
    /// is true. The timeout is only checked between steps.
    fn run_until_timeout(&mut self, timeout: Duration) {
        let start = Instant::now();
        self.run_while(|_| start.elapsed() < timeout);
    }
}

/// [`TerminatingIterativeAlgorithm`] is a marker trait, i.e. to adopt it, you give an empty `impl`
/// block. Add this trait to algorithms that will eventually terminate on their own.
pub trait TerminatingIterativeAlgorithm<Result>: IterativeAlgorithm<Result> {
    /// Execute the algorithm until it completed (or the termination signal was received) and
    /// return the solution if it was found.
    fn run_to_completion(&mut self) -> Option<Result> {
        while !self.is_completed() && !signal_handling::received_ctrl_c() {
            self.execute_step();
        }
        self.best_known_solution()
    }
}
