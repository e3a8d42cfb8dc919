pub mod algorithm;
pub mod errors;
pub mod io;
pub mod log;
pub mod matrix;
pub mod mst;
pub mod search;
pub mod utils;

pub mod prelude {
    pub use super::algorithm::*;
    pub use super::errors::*;
    pub use super::io::*;
    pub use super::matrix::*;
    pub use super::mst::*;
    pub use super::search::*;
    pub use super::utils::signal_handling;
}

#[cfg(test)]
mod testing;
