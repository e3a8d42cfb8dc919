use thiserror::Error;

use crate::matrix::{City, Cost};

/// Everything that can go wrong while loading or constructing a [`crate::matrix::CostMatrix`].
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("cannot read instance {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no header found; expected the number of cities")]
    MissingHeader,

    #[error("line {line}: cannot parse number of cities from {token:?}")]
    InvalidCityCount { line: usize, token: String },

    #[error("line {line}: expected end of header after the number of cities")]
    TrailingHeaderData { line: usize },

    #[error("instance has {0} cities; at least two are required for a tour")]
    TooFewCities(usize),

    #[error("expected {expected} rows, but input ended after {found}")]
    MissingRows { expected: usize, found: usize },

    #[error("row {row} has {found} entries, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse cost {token:?}")]
    InvalidCost { line: usize, token: String },

    #[error("cost[{from}][{to}] = {value} is not a finite non-negative number")]
    InvalidCostValue { from: City, to: City, value: Cost },

    #[error("line {line}: unexpected data after the last row")]
    TrailingData { line: usize },
}

impl MatrixError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        MatrixError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search was interrupted before any tour was found")]
    Interrupted,

    #[error("search completed without finding a tour")]
    Exhausted,
}

#[derive(Debug, Error, PartialEq)]
pub enum TourError {
    #[error("tour has {found} cities, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("tour must start at city 0, starts at {0}")]
    WrongStart(City),

    #[error("city {0} is out of range or visited twice")]
    NotAPermutation(City),

    #[error("tour costs {actual}, but {reported} was reported")]
    CostMismatch { reported: Cost, actual: Cost },
}
