//! Human readable and JSON reports of search outcomes.

use std::io::Write;

use serde::Serialize;

use crate::{matrix::*, search::SearchOutcome};

/// Prints one line per row of the matrix, e.g. `0th city: 0->10->15->null`
pub fn write_matrix_echo<W: Write>(matrix: &CostMatrix, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "the adjacency matrix of cities:")?;
    for (i, row) in matrix.rows().enumerate() {
        write!(writer, "{i}th city: ")?;
        for cost in row {
            write!(writer, "{cost}->")?;
        }
        writeln!(writer, "null")?;
    }
    Ok(())
}

/// One `from to cost` line per edge, in list order
pub fn write_edge_list<W: Write>(edges: &EdgeList, mut writer: W) -> std::io::Result<()> {
    for edge in edges {
        writeln!(writer, "{} {} {}", edge.from, edge.to, edge.cost)?;
    }
    Ok(())
}

/// Block describing one outcome:
///
/// ```text
/// Optimized Depth-First Search Branch and Bound:
///     the minimum path cost: 80
///     the path of optimal route: 0 1 3 2 0
///     Elapsed time in milliseconds: 0 ms
/// ```
pub fn write_outcome<W: Write>(outcome: &SearchOutcome, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{}:", outcome.strategy.label())?;
    writeln!(writer, "\tthe minimum path cost: {}", outcome.tour.cost())?;
    writeln!(writer, "\tthe path of optimal route: {}", outcome.tour)?;
    writeln!(
        writer,
        "\tElapsed time in milliseconds: {} ms",
        outcome.elapsed.as_millis()
    )?;
    if !outcome.completed {
        writeln!(writer, "\t(search stopped early; cost is an upper bound)")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub instance: &'a str,
    pub number_of_cities: NumCities,
    pub outcomes: &'a [SearchOutcome],
}

impl JsonReport<'_> {
    pub fn try_write<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)
    }
}
