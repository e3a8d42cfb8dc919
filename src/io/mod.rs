pub mod matrix_reader;
pub use matrix_reader::*;
pub mod matrix_writer;
pub use matrix_writer::MatrixWriter;

pub mod report;
pub use report::*;
