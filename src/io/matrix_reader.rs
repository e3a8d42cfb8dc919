use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use crate::{errors::MatrixError, matrix::*};

type Result<T> = std::result::Result<T, MatrixError>;

/// Directory in which `tsp_solver --name` looks up instances
pub const DEFAULT_INSTANCE_DIR: &str = "./tests_tsp/";

pub trait CostMatrixReader: Sized {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl CostMatrixReader for CostMatrix {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self> {
        let matrix_reader = MatrixReader::try_new(reader)?;
        CostMatrix::try_from_rows(matrix_reader.try_read_rows()?)
    }

    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = File::open(path).map_err(|e| MatrixError::io(path.display().to_string(), e))?;
        Self::try_read_matrix(BufReader::new(reader))
    }
}

/// Joins `name` to `dir` and appends `.txt` if `with_suffix` is set
///
/// # Example
/// ```
/// use tspbb::io::{resolve_instance_path, DEFAULT_INSTANCE_DIR};
/// use std::path::{Path, PathBuf};
/// assert_eq!(
///     resolve_instance_path(Path::new(DEFAULT_INSTANCE_DIR), "ten", true),
///     PathBuf::from("./tests_tsp/ten.txt")
/// );
/// assert_eq!(
///     resolve_instance_path(Path::new("data"), "ten", false),
///     PathBuf::from("data/ten")
/// );
/// ```
pub fn resolve_instance_path(dir: &Path, name: &str, with_suffix: bool) -> PathBuf {
    let mut path = dir.join(name);
    if with_suffix {
        path.as_mut_os_string().push(".txt");
    }
    path
}

/// Line based reader for dense cost matrices:
///
/// ```text
/// # comment lines (and empty lines) are skipped
/// 3
/// 0 1 2
/// 1 0 3
/// 2 3 0
/// ```
///
/// The first line holds the number of cities `n`, followed by one line with `n` costs per city.
/// After construction, the reader yields the rows one by one.
pub struct MatrixReader<R> {
    lines: Lines<R>,
    line_number: usize,
    number_of_cities: NumCities,
    rows_read: NumCities,
}

macro_rules! raise_error_unless {
    ($cond : expr, $err : expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

impl<R: BufRead> MatrixReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut matrix_reader = Self {
            lines: reader.lines(),
            line_number: 0,
            number_of_cities: 0,
            rows_read: 0,
        };

        matrix_reader.number_of_cities = matrix_reader.parse_header()?;
        Ok(matrix_reader)
    }

    pub fn number_of_cities(&self) -> NumCities {
        self.number_of_cities
    }

    /// Reads all remaining rows and makes sure that nothing but comments follows them
    pub fn try_read_rows(mut self) -> Result<Vec<Vec<Cost>>> {
        let mut rows = Vec::with_capacity(self.number_of_cities);
        for row in self.by_ref() {
            rows.push(row?);
        }

        raise_error_unless!(
            rows.len() == self.number_of_cities,
            MatrixError::MissingRows {
                expected: self.number_of_cities,
                found: rows.len(),
            }
        );

        if self.next_non_comment_line()?.is_some() {
            return Err(MatrixError::TrailingData {
                line: self.line_number,
            });
        }

        Ok(rows)
    }

    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            self.line_number += 1;
            match line {
                None => return Ok(None),
                Some(Err(e)) => return Err(MatrixError::io("<input>", e)),
                Some(Ok(line)) if is_comment(&line) => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<NumCities> {
        let line = self.next_non_comment_line()?;
        let Some(line) = line else {
            return Err(MatrixError::MissingHeader);
        };

        let mut parts = line.split_whitespace();
        let token = parts.next().unwrap_or_default();
        let number_of_cities =
            token
                .parse::<NumCities>()
                .map_err(|_| MatrixError::InvalidCityCount {
                    line: self.line_number,
                    token: token.to_string(),
                })?;

        raise_error_unless!(
            parts.next().is_none(),
            MatrixError::TrailingHeaderData {
                line: self.line_number
            }
        );

        raise_error_unless!(
            number_of_cities >= 2,
            MatrixError::TooFewCities(number_of_cities)
        );

        Ok(number_of_cities)
    }

    fn parse_row(&mut self, line: &str) -> Result<Vec<Cost>> {
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<Cost>().map_err(|_| MatrixError::InvalidCost {
                    line: self.line_number,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        raise_error_unless!(
            row.len() == self.number_of_cities,
            MatrixError::RowLength {
                row: self.rows_read,
                expected: self.number_of_cities,
                found: row.len(),
            }
        );

        Ok(row)
    }
}

impl<R: BufRead> Iterator for MatrixReader<R> {
    type Item = Result<Vec<Cost>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rows_read == self.number_of_cities {
            return None;
        }

        let line = match self.next_non_comment_line() {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };

        let row = self.parse_row(&line);
        self.rows_read += 1;
        Some(row)
    }
}

fn is_comment(line: &str) -> bool {
    let line = line.trim_start();
    line.is_empty() || line.starts_with('#') || line == "c" || line.starts_with("c ")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::get_test_instances_with_optimum;
    use std::io::BufReader;

    #[test]
    fn test_success() {
        const DEMO_FILE: &str = "# four cities\n4\n0 10 15 20\n10 0 35 25\n\nc TEST\n15 35 0 30\n 20\t25 30 0 \n# trailing comment\n";
        let buf_reader = BufReader::new(DEMO_FILE.as_bytes());
        let reader = MatrixReader::try_new(buf_reader).unwrap();
        assert_eq!(reader.number_of_cities(), 4);

        let rows = reader.try_read_rows().unwrap();
        assert_eq!(
            rows,
            vec![
                vec![0.0, 10.0, 15.0, 20.0],
                vec![10.0, 0.0, 35.0, 25.0],
                vec![15.0, 35.0, 0.0, 30.0],
                vec![20.0, 25.0, 30.0, 0.0],
            ]
        );
    }

    #[test]
    fn real_valued_costs() {
        let matrix = CostMatrix::try_read_matrix("2\n0 1.5\n2.25e1 0\n".as_bytes()).unwrap();
        assert_eq!(matrix.cost(0, 1), 1.5);
        assert_eq!(matrix.cost(1, 0), 22.5);
    }

    #[test]
    fn malformed_inputs() {
        let cases: [(&str, fn(&MatrixError) -> bool); 9] = [
            ("", |e| matches!(e, MatrixError::MissingHeader)),
            ("# only comments\n", |e| matches!(e, MatrixError::MissingHeader)),
            ("three\n", |e| {
                matches!(e, MatrixError::InvalidCityCount { line: 1, .. })
            }),
            ("2 2\n0 1\n1 0\n", |e| {
                matches!(e, MatrixError::TrailingHeaderData { line: 1 })
            }),
            ("1\n0\n", |e| matches!(e, MatrixError::TooFewCities(1))),
            ("3\n0 1 2\n1 0 3\n", |e| {
                matches!(
                    e,
                    MatrixError::MissingRows {
                        expected: 3,
                        found: 2
                    }
                )
            }),
            ("2\n0 1\n1 0 5\n", |e| {
                matches!(
                    e,
                    MatrixError::RowLength {
                        row: 1,
                        expected: 2,
                        found: 3
                    }
                )
            }),
            ("2\n0 x\n1 0\n", |e| {
                matches!(e, MatrixError::InvalidCost { line: 2, .. })
            }),
            ("2\n0 1\n1 0\n7 7\n", |e| {
                matches!(e, MatrixError::TrailingData { line: 4 })
            }),
        ];

        for (input, check) in cases {
            let err = CostMatrix::try_read_matrix(input.as_bytes()).unwrap_err();
            assert!(check(&err), "input {input:?} gave {err:?}");
        }
    }

    #[test]
    fn negative_costs_are_rejected() {
        let err = CostMatrix::try_read_matrix("2\n0 -1\n1 0\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::InvalidCostValue { from: 0, to: 1, .. }
        ));
    }

    #[test]
    fn missing_file() {
        let err = CostMatrix::try_read_matrix_file("instances/does-not-exist.txt").unwrap_err();
        assert!(matches!(err, MatrixError::Io { .. }));
        assert!(err.to_string().contains("does-not-exist"));
    }

    #[test]
    fn read_fixture_instances() {
        let instances = get_test_instances_with_optimum("instances/*.txt").collect::<Vec<_>>();
        assert!(!instances.is_empty());

        for (filename, matrix, optimum) in instances {
            assert!(matrix.number_of_cities() >= 2, "file: {filename}");
            assert!(optimum > 0.0, "file: {filename}");
        }
    }
}
