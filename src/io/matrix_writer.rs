use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use super::super::matrix::*;

pub trait MatrixWriter {
    fn try_write_matrix<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
    fn try_write_matrix_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error>;
}

impl MatrixWriter for CostMatrix {
    fn try_write_matrix<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(writer, "{}", self.number_of_cities())?;
        for row in self.rows() {
            writeln!(writer, "{}", row.iter().join(" "))?;
        }

        Ok(())
    }

    fn try_write_matrix_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.try_write_matrix(&mut writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::CostMatrixReader;
    use rand::SeedableRng;
    use regex::Regex;

    #[test]
    fn hard_coded() {
        let matrix = CostMatrix::try_from_rows(vec![vec![0.0, 1.5], vec![7.0, 0.0]]).unwrap();

        let output = {
            let mut buffer: Vec<u8> = Vec::new();
            matrix.try_write_matrix(&mut buffer).expect("Failed to write");
            String::from_utf8(buffer).unwrap()
        };

        assert!(Regex::new(r"^2\n").unwrap().is_match(&output), "Output: {output}");
        assert!(
            Regex::new(r"(?m)^0\s1\.5$").unwrap().is_match(&output),
            "Output: {output}"
        );
        assert!(
            Regex::new(r"(?m)^7\s0$").unwrap().is_match(&output),
            "Output: {output}"
        );
    }

    #[test]
    fn transcribe() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(1234);
        for n in 2..20 {
            let org = CostMatrix::random_euclidean(&mut rng, n, 1000.0);

            let mut buffer: Vec<u8> = Vec::new();
            org.try_write_matrix(&mut buffer).expect("Failed to write");

            let read = CostMatrix::try_read_matrix(buffer.as_slice()).expect("Failed to read");
            assert_eq!(org, read);
        }
    }

    #[test]
    fn write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uniform.txt");

        let matrix = CostMatrix::uniform(4, 3.0).unwrap();
        matrix.try_write_matrix_file(&path).unwrap();

        assert_eq!(CostMatrix::try_read_matrix_file(&path).unwrap(), matrix);
    }
}
