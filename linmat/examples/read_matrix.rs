//! Probe and read the MAT files produced by the write_matrix example

use linmat::{LinearOperator, LinearOperatorData, MatFile};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = MatFile::new();

    for path in ["example_sparse.mat", "example_symmetric.mat"] {
        println!("== {path}");

        let start = Instant::now();
        let info = session.read_header(path)?;
        println!(
            "Detected {} ({}x{}, {} stored elements) in {:?}",
            info.kind().map_or("unknown".to_string(), |k| k.to_string()),
            info.nrows(),
            info.ncols(),
            info.element_count(),
            start.elapsed()
        );

        let start = Instant::now();
        let operator = session.read(path)?;
        println!("Decoded in {:?}", start.elapsed());

        match &operator {
            LinearOperator::Sparse(matrix) => {
                for (row, col) in [(0, 0), (2, 0), (10, 10), (3, 0)] {
                    match matrix.get(row, col) {
                        Some(value) => println!("  [{row}, {col}] = {value}"),
                        None => println!("  [{row}, {col}] not stored"),
                    }
                }
            }
            other => {
                let (nrows, ncols) = other.dimensions();
                for row in 0..nrows.min(4) {
                    let values: Vec<String> = (0..ncols.min(4))
                        .map(|col| format!("{:6.1}", other.get_element(row, col).unwrap_or(0.0)))
                        .collect();
                    println!("  {}", values.join(" "));
                }
            }
        }
    }
    Ok(())
}
