//! Write a sparse matrix and a packed symmetric matrix to MAT files

use linmat::{
    Compression, LinearOperator, MatFile, SparseEntry, SparseMatrix, SymmetricMatrix, WriteConfig,
};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let nrows = 20_000;
    let ncols = 5_000;
    let band = 3;

    println!("Writing {nrows} x {ncols} banded sparse matrix...");
    let start = Instant::now();
    let entries = build_demo_band(nrows, ncols, band);
    let matrix = SparseMatrix::from_entries(nrows, ncols, entries)?;
    println!("Built {} entries in {:?}", matrix.nnz(), start.elapsed());

    let config = WriteConfig::default()
        .with_compression(Compression::Fast)
        .with_description("linmat write_matrix example");
    let session = MatFile::with_config(config);

    let start = Instant::now();
    session.write("example_sparse.mat", &LinearOperator::from(matrix))?;
    println!("Sparse matrix written in {:?}", start.elapsed());

    // 4x4 symmetric matrix, upper triangle packed column by column
    let packed: Vec<f64> = (1..=10).map(f64::from).collect();
    let symmetric = SymmetricMatrix::new(4, packed)?;
    session.write("example_symmetric.mat", &LinearOperator::from(symmetric))?;
    println!("Symmetric matrix written");

    println!("\nRun 'cargo run --example read_matrix' to read them back!");
    Ok(())
}

/// Entries on the `band` diagonals starting at the main diagonal
fn build_demo_band(nrows: usize, ncols: usize, band: usize) -> Vec<SparseEntry> {
    let mut entries = Vec::with_capacity(ncols * band);
    for col in 0..ncols {
        for offset in 0..band {
            let row = col + offset;
            if row < nrows {
                entries.push(SparseEntry::new(row, col, row as f64 + col as f64 * 0.1));
            }
        }
    }
    entries
}
