mod common;

use common::{be_element, be_header, Scratch};
use linmat::{
    Compression, LinearOperator, LinearOperatorData, LinearOperatorInfo, MatFile, Matrix,
    OperatorKind, SparseEntry, SparseMatrix, StorageKind, SymmetricMatrix, Vector, WriteConfig,
};

fn roundtrip(session: &MatFile, scratch: &Scratch, operator: LinearOperator) {
    let path = scratch.path("roundtrip.mat");
    session.write(&path, &operator).unwrap();

    let info = session.read_header(&path).unwrap();
    assert_eq!(info, operator.info(), "metadata for {operator:?}");
    assert_eq!(info.kind(), Some(operator.kind()));

    let decoded = session.read(&path).unwrap();
    assert_eq!(decoded, operator);
}

fn all_shapes() -> Vec<LinearOperator> {
    vec![
        Vector::new(vec![]).into(),
        Vector::new(vec![42.0]).into(),
        Vector::new((0..100).map(f64::from).collect()).into(),
        Matrix::zeros(0, 0).unwrap().into(),
        Matrix::new(1, 1, vec![7.0]).unwrap().into(),
        Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap().into(),
        Matrix::zeros(5, 0).unwrap().into(),
        SymmetricMatrix::zeros(0).unwrap().into(),
        SymmetricMatrix::new(1, vec![9.0]).unwrap().into(),
        SymmetricMatrix::new(3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap().into(),
        SparseMatrix::new(0, 0).into(),
        SparseMatrix::from_entries(1, 1, [SparseEntry::new(0, 0, -1.0)]).unwrap().into(),
        SparseMatrix::from_entries(
            4,
            7,
            [
                SparseEntry::new(3, 6, 1.0),
                SparseEntry::new(0, 2, 2.0),
                SparseEntry::new(2, 2, 3.0),
            ],
        )
        .unwrap()
        .into(),
        SparseMatrix::new(3, 2).into(),
    ]
}

#[test]
fn every_kind_round_trips_with_every_compression() {
    let scratch = Scratch::new();
    for compression in [
        Compression::None,
        Compression::Fast,
        Compression::Default,
        Compression::Best,
    ] {
        let session = MatFile::with_config(WriteConfig::default().with_compression(compression));
        for operator in all_shapes() {
            roundtrip(&session, &scratch, operator);
        }
    }
}

#[test]
fn symmetric_three_by_three() {
    let scratch = Scratch::new();
    let path = scratch.path("sym.mat");
    let session = MatFile::new();

    let matrix = SymmetricMatrix::new(3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    session.write(&path, &matrix.into()).unwrap();

    let info = session.read_header(&path).unwrap();
    assert_eq!(info.nrows(), 3);
    assert_eq!(info.ncols(), 3);
    assert_eq!(info.storage_kind(), StorageKind::Symmetric);
    assert_eq!(info.element_count(), 6);

    let LinearOperator::Symmetric(decoded) = session.read(&path).unwrap() else {
        panic!("expected a symmetric matrix");
    };
    assert_eq!(decoded.order(), 3);
    assert_eq!(decoded.packed(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn sparse_column_layout() {
    let scratch = Scratch::new();
    let path = scratch.path("sparse.mat");
    let matrix = SparseMatrix::from_entries(
        3,
        2,
        [
            SparseEntry::new(0, 0, 1.0),
            SparseEntry::new(2, 1, 5.0),
            SparseEntry::new(1, 1, 3.0),
        ],
    )
    .unwrap();

    let csc = matrix.to_csc().unwrap();
    assert_eq!(csc.col_ptrs(), &[0, 1, 3]);
    let (rows, values) = csc.column(0).unwrap();
    assert_eq!((rows, values), (&[0usize][..], &[1.0][..]));
    let (rows, values) = csc.column(1).unwrap();
    let mut column: Vec<(usize, f64)> = rows.iter().copied().zip(values.iter().copied()).collect();
    column.sort_by_key(|&(row, _)| row);
    assert_eq!(column, vec![(1, 3.0), (2, 5.0)]);

    let session = MatFile::new();
    session.write(&path, &matrix.clone().into()).unwrap();
    assert_eq!(
        session.read_header(&path).unwrap(),
        LinearOperatorInfo::sparse(3, 2, 3)
    );
    assert_eq!(session.read(&path).unwrap(), LinearOperator::Sparse(matrix));
}

#[test]
fn sparse_with_empty_columns() {
    let scratch = Scratch::new();
    let path = scratch.path("gaps.mat");
    let matrix = SparseMatrix::from_entries(
        3,
        5,
        [SparseEntry::new(1, 1, 2.0), SparseEntry::new(0, 4, 8.0)],
    )
    .unwrap();

    let csc = matrix.to_csc().unwrap();
    assert_eq!(csc.col_ptrs(), &[0, 0, 1, 1, 1, 2]);

    let session = MatFile::new();
    session.write(&path, &matrix.clone().into()).unwrap();
    let LinearOperator::Sparse(decoded) = session.read(&path).unwrap() else {
        panic!("expected a sparse matrix");
    };
    assert_eq!(decoded, matrix);
    assert_eq!(decoded.get(1, 1), Some(2.0));
    assert_eq!(decoded.get(0, 0), None);
}

#[test]
fn logical_access_after_read() {
    let scratch = Scratch::new();
    let path = scratch.path("dense.mat");
    let session = MatFile::new();

    // column-major 2x2: [[1, 3], [2, 4]]
    let matrix = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    session.write(&path, &matrix.into()).unwrap();
    let operator = session.read(&path).unwrap();
    assert_eq!(operator.dimensions(), (2, 2));
    assert_eq!(operator.get_element(0, 1), Some(3.0));
    assert_eq!(operator.get_element(1, 0), Some(2.0));
    assert_eq!(operator.get_element(2, 0), None);
}

#[test]
fn overwrite_existing_file() {
    let scratch = Scratch::new();
    let path = scratch.path("reused.mat");
    let session = MatFile::new();

    session
        .write(&path, &Matrix::zeros(30, 30).unwrap().into())
        .unwrap();
    session
        .write(&path, &Vector::new(vec![1.0]).into())
        .unwrap();
    assert_eq!(session.read(&path).unwrap().kind(), OperatorKind::Vector);
}

#[test]
fn reads_big_endian_containers() {
    let scratch = Scratch::new();
    let path = scratch.path("be.mat");

    let mut flags = Vec::new();
    flags.extend_from_slice(&6u32.to_be_bytes());
    flags.extend_from_slice(&0u32.to_be_bytes());
    let mut values = Vec::new();
    values.extend_from_slice(&1.25f64.to_be_bytes());
    values.extend_from_slice(&(-8.0f64).to_be_bytes());

    let mut body = Vec::new();
    body.extend(be_element(6, &flags));
    body.extend(be_element(5, &2i32.to_be_bytes()));
    body.extend(be_element(1, b"linop"));
    body.extend(be_element(9, &values));

    let mut bytes = be_header();
    bytes.extend(be_element(14, &body));
    std::fs::write(&path, bytes).unwrap();

    let session = MatFile::new();
    assert_eq!(
        session.read_header(&path).unwrap(),
        LinearOperatorInfo::vector(2)
    );
    assert_eq!(
        session.read(&path).unwrap(),
        LinearOperator::from(Vector::new(vec![1.25, -8.0]))
    );
}
