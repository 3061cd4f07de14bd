#![allow(dead_code)]

use std::path::{Path, PathBuf};

use linmat::container::{ContainerWriter, MatrixBuilder};
use linmat::{Compression, MatHeader};

/// Temporary directory holding container files for one test
pub struct Scratch {
    dir: tempfile::TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a container holding the given matrix elements
    pub fn container(&self, name: &str, builders: Vec<MatrixBuilder>) -> PathBuf {
        let path = self.path(name);
        write_container(&path, builders);
        path
    }
}

pub fn write_container(path: &Path, builders: Vec<MatrixBuilder>) {
    let header = MatHeader::new("linmat integration test");
    let mut writer = ContainerWriter::new(Vec::new(), &header, Compression::None).unwrap();
    for builder in builders {
        writer.write_matrix(&builder.finish().unwrap()).unwrap();
    }
    std::fs::write(path, writer.finish().unwrap()).unwrap();
}

/// Big-endian data element with padding
pub fn be_element(data_type: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&data_type.to_be_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    bytes.extend_from_slice(payload);
    while bytes.len() % 8 != 0 {
        bytes.push(0);
    }
    bytes
}

/// Big-endian 128-byte header
pub fn be_header() -> Vec<u8> {
    let mut header = vec![b' '; 116];
    header[..19].copy_from_slice(b"MATLAB 5.0 MAT-file");
    header.extend_from_slice(&[0; 8]);
    header.extend_from_slice(&0x0100u16.to_be_bytes());
    header.extend_from_slice(b"MI");
    header
}
