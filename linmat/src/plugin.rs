//! Format plugin surface
//!
//! The narrow interface a format registry uses to pick and drive a codec.
//! This crate keeps no registry of its own.

use std::path::Path;

use linmat_core::{LinearOperator, LinearOperatorInfo};

use crate::config::WriteConfig;
use crate::error::Result;
use crate::session::MatFile;

/// A file format able to store linear operators
pub trait LinearOperatorFormat {
    /// Short format name
    fn identity(&self) -> &'static str;

    /// File name suffixes, without the dot
    fn suffixes(&self) -> &'static [&'static str];

    /// Whether `bytes` start like a file of this format
    fn identify(&self, bytes: &[u8]) -> bool;

    /// Whether operators described by `info` can be stored
    fn known(&self, info: &LinearOperatorInfo) -> bool;

    fn read_header(&self, path: &Path) -> Result<LinearOperatorInfo>;

    fn read(&self, path: &Path) -> Result<LinearOperator>;

    fn write(&self, path: &Path, operator: &LinearOperator) -> Result<()>;

    /// Whether the suffix of `path` is one of [`LinearOperatorFormat::suffixes`]
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.suffixes()
                    .iter()
                    .any(|suffix| suffix.eq_ignore_ascii_case(ext))
            })
    }
}

/// MAT-file format plugin
#[derive(Debug, Clone, Default)]
pub struct MatFormat {
    file: MatFile,
}

impl MatFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WriteConfig) -> Self {
        Self {
            file: MatFile::with_config(config),
        }
    }
}

impl LinearOperatorFormat for MatFormat {
    fn identity(&self) -> &'static str {
        "Matlab"
    }

    fn suffixes(&self) -> &'static [&'static str] {
        &["mat"]
    }

    fn identify(&self, bytes: &[u8]) -> bool {
        MatFile::identify(bytes)
    }

    fn known(&self, info: &LinearOperatorInfo) -> bool {
        info.kind().is_some()
    }

    fn read_header(&self, path: &Path) -> Result<LinearOperatorInfo> {
        self.file.read_header(path)
    }

    fn read(&self, path: &Path) -> Result<LinearOperator> {
        self.file.read(path)
    }

    fn write(&self, path: &Path, operator: &LinearOperator) -> Result<()> {
        self.file.write(path, operator)
    }
}
