//! Read and write sessions
//!
//! Every call opens the container, does its work and releases the
//! container before returning, on success and failure alike.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use linmat_core::{LinearOperator, LinearOperatorInfo, MatHeader};
use tracing::{debug, instrument};

use crate::codec::codec_for;
use crate::config::WriteConfig;
use crate::container::{ContainerReader, ContainerWriter};
use crate::error::{AccessMode, Error, Result};
use crate::probe::{probe, probe_with, Probe};

/// Entry point for reading and writing operators in MAT containers
#[derive(Debug, Clone, Default)]
pub struct MatFile {
    config: WriteConfig,
}

impl MatFile {
    /// Session with the default write configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WriteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WriteConfig {
        &self.config
    }

    /// Whether `bytes` start with the MAT-file magic tag
    pub fn identify(bytes: &[u8]) -> bool {
        linmat_core::identify(bytes)
    }

    /// Detect the stored kind and shape without decoding the payload
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read_header<P: AsRef<Path>>(&self, path: P) -> Result<LinearOperatorInfo> {
        let reader = ContainerReader::open(path)?;
        let found = probe(&reader)?;
        Ok(found.info)
    }

    /// Detect and decode the stored operator
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<LinearOperator> {
        let reader = ContainerReader::open(path)?;
        let found = probe(&reader)?;
        decode(&reader, found)
    }

    /// Decode the first stored object of the kind described by `info`
    ///
    /// No other kind is tried.
    #[instrument(
        skip(self, path, info),
        fields(
            path = %path.as_ref().display(),
            dimension = info.dimension(),
            storage = %info.storage_kind(),
        )
    )]
    pub fn read_as<P: AsRef<Path>>(
        &self,
        path: P,
        info: &LinearOperatorInfo,
    ) -> Result<LinearOperator> {
        let kind = info.kind().ok_or(Error::UnsupportedStorageKind {
            dimension: info.dimension(),
            kind: info.storage_kind(),
        })?;
        let reader = ContainerReader::open(path)?;
        let found = probe_with(&reader, &[codec_for(kind)])?;
        decode(&reader, found)
    }

    /// Store `operator` as the only variable of a new container
    ///
    /// The operator is encoded before the file is created, so an encoding
    /// failure leaves an existing file untouched.
    #[instrument(
        skip(self, path, operator),
        fields(path = %path.as_ref().display(), kind = %operator.kind())
    )]
    pub fn write<P: AsRef<Path>>(&self, path: P, operator: &LinearOperator) -> Result<()> {
        let path = path.as_ref();
        let element = codec_for(operator.kind())
            .encode(operator)
            .and_then(|builder| Ok(builder.finish()?))
            .map_err(|e| e.into_error(path))?;

        let file = File::create(path).map_err(|e| Error::FileOpenFailure {
            path: path.to_path_buf(),
            mode: AccessMode::Write,
            reason: e.to_string(),
        })?;
        let header = MatHeader::new(&self.config.description);
        let mut writer =
            ContainerWriter::new(BufWriter::new(file), &header, self.config.compression)?;
        writer.write_matrix(&element)?;
        writer.finish()?;

        debug!(bytes = element.len(), compression = ?self.config.compression, "wrote container");
        Ok(())
    }
}

fn decode(reader: &ContainerReader, found: Probe<'_>) -> Result<LinearOperator> {
    found
        .codec
        .decode(&found.variable)
        .map_err(|e| e.into_error(reader.path()))
}
