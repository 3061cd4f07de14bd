//! Container reader

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use linmat_core::format::constants::TAG_SIZE;
use linmat_core::{ByteOrder, DataType, ElementReader, FormatError, MatHeader, StorageBackend};
use tracing::debug;

use super::backend::Backing;
use super::variable::Variable;
use crate::error::{AccessMode, Error, Result};

/// An open container
///
/// Holds the container bytes for the lifetime of one read operation;
/// dropping the reader releases them.
#[derive(Debug)]
pub struct ContainerReader {
    path: PathBuf,
    header: MatHeader,
    backing: Backing,
}

impl ContainerReader {
    /// Open and validate the container at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let backing = Backing::open(&path).map_err(|e| Error::FileOpenFailure {
            path: path.clone(),
            mode: AccessMode::Read,
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), bytes = backing.size(), "opened container");
        Self::from_backing(path, backing)
    }

    /// Wrap bytes already in hand; `path` is used for error reporting only
    pub fn from_backing(path: impl Into<PathBuf>, backing: impl Into<Backing>) -> Result<Self> {
        let path = path.into();
        let backing = backing.into();
        let header = match MatHeader::from_bytes(backing.as_slice()) {
            Ok(header) => header,
            Err(source) => return Err(Error::Format { path, source }),
        };
        Ok(Self {
            path,
            header,
            backing,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &MatHeader {
        &self.header
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// Iterate over the stored variables from the first one
    ///
    /// Every call starts a fresh scan. The iterator stops after the first
    /// framing error it reports.
    pub fn variables(&self) -> Variables<'_> {
        let body = &self.backing.as_slice()[MatHeader::SIZE..];
        Variables {
            elements: ElementReader::new(body, self.byte_order()),
            failed: false,
        }
    }
}

impl Drop for ContainerReader {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "closed container");
    }
}

/// Iterator over the variables of a container
#[derive(Debug, Clone)]
pub struct Variables<'a> {
    elements: ElementReader<'a>,
    failed: bool,
}

impl<'a> Iterator for Variables<'a> {
    type Item = linmat_core::Result<Variable<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let order = self.elements.byte_order();
        loop {
            let element = match self.elements.next_element() {
                Ok(Some(element)) => element,
                Ok(None) => return None,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            };

            let parsed = match element.data_type() {
                Some(DataType::Matrix) => Variable::parse(Cow::Borrowed(element.data), order),
                Some(DataType::Compressed) => inflate(element.data, order)
                    .and_then(|bytes| Variable::parse(Cow::Owned(bytes), order)),
                _ => {
                    debug!(code = element.code, "skipping non-matrix element");
                    continue;
                }
            };
            self.failed = parsed.is_err();
            return Some(parsed);
        }
    }
}

/// Inflate a compressed element to the contents of the `miMATRIX` it holds
fn inflate(data: &[u8], order: ByteOrder) -> linmat_core::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut bytes)
        .map_err(|_| FormatError::CorruptedData)?;

    if order.read_u32(&bytes)? != DataType::Matrix.to_u32() {
        return Err(FormatError::InvalidTag);
    }
    let nbytes = order.read_u32(bytes.get(4..).ok_or(FormatError::Truncated)?)? as usize;
    let end = TAG_SIZE
        .checked_add(nbytes)
        .ok_or(FormatError::ArraySizeOverflow)?;
    if bytes.len() < end {
        return Err(FormatError::Truncated);
    }
    bytes.truncate(end);
    bytes.drain(..TAG_SIZE);
    Ok(bytes)
}
