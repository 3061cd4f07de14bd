//! Container and matrix element encoding

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use linmat_core::format::constants::FIELD_NAME_LENGTH;
use linmat_core::format::numeric::{encode_i32s, encode_u32};
use linmat_core::{ArrayClass, ArrayFlags, DataType, ElementWriter, FormatError, MatHeader, Result};

use crate::config::Compression;

/// Builder for one `miMATRIX` element
///
/// Sub-elements are appended in stored order after the flags, dimensions
/// and name, which [`MatrixBuilder::finish`] writes first.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    flags: ArrayFlags,
    name: String,
    dims: Vec<usize>,
    body: ElementWriter,
}

impl MatrixBuilder {
    pub fn new(class: ArrayClass, name: impl Into<String>, dims: Vec<usize>) -> Self {
        Self {
            flags: ArrayFlags::new(class),
            name: name.into(),
            dims,
            body: ElementWriter::new(),
        }
    }

    /// Set the allocated non-zero count of a sparse array
    pub fn with_nzmax(mut self, nzmax: usize) -> Result<Self> {
        let nzmax = u32::try_from(nzmax).map_err(|_| FormatError::ArraySizeOverflow)?;
        self.flags = self.flags.with_nzmax(nzmax);
        Ok(self)
    }

    pub fn class(&self) -> ArrayClass {
        self.flags.class
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Append one payload sub-element
    pub fn push(&mut self, data_type: DataType, payload: &[u8]) -> Result<()> {
        self.body.write_element(data_type, payload)
    }

    /// Append the field-name table of a struct array
    pub fn push_field_names(&mut self, names: &[&str]) -> Result<()> {
        let mut table = Vec::with_capacity(names.len() * FIELD_NAME_LENGTH);
        for name in names {
            // one byte is kept for the terminating NUL
            if name.len() >= FIELD_NAME_LENGTH {
                return Err(FormatError::ArraySizeOverflow);
            }
            table.extend_from_slice(name.as_bytes());
            table.resize(table.len() + FIELD_NAME_LENGTH - name.len(), 0);
        }
        self.body
            .write_element(DataType::Int32, &encode_u32(FIELD_NAME_LENGTH)?)?;
        self.body.write_element(DataType::Int8, &table)
    }

    /// Append a nested array as the next struct field value
    pub fn push_field(&mut self, field: MatrixBuilder) -> Result<()> {
        let payload = field.into_payload()?;
        self.body.write_element(DataType::Matrix, &payload)
    }

    fn into_payload(self) -> Result<Vec<u8>> {
        let mut head = ElementWriter::new();
        let [word0, word1] = self.flags.to_words();
        let mut flags = [0u8; ArrayFlags::SIZE];
        flags[..4].copy_from_slice(&word0.to_le_bytes());
        flags[4..].copy_from_slice(&word1.to_le_bytes());
        head.write_element(DataType::UInt32, &flags)?;
        head.write_element(DataType::Int32, &encode_i32s(&self.dims)?)?;
        head.write_element(DataType::Int8, self.name.as_bytes())?;

        let mut payload = head.into_bytes();
        payload.extend_from_slice(self.body.as_bytes());
        Ok(payload)
    }

    /// Complete `miMATRIX` element, tag included
    pub fn finish(self) -> Result<Vec<u8>> {
        let payload = self.into_payload()?;
        let mut element = ElementWriter::new();
        element.write_element(DataType::Matrix, &payload)?;
        Ok(element.into_bytes())
    }
}

/// Sequential container writer
///
/// The header is written on construction; every matrix element after it is
/// stored according to the configured [`Compression`].
#[derive(Debug)]
pub struct ContainerWriter<W: Write> {
    inner: W,
    compression: Compression,
    written: usize,
}

impl<W: Write> ContainerWriter<W> {
    pub fn new(mut inner: W, header: &MatHeader, compression: Compression) -> io::Result<Self> {
        inner.write_all(&header.to_bytes_array())?;
        Ok(Self {
            inner,
            compression,
            written: 0,
        })
    }

    /// Store one complete `miMATRIX` element
    pub fn write_matrix(&mut self, element: &[u8]) -> io::Result<()> {
        match self.compression.level() {
            None => self.inner.write_all(element)?,
            Some(level) => {
                let mut encoder = ZlibEncoder::new(Vec::new(), level);
                encoder.write_all(element)?;
                let compressed = encoder.finish()?;

                let mut tagged = ElementWriter::new();
                tagged
                    .write_element(DataType::Compressed, &compressed)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                self.inner.write_all(tagged.as_bytes())?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Number of variables stored so far
    pub fn variables_written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
