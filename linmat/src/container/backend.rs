//! Byte storage behind an open container

#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};
use linmat_core::StorageBackend;
use std::fs::File;
use std::path::Path;

/// Bytes of an open container
#[derive(Debug)]
pub enum Backing {
    /// Read-only mapping of the file
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    /// Bytes held in memory
    Owned(Vec<u8>),
}

impl Backing {
    /// Open `path` for reading
    ///
    /// Files are mapped when the `mmap` feature is enabled and read into
    /// memory otherwise. Empty files are never mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Self::from_file(file)
    }

    #[cfg(feature = "mmap")]
    fn from_file(file: File) -> std::io::Result<Self> {
        if file.metadata()?.len() == 0 {
            return Ok(Backing::Owned(Vec::new()));
        }
        // SAFETY: Read-only mapping; the container is not modified while a
        // read operation holds it
        let mmap = unsafe { MmapOptions::new().map(&file)? };
        Ok(Backing::Mapped(mmap))
    }

    #[cfg(not(feature = "mmap"))]
    fn from_file(mut file: File) -> std::io::Result<Self> {
        use std::io::Read;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Backing::Owned(bytes))
    }
}

impl StorageBackend for Backing {
    fn as_slice(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            Backing::Mapped(mmap) => &mmap[..],
            Backing::Owned(bytes) => bytes.as_slice(),
        }
    }
}

impl From<Vec<u8>> for Backing {
    fn from(bytes: Vec<u8>) -> Self {
        Backing::Owned(bytes)
    }
}
