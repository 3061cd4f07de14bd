//! Write configuration

/// Compression applied to each stored variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compression {
    /// Plain matrix elements
    None,
    Fast,
    #[default]
    Default,
    Best,
}

impl Compression {
    /// zlib level, `None` when variables are stored uncompressed
    pub fn level(self) -> Option<flate2::Compression> {
        match self {
            Compression::None => None,
            Compression::Fast => Some(flate2::Compression::fast()),
            Compression::Default => Some(flate2::Compression::default()),
            Compression::Best => Some(flate2::Compression::best()),
        }
    }
}

/// Configuration for writing containers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteConfig {
    /// Compression for every written variable
    pub compression: Compression,
    /// Header text following the magic tag; truncated to fit
    pub description: String,
}

impl WriteConfig {
    /// Set compression
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set header description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            description: format!("Created by: linmat {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = WriteConfig::default()
            .with_compression(Compression::None)
            .with_description("unit test");
        assert_eq!(config.compression, Compression::None);
        assert_eq!(config.description, "unit test");
        assert!(config.compression.level().is_none());
        assert_eq!(Compression::Best.level(), Some(flate2::Compression::best()));
    }
}
