//! Errors that occur while reading font data

use types::Tag;

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read, offset or declared length ran past the end of the data.
    TruncatedData,
    /// A table declared a version we do not know how to read.
    UnsupportedVersion { tag: Tag, version: u32 },
    /// The file signature is not one we support.
    UnsupportedFormat(u32),
    TableIsMissing(Tag),
    MalformedData(&'static str),
    /// A compressed table could not be decompressed.
    Decompression(Tag),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::TruncatedData => write!(f, "Data ended before the end of a field or table"),
            ReadError::UnsupportedVersion { tag, version } => {
                write!(f, "Unsupported {tag} table version 0x{version:08X}")
            }
            ReadError::UnsupportedFormat(signature) => {
                write!(f, "Unsupported font format (signature 0x{signature:08X})")
            }
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
            ReadError::Decompression(tag) => write!(f, "Failed to decompress the {tag} table"),
        }
    }
}

impl std::error::Error for ReadError {}
