//! Common [scalar data types][data types] used in sfnt font files
//!
//! Besides the scalars themselves, this crate describes the fixed-width
//! [field kinds][FieldType] that table layouts are built from, so that the
//! reading and writing crates agree on the width and encoding of every field.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod field;
mod fixed;
mod longdatetime;
mod name_id;
mod offset;
mod raw;
mod tag;

pub use field::{FieldType, FieldValue};
pub use fixed::Fixed;
pub use longdatetime::LongDateTime;
pub use name_id::NameId;
pub use offset::Offset16;
pub use raw::{FixedSize, Scalar};
pub use tag::{InvalidTag, Tag};

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The SFNT version used by Apple for fonts containing TrueType outlines.
pub const TRUE_SFNT_VERSION: u32 = 0x74727565;
/// The SFNT version for fonts containing CFF outlines.
pub const CFF_SFNT_VERSION: u32 = 0x4F54544F;
/// The signature of a WOFF 1.0 file.
pub const WOFF_SIGNATURE: u32 = 0x774F4646;
