//! Core types shared by every romprops format family: file handles,
//! detection inputs, the copy-on-write field set, text codecs, and
//! external image references.

pub mod age_ratings;
pub mod cdrom;
pub mod detect;
pub mod error;
pub mod ext_url;
pub mod fields;
pub mod format;
pub mod handle;
pub mod system;
pub mod text;
pub mod util;

pub use age_ratings::{AgeRatings, Jurisdiction};
pub use cdrom::DiscFraming;
pub use detect::{DetectInfo, FormatId};
pub use error::RomError;
pub use ext_url::{ExtUrl, ImageType, ImageTypes};
pub use fields::{DateTimeFlags, FieldData, FieldDesc, FieldKind, Fields, StringFormat};
pub use format::{FormatState, RomFormat};
pub use handle::{FileHandle, MemHandle, RomHandle};
pub use system::{System, SystemParseError};
