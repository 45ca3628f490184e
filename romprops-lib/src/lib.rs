//! romprops: identify ROM, disc, and figurine dump formats and extract
//! their metadata.
//!
//! Create a [`RomContext`], open a file, then load its fields:
//!
//! ```no_run
//! use romprops_lib::{RomContext, RomFormat};
//!
//! let ctx = RomContext::new();
//! let mut rom = ctx.open_path("NIGHTS.iso".as_ref())?;
//! for (desc, value) in rom.loaded_fields()?.iter() {
//!     if let Some(text) = value.display(desc) {
//!         println!("{}: {}", desc.name, text);
//!     }
//! }
//! # Ok::<(), romprops_lib::RomError>(())
//! ```

pub mod cache;
pub mod context;
pub mod settings;

pub use context::{Family, PROBE_SIZE, RomContext};

pub use romprops_core::{
    AgeRatings, DateTimeFlags, DetectInfo, DiscFraming, ExtUrl, FieldData, FieldDesc, FieldKind,
    Fields, FileHandle, FormatId, ImageType, ImageTypes, Jurisdiction, MemHandle, RomError,
    RomFormat, RomHandle, StringFormat, System, SystemParseError,
};
pub use romprops_core::{text, util};
pub use romprops_image::{PixelFormat, RasterImage, load as load_image, thumbnail};
