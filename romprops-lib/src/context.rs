//! Format registry: probe a file against every registered family and open
//! the matching parser.

use std::path::Path;

use romprops_core::{
    DetectInfo, FileHandle, FormatId, ImageTypes, RomError, RomFormat, RomHandle, System,
};
use romprops_nintendo::{AmiiboParser, amiibo};
use romprops_sega::{SaturnParser, saturn};

/// Number of leading bytes read once and shared by every detector.
pub const PROBE_SIZE: usize = 4096;

/// Static description of a registered format family.
#[derive(Debug, Clone, Copy)]
pub struct Family {
    pub system: System,
    /// Extensions including the leading dot
    pub extensions: &'static [&'static str],
    pub image_types: ImageTypes,
    detect: fn(&DetectInfo) -> Option<FormatId>,
}

impl Family {
    pub fn amiibo() -> Self {
        Self {
            system: System::Amiibo,
            extensions: amiibo::EXTENSIONS,
            image_types: amiibo::IMAGE_TYPES,
            detect: amiibo::detect,
        }
    }

    pub fn saturn() -> Self {
        Self {
            system: System::Saturn,
            extensions: saturn::EXTENSIONS,
            image_types: saturn::IMAGE_TYPES,
            detect: saturn::detect,
        }
    }

    pub fn detect(&self, info: &DetectInfo) -> Option<FormatId> {
        (self.detect)(info)
    }
}

/// Construct the parser for a detected format.
fn open_format(format: FormatId, handle: &dyn RomHandle) -> Box<dyn RomFormat> {
    match format {
        FormatId::Amiibo => Box::new(AmiiboParser::new(handle)),
        FormatId::Saturn(_) => Box::new(SaturnParser::new(handle)),
    }
}

/// Registry of format families, probed in registration order.
///
/// This is the main entry point: create a context, then `open` files.
pub struct RomContext {
    families: Vec<Family>,
}

impl Default for RomContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RomContext {
    /// A context with every built-in family registered.
    pub fn new() -> Self {
        let mut ctx = Self::empty();
        ctx.register(Family::amiibo()).register(Family::saturn());
        ctx
    }

    /// A context with no families registered.
    pub fn empty() -> Self {
        Self {
            families: Vec::new(),
        }
    }

    pub fn register(&mut self, family: Family) -> &mut Self {
        self.families.push(family);
        self
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.iter()
    }

    /// Registered systems, in probe order.
    pub fn systems(&self) -> Vec<System> {
        self.families.iter().map(|f| f.system).collect()
    }

    /// Every registered extension, deduplicated, in registration order.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = Vec::new();
        for ext in self.families.iter().flat_map(|f| f.extensions.iter().copied()) {
            if !out.contains(&ext) {
                out.push(ext);
            }
        }
        out
    }

    /// Run every detector; the first match wins.
    pub fn detect(&self, info: &DetectInfo) -> Option<FormatId> {
        self.families.iter().find_map(|f| f.detect(info))
    }

    /// Read the probe header once and detect the format.
    pub fn identify(
        &self,
        handle: &mut dyn RomHandle,
        extension: Option<&str>,
    ) -> Result<Option<FormatId>, RomError> {
        let size = handle.size()?;
        let mut header = vec![0u8; PROBE_SIZE];
        let n = handle.read_at(0, &mut header)?;
        header.truncate(n);
        handle.rewind()?;

        let mut info = DetectInfo::new(&header, Some(size));
        if let Some(ext) = extension {
            info = info.with_extension(ext);
        }
        Ok(self.detect(&info))
    }

    /// Detect the format of `handle` and open the matching parser.
    ///
    /// Fails with `InvalidFormat` when no family recognizes the file. The
    /// returned parser holds its own duplicate of the handle; if that
    /// duplicate could not be made, the parser reports `BadHandle` from
    /// its load operations.
    pub fn open(&self, handle: &mut dyn RomHandle) -> Result<Box<dyn RomFormat>, RomError> {
        self.open_with_extension(handle, None)
    }

    fn open_with_extension(
        &self,
        handle: &mut dyn RomHandle,
        extension: Option<&str>,
    ) -> Result<Box<dyn RomFormat>, RomError> {
        let format = self
            .identify(handle, extension)?
            .ok_or_else(|| RomError::invalid_format("no registered format matches this file"))?;
        log::debug!("detected {}", format);
        Ok(open_format(format, handle))
    }

    /// Open a file on disk.
    pub fn open_path(&self, path: &Path) -> Result<Box<dyn RomFormat>, RomError> {
        let mut handle = FileHandle::open(path)?;
        let extension = extension_of(path);
        self.open_with_extension(&mut handle, extension.as_deref())
    }

    /// Detect the format of a file on disk without opening a parser.
    pub fn identify_path(&self, path: &Path) -> Result<Option<FormatId>, RomError> {
        let mut handle = FileHandle::open(path)?;
        let extension = extension_of(path);
        self.identify(&mut handle, extension.as_deref())
    }
}

/// Lowercased extension with its leading dot.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}
