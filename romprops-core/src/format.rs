//! The format-family trait and the state every family parser carries.

use std::collections::HashMap;

use crate::{
    DetectInfo, ExtUrl, Fields, FieldDesc, FormatId, ImageType, ImageTypes, RomError, RomHandle,
    System,
};

/// Operations every format family parser provides.
///
/// A parser is bound to its own duplicated handle. Construction re-runs the
/// family detector against the file's actual header; if that fails the
/// parser stays invalid and every load operation returns an error, while
/// static information (extensions, image types) stays available.
pub trait RomFormat: Send {
    /// The family this parser belongs to.
    fn system(&self) -> System;

    /// Format detected at construction, or `None` if the file was rejected.
    fn format_id(&self) -> Option<FormatId>;

    fn is_valid(&self) -> bool {
        self.format_id().is_some()
    }

    /// Run this family's detector. Forwards to the family's static detector.
    fn detect_rom(&self, info: &DetectInfo) -> Option<FormatId>;

    /// Extensions associated with this family, including the leading dot.
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Image categories this family can ever supply.
    fn supported_image_types(&self) -> ImageTypes;

    /// Populate the field set. Idempotent: once populated, returns the
    /// existing count without any I/O.
    fn load_fields(&mut self) -> Result<usize, RomError>;

    /// The field set as populated so far (empty before `load_fields`).
    fn fields(&self) -> &Fields;

    /// Compute (or return cached) external image URLs for `image_type`.
    ///
    /// An empty list means no external art is available.
    fn load_external_urls(&mut self, image_type: ImageType) -> Result<&[ExtUrl], RomError>;

    /// Load fields on first access and return them.
    fn loaded_fields(&mut self) -> Result<&Fields, RomError> {
        self.load_fields()?;
        Ok(self.fields())
    }
}

/// Shared bookkeeping for family parsers: the private handle, detection
/// result, field set, and per-image-type URL cache.
pub struct FormatState {
    handle: Option<Box<dyn RomHandle>>,
    format: Option<FormatId>,
    fields: Fields,
    ext_urls: HashMap<ImageType, Vec<ExtUrl>>,
}

impl FormatState {
    /// Duplicate `source` into a private handle. A handle that cannot be
    /// duplicated leaves the state without a handle (and invalid).
    pub fn bind(source: &dyn RomHandle, desc: &'static [FieldDesc]) -> Self {
        let handle = match source.duplicate() {
            Ok(h) => Some(h),
            Err(e) => {
                log::debug!("cannot duplicate file handle: {}", e);
                None
            }
        };
        Self {
            handle,
            format: None,
            fields: Fields::new(desc),
            ext_urls: HashMap::new(),
        }
    }

    /// Read up to `len` bytes from the start of the file, plus the file size.
    ///
    /// The returned buffer is short only if the file is.
    pub fn read_header(&mut self, len: usize) -> Result<(Vec<u8>, u64), RomError> {
        let handle = self
            .handle
            .as_deref_mut()
            .ok_or_else(|| RomError::bad_handle("no file handle"))?;
        let size = handle.size()?;
        let mut buf = vec![0u8; len];
        let n = handle.read_at(0, &mut buf)?;
        buf.truncate(n);
        Ok((buf, size))
    }

    /// Record the detector verdict for the opened file.
    pub fn set_format(&mut self, format: Option<FormatId>) {
        self.format = format;
    }

    pub fn format(&self) -> Option<FormatId> {
        self.format
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    /// Fail with `BadHandle` if there is no handle, `InvalidFormat` if the
    /// detector rejected the file.
    pub fn check(&self) -> Result<(), RomError> {
        if self.handle.is_none() {
            return Err(RomError::bad_handle("no file handle"));
        }
        if self.format.is_none() {
            return Err(RomError::invalid_format("file was not recognized"));
        }
        Ok(())
    }

    /// Validate an image-type request against the family's mask, then the
    /// handle and format.
    pub fn check_image_type(
        &self,
        supported: ImageTypes,
        image_type: ImageType,
    ) -> Result<(), RomError> {
        if !supported.contains(image_type) {
            return Err(RomError::range(format!(
                "{} is not supported by this format",
                image_type.name()
            )));
        }
        self.check()
    }

    /// Return the cached URL list for `image_type`, computing it with
    /// `compute` on first request.
    pub fn urls_or_insert_with(
        &mut self,
        image_type: ImageType,
        compute: impl FnOnce() -> Vec<ExtUrl>,
    ) -> &[ExtUrl] {
        self.ext_urls.entry(image_type).or_insert_with(compute)
    }
}
