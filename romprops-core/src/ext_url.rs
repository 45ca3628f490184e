//! External image references.
//!
//! Families with community-sourced artwork derive a cache key and a remote
//! URL from parsed identifiers. Nothing here performs network I/O.

use serde::Serialize;

/// Category of image a family can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImageType {
    /// Icon embedded in the file
    IntIcon = 0,
    /// Banner embedded in the file
    IntBanner = 1,
    /// Media scan embedded in the file
    IntMedia = 2,
    /// Externally hosted media scan (disc, cartridge, figure)
    ExtMedia = 3,
    /// Externally hosted box cover
    ExtCover = 4,
    /// Externally hosted full box art
    ExtBox = 5,
}

const ALL_IMAGE_TYPES: &[ImageType] = &[
    ImageType::IntIcon,
    ImageType::IntBanner,
    ImageType::IntMedia,
    ImageType::ExtMedia,
    ImageType::ExtCover,
    ImageType::ExtBox,
];

impl ImageType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::IntIcon => "Internal icon",
            Self::IntBanner => "Internal banner",
            Self::IntMedia => "Internal media scan",
            Self::ExtMedia => "External media scan",
            Self::ExtCover => "External cover scan",
            Self::ExtBox => "External box scan",
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExtMedia | Self::ExtCover | Self::ExtBox)
    }

    pub fn all() -> &'static [ImageType] {
        ALL_IMAGE_TYPES
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Bitmask of [`ImageType`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageTypes(u32);

impl ImageTypes {
    pub const NONE: Self = Self(0);

    pub fn contains(&self, image_type: ImageType) -> bool {
        self.0 & image_type.bit() != 0
    }

    pub const fn with(self, image_type: ImageType) -> Self {
        Self(self.0 | image_type.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ImageType> + '_ {
        ImageType::all()
            .iter()
            .copied()
            .filter(|&t| self.contains(t))
    }
}

impl From<ImageType> for ImageTypes {
    fn from(image_type: ImageType) -> Self {
        Self::NONE.with(image_type)
    }
}

/// Cache key and remote URL identifying one piece of external artwork.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExtUrl {
    /// Relative path under the image cache directory
    pub cache_key: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_membership() {
        let mask = ImageTypes::from(ImageType::ExtMedia).with(ImageType::ExtBox);
        assert!(mask.contains(ImageType::ExtMedia));
        assert!(mask.contains(ImageType::ExtBox));
        assert!(!mask.contains(ImageType::IntIcon));
        assert_eq!(
            mask.iter().collect::<Vec<_>>(),
            vec![ImageType::ExtMedia, ImageType::ExtBox]
        );
    }

    #[test]
    fn empty_mask() {
        assert!(ImageTypes::NONE.is_empty());
        assert_eq!(ImageTypes::NONE.iter().count(), 0);
    }

    #[test]
    fn external_classification() {
        assert!(ImageType::ExtCover.is_external());
        assert!(!ImageType::IntBanner.is_external());
    }
}
