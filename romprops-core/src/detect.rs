use crate::System;
use crate::cdrom::DiscFraming;

/// Read-only view of a file's leading bytes, handed to every detector.
///
/// Borrows the header buffer; never owns it. All current families expect
/// `header` to start at absolute offset 0.
#[derive(Debug, Clone, Copy)]
pub struct DetectInfo<'a> {
    /// Bytes read from `header_offset`
    pub header: &'a [u8],
    /// Absolute offset of `header[0]` within the file (always 0 today)
    pub header_offset: u64,
    /// Total file size, if known
    pub file_size: Option<u64>,
    /// File extension including the leading dot, if known.
    /// Detectors never use it; registration code may.
    pub extension: Option<&'a str>,
}

impl<'a> DetectInfo<'a> {
    pub fn new(header: &'a [u8], file_size: Option<u64>) -> Self {
        Self {
            header,
            header_offset: 0,
            file_size,
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: &'a str) -> Self {
        self.extension = Some(extension);
        self
    }
}

/// Concrete format identified by a detector.
///
/// Computed once per open attempt and immutable afterwards. "Unsupported"
/// is expressed as `None` at the detector boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatId {
    /// NTAG215 amiibo dump
    Amiibo,
    /// Saturn disc image with the given sector framing
    Saturn(DiscFraming),
}

impl FormatId {
    pub fn system(&self) -> System {
        match self {
            Self::Amiibo => System::Amiibo,
            Self::Saturn(_) => System::Saturn,
        }
    }

    /// Short human-readable description of the container.
    pub fn describe(&self) -> String {
        match self {
            Self::Amiibo => "NTAG215 dump".to_string(),
            Self::Saturn(framing) => format!("disc image ({} sectors)", framing.name()),
        }
    }
}

impl std::fmt::Display for FormatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.system().display_name(), self.describe())
    }
}
