//! Sega Saturn disc images.
//!
//! Supports:
//! - Cooked ISO images (2048-byte sectors)
//! - Raw BIN dumps (2352-byte sectors, Mode 1)
//!
//! The boot header (IP.BIN) occupies the first 256 bytes of user data in
//! sector 0. Every sub-field is fixed-width ASCII padded with spaces,
//! except the title, which may be Shift-JIS.

use chrono::NaiveDate;
use log::{debug, trace};

use romprops_core::cdrom::{self, DiscFraming};
use romprops_core::text::cp1252_sjis_to_utf8;
use romprops_core::util::read_ascii_fixed;
use romprops_core::{
    DateTimeFlags, DetectInfo, ExtUrl, FieldDesc, Fields, FormatId, FormatState, ImageType,
    ImageTypes, RomError, RomFormat, RomHandle, System,
};

use crate::publishers::third_party_name;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hardware ID at the start of every Saturn boot header.
pub const HARDWARE_ID: &[u8; 16] = b"SEGA SEGASATURN ";

/// Size of the boot header.
pub const HEADER_SIZE: usize = 0x100;

/// Bytes that must be present to classify a raw dump: sector header plus
/// boot header.
const RAW_PROBE_SIZE: usize = 0x10 + HEADER_SIZE;

/// First-party maker ID.
const FIRST_PARTY_MAKER: &[u8; 16] = b"SEGA ENTERPRISES";

/// Prefix of every third-party maker ID.
const THIRD_PARTY_PREFIX: &[u8] = b"SEGA TP T-";

// Header field offsets (relative to the start of the boot header)
const MAKER_ID: (usize, usize) = (0x10, 16);
const PRODUCT_NUMBER: (usize, usize) = (0x20, 10);
const VERSION: (usize, usize) = (0x2A, 6);
const RELEASE_DATE: (usize, usize) = (0x30, 8);
const DEVICE_INFO: (usize, usize) = (0x38, 8);
const AREA_SYMBOLS: (usize, usize) = (0x40, 10);
const PERIPHERALS: (usize, usize) = (0x50, 16);
const TITLE: (usize, usize) = (0x60, 112);

const REGION_NAMES: &[&str] = &["Japan", "Taiwan", "USA", "Europe"];

/// Area symbol characters, in bit order.
const REGION_SYMBOLS: &[u8] = b"JTUE";

const PERIPHERAL_NAMES: &[&str] = &[
    "Control Pad",
    "Analog Controller",
    "Mouse",
    "Keyboard",
    "Steering Controller",
    "Multi-Tap",
    "Light Gun",
    "RAM Cartridge",
    "3D Controller",
    "Link Cable (JPN)",
    "Link Cable (USA)",
    "NetLink",
    "Pachinko",
    "Floppy Drive",
    "ROM Cartridge",
    "MPEG Card",
];

/// Peripheral characters, in bit order.
const PERIPHERAL_SYMBOLS: &[u8] = b"JAMKSTGWECDXQFRP";

pub const EXTENSIONS: &[&str] = &[".iso", ".bin"];

/// Saturn images carry no artwork and have no external art source.
pub const IMAGE_TYPES: ImageTypes = ImageTypes::NONE;

static SATURN_FIELDS: &[FieldDesc] = &[
    FieldDesc::string("Title"),
    FieldDesc::string("Publisher"),
    FieldDesc::string("Product #"),
    FieldDesc::string("Version"),
    FieldDesc::date_time("Release Date", DateTimeFlags::DATE_ONLY_UTC),
    FieldDesc::string("Disc #"),
    FieldDesc::bitfield("Region Code", REGION_NAMES, 4),
    FieldDesc::bitfield("Peripherals", PERIPHERAL_NAMES, 3),
    FieldDesc::string("Sector Format"),
];

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Detect a Saturn disc image and its sector framing.
///
/// A hardware ID at 0x10 only counts if the first sector is a valid raw
/// sector; a cooked image that happens to carry the ID there is rejected.
pub fn detect(info: &DetectInfo) -> Option<FormatId> {
    let h = info.header;
    if h.len() >= HEADER_SIZE && h.starts_with(HARDWARE_ID) {
        return Some(FormatId::Saturn(DiscFraming::Sector2048));
    }
    if h.len() >= RAW_PROBE_SIZE && h[0x10..0x20] == HARDWARE_ID[..] && cdrom::is_raw_sector(h) {
        return Some(FormatId::Saturn(DiscFraming::Sector2352));
    }
    None
}

// ---------------------------------------------------------------------------
// Field derivation
// ---------------------------------------------------------------------------

fn field(header: &[u8], (offset, len): (usize, usize)) -> &[u8] {
    &header[offset..offset + len]
}

/// Parse a `YYYYMMDD` release date into Unix seconds at midnight UTC.
///
/// Every byte must be an ASCII digit and the date must exist in the
/// proleptic Gregorian calendar.
pub fn parse_release_date(bytes: &[u8]) -> Result<i64, RomError> {
    if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(RomError::malformed(format!(
            "release date {:?} is not 8 digits",
            String::from_utf8_lossy(bytes)
        )));
    }
    let number = |range: std::ops::Range<usize>| {
        bytes[range]
            .iter()
            .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'))
    };
    let (year, month, day) = (number(0..4), number(4..6), number(6..8));
    NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| {
            RomError::malformed(format!(
                "release date {:04}-{:02}-{:02} does not exist",
                year, month, day
            ))
        })
}

/// Parse the T-code out of a third-party maker ID.
///
/// The digits must start immediately after the prefix and run to a space,
/// a NUL, or the end of the field.
pub fn parse_t_code(maker: &[u8]) -> Result<u32, RomError> {
    let rest = maker
        .strip_prefix(THIRD_PARTY_PREFIX)
        .ok_or_else(|| RomError::malformed("maker ID is not a third-party T-code"))?;
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return Err(RomError::malformed("T-code has no digits"));
    }
    if let Some(&next) = rest.get(digits)
        && next != b' '
        && next != 0
    {
        return Err(RomError::malformed(format!(
            "T-code followed by unexpected byte 0x{:02X}",
            next
        )));
    }
    rest[..digits].iter().try_fold(0u32, |acc, &b| {
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| RomError::malformed("T-code is out of range"))
    })
}

/// Resolve a maker ID to a publisher name, or the trimmed raw ID.
pub fn publisher_name(maker: &[u8]) -> String {
    if maker == FIRST_PARTY_MAKER {
        return "Sega".to_string();
    }
    match parse_t_code(maker) {
        Ok(code) => {
            if let Some(name) = third_party_name(code) {
                return name.to_string();
            }
            trace!("no publisher entry for T-{}", code);
        }
        Err(e) => trace!("maker ID not resolved: {}", e),
    }
    read_ascii_fixed(maker)
}

/// Map each recognized symbol to its bit. Unrecognized bytes are ignored.
fn symbol_bits(bytes: &[u8], symbols: &[u8]) -> u32 {
    bytes
        .iter()
        .filter_map(|b| symbols.iter().position(|s| s == b))
        .fold(0, |bits, i| bits | (1u32 << i))
}

/// Render device info `CD-N/M` as `N of M`.
pub fn disc_number(device_info: &[u8]) -> String {
    let info = read_ascii_fixed(device_info);
    info.strip_prefix("CD-")
        .and_then(|s| s.split_once('/'))
        .and_then(|(n, m)| Some((n.parse::<u32>().ok()?, m.parse::<u32>().ok()?)))
        .map(|(n, m)| format!("{} of {}", n, m))
        .unwrap_or_else(|| "Unknown".to_string())
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parser for Saturn disc images.
pub struct SaturnParser {
    state: FormatState,
    /// Boot header, extracted from sector 0 at construction.
    header: Vec<u8>,
}

impl SaturnParser {
    pub fn new(source: &dyn RomHandle) -> Self {
        let mut state = FormatState::bind(source, SATURN_FIELDS);
        let mut header = Vec::new();
        match state.read_header(RAW_PROBE_SIZE) {
            Ok((buf, size)) => {
                let format = detect(&DetectInfo::new(&buf, Some(size)));
                match format {
                    Some(FormatId::Saturn(framing)) => {
                        let start = framing.user_data_offset() as usize;
                        header = buf[start..start + HEADER_SIZE].to_vec();
                    }
                    _ => debug!("Saturn detector rejected {}-byte file", size),
                }
                state.set_format(format);
            }
            Err(RomError::BadHandle(_)) => {}
            Err(e) => debug!("failed to read Saturn header: {}", e),
        }
        Self { state, header }
    }

    /// Sector framing, if the image was recognized.
    pub fn framing(&self) -> Option<DiscFraming> {
        match self.state.format()? {
            FormatId::Saturn(framing) => Some(framing),
            _ => None,
        }
    }
}

impl RomFormat for SaturnParser {
    fn system(&self) -> System {
        System::Saturn
    }

    fn format_id(&self) -> Option<FormatId> {
        self.state.format()
    }

    fn detect_rom(&self, info: &DetectInfo) -> Option<FormatId> {
        detect(info)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        EXTENSIONS
    }

    fn supported_image_types(&self) -> ImageTypes {
        IMAGE_TYPES
    }

    fn load_fields(&mut self) -> Result<usize, RomError> {
        if self.state.fields().is_populated() {
            return Ok(self.state.fields().len());
        }
        self.state.check()?;
        let framing = self
            .framing()
            .ok_or_else(|| RomError::invalid_format("not a Saturn image"))?;
        let h = &self.header;
        trace!("loading Saturn fields ({})", framing.name());

        let title = cp1252_sjis_to_utf8(field(h, TITLE)).trim_end().to_string();
        let publisher = publisher_name(field(h, MAKER_ID));
        let product = read_ascii_fixed(field(h, PRODUCT_NUMBER));
        let version = read_ascii_fixed(field(h, VERSION));
        let release = parse_release_date(field(h, RELEASE_DATE));
        let disc = disc_number(field(h, DEVICE_INFO));
        let regions = symbol_bits(field(h, AREA_SYMBOLS), REGION_SYMBOLS);
        let peripherals = symbol_bits(field(h, PERIPHERALS), PERIPHERAL_SYMBOLS);

        let fields = self.state.fields_mut();
        fields.add_string(title)?;
        fields.add_string(publisher)?;
        fields.add_string(product)?;
        fields.add_string(version)?;
        match release {
            Ok(timestamp) => fields.add_datetime(timestamp)?,
            Err(e) => {
                debug!("{}", e);
                fields.add_invalid()?
            }
        };
        fields.add_string(disc)?;
        fields.add_bitfield(regions)?;
        fields.add_bitfield(peripherals)?;
        fields.add_string(framing.name())?;

        Ok(fields.len())
    }

    fn fields(&self) -> &Fields {
        self.state.fields()
    }

    fn load_external_urls(&mut self, image_type: ImageType) -> Result<&[ExtUrl], RomError> {
        self.state
            .check_image_type(self.supported_image_types(), image_type)?;
        Ok(self.state.urls_or_insert_with(image_type, Vec::new))
    }
}

#[cfg(test)]
#[path = "tests/saturn_tests.rs"]
mod tests;
