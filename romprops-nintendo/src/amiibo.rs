//! Nintendo amiibo figurine dumps.
//!
//! An amiibo is an NTAG215 NFC tag. A full dump is exactly 540 bytes
//! (135 pages of 4 bytes). The identifying data lives in pages 21-22:
//! a big-endian character ID followed by a big-endian amiibo ID whose
//! low byte is always 0x02.
//!
//! Detection is a strict allow-list: the UID check bytes must validate
//! and every fixed NTAG215 configuration run must match exactly.

use log::{debug, trace};

use romprops_core::util::{hex_spaced, read_u32_be};
use romprops_core::{
    DetectInfo, ExtUrl, FieldDesc, Fields, FormatId, FormatState, ImageType, ImageTypes, RomError,
    RomFormat, RomHandle, System,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total size of an NTAG215 dump.
pub const AMIIBO_FILE_SIZE: u64 = 540;

/// UID with interleaved check bytes: UID0-2, BCC0, UID3-6, BCC1.
const SERIAL_LEN: usize = 9;
const BCC0_OFFSET: usize = 3;
const BCC1_OFFSET: usize = 8;

/// Cascade tag folded into BCC0.
const CASCADE_TAG: u8 = 0x88;

const LOCK_HEADER_OFFSET: usize = 0x0A;
const LOCK_HEADER: [u8; 2] = [0x0F, 0xE0];

const CAPABILITY_OFFSET: usize = 0x0C;
const CAPABILITY_CONTAINER: [u8; 4] = [0xF1, 0x10, 0xFF, 0xEE];

const CHAR_ID_OFFSET: usize = 0x54;
const AMIIBO_ID_OFFSET: usize = 0x58;

/// Low byte of every amiibo ID.
const AMIIBO_ID_TAG: u8 = 0x02;

const DYNAMIC_LOCK_OFFSET: usize = 0x208;
const DYNAMIC_LOCK: [u8; 3] = [0x01, 0x00, 0x0F];

const CFG0_OFFSET: usize = 0x20C;
const CFG0: [u8; 4] = [0x00, 0x00, 0x00, 0x04];

const CFG1_OFFSET: usize = 0x210;
const CFG1: [u8; 4] = [0x5F, 0x00, 0x00, 0x00];

const ART_HOST: &str = "amiibo.life";

const CREDITS: &str = "amiibo images provided by amiibo.life,\nthe Unofficial amiibo Database.";

pub const EXTENSIONS: &[&str] = &[".bin", ".nfc", ".nfp"];

/// Image types the amiibo family can supply.
pub const IMAGE_TYPES: ImageTypes = ImageTypes::NONE.with(ImageType::ExtMedia);

static AMIIBO_FIELDS: &[FieldDesc] = &[
    FieldDesc::monospace("NTAG215 Serial"),
    FieldDesc::monospace("amiibo ID"),
    FieldDesc::string("amiibo Type"),
    FieldDesc::string("Character Series"),
    FieldDesc::string("Character Variant"),
    FieldDesc::string("amiibo Series"),
    FieldDesc::string("amiibo Number"),
    FieldDesc::credits("Credits"),
];

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Expected BCC0 and BCC1 for a serial page.
fn check_bytes(serial: &[u8]) -> (u8, u8) {
    let bcc0 = CASCADE_TAG ^ serial[0] ^ serial[1] ^ serial[2];
    let bcc1 = serial[4] ^ serial[5] ^ serial[6] ^ serial[7];
    (bcc0, bcc1)
}

fn run_matches(header: &[u8], offset: usize, expected: &[u8]) -> bool {
    header.get(offset..offset + expected.len()) == Some(expected)
}

/// Detect an NTAG215 amiibo dump.
///
/// A known file size must be exactly 540 bytes; an unknown size is
/// accepted as long as the header holds the whole dump.
pub fn detect(info: &DetectInfo) -> Option<FormatId> {
    if info.file_size.is_some_and(|size| size != AMIIBO_FILE_SIZE)
        || (info.header.len() as u64) < AMIIBO_FILE_SIZE
    {
        return None;
    }
    let h = info.header;

    let (bcc0, bcc1) = check_bytes(&h[..SERIAL_LEN]);
    if h[BCC0_OFFSET] != bcc0 || h[BCC1_OFFSET] != bcc1 {
        return None;
    }

    let runs: [(usize, &[u8]); 5] = [
        (LOCK_HEADER_OFFSET, &LOCK_HEADER),
        (CAPABILITY_OFFSET, &CAPABILITY_CONTAINER),
        (DYNAMIC_LOCK_OFFSET, &DYNAMIC_LOCK),
        (CFG0_OFFSET, &CFG0),
        (CFG1_OFFSET, &CFG1),
    ];
    if !runs
        .iter()
        .all(|(offset, expected)| run_matches(h, *offset, expected))
    {
        return None;
    }

    let amiibo_id = read_u32_be(h, AMIIBO_ID_OFFSET)?;
    if amiibo_id as u8 != AMIIBO_ID_TAG {
        return None;
    }

    Some(FormatId::Amiibo)
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Figure type, from the low byte of the character ID.
fn amiibo_type_name(code: u8) -> Option<&'static str> {
    match code {
        0x00 => Some("Figure"),
        0x01 => Some("Card"),
        0x02 => Some("Yarn"),
        0x03 => Some("Band"),
        _ => None,
    }
}

/// amiibo series, from bits 8-15 of the amiibo ID.
fn amiibo_series_name(code: u8) -> Option<&'static str> {
    match code {
        0x00 => Some("Super Smash Bros."),
        0x01 => Some("Super Mario Bros."),
        0x02 => Some("Chibi-Robo!"),
        0x03 => Some("Yoshi's Woolly World"),
        0x04 => Some("Splatoon"),
        0x05 => Some("Animal Crossing"),
        0x06 => Some("8-bit Mario"),
        0x07 => Some("Skylanders"),
        0x09 => Some("The Legend of Zelda"),
        0x0A => Some("Shovel Knight"),
        0x0C => Some("Kirby"),
        0x0D => Some("Pokemon"),
        0x0E => Some("Mario Sports Superstars"),
        0x0F => Some("Monster Hunter"),
        0x10 => Some("BoxBoy!"),
        0x11 => Some("Pikmin"),
        0x12 => Some("Fire Emblem"),
        0x13 => Some("Metroid"),
        0x14 => Some("Others"),
        0x15 => Some("Mega Man"),
        0x16 => Some("Diablo"),
        0x17 => Some("Power Up Band"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Field derivation
// ---------------------------------------------------------------------------

/// Render the 7-byte UID and the result of re-checking both check bytes.
pub fn format_serial(serial: &[u8; SERIAL_LEN]) -> String {
    let uid: Vec<u8> = serial
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != BCC0_OFFSET && *i != BCC1_OFFSET)
        .map(|(_, &b)| b)
        .collect();
    let (bcc0, bcc1) = check_bytes(serial);
    let stored0 = serial[BCC0_OFFSET];
    let stored1 = serial[BCC1_OFFSET];
    let check = if stored0 == bcc0 && stored1 == bcc1 {
        "(check OK)".to_string()
    } else {
        format!(
            "(check ERR: BCC0 {:02X}/{:02X}, BCC1 {:02X}/{:02X})",
            stored0, bcc0, stored1, bcc1
        )
    };
    format!("{} {}", hex_spaced(&uid), check)
}

fn unknown(code: u8) -> String {
    format!("Unknown (0x{:02X})", code)
}

/// Cache key and art URL for a character/amiibo ID pair.
pub fn art_url(char_id: u32, amiibo_id: u32) -> ExtUrl {
    let id = format!("{:08X}-{:08X}", char_id, amiibo_id);
    ExtUrl {
        cache_key: format!("{}.png", id),
        url: format!("http://{}/nfc/{}/image", ART_HOST, id),
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parser for NTAG215 amiibo dumps.
pub struct AmiiboParser {
    state: FormatState,
    /// Full dump, kept from construction so field loads need no I/O.
    header: Vec<u8>,
}

impl AmiiboParser {
    pub fn new(source: &dyn RomHandle) -> Self {
        let mut state = FormatState::bind(source, AMIIBO_FIELDS);
        let mut header = Vec::new();
        match state.read_header(AMIIBO_FILE_SIZE as usize) {
            Ok((buf, size)) => {
                let format = detect(&DetectInfo::new(&buf, Some(size)));
                if format.is_none() {
                    debug!("amiibo detector rejected {}-byte file", size);
                }
                state.set_format(format);
                header = buf;
            }
            Err(RomError::BadHandle(_)) => {}
            Err(e) => debug!("failed to read amiibo header: {}", e),
        }
        Self { state, header }
    }

    /// Character ID and amiibo ID. `None` unless the dump was recognized.
    pub fn ids(&self) -> Option<(u32, u32)> {
        self.state.format()?;
        Some((
            read_u32_be(&self.header, CHAR_ID_OFFSET)?,
            read_u32_be(&self.header, AMIIBO_ID_OFFSET)?,
        ))
    }
}

impl RomFormat for AmiiboParser {
    fn system(&self) -> System {
        System::Amiibo
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
        let (char_id, amiibo_id) = self
            .ids()
            .ok_or_else(|| RomError::malformed("amiibo header is truncated"))?;
        trace!("loading amiibo fields for {:08X}-{:08X}", char_id, amiibo_id);

        let type_code = char_id as u8;
        let series_code = (amiibo_id >> 8) as u8;
        let mut page = [0u8; SERIAL_LEN];
        page.copy_from_slice(&self.header[..SERIAL_LEN]);
        let serial = format_serial(&page);

        let fields = self.state.fields_mut();
        fields.add_string(serial)?;
        fields.add_string(format!("{:08X}-{:08X}", char_id, amiibo_id))?;
        fields.add_string(
            amiibo_type_name(type_code)
                .map(str::to_string)
                .unwrap_or_else(|| unknown(type_code)),
        )?;
        fields.add_string(format!("0x{:03X}", char_id >> 22))?;
        fields.add_string(((char_id >> 8) & 0xFF).to_string())?;
        fields.add_string(
            amiibo_series_name(series_code)
                .map(str::to_string)
                .unwrap_or_else(|| unknown(series_code)),
        )?;
        fields.add_string((amiibo_id >> 16).to_string())?;
        fields.add_string(CREDITS)?;

        Ok(fields.len())
    }

    fn fields(&self) -> &Fields {
        self.state.fields()
    }

    fn load_external_urls(&mut self, image_type: ImageType) -> Result<&[ExtUrl], RomError> {
        self.state
            .check_image_type(self.supported_image_types(), image_type)?;
        let (char_id, amiibo_id) = self
            .ids()
            .ok_or_else(|| RomError::malformed("amiibo header is truncated"))?;
        Ok(self.state.urls_or_insert_with(image_type, || {
            trace!("computing amiibo art URL for {:08X}-{:08X}", char_id, amiibo_id);
            vec![art_url(char_id, amiibo_id)]
        }))
    }
}

#[cfg(test)]
#[path = "tests/amiibo_tests.rs"]
mod tests;
