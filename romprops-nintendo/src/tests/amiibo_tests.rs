use super::*;
use romprops_core::{FieldData, MemHandle};

const SERIAL_UID: [u8; 7] = [0x04, 0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0xF6];

/// Build a 540-byte dump that passes every detector check.
fn make_amiibo(char_id: u32, amiibo_id: u32) -> Vec<u8> {
    let mut d = vec![0u8; AMIIBO_FILE_SIZE as usize];
    d[0..3].copy_from_slice(&SERIAL_UID[0..3]);
    d[4..8].copy_from_slice(&SERIAL_UID[3..7]);
    let (bcc0, bcc1) = check_bytes(&d[..SERIAL_LEN]);
    d[BCC0_OFFSET] = bcc0;
    d[BCC1_OFFSET] = bcc1;
    d[LOCK_HEADER_OFFSET..LOCK_HEADER_OFFSET + 2].copy_from_slice(&LOCK_HEADER);
    d[CAPABILITY_OFFSET..CAPABILITY_OFFSET + 4].copy_from_slice(&CAPABILITY_CONTAINER);
    d[CHAR_ID_OFFSET..CHAR_ID_OFFSET + 4].copy_from_slice(&char_id.to_be_bytes());
    d[AMIIBO_ID_OFFSET..AMIIBO_ID_OFFSET + 4].copy_from_slice(&amiibo_id.to_be_bytes());
    d[DYNAMIC_LOCK_OFFSET..DYNAMIC_LOCK_OFFSET + 3].copy_from_slice(&DYNAMIC_LOCK);
    d[CFG0_OFFSET..CFG0_OFFSET + 4].copy_from_slice(&CFG0);
    d[CFG1_OFFSET..CFG1_OFFSET + 4].copy_from_slice(&CFG1);
    d
}

/// Mario (Super Smash Bros. series), figure #2.
const MARIO_CHAR_ID: u32 = 0x0000_0000;
const MARIO_AMIIBO_ID: u32 = 0x0002_0002;

fn detect_bytes(data: &[u8]) -> Option<FormatId> {
    detect(&DetectInfo::new(data, Some(data.len() as u64)))
}

#[test]
fn test_detect_valid_dump() {
    let data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    assert_eq!(detect_bytes(&data), Some(FormatId::Amiibo));
}

#[test]
fn test_detect_rejects_capability_container_change() {
    let mut data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    data[CAPABILITY_OFFSET] = 0xF0;
    assert_eq!(detect_bytes(&data), None);
}

#[test]
fn test_detect_rejects_every_required_byte_flip() {
    let data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    let mut required: Vec<usize> = vec![BCC0_OFFSET, BCC1_OFFSET, AMIIBO_ID_OFFSET + 3];
    required.extend(LOCK_HEADER_OFFSET..LOCK_HEADER_OFFSET + 2);
    required.extend(CAPABILITY_OFFSET..CAPABILITY_OFFSET + 4);
    required.extend(DYNAMIC_LOCK_OFFSET..DYNAMIC_LOCK_OFFSET + 3);
    required.extend(CFG0_OFFSET..CFG0_OFFSET + 4);
    required.extend(CFG1_OFFSET..CFG1_OFFSET + 4);

    for offset in required {
        let mut flipped = data.clone();
        flipped[offset] ^= 0x01;
        assert_eq!(detect_bytes(&flipped), None, "flip at 0x{:03X}", offset);
    }
}

#[test]
fn test_detect_rejects_serial_change_without_check_update() {
    let mut data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    data[0] ^= 0xFF;
    assert_eq!(detect_bytes(&data), None);
}

#[test]
fn test_detect_rejects_wrong_size() {
    let data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    assert_eq!(detect(&DetectInfo::new(&data, Some(572))), None);
    assert_eq!(detect(&DetectInfo::new(&data, Some(532))), None);
}

#[test]
fn test_detect_unknown_size_with_full_header() {
    let data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    assert_eq!(detect(&DetectInfo::new(&data, None)), Some(FormatId::Amiibo));
    assert_eq!(detect(&DetectInfo::new(&data[..539], None)), None);
}

#[test]
fn test_detect_truncated_header() {
    let data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    for len in [0, 1, 8, 9, 0x5B, 0x213, 539] {
        assert_eq!(detect(&DetectInfo::new(&data[..len], Some(540))), None);
    }
}

#[test]
fn test_format_serial_ok() {
    let data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    let mut page = [0u8; SERIAL_LEN];
    page.copy_from_slice(&data[..SERIAL_LEN]);
    assert_eq!(format_serial(&page), "04 A1 B2 C3 D4 E5 F6 (check OK)");
}

#[test]
fn test_format_serial_reports_mismatch() {
    // BCC0 = 0x88 ^ 0x04 ^ 0xA1 ^ 0xB2 = 0x9F, BCC1 = 0xC3 ^ 0xD4 ^ 0xE5 ^ 0xF6 = 0x04
    let page = [0x04, 0xA1, 0xB2, 0x00, 0xC3, 0xD4, 0xE5, 0xF6, 0x04];
    assert_eq!(
        format_serial(&page),
        "04 A1 B2 C3 D4 E5 F6 (check ERR: BCC0 00/9F, BCC1 04/04)"
    );
}

#[test]
fn test_art_url_shape() {
    let url = art_url(0x0000_0001, 0x0000_0002);
    assert_eq!(url.cache_key, "00000001-00000002.png");
    assert_eq!(url.url, "http://amiibo.life/nfc/00000001-00000002/image");
}

#[test]
fn test_load_fields() {
    // Link (Zelda series figure): char 0x01000000, amiibo 0x00040902
    let handle = MemHandle::new(make_amiibo(0x0100_0000, 0x0004_0902));
    let mut parser = AmiiboParser::new(&handle);
    assert!(parser.is_valid());
    assert_eq!(parser.load_fields().unwrap(), AMIIBO_FIELDS.len());

    let values: Vec<&str> = parser
        .fields()
        .iter()
        .map(|(_, v)| v.as_str().unwrap())
        .collect();
    assert_eq!(values[0], "04 A1 B2 C3 D4 E5 F6 (check OK)");
    assert_eq!(values[1], "01000000-00040902");
    assert_eq!(values[2], "Figure");
    assert_eq!(values[3], "0x004");
    assert_eq!(values[4], "0");
    assert_eq!(values[5], "The Legend of Zelda");
    assert_eq!(values[6], "4");
    assert_eq!(values[7], CREDITS);
}

#[test]
fn test_unknown_type_and_series() {
    let handle = MemHandle::new(make_amiibo(0x0000_0007, 0x0001_FE02));
    let mut parser = AmiiboParser::new(&handle);
    parser.load_fields().unwrap();
    assert_eq!(
        parser.fields().get(2),
        Some(&FieldData::String("Unknown (0x07)".to_string()))
    );
    assert_eq!(
        parser.fields().get(5),
        Some(&FieldData::String("Unknown (0xFE)".to_string()))
    );
}

#[test]
fn test_load_fields_is_idempotent() {
    let handle = MemHandle::new(make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID));
    let mut parser = AmiiboParser::new(&handle);

    let first = parser.load_fields().unwrap();
    let reads = handle.read_count();
    let second = parser.load_fields().unwrap();

    assert_eq!(first, second);
    assert_eq!(handle.read_count(), reads);
}

#[test]
fn test_external_urls_cached() {
    let handle = MemHandle::new(make_amiibo(0x0000_0001, 0x0000_0002));
    let mut parser = AmiiboParser::new(&handle);

    let first = parser.load_external_urls(ImageType::ExtMedia).unwrap().to_vec();
    let second = parser.load_external_urls(ImageType::ExtMedia).unwrap().to_vec();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].cache_key, "00000001-00000002.png");
}

#[test]
fn test_unsupported_image_type_is_range_error() {
    let handle = MemHandle::new(make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID));
    let mut parser = AmiiboParser::new(&handle);
    assert!(matches!(
        parser.load_external_urls(ImageType::ExtBox),
        Err(RomError::Range(_))
    ));
}

#[test]
fn test_non_duplicable_handle() {
    let handle = MemHandle::non_duplicable(make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID));
    let mut parser = AmiiboParser::new(&handle);
    assert!(!parser.is_valid());
    assert!(matches!(parser.load_fields(), Err(RomError::BadHandle(_))));
    assert!(matches!(
        parser.load_external_urls(ImageType::ExtMedia),
        Err(RomError::BadHandle(_))
    ));
    // Static information survives
    assert_eq!(parser.supported_extensions(), &[".bin", ".nfc", ".nfp"]);
}

#[test]
fn test_rejected_file_is_invalid_format() {
    let mut data = make_amiibo(MARIO_CHAR_ID, MARIO_AMIIBO_ID);
    data[CFG1_OFFSET] = 0x00;
    let handle = MemHandle::new(data);
    let mut parser = AmiiboParser::new(&handle);
    assert!(!parser.is_valid());
    assert!(matches!(parser.load_fields(), Err(RomError::InvalidFormat(_))));
    assert!(parser.fields().is_empty());
}
