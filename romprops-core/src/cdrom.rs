//! CD-ROM sector framing and raw sector validation.
//!
//! Disc images come in two framings: "cooked" images holding only the
//! 2048 bytes of user data per sector, and raw dumps holding the full
//! 2352-byte sector (sync + header + user data + EDC/ECC).

/// CD sync pattern at the start of every raw (2352-byte) sector.
pub const CD_SYNC_PATTERN: [u8; 12] = [
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
];

/// User data size of a cooked sector.
pub const COOKED_SECTOR_SIZE: u64 = 2048;

/// Full size of a raw sector.
pub const RAW_SECTOR_SIZE: u64 = 2352;

/// Offset of the mode byte within a raw sector header (after sync + MSF).
const MODE_BYTE_OFFSET: usize = 15;

/// Offset to user data within a Mode 1 raw sector: 12 (sync) + 4 (header).
const MODE1_DATA_OFFSET: u64 = 16;

/// Sector framing of a disc image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscFraming {
    /// 2048 bytes per sector (ISO)
    Sector2048,
    /// 2352 bytes per sector (raw BIN)
    Sector2352,
}

impl DiscFraming {
    /// Size of one sector in the image file.
    pub fn sector_size(&self) -> u64 {
        match self {
            Self::Sector2048 => COOKED_SECTOR_SIZE,
            Self::Sector2352 => RAW_SECTOR_SIZE,
        }
    }

    /// Offset of the user data within one sector of the image file.
    pub fn user_data_offset(&self) -> u64 {
        match self {
            Self::Sector2048 => 0,
            Self::Sector2352 => MODE1_DATA_OFFSET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sector2048 => "2048-byte",
            Self::Sector2352 => "2352-byte",
        }
    }
}

/// Check whether `sector` starts with a valid raw sector header.
///
/// Requires the 12-byte sync pattern and a mode byte of 1 or 2. Buffers
/// shorter than the 16-byte header are rejected.
pub fn is_raw_sector(sector: &[u8]) -> bool {
    if sector.len() <= MODE_BYTE_OFFSET {
        return false;
    }
    sector[..CD_SYNC_PATTERN.len()] == CD_SYNC_PATTERN
        && matches!(sector[MODE_BYTE_OFFSET], 1 | 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header(mode: u8) -> Vec<u8> {
        let mut buf = vec![0u8; 32];
        buf[..12].copy_from_slice(&CD_SYNC_PATTERN);
        // MSF 00:02:00
        buf[12] = 0x00;
        buf[13] = 0x02;
        buf[14] = 0x00;
        buf[15] = mode;
        buf
    }

    #[test]
    fn accepts_mode1_and_mode2() {
        assert!(is_raw_sector(&raw_header(1)));
        assert!(is_raw_sector(&raw_header(2)));
    }

    #[test]
    fn rejects_bad_mode() {
        assert!(!is_raw_sector(&raw_header(0)));
        assert!(!is_raw_sector(&raw_header(3)));
    }

    #[test]
    fn rejects_broken_sync() {
        let mut buf = raw_header(1);
        buf[5] = 0x00;
        assert!(!is_raw_sector(&buf));
    }

    #[test]
    fn rejects_truncated_header() {
        let buf = raw_header(1);
        assert!(!is_raw_sector(&buf[..15]));
        assert!(!is_raw_sector(&[]));
    }

    #[test]
    fn framing_offsets() {
        assert_eq!(DiscFraming::Sector2048.user_data_offset(), 0);
        assert_eq!(DiscFraming::Sector2352.user_data_offset(), 16);
        assert_eq!(DiscFraming::Sector2352.sector_size(), 2352);
    }
}
