//! Per-jurisdiction age rating codes.

use serde::Serialize;

/// Number of rating slots carried by [`AgeRatings`].
pub const AGE_MAX: usize = 16;

/// Rating organizations, indexed by their slot in [`AgeRatings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jurisdiction {
    /// CERO
    Japan = 0,
    /// ESRB
    Usa = 1,
    /// USK
    Germany = 3,
    /// PEGI
    Europe = 4,
    /// MEKU
    Finland = 5,
    /// PEGI-PT
    Portugal = 6,
    /// BBFC
    England = 7,
    /// ACB
    Australia = 8,
    /// GRB
    SouthKorea = 9,
    /// CGSRR
    Taiwan = 10,
}

const ALL_JURISDICTIONS: &[Jurisdiction] = &[
    Jurisdiction::Japan,
    Jurisdiction::Usa,
    Jurisdiction::Germany,
    Jurisdiction::Europe,
    Jurisdiction::Finland,
    Jurisdiction::Portugal,
    Jurisdiction::England,
    Jurisdiction::Australia,
    Jurisdiction::SouthKorea,
    Jurisdiction::Taiwan,
];

impl Jurisdiction {
    /// Abbreviation of the rating organization.
    pub fn organization(&self) -> &'static str {
        match self {
            Self::Japan => "CERO",
            Self::Usa => "ESRB",
            Self::Germany => "USK",
            Self::Europe => "PEGI",
            Self::Finland => "MEKU",
            Self::Portugal => "PEGI-PT",
            Self::England => "BBFC",
            Self::Australia => "ACB",
            Self::SouthKorea => "GRB",
            Self::Taiwan => "CGSRR",
        }
    }

    pub fn all() -> &'static [Jurisdiction] {
        ALL_JURISDICTIONS
    }
}

/// Fixed-size array of rating codes, one `u16` per jurisdiction slot.
///
/// Bit layout of each code: bits 0-4 minimum age, then the flag bits
/// defined as associated constants. A slot without [`AgeRatings::ACTIVE`]
/// is not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AgeRatings([u16; AGE_MAX]);

impl AgeRatings {
    pub const AGE_MASK: u16 = 0x001F;
    pub const PENDING: u16 = 0x0020;
    pub const NO_RESTRICTION: u16 = 0x0040;
    pub const ONLINE_PLAY: u16 = 0x0080;
    pub const PROHIBITED: u16 = 0x0100;
    pub const ACTIVE: u16 = 0x8000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, jurisdiction: Jurisdiction) -> u16 {
        self.0[jurisdiction as usize]
    }

    pub fn set(&mut self, jurisdiction: Jurisdiction, code: u16) {
        self.0[jurisdiction as usize] = code;
    }

    /// Builder form of [`set`](Self::set) that also marks the slot active.
    pub fn with(mut self, jurisdiction: Jurisdiction, code: u16) -> Self {
        self.set(jurisdiction, code | Self::ACTIVE);
        self
    }

    pub fn as_array(&self) -> &[u16; AGE_MAX] {
        &self.0
    }

    /// Render active ratings as `ORG=rating`, comma-separated.
    ///
    /// Returns "None" when no slot is active.
    pub fn format(&self) -> String {
        let parts: Vec<String> = Jurisdiction::all()
            .iter()
            .filter_map(|&j| {
                let code = self.get(j);
                if code & Self::ACTIVE == 0 {
                    return None;
                }
                let mut s = format!("{}={}", j.organization(), rating_text(j, code));
                if code & Self::ONLINE_PLAY != 0 {
                    s.push('\u{00B0}');
                }
                Some(s)
            })
            .collect();

        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn rating_text(jurisdiction: Jurisdiction, code: u16) -> String {
    if code & AgeRatings::PROHIBITED != 0 {
        return "No".to_string();
    }
    if code & AgeRatings::PENDING != 0 {
        return "RP".to_string();
    }
    if code & AgeRatings::NO_RESTRICTION != 0 {
        return "All".to_string();
    }

    let age = code & AgeRatings::AGE_MASK;
    if jurisdiction == Jurisdiction::Usa {
        let esrb = match age {
            3 => Some("eC"),
            6 => Some("E"),
            10 => Some("E10+"),
            13 => Some("T"),
            17 => Some("M"),
            18 => Some("AO"),
            _ => None,
        };
        if let Some(name) = esrb {
            return name.to_string();
        }
    }
    age.to_string()
}
