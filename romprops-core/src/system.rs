/// Format family identifiers for all supported systems.
///
/// One variant per family. Short names, display names, manufacturer, and
/// aliases live here so registration and CLI lookups never string-match
/// ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum System {
    /// Nintendo amiibo NFC figurine dump (NTAG215)
    Amiibo,
    /// Sega Saturn optical disc image
    Saturn,
}

/// All system variants in registration order.
const ALL_SYSTEMS: &[System] = &[System::Amiibo, System::Saturn];

impl System {
    /// Canonical short name used for CLI arguments and identifiers.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Amiibo => "amiibo",
            Self::Saturn => "saturn",
        }
    }

    /// Full display name for the system.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Amiibo => "Nintendo amiibo",
            Self::Saturn => "Sega Saturn",
        }
    }

    pub fn manufacturer(&self) -> &'static str {
        match self {
            Self::Amiibo => "Nintendo",
            Self::Saturn => "Sega",
        }
    }

    /// All accepted names for this system (case-insensitive matching).
    ///
    /// The canonical short name is always first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Amiibo => &["amiibo", "nfc", "ntag215"],
            Self::Saturn => &["saturn", "sega saturn", "ss"],
        }
    }

    pub fn all() -> &'static [System] {
        ALL_SYSTEMS
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string cannot be parsed into a `System`.
#[derive(Debug, Clone)]
pub struct SystemParseError(pub String);

impl std::fmt::Display for SystemParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown system: '{}'", self.0)
    }
}

impl std::error::Error for SystemParseError {}

impl std::str::FromStr for System {
    type Err = SystemParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ALL_SYSTEMS
            .iter()
            .copied()
            .find(|system| system.aliases().contains(&lower.as_str()))
            .ok_or_else(|| SystemParseError(s.to_string()))
    }
}
