//! Field Set: an ordered, lazily populated collection of metadata entries.
//!
//! Each format family declares a static table of [`FieldDesc`] entries. A
//! [`Fields`] value holds one [`FieldData`] per descriptor, by position.
//! Entry storage is reference counted and copy-on-write: cloning a `Fields`
//! is O(1), and the first mutation through a shared copy deep-clones the
//! storage before writing.

use std::sync::Arc;

use chrono::DateTime;
use serde::Serialize;

use crate::{AgeRatings, RomError};

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Rendering hint for string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StringFormat {
    #[default]
    Normal,
    /// Fixed-width font (serials, IDs)
    Monospace,
    /// Attribution text, rendered apart from the other fields
    Credits,
}

/// Which parts of a timestamp are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeFlags {
    pub has_date: bool,
    pub has_time: bool,
    pub utc: bool,
}

impl DateTimeFlags {
    pub const DATE_ONLY_UTC: Self = Self {
        has_date: true,
        has_time: false,
        utc: true,
    };

    pub const DATE_TIME_UTC: Self = Self {
        has_date: true,
        has_time: true,
        utc: true,
    };
}

/// Kind of a field, with per-kind schema details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String(StringFormat),
    /// One label per bit, starting at bit 0. `per_row` is a layout hint.
    Bitfield {
        names: &'static [&'static str],
        per_row: u8,
    },
    /// A small table; every row has one column per header.
    ListData { headers: &'static [&'static str] },
    DateTime(DateTimeFlags),
    AgeRatings,
    /// Placeholder row that never carries data
    Invalid,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bitfield { .. } => "bitfield",
            Self::ListData { .. } => "list",
            Self::DateTime(_) => "date-time",
            Self::AgeRatings => "age-ratings",
            Self::Invalid => "invalid",
        }
    }
}

/// Static schema entry: field name plus kind. Shared by all instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDesc {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String(StringFormat::Normal),
        }
    }

    pub const fn monospace(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String(StringFormat::Monospace),
        }
    }

    pub const fn credits(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String(StringFormat::Credits),
        }
    }

    pub const fn bitfield(name: &'static str, names: &'static [&'static str], per_row: u8) -> Self {
        Self {
            name,
            kind: FieldKind::Bitfield { names, per_row },
        }
    }

    pub const fn list(name: &'static str, headers: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::ListData { headers },
        }
    }

    pub const fn date_time(name: &'static str, flags: DateTimeFlags) -> Self {
        Self {
            name,
            kind: FieldKind::DateTime(flags),
        }
    }

    pub const fn age_ratings(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::AgeRatings,
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Payload of one field, matching its descriptor by kind.
///
/// `Invalid` means "no data, hide this row" and is distinct from an empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldData {
    String(String),
    Bitfield(u32),
    ListData(Vec<Vec<String>>),
    /// Seconds since the Unix epoch
    DateTime(i64),
    AgeRatings(AgeRatings),
    Invalid,
}

impl FieldData {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bitfield(_) => "bitfield",
            Self::ListData(_) => "list",
            Self::DateTime(_) => "date-time",
            Self::AgeRatings(_) => "age-ratings",
            Self::Invalid => "invalid",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bitfield(&self) -> Option<u32> {
        match self {
            Self::Bitfield(bits) => Some(*bits),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            Self::DateTime(ts) => Some(*ts),
            _ => None,
        }
    }

    fn fits(&self, kind: &FieldKind) -> bool {
        matches!(
            (kind, self),
            (_, Self::Invalid)
                | (FieldKind::String(_), Self::String(_))
                | (FieldKind::Bitfield { .. }, Self::Bitfield(_))
                | (FieldKind::ListData { .. }, Self::ListData(_))
                | (FieldKind::DateTime(_), Self::DateTime(_))
                | (FieldKind::AgeRatings, Self::AgeRatings(_))
        )
    }

    /// Render this entry for display. Returns `None` for hidden entries.
    pub fn display(&self, desc: &FieldDesc) -> Option<String> {
        match (self, &desc.kind) {
            (Self::Invalid, _) => None,
            (Self::String(s), _) => Some(s.clone()),
            (Self::Bitfield(bits), FieldKind::Bitfield { names, .. }) => {
                let set: Vec<&str> = names
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i < 32 && *bits & (1u32 << *i) != 0)
                    .map(|(_, &name)| name)
                    .collect();
                if set.is_empty() {
                    Some("None".to_string())
                } else {
                    Some(set.join(", "))
                }
            }
            (Self::Bitfield(bits), _) => Some(format!("0x{:08X}", bits)),
            (Self::ListData(rows), _) => Some(
                rows.iter()
                    .map(|row| row.join(" | "))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            (Self::DateTime(ts), kind) => {
                let flags = match kind {
                    FieldKind::DateTime(flags) => *flags,
                    _ => DateTimeFlags::DATE_TIME_UTC,
                };
                let dt = DateTime::from_timestamp(*ts, 0)?;
                let fmt = match (flags.has_date, flags.has_time) {
                    (true, false) => "%Y-%m-%d",
                    (false, true) => "%H:%M:%S",
                    _ => "%Y-%m-%d %H:%M:%S",
                };
                Some(dt.format(fmt).to_string())
            }
            (Self::AgeRatings(ratings), _) => Some(ratings.format()),
        }
    }
}

// ---------------------------------------------------------------------------
// Field Set
// ---------------------------------------------------------------------------

/// Ordered entries aligned 1:1 with a static descriptor table.
///
/// Clone shares storage; mutation detaches it first.
#[derive(Debug, Clone)]
pub struct Fields {
    desc: &'static [FieldDesc],
    data: Arc<Vec<FieldData>>,
}

impl Fields {
    pub fn new(desc: &'static [FieldDesc]) -> Self {
        Self {
            desc,
            data: Arc::new(Vec::with_capacity(desc.len())),
        }
    }

    /// The descriptor table this set is aligned with.
    pub fn desc(&self) -> &'static [FieldDesc] {
        self.desc
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True once at least one entry has been added.
    pub fn is_populated(&self) -> bool {
        !self.data.is_empty()
    }

    /// Entry at `index`, or `None` past the populated range.
    pub fn get(&self, index: usize) -> Option<&FieldData> {
        self.data.get(index)
    }

    /// Iterate `(descriptor, entry)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldDesc, &FieldData)> {
        self.desc.iter().zip(self.data.iter())
    }

    /// Whether the storage is currently shared with another copy.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.data) > 1
    }

    /// Deep-copy the storage if (and only if) it is shared.
    pub fn detach(&mut self) {
        if self.is_shared() {
            self.data = Arc::new(self.data.as_ref().clone());
        }
    }

    fn push(&mut self, data: FieldData) -> Result<usize, RomError> {
        let index = self.data.len();
        let desc = self.desc.get(index).ok_or_else(|| {
            RomError::range(format!(
                "field table holds {} entries, cannot add another",
                self.desc.len()
            ))
        })?;
        if !data.fits(&desc.kind) {
            return Err(RomError::KindMismatch {
                index,
                expected: desc.kind.name(),
                actual: data.kind_name(),
            });
        }
        Arc::make_mut(&mut self.data).push(data);
        Ok(index)
    }

    pub fn add_string(&mut self, s: impl Into<String>) -> Result<usize, RomError> {
        self.push(FieldData::String(s.into()))
    }

    pub fn add_bitfield(&mut self, bits: u32) -> Result<usize, RomError> {
        self.push(FieldData::Bitfield(bits))
    }

    /// Add a table. Every row must have one column per descriptor header.
    pub fn add_list_table(&mut self, rows: Vec<Vec<String>>) -> Result<usize, RomError> {
        if let Some(FieldDesc {
            kind: FieldKind::ListData { headers },
            ..
        }) = self.desc.get(self.data.len())
            && let Some((row, cols)) = rows
                .iter()
                .enumerate()
                .find(|(_, r)| r.len() != headers.len())
        {
            return Err(RomError::malformed(format!(
                "row {} has {} columns, expected {}",
                row,
                cols.len(),
                headers.len()
            )));
        }
        self.push(FieldData::ListData(rows))
    }

    pub fn add_datetime(&mut self, timestamp: i64) -> Result<usize, RomError> {
        self.push(FieldData::DateTime(timestamp))
    }

    pub fn add_age_ratings(&mut self, ratings: AgeRatings) -> Result<usize, RomError> {
        self.push(FieldData::AgeRatings(ratings))
    }

    /// Add a hidden "no data" entry. Fits any descriptor kind.
    pub fn add_invalid(&mut self) -> Result<usize, RomError> {
        self.push(FieldData::Invalid)
    }
}

#[cfg(test)]
#[path = "tests/fields_tests.rs"]
mod tests;
