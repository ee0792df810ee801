use std::fmt;

use serde::{Deserialize, Serialize};

/// Household key assigned to guests the directory left ungrouped.
///
/// Not guaranteed unique: two genuinely distinct ungrouped guests end up in
/// the same bucket. The remote directory owns this convention.
pub const UNGROUPED_HOUSEHOLD: &str = "Sem grupo";

/// Guest identifier exactly as the directory returned it.
///
/// The remote service mixes numeric and string ids, and the type class must
/// survive a confirmation round trip untouched, so both shapes are kept
/// rather than forcing a canonical representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuestKey {
    Number(i64),
    Text(String),
}

impl GuestKey {
    /// Coerces a raw widget value back into a key: a value that renders
    /// identically through `i64` becomes numeric, anything else stays a
    /// string. "007" keeps its leading zeros.
    pub fn from_raw(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => GuestKey::Number(n),
            _ => GuestKey::Text(raw.to_string()),
        }
    }

    /// String-equality match against a raw widget value, tolerant of the
    /// numeric/string mismatch stringly-typed widgets introduce.
    pub fn matches_raw(&self, raw: &str) -> bool {
        match self {
            GuestKey::Number(n) => n.to_string() == raw,
            GuestKey::Text(s) => s == raw,
        }
    }
}

impl fmt::Display for GuestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestKey::Number(n) => write!(f, "{n}"),
            GuestKey::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A validated directory entry. `attending` is the last confirmation the
/// directory knows about and seeds the checkbox state.
#[derive(Debug, Clone, PartialEq)]
pub struct Guest {
    pub id: GuestKey,
    pub name: String,
    pub household: String,
    pub attending: bool,
}
