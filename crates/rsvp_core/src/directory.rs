use std::{cmp::Ordering, collections::HashMap};

use shared::{domain::Guest, protocol::GuestRecord};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::error::LoadError;

/// Validated, name-sorted guest list plus the household grouping derived
/// from it. Built once per load and immutable until the next full rebuild.
#[derive(Debug, Default)]
pub struct Directory {
    guests: Vec<Guest>,
    households: HashMap<String, Vec<Guest>>,
}

impl Directory {
    /// Validates raw wire records, drops the unusable ones, sorts the rest
    /// by the pt-BR collation rule and buckets them by household. An empty
    /// post-validation collection is a load failure, not an empty page.
    pub fn build(records: Vec<GuestRecord>) -> Result<Self, LoadError> {
        let mut guests: Vec<Guest> = records
            .into_iter()
            .filter_map(GuestRecord::into_guest)
            .collect();
        if guests.is_empty() {
            return Err(LoadError::Empty);
        }

        guests.sort_by(|a, b| compare_names(&a.name, &b.name));

        // Buckets inherit the sorted order, so household iteration is
        // already name-sorted.
        let mut households: HashMap<String, Vec<Guest>> = HashMap::new();
        for guest in &guests {
            households
                .entry(guest.household.clone())
                .or_default()
                .push(guest.clone());
        }

        Ok(Self { guests, households })
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Resolves a raw widget value against guest ids by string equality.
    pub fn resolve_raw(&self, raw: &str) -> Option<&Guest> {
        self.guests.iter().find(|guest| guest.id.matches_raw(raw))
    }

    /// Household members for a guest, name-sorted. A guest somehow missing
    /// from its own bucket falls back to a singleton household.
    pub fn household_of(&self, guest: &Guest) -> Vec<Guest> {
        let mut members = self
            .households
            .get(&guest.household)
            .cloned()
            .unwrap_or_else(|| vec![guest.clone()]);
        members.sort_by(|a, b| compare_names(&a.name, &b.name));
        members
    }
}

/// Locale-aware name comparison in the pt-BR style: base letters only, so
/// neither case nor diacritics affect order. Ties fall back to the raw
/// strings to keep the sort deterministic.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
