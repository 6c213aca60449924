use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use super::domain::{LedgerError, LicenseClass};

/// Full per-class state of a ledger, iterated in canonical order.
pub type LedgerSnapshot = BTreeMap<LicenseClass, u64>;

/// Candidate counts per license class for a single school.
///
/// Counts never go below zero: `adjust` clamps at the floor instead of
/// rejecting the change, and there is no upper bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>")]
pub struct Ledger {
    counts: [u64; LicenseClass::COUNT],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from a raw store payload keyed by wire code.
    ///
    /// Unknown codes fail; negative counts clamp to zero.
    pub fn from_codes<I, K>(entries: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: AsRef<str>,
    {
        let mut ledger = Self::default();
        for (code, count) in entries {
            let class = LicenseClass::from_code(code.as_ref())?;
            ledger.counts[class.index()] = clamp_to_count(count);
        }
        Ok(ledger)
    }

    pub fn from_counts<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (LicenseClass, u64)>,
    {
        let mut ledger = Self::default();
        for (class, count) in entries {
            ledger.counts[class.index()] = count;
        }
        ledger
    }

    pub fn read(&self, class: LicenseClass) -> u64 {
        self.counts[class.index()]
    }

    /// Apply `delta` and return the stored value, `max(0, current + delta)`.
    pub fn adjust(&mut self, class: LicenseClass, delta: i64) -> u64 {
        let slot = &mut self.counts[class.index()];
        *slot = if delta >= 0 {
            slot.saturating_add(delta.unsigned_abs())
        } else {
            slot.saturating_sub(delta.unsigned_abs())
        };
        *slot
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LicenseClass::ordered()
            .into_iter()
            .map(|class| (class, self.read(class)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }
}

fn clamp_to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl From<LedgerSnapshot> for Ledger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Self::from_counts(snapshot)
    }
}

impl TryFrom<BTreeMap<String, i64>> for Ledger {
    type Error = LedgerError;

    fn try_from(value: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
        Self::from_codes(value)
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            LicenseClass::ordered()
                .into_iter()
                .map(|class| (class.code(), self.read(class))),
        )
    }
}
