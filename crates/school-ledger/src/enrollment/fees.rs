use serde::{Serialize, Serializer};

use super::domain::{LedgerError, LicenseClass};

/// Immutable fee table, one amount in whole lira per license class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSchedule {
    fees: [u64; LicenseClass::COUNT],
}

impl FeeSchedule {
    /// The fee table shipped with the dashboard.
    pub const fn standard() -> Self {
        Self {
            fees: [15_000, 9_000, 10_000, 20_000, 22_000, 6_000, 7_000, 5_000],
        }
    }

    /// A table with every fee at zero, used as the base for custom tables.
    pub const fn zero() -> Self {
        Self {
            fees: [0; LicenseClass::COUNT],
        }
    }

    pub fn with_fee(mut self, class: LicenseClass, amount: u64) -> Self {
        self.fees[class.index()] = amount;
        self
    }

    /// Build a table from `(code, amount)` pairs on top of a zero table.
    pub fn from_codes<I, K>(entries: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        entries
            .into_iter()
            .try_fold(Self::zero(), |schedule, (code, amount)| {
                let class = LicenseClass::from_code(code.as_ref())?;
                Ok(schedule.with_fee(class, amount))
            })
    }

    pub fn fee_of(&self, class: LicenseClass) -> u64 {
        self.fees[class.index()]
    }

    pub fn fee_of_code(&self, code: &str) -> Result<u64, LedgerError> {
        LicenseClass::from_code(code).map(|class| self.fee_of(class))
    }

    pub fn entries(&self) -> Vec<FeeEntry> {
        LicenseClass::ordered()
            .into_iter()
            .map(|class| FeeEntry {
                category: class,
                label: class.label(),
                fee: self.fee_of(class),
                fee_display: format_amount(self.fee_of(class)),
            })
            .collect()
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl Serialize for FeeSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            LicenseClass::ordered()
                .into_iter()
                .map(|class| (class.code(), self.fee_of(class))),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeEntry {
    pub category: LicenseClass,
    pub label: &'static str,
    pub fee: u64,
    pub fee_display: String,
}

/// Render an amount with `tr-TR` digit grouping, e.g. `22.000 TL`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped.push_str(" TL");
    grouped
}
