use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ledger::Ledger;

/// License classes a candidate can be enrolled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LicenseClass {
    #[serde(rename = "B")]
    B,
    #[serde(rename = "A1")]
    A1,
    #[serde(rename = "A2")]
    A2,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "FARK_A1")]
    FarkA1,
    #[serde(rename = "FARK_A2")]
    FarkA2,
    #[serde(rename = "BAKANLIK_A1")]
    BakanlikA1,
}

impl LicenseClass {
    pub const COUNT: usize = 8;

    /// Canonical display and iteration order.
    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::B,
            Self::A1,
            Self::A2,
            Self::C,
            Self::D,
            Self::FarkA1,
            Self::FarkA2,
            Self::BakanlikA1,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::C => "C",
            Self::D => "D",
            Self::FarkA1 => "FARK_A1",
            Self::FarkA2 => "FARK_A2",
            Self::BakanlikA1 => "BAKANLIK_A1",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::B => "B Sınıfı",
            Self::A1 => "A1 Sınıfı",
            Self::A2 => "A2 Sınıfı",
            Self::C => "C Sınıfı",
            Self::D => "D Sınıfı",
            Self::FarkA1 => "A1 Fark",
            Self::FarkA2 => "A2 Fark",
            Self::BakanlikA1 => "Bakanlık A1",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::B => 0,
            Self::A1 => 1,
            Self::A2 => 2,
            Self::C => 3,
            Self::D => 4,
            Self::FarkA1 => 5,
            Self::FarkA2 => 6,
            Self::BakanlikA1 => 7,
        }
    }

    /// Resolve a wire code such as `FARK_A1`.
    pub fn from_code(code: &str) -> Result<Self, LedgerError> {
        let trimmed = code.trim();
        Self::ordered()
            .into_iter()
            .find(|class| class.code() == trimmed)
            .ok_or_else(|| LedgerError::UnknownCategory(trimmed.to_string()))
    }

    /// Display name lookup by wire code.
    pub fn label_of_code(code: &str) -> Result<&'static str, LedgerError> {
        Self::from_code(code).map(Self::label)
    }
}

impl fmt::Display for LicenseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LicenseClass {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_code(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(pub String);

impl SchoolId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A driving school as handed over by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: SchoolId,
    pub name: String,
    #[serde(default)]
    pub candidates: Ledger,
}

impl SchoolRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, candidates: Ledger) -> Self {
        Self {
            id: SchoolId::new(id),
            name: name.into(),
            candidates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown license class category '{0}'")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_in_canonical_order() {
        let codes: Vec<_> = LicenseClass::ordered()
            .into_iter()
            .map(LicenseClass::code)
            .collect();
        assert_eq!(
            codes,
            ["B", "A1", "A2", "C", "D", "FARK_A1", "FARK_A2", "BAKANLIK_A1"]
        );
        for (position, class) in LicenseClass::ordered().into_iter().enumerate() {
            assert_eq!(class.index(), position);
            assert_eq!(LicenseClass::from_code(class.code()), Ok(class));
        }
    }

    #[test]
    fn unknown_codes_are_surfaced() {
        assert_eq!(
            "E".parse::<LicenseClass>(),
            Err(LedgerError::UnknownCategory("E".to_string()))
        );
        assert!(LicenseClass::label_of_code("fark_a1").is_err());
        assert_eq!(LicenseClass::label_of_code(" FARK_A2 "), Ok("A2 Fark"));
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&LicenseClass::BakanlikA1).expect("serializes");
        assert_eq!(json, "\"BAKANLIK_A1\"");
        let parsed: LicenseClass = serde_json::from_str("\"FARK_A1\"").expect("deserializes");
        assert_eq!(parsed, LicenseClass::FarkA1);
    }
}
