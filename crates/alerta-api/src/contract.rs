/// Which wire contract the target incident store speaks.
///
/// The backend went through an API reshape without a migration flag. The
/// original deployment stores the title under a misspelled key, references
/// the incident type by bare numeric id, and carries the address as one
/// display string with stringly coordinates. The reworked deployment moved
/// type and address into nested objects and corrected the title key.
///
/// Reads tolerate records of either shape (see [`crate::wire::IncidentRecord`]);
/// writes must pick one, and this enum is the only place that knows which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendContract {
    /// Original flat contract: misspelled `titule` key, numeric `type`,
    /// display-string `address`, coordinates always present (`"0.0"` when
    /// unknown).
    LegacyFlat,
    /// Current contract: corrected `title` key, nested `type` / `address`
    /// objects, coordinates omitted when unknown.
    Nested,
}

impl BackendContract {
    /// Parse a config-file value. Accepts the version aliases used in
    /// older profile files.
    pub fn from_config(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "legacy" | "flat" | "v1" => Some(Self::LegacyFlat),
            "nested" | "v2" => Some(Self::Nested),
            _ => None,
        }
    }

    /// The key the contract uses for the incident title.
    pub fn title_key(self) -> &'static str {
        match self {
            Self::LegacyFlat => "titule",
            Self::Nested => "title",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LegacyFlat => "legacy",
            Self::Nested => "nested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_from_config_aliases() {
        assert_eq!(
            BackendContract::from_config("v1"),
            Some(BackendContract::LegacyFlat)
        );
        assert_eq!(
            BackendContract::from_config("Nested"),
            Some(BackendContract::Nested)
        );
        assert_eq!(BackendContract::from_config("graphql"), None);
    }

    #[test]
    fn title_key_per_contract() {
        assert_eq!(BackendContract::LegacyFlat.title_key(), "titule");
        assert_eq!(BackendContract::Nested.title_key(), "title");
    }
}
