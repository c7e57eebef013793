//! Localized string lookup.
//!
//! Keys are matched case-insensitively (`LinkedAccounts.FirstDeposit.Text`
//! and `linkedaccounts.firstdeposit.text` are the same entry). An unknown key
//! resolves to the key itself so missing copy is visible rather than blank.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{WidgetError, WidgetResult};

/// Built-in en-US copy.
const EN_US: &[(&str, &str)] = &[
    ("linkedaccounts.addaccount.title", "Link an External Account"),
    ("linkedaccounts.institutionname", "Institution name"),
    ("linkedaccounts.routingnumber", "Routing number"),
    ("linkedaccounts.accountnumber", "Account number"),
    ("linkedaccounts.accounttype", "Account type"),
    ("linkedaccounts.accountname", "Account nickname"),
    ("linkedaccounts.addaccountbutton.text", "Link Account"),
    ("linkedaccounts.addaccountsuccess", "Your account has been linked."),
    (
        "linkedaccounts.error.invalidroutingnumber",
        "The routing number you entered is not valid.",
    ),
    (
        "linkedaccounts.error.server",
        "Something went wrong on our end. Please try again later.",
    ),
    ("linkedaccounts.removeaccount", "Remove"),
    ("linkedaccounts.verifyaccount", "Verify Account"),
    (
        "linkedaccounts.verifyaccountmessage.message",
        "We made two small deposits to this account. Enter the amounts below to complete verification.",
    ),
    (
        "linkedaccounts.verifyaccounterror",
        "We could not verify your account. Check the deposit amounts and try again.",
    ),
    (
        "linkedaccounts.invaliddepositamount",
        "Enter each deposit as a positive dollar amount, such as 0.12.",
    ),
    ("linkedaccounts.firstdeposit.text", "First deposit"),
    ("linkedaccounts.seconddeposit.text", "Second deposit"),
    ("linkedaccounts.completeverificationbutton.text", "Complete Verification"),
    ("misc.cancel", "Cancel"),
    ("scheduledtransfer.error.unknowndate", "UnknownDate"),
    ("transfer.scheduledtransfers.noscheduledtransfers", "No scheduled transfers"),
    ("scheduledtransfers.brieflist.nexttransfer", "Next transfer:"),
    ("scheduledtransfers.brieflist.from", "from"),
    ("scheduledtransfers.brieflist.to", "to"),
];

/// Shared, read-only string table.
#[derive(Debug, Clone, PartialEq)]
pub struct StringResources {
    entries: Arc<HashMap<String, String>>,
}

impl Default for StringResources {
    fn default() -> Self {
        Self::en_us()
    }
}

impl StringResources {
    pub fn en_us() -> Self {
        Self::from_pairs(EN_US.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Overlay entries from a flat JSON object (`{"key": "text", ...}`).
    pub fn with_overrides_json(&self, json: &str) -> WidgetResult<Self> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut merged = (*self.entries).clone();
        merged.extend(overrides.into_iter().map(|(k, v)| (k.to_lowercase(), v)));
        Ok(Self {
            entries: Arc::new(merged),
        })
    }

    /// Built-in copy, overlaid with the JSON object in `path` when given.
    pub fn load(path: Option<&Path>) -> WidgetResult<Self> {
        let base = Self::en_us();
        let Some(path) = path else {
            return Ok(base);
        };
        let raw = std::fs::read_to_string(path)?;
        let strings = base
            .with_overrides_json(&raw)
            .map_err(|e| WidgetError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "loaded string overrides");
        Ok(strings)
    }

    /// Look up `key`, falling back to the key itself.
    pub fn resource(&self, key: &str) -> String {
        match self.entries.get(&key.to_lowercase()) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!(key, "missing string resource");
                key.to_string()
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let strings = StringResources::en_us();
        assert_eq!(
            strings.resource("LinkedAccounts.FirstDeposit.Text"),
            strings.resource("linkedaccounts.firstdeposit.text")
        );
        assert_eq!(strings.resource("misc.CANCEL"), "Cancel");
    }

    #[test]
    fn unknown_key_echoes() {
        let strings = StringResources::en_us();
        assert_eq!(strings.resource("no.such.key"), "no.such.key");
        assert!(!strings.contains("no.such.key"));
    }

    #[test]
    fn overrides_replace_and_extend() {
        let strings = StringResources::en_us()
            .with_overrides_json(r#"{"Misc.Cancel": "Annuler", "extra.key": "Extra"}"#)
            .unwrap();
        assert_eq!(strings.resource("misc.cancel"), "Annuler");
        assert_eq!(strings.resource("extra.key"), "Extra");
        assert_eq!(strings.resource("linkedaccounts.verifyaccount"), "Verify Account");
    }

    #[test]
    fn load_overlays_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("strings.json");
        std::fs::write(&path, r#"{"Misc.Cancel": "Never mind"}"#).unwrap();

        let strings = StringResources::load(Some(&path)).unwrap();
        assert_eq!(strings.resource("misc.cancel"), "Never mind");
        assert_eq!(strings.resource("linkedaccounts.verifyaccount"), "Verify Account");
    }

    #[test]
    fn load_without_file_is_built_in() {
        assert_eq!(StringResources::load(None).unwrap(), StringResources::en_us());
    }

    #[test]
    fn load_rejects_malformed_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("strings.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = StringResources::load(Some(&path)).unwrap_err();
        assert!(matches!(err, WidgetError::Config(_)));
    }
}
