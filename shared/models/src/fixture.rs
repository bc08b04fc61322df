//! Fixture documents and the assembly pool used for buy resolution.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

use crate::component::{file_name, Component};

/// A named BOM root with its ordered component rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Fixture {
    pub fn new(name: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            name: name.into(),
            description: None,
            components,
        }
    }

    /// Finds the row at an exact level.
    pub fn component_at(&self, level: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.level == level)
    }

    /// Upper-cases a requested fixture number and strips the warranty, repair
    /// and evaluation markers so it matches the stored BOM name.
    pub fn normalize_name(raw: &str) -> String {
        static MARKERS: OnceLock<Regex> = OnceLock::new();
        let markers = MARKERS.get_or_init(|| {
            Regex::new(r"-?(WAR|RPR|EVAL)").expect("static marker pattern is valid")
        });

        markers.replace_all(&raw.trim().to_uppercase(), "").into_owned()
    }
}

/// Fixture or PDM sub-assembly record from the broader pool. Only the design
/// path and the purchasing flag matter to explosion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AssemblyRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub buy: bool,
}

fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl AssemblyRecord {
    pub fn new(path: &str, buy: bool) -> Self {
        Self {
            name: None,
            path: Some(path.to_string()),
            buy,
        }
    }

    /// Lower-cased design file name, if the record has a path.
    pub fn file_key(&self) -> Option<String> {
        self.path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| file_name(p).to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_strips_markers() {
        assert_eq!(Fixture::normalize_name("fx-1020-war"), "FX-1020");
        assert_eq!(Fixture::normalize_name("FX-1020RPR"), "FX-1020");
        assert_eq!(Fixture::normalize_name(" fx-1020-EVAL "), "FX-1020");
        assert_eq!(Fixture::normalize_name("FX-1020"), "FX-1020");
        assert_eq!(Fixture::normalize_name(""), "");
    }

    #[test]
    fn test_assembly_file_key() {
        let record = AssemblyRecord::new(r"C:\PDM\Sub\ASSY-7.SLDASM", true);
        assert_eq!(record.file_key().as_deref(), Some("assy-7.sldasm"));
        assert_eq!(AssemblyRecord::default().file_key(), None);
    }

    #[test]
    fn test_assembly_record_tolerates_null_buy() {
        let json = serde_json::json!({ "Name": "SUB-1", "Path": "SUB-1.SLDASM", "Buy": null });
        let record: AssemblyRecord = serde_json::from_value(json).unwrap();
        assert!(!record.buy);
    }

    #[test]
    fn test_fixture_deserializes_with_missing_description() {
        let json = serde_json::json!({
            "Name": "FX-1",
            "Components": [{ "Level": "1", "Type": "P", "TDGPN": "A", "Quantity": 1.5 }]
        });

        let fixture: Fixture = serde_json::from_value(json).unwrap();
        assert_eq!(fixture.description, None);
        assert_eq!(fixture.component_at("1").map(|c| c.quantity), Some(1.5));
    }
}
