//! Inventory location records returned by the warehouse inventory service.

use serde::{Deserialize, Deserializer, Serialize};

/// Classification tag carried on an inventory location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumableType {
    Consumable,
    InHouse,
    Vmi,
    /// Plain counted stock at a numbered location.
    Stock,
}

impl ConsumableType {
    pub fn parse(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("CONSUMABLE") => Self::Consumable,
            Some("INHOUSE") => Self::InHouse,
            Some("VMI") => Self::Vmi,
            _ => Self::Stock,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumable => "CONSUMABLE",
            Self::InHouse => "INHOUSE",
            Self::Vmi => "VMI",
            Self::Stock => "",
        }
    }
}

/// One location entry, in the order the service ranks them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryEntry {
    #[serde(default)]
    pub consumable_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub quantity: f64,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl InventoryEntry {
    pub fn new(consumable_type: &str, location: &str, quantity: f64) -> Self {
        Self {
            consumable_type: Some(consumable_type.to_string()),
            location: Some(location.to_string()),
            quantity,
        }
    }

    pub fn kind(&self) -> ConsumableType {
        ConsumableType::parse(self.consumable_type.as_deref())
    }

    pub fn location_text(&self) -> &str {
        self.location.as_deref().unwrap_or_default()
    }
}

/// Which inventory source to consult. Never mixed within one lookup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryRegion {
    #[default]
    Domestic,
    International,
}

impl InventoryRegion {
    pub fn from_intl_flag(intl: bool) -> Self {
        if intl {
            Self::International
        } else {
            Self::Domestic
        }
    }
}

/// Folded view of a part's first locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventorySummary {
    pub location: String,
    pub is_consumable_or_vmi: bool,
    pub quantity_available: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumable_type_parse() {
        assert_eq!(ConsumableType::parse(Some("VMI")), ConsumableType::Vmi);
        assert_eq!(ConsumableType::parse(Some("INHOUSE")), ConsumableType::InHouse);
        assert_eq!(ConsumableType::parse(Some("")), ConsumableType::Stock);
        assert_eq!(ConsumableType::parse(None), ConsumableType::Stock);
    }

    #[test]
    fn test_entry_deserializes_service_payload() {
        let json = serde_json::json!([
            { "ConsumableType": null, "Location": "12-3-4", "Quantity": 7.5 },
            { "ConsumableType": "VMI", "Location": "VMI-RACK", "Quantity": null }
        ]);

        let entries: Vec<InventoryEntry> = serde_json::from_value(json).unwrap();
        assert_eq!(entries[0].kind(), ConsumableType::Stock);
        assert_eq!(entries[1].kind(), ConsumableType::Vmi);
        assert_eq!(entries[1].quantity, 0.0);
    }
}
