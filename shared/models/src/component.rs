//! Component domain models for BOM trees.
//!
//! A component is one row of a fixture's bill of materials. Its position in the
//! tree is carried by a dotted `Level` path rather than by explicit links, so the
//! helpers at the bottom of this module are the single place where ancestry is
//! derived from level strings.

use serde::{Deserialize, Serialize};

/// Node kind as stored in the BOM documents (`"P"` / `"S"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComponentType {
    #[serde(rename = "P")]
    Part,
    #[serde(rename = "S")]
    SubAssembly,
    #[serde(other)]
    Other,
}

impl Default for ComponentType {
    fn default() -> Self {
        Self::Other
    }
}

/// One row of a fixture BOM.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Component {
    pub level: String,
    #[serde(rename = "Type", default)]
    pub component_type: ComponentType,
    #[serde(default)]
    pub group: String,
    #[serde(rename = "TDGPN", default)]
    pub tdgpn: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub path_name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(rename = "VendorPN", default)]
    pub vendor_pn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
}

/// Well-known `Group` tags that drive explosion rules.
pub mod groups {
    pub const METAL_PART: &str = "MetalPart";
    pub const PCB: &str = "PCB";
    pub const PLASTIC_PART: &str = "PlasticPart";
}

impl Default for Component {
    fn default() -> Self {
        Self {
            level: String::new(),
            component_type: ComponentType::Other,
            group: String::new(),
            tdgpn: String::new(),
            quantity: 0.0,
            path_name: None,
            path: None,
            vendor: None,
            vendor_pn: None,
            description: None,
            unit_of_measure: None,
        }
    }
}

impl Component {
    /// Creates a part row at `level`.
    pub fn part(level: &str, tdgpn: &str, group: &str, quantity: f64) -> Self {
        Self {
            level: level.to_string(),
            component_type: ComponentType::Part,
            group: group.to_string(),
            tdgpn: tdgpn.to_string(),
            quantity,
            ..Self::default()
        }
    }

    /// Creates a sub-assembly row at `level`.
    pub fn sub_assembly(level: &str, tdgpn: &str, group: &str, quantity: f64) -> Self {
        Self {
            level: level.to_string(),
            component_type: ComponentType::SubAssembly,
            group: group.to_string(),
            tdgpn: tdgpn.to_string(),
            quantity,
            ..Self::default()
        }
    }

    pub fn with_path_name(mut self, path_name: &str) -> Self {
        self.path_name = Some(path_name.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_vendor(mut self, vendor: &str, vendor_pn: &str) -> Self {
        self.vendor = Some(vendor.to_string());
        self.vendor_pn = Some(vendor_pn.to_string());
        self
    }

    pub fn depth(&self) -> usize {
        level_depth(&self.level)
    }

    pub fn is_part(&self) -> bool {
        self.component_type == ComponentType::Part
    }

    pub fn is_sub_assembly(&self) -> bool {
        self.component_type == ComponentType::SubAssembly
    }

    /// Parts and non-PCB sub-assemblies are the rows explosion may zero out.
    pub fn is_explodable(&self) -> bool {
        self.is_part() || (self.is_sub_assembly() && self.group != groups::PCB)
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Number of dot-separated segments in a level string.
pub fn level_depth(level: &str) -> usize {
    level.split('.').count()
}

/// Level of the direct ancestor, or `None` for a root-level component.
pub fn parent_level(level: &str) -> Option<&str> {
    level.rsplit_once('.').map(|(parent, _)| parent)
}

/// Returns the final segment of a design-file path, accepting either separator.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}
