use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to organization entities so a company name is never
/// conflated with a person sharing the same text. The resolver strips it
/// before querying.
pub const ORGANIZATION_MARKER: &str = " (organization)";

/// Entity label universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Organization,
    Facility,
    Group,
    Product,
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Person => write!(f, "PERSON"),
            EntityLabel::Organization => write!(f, "ORGANIZATION"),
            EntityLabel::Facility => write!(f, "FACILITY"),
            EntityLabel::Group => write!(f, "GROUP"),
            EntityLabel::Product => write!(f, "PRODUCT"),
        }
    }
}

impl From<&str> for EntityLabel {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ORGANIZATION" => EntityLabel::Organization,
            "FACILITY" => EntityLabel::Facility,
            "GROUP" => EntityLabel::Group,
            "PRODUCT" => EntityLabel::Product,
            _ => EntityLabel::Person,
        }
    }
}

/// Strip the organization marker from an entity string, if present.
pub fn strip_organization_marker(entity: &str) -> &str {
    entity.strip_suffix(ORGANIZATION_MARKER).unwrap_or(entity)
}
