pub mod extraction;
pub mod types;

pub use extraction::EntityExtractor;
pub use types::{EntityLabel, ORGANIZATION_MARKER};

// Module-level constants
pub const TARGET_ENTITY: &str = "entity";
