//! Minimal field-descriptor contract supplied by the host entity model.
//!
//! Models are declared as `static` items and registered once; member
//! references in deserialized trees resolve back through the registry.

mod entity;
mod field;
mod registry;
mod row;

// re-exports
pub use entity::EntityModel;
pub use field::{FieldKind, FieldModel};
pub use registry::{ModelRegistryError, register, resolve_entity, resolve_field};
pub use row::{FieldPresence, Row};
