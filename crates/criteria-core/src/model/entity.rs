use crate::model::field::FieldModel;

///
/// EntityModel
/// Host-declared runtime model for one entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Stable owner-type identifier (used in serialized member references).
    pub path: &'static str,
    /// Ordered field list.
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    #[must_use]
    pub const fn new(path: &'static str, fields: &'static [FieldModel]) -> Self {
        Self { path, fields }
    }

    /// Look up a field descriptor by name.
    #[must_use]
    pub fn field(&'static self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }
}
