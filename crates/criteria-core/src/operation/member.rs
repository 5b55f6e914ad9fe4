use crate::{
    error::{ErrorOrigin, InternalError},
    model::{EntityModel, FieldModel, resolve_field},
    value::ValueKind,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::OnceLock,
};

///
/// MemberRef
///
/// Reference to one field of an owner entity.
///
/// Serialized as the `(owner, member)` string pair only. The field
/// descriptor is resolved lazily through the model registry and memoized;
/// concurrent first access may resolve twice but always stores the same
/// descriptor.
///

#[derive(Clone, Deserialize, Serialize)]
pub struct MemberRef {
    owner: String,
    member: String,
    #[serde(skip)]
    field: OnceLock<&'static FieldModel>,
}

impl MemberRef {
    /// Build an unresolved reference; resolution happens on first use.
    #[must_use]
    pub fn new(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            member: member.into(),
            field: OnceLock::new(),
        }
    }

    /// Build a reference resolved against `model` at construction time.
    pub fn resolve(model: &'static EntityModel, member: &str) -> Result<Self, InternalError> {
        let field = model.field(member).ok_or_else(|| {
            InternalError::unknown_member(ErrorOrigin::Translate, model.path, member)
        })?;

        Ok(Self {
            owner: model.path.to_string(),
            member: field.name.to_string(),
            field: OnceLock::from(field),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Resolved field descriptor.
    pub fn field(&self) -> Result<&'static FieldModel, InternalError> {
        if let Some(field) = self.field.get() {
            return Ok(*field);
        }

        let field = resolve_field(&self.owner, &self.member)?;

        Ok(*self.field.get_or_init(|| field))
    }

    pub fn value_kind(&self) -> Result<ValueKind, InternalError> {
        Ok(self.field()?.value_kind())
    }
}

impl PartialEq for MemberRef {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.member == other.member
    }
}

impl Eq for MemberRef {}

impl Hash for MemberRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.member.hash(state);
    }
}

impl fmt::Debug for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberRef")
            .field("owner", &self.owner)
            .field("member", &self.member)
            .field("resolved", &self.field.get().is_some())
            .finish()
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.member)
    }
}
