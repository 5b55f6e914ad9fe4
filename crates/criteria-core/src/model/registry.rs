use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    model::{EntityModel, FieldModel},
};
use std::{
    collections::BTreeMap,
    sync::{OnceLock, PoisonError, RwLock},
};
use thiserror::Error as ThisError;

type Models = BTreeMap<&'static str, &'static EntityModel>;

static MODELS: OnceLock<RwLock<Models>> = OnceLock::new();

fn models() -> &'static RwLock<Models> {
    MODELS.get_or_init(|| RwLock::new(BTreeMap::new()))
}

///
/// ModelRegistryError
///

#[derive(Debug, ThisError)]
pub enum ModelRegistryError {
    #[error("entity '{0}' not registered")]
    EntityNotFound(String),

    #[error("entity '{0}' already registered with a different model")]
    EntityConflict(String),

    #[error("unknown member '{member}' on '{owner}'")]
    MemberNotFound { owner: String, member: String },
}

impl ModelRegistryError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::EntityNotFound(_) | Self::MemberNotFound { .. } => ErrorClass::UnknownMember,
            Self::EntityConflict(_) => ErrorClass::InvalidOperatorUsage,
        }
    }
}

impl From<ModelRegistryError> for InternalError {
    fn from(err: ModelRegistryError) -> Self {
        Self::new(err.class(), ErrorOrigin::Model, err.to_string())
    }
}

/// Register an entity model under its path.
///
/// Registering the same model twice is a no-op.
pub fn register(model: &'static EntityModel) -> Result<(), InternalError> {
    let mut guard = models().write().unwrap_or_else(PoisonError::into_inner);

    match guard.get(model.path) {
        Some(existing) if std::ptr::eq(*existing, model) => Ok(()),
        Some(_) => Err(ModelRegistryError::EntityConflict(model.path.to_string()).into()),
        None => {
            guard.insert(model.path, model);
            Ok(())
        }
    }
}

/// Look up a registered entity model by path.
pub fn resolve_entity(path: &str) -> Result<&'static EntityModel, InternalError> {
    let guard = models().read().unwrap_or_else(PoisonError::into_inner);

    guard
        .get(path)
        .copied()
        .ok_or_else(|| ModelRegistryError::EntityNotFound(path.to_string()).into())
}

/// Look up a field descriptor through the registry.
pub fn resolve_field(path: &str, member: &str) -> Result<&'static FieldModel, InternalError> {
    let model = resolve_entity(path)?;

    model.field(member).ok_or_else(|| {
        ModelRegistryError::MemberNotFound {
            owner: path.to_string(),
            member: member.to_string(),
        }
        .into()
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{FieldKind, FieldModel},
        test_fixtures::PRODUCT,
    };

    static IMPOSTOR: EntityModel = EntityModel::new(
        "test::Product",
        &[FieldModel::new("price", FieldKind::Int)],
    );

    #[test]
    fn register_is_idempotent_for_the_same_model() {
        register(&PRODUCT).expect("first registration");
        register(&PRODUCT).expect("second registration");

        let field = resolve_field("test::Product", "price").expect("price resolves");
        assert_eq!(field.kind, FieldKind::Float64);
    }

    #[test]
    fn register_rejects_a_different_model_under_the_same_path() {
        register(&PRODUCT).expect("product registers");

        let err = register(&IMPOSTOR).expect_err("conflict");
        assert_eq!(err.origin, ErrorOrigin::Model);
    }

    #[test]
    fn unknown_member_is_classified() {
        register(&PRODUCT).expect("product registers");

        let err = resolve_field("test::Product", "nope").expect_err("missing");
        assert_eq!(err.class, ErrorClass::UnknownMember);

        let err = resolve_entity("test::Nothing").expect_err("missing entity");
        assert_eq!(err.class, ErrorClass::UnknownMember);
    }
}
