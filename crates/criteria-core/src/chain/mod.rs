//! Ordered accumulators for set clauses and sort clauses.
//!
//! Each node holds one entry and a link to the node built before it.
//! Reading a chain walks `prior` first, so entries come back oldest first.

#[cfg(test)]
mod tests;

use crate::{
    operation::{MemberRef, OperationExpression},
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// SetValue
/// Right side of one set-clause entry.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SetValue {
    Value(Value),
    Operand(OperationExpression),
}

impl From<Value> for SetValue {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<OperationExpression> for SetValue {
    fn from(operand: OperationExpression) -> Self {
        Self::Operand(operand)
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Operand(operand) => write!(f, "{operand}"),
        }
    }
}

///
/// NameValue
///
/// Set-clause accumulator: `(member, value, prior)`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct NameValue {
    member: MemberRef,
    value: SetValue,
    prior: Option<Box<Self>>,
}

impl NameValue {
    #[must_use]
    pub fn new(member: MemberRef, value: impl Into<SetValue>) -> Self {
        Self {
            member,
            value: value.into(),
            prior: None,
        }
    }

    /// Append one entry; `self` becomes the prior node.
    #[must_use]
    pub fn set(self, member: MemberRef, value: impl Into<SetValue>) -> Self {
        Self {
            member,
            value: value.into(),
            prior: Some(Box::new(self)),
        }
    }

    #[must_use]
    pub const fn member(&self) -> &MemberRef {
        &self.member
    }

    #[must_use]
    pub const fn value(&self) -> &SetValue {
        &self.value
    }

    #[must_use]
    pub fn prior(&self) -> Option<&Self> {
        self.prior.as_deref()
    }

    /// Entries oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<(&MemberRef, &SetValue)> {
        let mut out = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            out.push((&current.member, &current.value));
            node = current.prior();
        }
        out.reverse();
        out
    }

    /// Fold entries left to right by member name; later entries override.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&str, &SetValue> {
        self.entries()
            .into_iter()
            .map(|(member, value)| (member.member(), value))
            .collect()
    }
}

impl fmt::Display for NameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Set(")?;
        for (i, (member, value)) in self.entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member} = {value}")?;
        }
        f.write_str(")")
    }
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Asc => 0x01,
            Self::Desc => 0x02,
        }
    }

    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Asc => " asc",
            Self::Desc => " desc",
        }
    }
}

///
/// OrderBy
///
/// Sort-clause accumulator: `(member, direction, prior)`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct OrderBy {
    member: MemberRef,
    direction: OrderDirection,
    prior: Option<Box<Self>>,
}

impl OrderBy {
    #[must_use]
    pub const fn new(member: MemberRef, direction: OrderDirection) -> Self {
        Self {
            member,
            direction,
            prior: None,
        }
    }

    #[must_use]
    pub const fn ascending(member: MemberRef) -> Self {
        Self::new(member, OrderDirection::Asc)
    }

    #[must_use]
    pub const fn descending(member: MemberRef) -> Self {
        Self::new(member, OrderDirection::Desc)
    }

    #[must_use]
    pub fn then(self, member: MemberRef, direction: OrderDirection) -> Self {
        Self {
            member,
            direction,
            prior: Some(Box::new(self)),
        }
    }

    #[must_use]
    pub fn then_ascending(self, member: MemberRef) -> Self {
        self.then(member, OrderDirection::Asc)
    }

    #[must_use]
    pub fn then_descending(self, member: MemberRef) -> Self {
        self.then(member, OrderDirection::Desc)
    }

    #[must_use]
    pub const fn member(&self) -> &MemberRef {
        &self.member
    }

    #[must_use]
    pub const fn direction(&self) -> OrderDirection {
        self.direction
    }

    #[must_use]
    pub fn prior(&self) -> Option<&Self> {
        self.prior.as_deref()
    }

    /// Entries oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<(&MemberRef, OrderDirection)> {
        let mut out = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            out.push((&current.member, current.direction));
            node = current.prior();
        }
        out.reverse();
        out
    }

    /// Fold entries left to right by member name; later entries override.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&str, OrderDirection> {
        self.entries()
            .into_iter()
            .map(|(member, direction)| (member.member(), direction))
            .collect()
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderBy(")?;
        for (i, (member, direction)) in self.entries().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{member} {direction:?}")?;
        }
        f.write_str(")")
    }
}
