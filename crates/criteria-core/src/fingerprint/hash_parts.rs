//! Deterministic hash encoding shared by fingerprints and structural hashes.

use crate::{
    chain::{NameValue, OrderBy, SetValue},
    criteria::{CompareRight, CriteriaExpression, SubqueryInner},
    operation::{MemberRef, Operand, OperationExpression},
    value::Value,
};
use sha2::{Digest, Sha256};
use xxhash_rust::xxh3::Xxh3;

///
/// HashStream
/// Byte sink fed by the tree encoders.
///

pub(super) trait HashStream {
    fn feed(&mut self, bytes: &[u8]);
}

impl HashStream for Sha256 {
    fn feed(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

#[cfg(test)]
impl HashStream for Vec<u8> {
    fn feed(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl HashStream for Xxh3 {
    fn feed(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

///
/// Hash predicate structure into the stream.
///

pub(super) fn hash_criteria(h: &mut impl HashStream, criteria: &CriteriaExpression) {
    match criteria {
        CriteriaExpression::Logical { left, op, right } => {
            write_tag(h, 0x20);
            write_tag(h, op.tag());
            match left {
                Some(left) => {
                    write_tag(h, 0x01);
                    hash_criteria(h, left);
                }
                None => write_tag(h, 0x00),
            }
            hash_criteria(h, right);
        }
        CriteriaExpression::Compare(compare) => {
            write_tag(h, 0x21);
            hash_operation(h, compare.left());
            write_tag(h, compare.comparator().tag());
            match compare.right() {
                CompareRight::Empty => write_tag(h, 0x00),
                CompareRight::Operand(right) => {
                    write_tag(h, 0x01);
                    hash_operation(h, right);
                }
                CompareRight::Expression(right) => {
                    write_tag(h, 0x02);
                    hash_criteria(h, right);
                }
                CompareRight::Value(value) => {
                    write_tag(h, 0x03);
                    write_value(h, value);
                }
            }
            write_bool(h, compare.ignore_case());
        }
        CriteriaExpression::Exists(exists) => {
            write_tag(h, 0x22);
            hash_operation(h, &exists.outer);
            match &exists.inner {
                SubqueryInner::ForeignKey(fk) => {
                    write_tag(h, 0x01);
                    hash_operation(h, fk);
                }
                SubqueryInner::Criteria(inner) => {
                    write_tag(h, 0x02);
                    hash_criteria(h, inner);
                }
            }
            write_bool(h, exists.negate);
        }
        CriteriaExpression::ShortCircuit(value) => {
            write_tag(h, 0x23);
            write_bool(h, *value);
        }
    }
}

///
/// Hash operand structure into the stream.
///

pub(super) fn hash_operation(h: &mut impl HashStream, operation: &OperationExpression) {
    match operation {
        OperationExpression::Member(member) => {
            write_tag(h, 0x30);
            write_member(h, member);
        }
        OperationExpression::Literal { value, has_value } => {
            write_tag(h, 0x31);
            write_value(h, value);
            write_bool(h, *has_value);
        }
        OperationExpression::Binary { left, sign, right } => {
            write_tag(h, 0x32);
            hash_operand(h, left);
            write_tag(h, sign.tag());
            hash_operand(h, right);
        }
        OperationExpression::Unary {
            sign,
            operand,
            args,
        } => {
            write_tag(h, 0x33);
            write_tag(h, sign.tag());
            hash_operation(h, operand);
            write_len(h, args.len());
            for arg in args {
                hash_operation(h, arg);
            }
        }
    }
}

fn hash_operand(h: &mut impl HashStream, operand: &Operand) {
    match operand {
        Operand::Expr(expr) => {
            write_tag(h, 0x01);
            hash_operation(h, expr);
        }
        Operand::Value(value) => {
            write_tag(h, 0x02);
            write_value(h, value);
        }
    }
}

///
/// Hash set-clause and sort-clause chains, oldest entry first.
///

pub(super) fn hash_name_value(h: &mut impl HashStream, chain: &NameValue) {
    write_tag(h, 0x40);
    let entries = chain.entries();
    write_len(h, entries.len());
    for (member, value) in entries {
        write_member(h, member);
        match value {
            SetValue::Value(value) => {
                write_tag(h, 0x01);
                write_value(h, value);
            }
            SetValue::Operand(operand) => {
                write_tag(h, 0x02);
                hash_operation(h, operand);
            }
        }
    }
}

pub(super) fn hash_order_by(h: &mut impl HashStream, chain: &OrderBy) {
    write_tag(h, 0x41);
    let entries = chain.entries();
    write_len(h, entries.len());
    for (member, direction) in entries {
        write_member(h, member);
        write_tag(h, direction.tag());
    }
}

fn write_member(h: &mut impl HashStream, member: &MemberRef) {
    write_str(h, member.owner());
    write_str(h, member.member());
}

///
/// Encode one value: kind tag first, then a length-prefixed payload.
///

pub(super) fn write_value(h: &mut impl HashStream, value: &Value) {
    write_tag(h, value.kind().to_u8());

    match value {
        Value::Null => {}
        Value::Bool(b) => write_bool(h, *b),
        Value::Int(v) => h.feed(&v.to_be_bytes()),
        Value::Uint(v) => h.feed(&v.to_be_bytes()),
        Value::Float32(v) => h.feed(&v.to_be_bytes()),
        Value::Float64(v) => h.feed(&v.to_be_bytes()),
        Value::Text(s) => write_str(h, s),
        Value::Date(d) => h.feed(&d.get().to_be_bytes()),
        Value::List(xs) => {
            write_len(h, xs.len());
            for x in xs {
                write_tag(h, 0xFF);
                write_value(h, x);
            }
        }
    }
}

pub(super) fn write_str(h: &mut impl HashStream, value: &str) {
    write_len(h, value.len());
    h.feed(value.as_bytes());
}

/// Length prefix, always eight bytes wide.
pub(super) fn write_len(h: &mut impl HashStream, len: usize) {
    let len = u64::try_from(len).unwrap_or(u64::MAX);
    h.feed(&len.to_be_bytes());
}

pub(super) fn write_tag(h: &mut impl HashStream, tag: u8) {
    h.feed(&[tag]);
}

fn write_bool(h: &mut impl HashStream, value: bool) {
    write_tag(h, u8::from(value));
}
