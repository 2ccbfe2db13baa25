//! Binary comparison protocol over value handles

use std::slice;

use super::{Context, Object, ObjectHolder};
use crate::error::{RuntimeError, RuntimeResult};

const EQ_METHOD: &str = "__eq__";
const LT_METHOD: &str = "__lt__";

/// Value equality. Two empty handles are equal; built-in kinds compare by
/// value; an instance on the left delegates to its `__eq__`.
pub fn equal(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> RuntimeResult<bool> {
    let (left, right) = (lhs.get(), rhs.get());
    match (left.as_deref(), right.as_deref()) {
        (None, None) => Ok(true),
        (Some(Object::Number(a)), Some(Object::Number(b))) => Ok(a == b),
        (Some(Object::String(a)), Some(Object::String(b))) => Ok(a == b),
        (Some(Object::Bool(a)), Some(Object::Bool(b))) => Ok(a == b),
        (Some(Object::Instance(instance)), _) if instance.has_method(EQ_METHOD, 1) => {
            let verdict = instance.call(EQ_METHOD, slice::from_ref(rhs), ctx)?;
            bool_verdict(EQ_METHOD, &verdict)
        }
        _ => Err(RuntimeError::NotComparable {
            operation: "equality",
        }),
    }
}

/// Strict ordering. Built-in kinds compare by value (`False < True`, strings
/// byte-lexicographically); an instance on the left delegates to its
/// `__lt__`. Empty handles have no ordering.
pub fn less(lhs: &ObjectHolder, rhs: &ObjectHolder, ctx: &mut dyn Context) -> RuntimeResult<bool> {
    let (left, right) = (lhs.get(), rhs.get());
    match (left.as_deref(), right.as_deref()) {
        (Some(Object::Number(a)), Some(Object::Number(b))) => Ok(a < b),
        (Some(Object::String(a)), Some(Object::String(b))) => Ok(a < b),
        (Some(Object::Bool(a)), Some(Object::Bool(b))) => Ok(a < b),
        (Some(Object::Instance(instance)), _) if instance.has_method(LT_METHOD, 1) => {
            let verdict = instance.call(LT_METHOD, slice::from_ref(rhs), ctx)?;
            bool_verdict(LT_METHOD, &verdict)
        }
        _ => Err(RuntimeError::NotComparable { operation: "less" }),
    }
}

// The remaining relations reduce to `equal` and `less`; user-defined
// `__gt__` and friends are never consulted.

pub fn not_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!equal(lhs, rhs, ctx)?)
}

pub fn greater(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!(less(lhs, rhs, ctx)? || equal(lhs, rhs, ctx)?))
}

pub fn less_or_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(less(lhs, rhs, ctx)? || equal(lhs, rhs, ctx)?)
}

pub fn greater_or_equal(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut dyn Context,
) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs, ctx)?)
}

fn bool_verdict(method: &'static str, value: &ObjectHolder) -> RuntimeResult<bool> {
    value
        .get()
        .as_deref()
        .and_then(Object::as_bool)
        .ok_or(RuntimeError::NonBoolComparison { method })
}
