//! Type-reference resolution
//!
//! Unwraps `!` and `[]` wrappers around a field type down to its base name.
//! Both flags only ever turn on while descending, so `[ID!]` and `[ID]!`
//! resolve to the same `TypeRef`.

use serde::{Deserialize, Serialize};

use crate::schema::FieldType;

/// Fully unwrapped shape of a declared field type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub required: bool,
    pub array: bool,
}

pub fn resolve(ty: &FieldType) -> TypeRef {
    resolve_from(ty, false, false)
}

fn resolve_from(ty: &FieldType, required: bool, array: bool) -> TypeRef {
    match ty {
        FieldType::Named(name) => TypeRef {
            name: name.clone(),
            required,
            array,
        },
        FieldType::NonNull(inner) => resolve_from(inner, true, array),
        FieldType::List(inner) => resolve_from(inner, required, true),
    }
}
