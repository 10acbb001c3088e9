//! Static field metadata for every entity type.
//!
//! The validator, the merger and the codec never know about concrete
//! entities: they are driven by an [`EntityDescriptor`], which lists the
//! fields of a type together with their semantic type, whether they are
//! required and how two values of the field compare.

use crate::record::{FieldValue, Record};

/// Semantic type of a data field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Text,
    /// Scaled decimal, e.g. a percentage.
    Decimal,
    /// Point in time, UTC.
    Instant,
}

impl FieldType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FieldType::Text => "string",
            FieldType::Decimal => "decimal",
            FieldType::Instant => "instant",
        }
    }
}

/// How two values of the same field are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EqualityRule {
    /// Values must be identical, including decimal scale.
    Exact,
    /// Decimals are equal when mathematically equal (`1` equals `1.00`).
    Numeric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Wire name of the field.
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
    pub equality: EqualityRule,
}

impl FieldDescriptor {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            equality: EqualityRule::Exact,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            equality: EqualityRule::Exact,
        }
    }

    pub const fn numeric(mut self) -> Self {
        self.equality = EqualityRule::Numeric;
        self
    }

    /// Compare two values of this field under its equality rule.
    pub fn values_equal(&self, left: Option<&FieldValue>, right: Option<&FieldValue>) -> bool {
        match (left, right) {
            (None, None) => true,
            (Some(FieldValue::Decimal(a)), Some(FieldValue::Decimal(b))) => match self.equality {
                // `Decimal`'s own `PartialEq` ignores scale already.
                EqualityRule::Numeric => a == b,
                EqualityRule::Exact => a == b && a.scale() == b.scale(),
            },
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Metadata of one entity type.
#[derive(Debug)]
pub struct EntityDescriptor {
    /// Singular entity name, used in messages and alert keys.
    pub name: &'static str,
    /// Collection path segment under `/api`.
    pub collection: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    /// Compare every data field of two records under the field rules.
    ///
    /// Ids are ignored: a freshly created record is compared with the
    /// payload it was built from.
    pub fn records_equal(&self, left: &Record, right: &Record) -> bool {
        self.fields
            .iter()
            .all(|field| field.values_equal(left.get(field.name), right.get(field.name)))
    }
}
