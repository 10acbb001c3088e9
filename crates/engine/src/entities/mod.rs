//! Entity types served by the engine.
//!
//! Each submodule holds the sea-orm table model of one entity and its
//! conversion to and from [`Record`](crate::Record). The [`EntityKind`] enum
//! ties a kind to its descriptor.

use crate::{EntityDescriptor, descriptor::FieldDescriptor, descriptor::FieldType};

pub(crate) mod currency;
pub(crate) mod journal;
pub(crate) mod vat_rate;

static CURRENCY_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::required("code", FieldType::Text),
    FieldDescriptor::required("name", FieldType::Text),
    FieldDescriptor::optional("symbol", FieldType::Text),
];

static JOURNAL_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::required("code", FieldType::Text),
    FieldDescriptor::required("name", FieldType::Text),
    FieldDescriptor::optional("description", FieldType::Text),
    FieldDescriptor::required("createdAt", FieldType::Instant),
];

static VAT_RATE_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor::required("code", FieldType::Text),
    FieldDescriptor::required("percentage", FieldType::Decimal).numeric(),
    FieldDescriptor::optional("description", FieldType::Text),
    FieldDescriptor::optional("validFrom", FieldType::Instant),
];

static CURRENCY: EntityDescriptor = EntityDescriptor {
    name: "currency",
    collection: "currencies",
    fields: &CURRENCY_FIELDS,
};

static JOURNAL: EntityDescriptor = EntityDescriptor {
    name: "journal",
    collection: "journals",
    fields: &JOURNAL_FIELDS,
};

static VAT_RATE: EntityDescriptor = EntityDescriptor {
    name: "vatRate",
    collection: "vat-rates",
    fields: &VAT_RATE_FIELDS,
};

/// The entity types exposed by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Currency,
    Journal,
    VatRate,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Currency, EntityKind::Journal, EntityKind::VatRate];

    #[must_use]
    pub fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Currency => &CURRENCY,
            EntityKind::Journal => &JOURNAL,
            EntityKind::VatRate => &VAT_RATE,
        }
    }

    /// Resolve a kind from its collection path segment (`vat-rates`, ...).
    pub fn from_collection(segment: &str) -> Option<EntityKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.descriptor().collection == segment)
    }
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.descriptor().name)
    }
}
