//! `vat_rates` table.
//!
//! SQLite has no decimal column type, so `percentage` is stored as its
//! canonical string and parsed back on load.

use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{EngineError, Record, ResultEngine};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vat_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub percentage: String,
    pub description: Option<String>,
    pub valid_from: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub(crate) fn into_record(self) -> ResultEngine<Record> {
        let percentage = Decimal::from_str(&self.percentage).map_err(|err| {
            DbErr::Type(format!(
                "vat_rates.percentage \"{}\" is not a decimal: {err}",
                self.percentage
            ))
        })?;

        Ok(Record::new(Some(self.id))
            .with("code", Some(self.code.into()))
            .with("percentage", Some(percentage.into()))
            .with("description", self.description.map(Into::into))
            .with("validFrom", self.valid_from.map(Into::into)))
    }
}

impl TryFrom<&Record> for ActiveModel {
    type Error = EngineError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            code: ActiveValue::Set(record.text("code")?),
            percentage: ActiveValue::Set(record.decimal("percentage")?.to_string()),
            description: ActiveValue::Set(record.optional_text("description")?),
            valid_from: ActiveValue::Set(record.optional_instant("validFrom")?),
        })
    }
}
