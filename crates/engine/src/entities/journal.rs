//! `journals` table.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{Record, ResultEngine};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub(crate) fn into_record(self) -> ResultEngine<Record> {
        Ok(Record::new(Some(self.id))
            .with("code", Some(self.code.into()))
            .with("name", Some(self.name.into()))
            .with("description", self.description.map(Into::into))
            .with("createdAt", Some(self.created_at.into())))
    }
}

impl TryFrom<&Record> for ActiveModel {
    type Error = crate::EngineError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.map_or(ActiveValue::NotSet, ActiveValue::Set),
            code: ActiveValue::Set(record.text("code")?),
            name: ActiveValue::Set(record.text("name")?),
            description: ActiveValue::Set(record.optional_text("description")?),
            created_at: ActiveValue::Set(record.instant("createdAt")?),
        })
    }
}
