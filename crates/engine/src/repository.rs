//! Persistence port and its sea-orm implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder};

use crate::{EngineError, EntityDescriptor, EntityKind, Record, ResultEngine};

/// Storage of one entity type.
///
/// The engine owns no records: every read and write goes through this trait,
/// so the pipeline can run against the database or against a test double.
#[async_trait]
pub trait RepositoryPort: Send + Sync {
    fn descriptor(&self) -> &'static EntityDescriptor;

    async fn count(&self) -> ResultEngine<u64>;

    /// All records, ordered by id.
    async fn find_all(&self) -> ResultEngine<Vec<Record>>;

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Record>>;

    /// Insert `record` when it has no id (assigning one), update it otherwise.
    async fn save(&self, record: Record) -> ResultEngine<Record>;

    async fn delete(&self, record: &Record) -> ResultEngine<()>;
}

/// Run `$body` with `$module` bound to the table module of `$kind`.
macro_rules! with_table {
    ($kind:expr, |$module:ident| $body:expr) => {{
        match $kind {
            EntityKind::Currency => {
                use crate::entities::currency as $module;
                $body
            }
            EntityKind::Journal => {
                use crate::entities::journal as $module;
                $body
            }
            EntityKind::VatRate => {
                use crate::entities::vat_rate as $module;
                $body
            }
        }
    }};
}

/// [`RepositoryPort`] over a sea-orm connection or transaction.
pub struct SeaRepository<'c, C> {
    kind: EntityKind,
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> SeaRepository<'c, C> {
    pub fn new(kind: EntityKind, conn: &'c C) -> Self {
        Self { kind, conn }
    }
}

#[async_trait]
impl<'c, C: ConnectionTrait + Send + Sync> RepositoryPort for SeaRepository<'c, C> {
    fn descriptor(&self) -> &'static EntityDescriptor {
        self.kind.descriptor()
    }

    async fn count(&self) -> ResultEngine<u64> {
        with_table!(self.kind, |table| {
            Ok(table::Entity::find().count(self.conn).await?)
        })
    }

    async fn find_all(&self) -> ResultEngine<Vec<Record>> {
        with_table!(self.kind, |table| {
            table::Entity::find()
                .order_by_asc(table::Column::Id)
                .all(self.conn)
                .await?
                .into_iter()
                .map(table::Model::into_record)
                .collect()
        })
    }

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Record>> {
        with_table!(self.kind, |table| {
            table::Entity::find_by_id(id)
                .one(self.conn)
                .await?
                .map(table::Model::into_record)
                .transpose()
        })
    }

    async fn save(&self, record: Record) -> ResultEngine<Record> {
        with_table!(self.kind, |table| {
            let active = table::ActiveModel::try_from(&record)?;
            let model = if record.id.is_some() {
                active.update(self.conn).await?
            } else {
                active.insert(self.conn).await?
            };
            model.into_record()
        })
    }

    async fn delete(&self, record: &Record) -> ResultEngine<()> {
        let id = record.id.ok_or_else(|| {
            EngineError::BadRequest(format!("cannot delete an unsaved {}", self.kind))
        })?;
        let result = with_table!(self.kind, |table| {
            table::Entity::delete_by_id(id).exec(self.conn).await?
        });
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("{} {id}", self.kind)));
        }
        Ok(())
    }
}
