//! Entity CRUD operations.
//!
//! Every call runs inside its own DB transaction, so the read of the
//! existing record, the merge and the write of an update happen atomically.

use sea_orm::TransactionTrait;

use crate::{EntityKind, PartialRecord, Record, RepositoryPort, ResultEngine, SeaRepository, pipeline};

use super::{Engine, with_tx};

impl Engine {
    /// Number of stored records of `kind`.
    pub async fn count(&self, kind: EntityKind) -> ResultEngine<u64> {
        SeaRepository::new(kind, &self.database).count().await
    }

    /// All records of `kind`, ordered by id.
    pub async fn list(&self, kind: EntityKind) -> ResultEngine<Vec<Record>> {
        pipeline::list(&SeaRepository::new(kind, &self.database)).await
    }

    pub async fn get(&self, kind: EntityKind, id: i64) -> ResultEngine<Record> {
        pipeline::get(&SeaRepository::new(kind, &self.database), id).await
    }

    /// Create a record; the payload must not carry an id.
    pub async fn create(&self, kind: EntityKind, payload: &PartialRecord) -> ResultEngine<Record> {
        tracing::debug!("creating {kind}");
        with_tx!(self, |db_tx| {
            pipeline::create(&SeaRepository::new(kind, &db_tx), payload).await
        })
    }

    /// Replace every field of the record at `path_id`.
    pub async fn replace(
        &self,
        kind: EntityKind,
        path_id: Option<i64>,
        payload: &PartialRecord,
    ) -> ResultEngine<Record> {
        tracing::debug!("replacing {kind} {path_id:?}");
        with_tx!(self, |db_tx| {
            pipeline::replace(&SeaRepository::new(kind, &db_tx), path_id, payload).await
        })
    }

    /// Merge-patch the record at `path_id`.
    pub async fn patch(
        &self,
        kind: EntityKind,
        path_id: Option<i64>,
        payload: &PartialRecord,
    ) -> ResultEngine<Record> {
        tracing::debug!("patching {kind} {path_id:?}");
        with_tx!(self, |db_tx| {
            pipeline::patch(&SeaRepository::new(kind, &db_tx), path_id, payload).await
        })
    }

    pub async fn delete(&self, kind: EntityKind, path_id: Option<i64>) -> ResultEngine<()> {
        tracing::debug!("deleting {kind} {path_id:?}");
        with_tx!(self, |db_tx| {
            pipeline::delete(&SeaRepository::new(kind, &db_tx), path_id).await
        })
    }
}
