//! Request flow shared by every entity type.
//!
//! validate → load → merge → save, against whatever [`RepositoryPort`] the
//! caller provides. Nothing is written unless every check passed.

use crate::{
    EngineError, PartialRecord, Record, RepositoryPort, ResultEngine, merge, validator,
};

pub async fn list(repo: &dyn RepositoryPort) -> ResultEngine<Vec<Record>> {
    repo.find_all().await
}

pub async fn get(repo: &dyn RepositoryPort, id: i64) -> ResultEngine<Record> {
    require_existing(repo, id).await
}

pub async fn create(repo: &dyn RepositoryPort, payload: &PartialRecord) -> ResultEngine<Record> {
    let descriptor = repo.descriptor();
    validator::validate_create(descriptor, payload)?;
    let record = merge::build_new(descriptor, payload)?;
    repo.save(record).await
}

pub async fn replace(
    repo: &dyn RepositoryPort,
    path_id: Option<i64>,
    payload: &PartialRecord,
) -> ResultEngine<Record> {
    let descriptor = repo.descriptor();
    let id = validator::validate_replace(descriptor, path_id, payload)?;
    require_existing(repo, id).await?;
    let record = merge::build_replacement(descriptor, id, payload)?;
    repo.save(record).await
}

pub async fn patch(
    repo: &dyn RepositoryPort,
    path_id: Option<i64>,
    payload: &PartialRecord,
) -> ResultEngine<Record> {
    let descriptor = repo.descriptor();
    let id = validator::validate_patch(descriptor, path_id, payload)?;
    let existing = require_existing(repo, id).await?;
    let record = merge::merge_patch(descriptor, &existing, payload)?;
    repo.save(record).await
}

pub async fn delete(repo: &dyn RepositoryPort, path_id: Option<i64>) -> ResultEngine<()> {
    let id = validator::validate_delete(repo.descriptor(), path_id)?;
    let existing = require_existing(repo, id).await?;
    repo.delete(&existing).await
}

async fn require_existing(repo: &dyn RepositoryPort, id: i64) -> ResultEngine<Record> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(format!("{} {id}", repo.descriptor().name)))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{EntityDescriptor, EntityKind};

    /// In-memory repository counting the writes it receives.
    struct MemoryRepository {
        kind: EntityKind,
        rows: Mutex<Vec<Record>>,
        writes: Mutex<usize>,
    }

    impl MemoryRepository {
        fn new(kind: EntityKind) -> Self {
            Self {
                kind,
                rows: Mutex::new(Vec::new()),
                writes: Mutex::new(0),
            }
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    #[async_trait]
    impl RepositoryPort for MemoryRepository {
        fn descriptor(&self) -> &'static EntityDescriptor {
            self.kind.descriptor()
        }

        async fn count(&self) -> ResultEngine<u64> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }

        async fn find_all(&self) -> ResultEngine<Vec<Record>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Record>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|row| row.id == Some(id)).cloned())
        }

        async fn save(&self, mut record: Record) -> ResultEngine<Record> {
            *self.writes.lock().unwrap() += 1;
            let mut rows = self.rows.lock().unwrap();
            match record.id {
                Some(id) => {
                    let row = rows
                        .iter_mut()
                        .find(|row| row.id == Some(id))
                        .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;
                    *row = record.clone();
                }
                None => {
                    record.id = Some(rows.len() as i64 + 1);
                    rows.push(record.clone());
                }
            }
            Ok(record)
        }

        async fn delete(&self, record: &Record) -> ResultEngine<()> {
            *self.writes.lock().unwrap() += 1;
            self.rows.lock().unwrap().retain(|row| row.id != record.id);
            Ok(())
        }
    }

    fn currency(code: &str) -> PartialRecord {
        PartialRecord::new()
            .with("code", code)
            .with("name", "Euro")
            .with("symbol", "€")
    }

    #[tokio::test]
    async fn create_assigns_an_id() {
        let repo = MemoryRepository::new(EntityKind::Currency);
        let created = create(&repo, &currency("EUR")).await.unwrap();

        assert_eq!(created.id, Some(1));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_validation_never_writes() {
        let repo = MemoryRepository::new(EntityKind::Currency);
        let created = create(&repo, &currency("EUR")).await.unwrap();
        let id = created.id.unwrap();

        let conflict = create(&repo, &currency("USD").with_id(id)).await;
        assert!(matches!(conflict, Err(EngineError::IdentifierConflict(_))));

        let mismatch = replace(&repo, Some(id), &currency("USD").with_id(id + 1)).await;
        assert!(matches!(mismatch, Err(EngineError::IdentifierMismatch(_))));

        let missing_field = patch(&repo, Some(id), &PartialRecord::new().with_null("code")).await;
        assert!(matches!(missing_field, Err(EngineError::Validation(_))));

        let no_path_id = delete(&repo, None).await;
        assert!(matches!(no_path_id, Err(EngineError::MethodNotAllowed(_))));

        assert_eq!(repo.writes(), 1);
        assert_eq!(get(&repo, id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn updates_of_unknown_ids_are_not_found() {
        let repo = MemoryRepository::new(EntityKind::Currency);

        let replaced = replace(&repo, Some(42), &currency("EUR").with_id(42)).await;
        assert_eq!(
            replaced,
            Err(EngineError::KeyNotFound("currency 42".to_string()))
        );
        let patched = patch(&repo, Some(42), &PartialRecord::new().with("code", "X")).await;
        assert!(matches!(patched, Err(EngineError::KeyNotFound(_))));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn patch_merges_onto_the_stored_record() {
        let repo = MemoryRepository::new(EntityKind::Currency);
        let id = create(&repo, &currency("AAAAAAAAAA")).await.unwrap().id;

        let payload = PartialRecord::new().with("code", "BBBBBBBBBB");
        let patched = patch(&repo, id, &payload.with_id(1)).await.unwrap();

        assert_eq!(patched.text("code").unwrap(), "BBBBBBBBBB");
        assert_eq!(patched.text("name").unwrap(), "Euro");
        assert_eq!(patched.optional_text("symbol").unwrap().as_deref(), Some("€"));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let repo = MemoryRepository::new(EntityKind::Currency);
        let id = create(&repo, &currency("EUR")).await.unwrap().id;

        delete(&repo, id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(matches!(
            delete(&repo, id).await,
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
