use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::services::validator::ValidSubmission;
use crate::types::db::registrant::{self, Entity as Registrant};

/// RegistrantStore owns the waitlist table and its create-or-update semantics
///
/// The unique index on `email` is the synchronization point for concurrent
/// submissions of the same identity: a losing insert falls back to the
/// update path instead of surfacing a uniqueness violation.
pub struct RegistrantStore {
    db: DatabaseConnection,
}

impl RegistrantStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or update the registrant for a validated submission
    ///
    /// Existing rows are overwritten in place: `full_name`, `phone_number`
    /// and `interests` take the submission's values and `updated_at` is
    /// refreshed, while `id` and `created_at` stay untouched.
    ///
    /// # Returns
    /// * `Ok((model, was_new))` - The stored row; `was_new` is true only for
    ///   a first-time insert
    /// * `Err(InternalError)` - The database could not be reached or the
    ///   operation failed; never a uniqueness violation
    pub async fn upsert(
        &self,
        submission: &ValidSubmission,
    ) -> Result<(registrant::Model, bool), InternalError> {
        let existing = self.find_by_email(&submission.email).await?;

        match existing {
            Some(model) => {
                let updated = self.overwrite(model, submission).await?;
                Ok((updated, false))
            }
            None => self.insert_or_recover(submission).await,
        }
    }

    /// Find a registrant by normalized email
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<registrant::Model>, InternalError> {
        Registrant::find()
            .filter(registrant::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_registrant_by_email", e))
    }

    /// Count all registrants
    pub async fn count(&self) -> Result<u64, InternalError> {
        Registrant::find()
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("count_registrants", e))
    }

    async fn insert_or_recover(
        &self,
        submission: &ValidSubmission,
    ) -> Result<(registrant::Model, bool), InternalError> {
        let now = Utc::now().timestamp();

        let new_registrant = registrant::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(submission.email.clone()),
            full_name: Set(submission.full_name.clone()),
            phone_number: Set(submission.phone_number.clone()),
            interests: Set(encode_interests(&submission.interests)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match new_registrant.insert(&self.db).await {
            Ok(model) => Ok((model, true)),
            Err(e) if is_unique_violation(&e) => {
                // Lost the insert race for this email; the winner's row now
                // exists, so take the update path instead.
                let model = self
                    .find_by_email(&submission.email)
                    .await?
                    .ok_or_else(|| InternalError::missing_row("insert_registrant_conflict"))?;
                let updated = self.overwrite(model, submission).await?;
                Ok((updated, false))
            }
            Err(e) => Err(InternalError::database("insert_registrant", e)),
        }
    }

    async fn overwrite(
        &self,
        model: registrant::Model,
        submission: &ValidSubmission,
    ) -> Result<registrant::Model, InternalError> {
        let now = Utc::now().timestamp();

        let mut active_model: registrant::ActiveModel = model.into();
        active_model.full_name = Set(submission.full_name.clone());
        active_model.phone_number = Set(submission.phone_number.clone());
        active_model.interests = Set(encode_interests(&submission.interests));
        active_model.updated_at = Set(now);

        active_model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("update_registrant", e))
    }
}

fn encode_interests(interests: &[String]) -> String {
    serde_json::to_string(interests).unwrap_or_else(|_| "[]".to_string())
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    e.to_string().contains("UNIQUE")
}

impl std::fmt::Debug for RegistrantStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrantStore")
            .field("db", &"<connection>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::sync::Arc;

    async fn setup_test_store() -> (DatabaseConnection, RegistrantStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = RegistrantStore::new(db.clone());

        (db, store)
    }

    fn submission(email: &str, full_name: &str, interests: &[&str]) -> ValidSubmission {
        ValidSubmission {
            email: email.to_string(),
            full_name: full_name.to_string(),
            phone_number: "+1 212 555 0100".to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_new_registrant() {
        let (_db, store) = setup_test_store().await;

        let (model, was_new) = store
            .upsert(&submission("ada@x.com", "Ada Lovelace", &["Birthday"]))
            .await
            .unwrap();

        assert!(was_new);
        assert_eq!(model.email, "ada@x.com");
        assert_eq!(model.full_name, "Ada Lovelace");
        assert_eq!(model.interest_tags(), vec!["Birthday"]);
        assert_eq!(model.created_at, model.updated_at);
        assert!(!model.id.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_round_trip() {
        let (_db, store) = setup_test_store().await;

        store
            .upsert(&submission("ada@x.com", "Ada Lovelace", &["Birthday", "Wedding"]))
            .await
            .unwrap();

        let found = store.find_by_email("ada@x.com").await.unwrap().unwrap();

        assert_eq!(found.full_name, "Ada Lovelace");
        assert_eq!(found.phone_number, "+1 212 555 0100");
        assert_eq!(found.interest_tags(), vec!["Birthday", "Wedding"]);
    }

    #[tokio::test]
    async fn test_upsert_same_email_updates_in_place() {
        let (_db, store) = setup_test_store().await;

        let (first, was_new_first) = store
            .upsert(&submission("ada@x.com", "Ada Lovelace", &["Birthday", "Wedding"]))
            .await
            .unwrap();
        assert!(was_new_first);

        let (second, was_new_second) = store
            .upsert(&submission("ada@x.com", "Ada King", &["Wedding"]))
            .await
            .unwrap();

        assert!(!was_new_second);
        assert_eq!(second.id, first.id);
        assert_eq!(second.full_name, "Ada King");
        assert_eq!(second.interest_tags(), vec!["Wedding"]);
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= second.created_at);

        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_upsert_different_emails_create_separate_rows() {
        let (_db, store) = setup_test_store().await;

        store
            .upsert(&submission("ada@x.com", "Ada Lovelace", &["Birthday"]))
            .await
            .unwrap();
        store
            .upsert(&submission("grace@x.com", "Grace Hopper", &["Wedding"]))
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_same_email_upserts_produce_one_row() {
        // File-backed database so both tasks genuinely share state across
        // pool connections.
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("race.db").display());

        let db = Database::connect(&url)
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let store = Arc::new(RegistrantStore::new(db.clone()));

        let store_a = Arc::clone(&store);
        let store_b = Arc::clone(&store);
        let submission_a = submission("a@x.com", "First Caller", &["Birthday"]);
        let submission_b = submission("a@x.com", "Second Caller", &["Wedding"]);
        let (result_a, result_b) = tokio::join!(
            store_a.upsert(&submission_a),
            store_b.upsert(&submission_b),
        );

        // Neither caller sees a uniqueness violation
        result_a.unwrap();
        result_b.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_count_starts_at_zero() {
        let (_db, store) = setup_test_store().await;

        assert_eq!(store.count().await.unwrap(), 0);
    }
}
