use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use gym_domain::{Context, Fields, Id, Insert, Query, Trainer, TrainerFilter, Update, TRAINER_RESERVED};

use crate::{
    records::{merge, without_reserved},
    results::StoreError,
    Connection,
};

#[async_trait]
impl Query<Trainer> for Connection {
    type Filter = TrainerFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Trainer>> {
        let trainers: Vec<Trainer> = self.list().await;
        Ok(trainers.into_iter().filter(|t| filter.accepts(t)).collect())
    }
}

#[async_trait]
impl Insert<Trainer> for Connection {
    type Draft = Fields;

    async fn insert(&self, ctx: &Context, fields: Fields) -> Result<Trainer> {
        let mut conn = self.lock().await;
        let mut trainers: Vec<Trainer> = conn.load().await;
        let trainer = Trainer {
            id: conn.next_id(&ctx.now),
            join_date: ctx.now,
            fields: without_reserved(fields, &TRAINER_RESERVED),
        };
        trainers.push(trainer.clone());
        conn.store(&trainers).await?;

        info!(id = trainer.id, "added trainer");
        Ok(trainer)
    }
}

#[async_trait]
impl Update<Trainer> for Connection {
    type Patch = Fields;

    async fn update(&self, id: Id, patch: Fields) -> Result<Trainer> {
        let mut conn = self.lock().await;
        let mut trainers: Vec<Trainer> = conn.load().await;
        let trainer = trainers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                collection: "trainers",
                id,
            })?;
        *trainer = merge(trainer, patch)?;
        let trainer = trainer.clone();
        conn.store(&trainers).await?;
        Ok(trainer)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::json;

    use gym_domain::{Delete, Retrieve};

    use super::*;

    fn ctx() -> Context {
        Context::at(DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap())
    }

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_trainer_insert_ignores_reserved_keys() {
        let db = Connection::open_test().await;
        let trainer: Trainer = db
            .insert(
                &ctx(),
                fields(json!({"id": 1, "joinDate": "1999-01-01T00:00:00Z", "name": "Sam", "specialty": "Yoga"})),
            )
            .await
            .unwrap();
        assert_ne!(trainer.id, 1);
        assert_eq!(trainer.join_date, ctx().now);
        assert_eq!(trainer.text("name"), Some("Sam"));
        assert_eq!(trainer.fields.len(), 2);
    }

    #[tokio::test]
    async fn test_trainer_update() {
        let db = Connection::open_test().await;
        let trainer: Trainer = db
            .insert(&ctx(), fields(json!({"name": "Sam", "specialty": "Yoga"})))
            .await
            .unwrap();
        let updated: Trainer = db
            .update(trainer.id, fields(json!({"specialty": "Pilates", "phone": "5551234567"})))
            .await
            .unwrap();
        assert_eq!(updated.text("name"), Some("Sam"));
        assert_eq!(updated.text("specialty"), Some("Pilates"));
        assert_eq!(updated.text("phone"), Some("5551234567"));

        let stored: Trainer = db.retrieve(trainer.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_trainer_update_bad_patch_writes_nothing() {
        let db = Connection::open_test().await;
        let trainer: Trainer = db.insert(&ctx(), fields(json!({"name": "Sam"}))).await.unwrap();
        let before = db.raw("trainers").await;

        let result: Result<Trainer> = db.update(trainer.id, fields(json!({"joinDate": false}))).await;
        assert!(result.is_err());
        assert_eq!(db.raw("trainers").await, before);
    }

    #[tokio::test]
    async fn test_trainer_delete() {
        let db = Connection::open_test().await;
        let trainer: Trainer = db.insert(&ctx(), fields(json!({"name": "Sam"}))).await.unwrap();
        Delete::<Trainer>::delete(&db, trainer.id).await.unwrap();
        assert!(db.list::<Trainer>().await.is_empty());
    }
}
