use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use gym_domain::{ClassFilter, Context, Fields, GymClass, Id, Insert, Query, Update, CLASS_RESERVED};

use crate::{
    records::{merge, without_reserved},
    results::StoreError,
    Connection,
};

#[async_trait]
impl Query<GymClass> for Connection {
    type Filter = ClassFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<GymClass>> {
        let classes: Vec<GymClass> = self.list().await;
        Ok(classes.into_iter().filter(|c| filter.accepts(c)).collect())
    }
}

#[async_trait]
impl Insert<GymClass> for Connection {
    type Draft = Fields;

    /// New classes start active with nobody enrolled, whatever the
    /// caller passes for those keys.
    async fn insert(&self, ctx: &Context, fields: Fields) -> Result<GymClass> {
        let mut conn = self.lock().await;
        let mut classes: Vec<GymClass> = conn.load().await;
        let class = GymClass {
            id: conn.next_id(&ctx.now),
            enrolled: 0,
            active: true,
            fields: without_reserved(fields, &CLASS_RESERVED),
        };
        classes.push(class.clone());
        conn.store(&classes).await?;

        info!(id = class.id, "added class");
        Ok(class)
    }
}

#[async_trait]
impl Update<GymClass> for Connection {
    type Patch = Fields;

    async fn update(&self, id: Id, patch: Fields) -> Result<GymClass> {
        let mut conn = self.lock().await;
        let mut classes: Vec<GymClass> = conn.load().await;
        let class = classes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound {
                collection: "classes",
                id,
            })?;
        *class = merge(class, patch)?;
        let class = class.clone();
        conn.store(&classes).await?;
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::json;

    use gym_domain::Delete;

    use super::*;

    fn ctx() -> Context {
        Context::at(DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap())
    }

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_class_insert_defaults() {
        let db = Connection::open_test().await;
        let class: GymClass = db
            .insert(
                &ctx(),
                fields(json!({"name": "Spin", "schedule": "Mon 18:00", "enrolled": 12, "active": false})),
            )
            .await
            .unwrap();
        assert_eq!(class.enrolled, 0);
        assert!(class.active);
        assert_eq!(class.text("schedule"), Some("Mon 18:00"));
        assert!(!class.fields.contains_key("enrolled"));
    }

    #[tokio::test]
    async fn test_class_update_may_change_enrollment() {
        let db = Connection::open_test().await;
        let class: GymClass = db.insert(&ctx(), fields(json!({"name": "Spin"}))).await.unwrap();
        let updated: GymClass = db
            .update(class.id, fields(json!({"enrolled": 5, "active": false})))
            .await
            .unwrap();
        assert_eq!(updated.enrolled, 5);
        assert!(!updated.active);
        assert_eq!(updated.text("name"), Some("Spin"));
    }

    #[tokio::test]
    async fn test_class_query_active() {
        let db = Connection::open_test().await;
        let spin: GymClass = db.insert(&ctx(), fields(json!({"name": "Spin"}))).await.unwrap();
        let _: GymClass = db.insert(&ctx(), fields(json!({"name": "Yoga"}))).await.unwrap();
        let _: GymClass = db.update(spin.id, fields(json!({"active": false}))).await.unwrap();

        let active: Vec<GymClass> = db
            .query(&ClassFilter {
                active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text("name"), Some("Yoga"));

        Delete::<GymClass>::delete(&db, spin.id).await.unwrap();
        assert_eq!(db.list::<GymClass>().await.len(), 1);
    }
}
