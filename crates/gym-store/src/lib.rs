pub mod connection;
pub use connection::{Connection, Handle};

pub mod records;
pub use records::Record;

pub mod results;
pub use results::StoreError;

pub mod storage;
pub use storage::{DirectoryStorage, MemoryStorage, Storage};

pub mod session;

pub mod attendance;
pub mod classes;
pub mod expenses;
pub mod members;
pub mod trainers;

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};
    use serde_json::json;

    use gym_domain::{
        AttendanceRecord, Context, Expense, ExpenseDraft, Fields, GymClass, Insert, Member,
        MemberDraft, Plan, Trainer,
    };

    use super::*;

    async fn assert_roundtrip<T: Record + PartialEq + std::fmt::Debug>(db: &Connection) {
        let before: Vec<T> = db.list().await;
        assert!(!before.is_empty(), "{} fixture is empty", T::KEY);
        db.save(&before).await.unwrap();
        let after: Vec<T> = db.list().await;
        assert_eq!(before, after, "{} changed on save", T::KEY);
    }

    #[tokio::test]
    async fn test_save_list_roundtrip() {
        let db = Connection::open_test().await;
        let ctx = Context::at(DateTime::parse_from_rfc3339("2024-03-15T10:00:00+02:00").unwrap());
        let fields = |v: serde_json::Value| -> Fields { v.as_object().cloned().unwrap() };

        for (i, plan) in Plan::ALL.iter().enumerate() {
            let at = Context::at(ctx.now + Duration::minutes(i as i64));
            let member: Member = db
                .insert(
                    &at,
                    MemberDraft {
                        name: format!("Member {}", i),
                        email: format!("m{}@example.com", i),
                        phone: "5551234567".to_string(),
                        plan: *plan,
                        address: Some("1 Main St".to_string()),
                        emergency_contact: None,
                    },
                )
                .await
                .unwrap();
            db.mark_attendance(&at, member.id, &member.name).await.unwrap();
        }
        let first: Vec<Member> = db.list().await;
        db.toggle_payment(&ctx, first[0].id).await.unwrap();

        let _: Expense = db
            .insert(
                &ctx,
                ExpenseDraft {
                    category: "Rent".to_string(),
                    amount: "1200".into(),
                    description: "March".to_string(),
                },
            )
            .await
            .unwrap();
        let _: Expense = db
            .insert(
                &ctx,
                ExpenseDraft {
                    category: "Misc".to_string(),
                    amount: "n/a".into(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
        let _: Trainer = db
            .insert(&ctx, fields(json!({"name": "Sam", "rate": 30.5, "tags": ["yoga"]})))
            .await
            .unwrap();
        let _: GymClass = db
            .insert(&ctx, fields(json!({"name": "Spin", "capacity": 20})))
            .await
            .unwrap();

        assert_roundtrip::<Member>(&db).await;
        assert_roundtrip::<AttendanceRecord>(&db).await;
        assert_roundtrip::<Expense>(&db).await;
        assert_roundtrip::<Trainer>(&db).await;
        assert_roundtrip::<GymClass>(&db).await;
    }

    #[tokio::test]
    async fn test_directory_connection_persists() {
        let dir = std::env::temp_dir().join(format!("gym_conn_{}", rand::random::<u64>()));
        let ctx = Context::at(DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap());

        let member: Member = {
            let db = Connection::open(&dir).await.unwrap();
            db.insert(
                &ctx,
                MemberDraft {
                    name: "Jo Doe".to_string(),
                    email: "jo@example.com".to_string(),
                    phone: "5551234567".to_string(),
                    plan: Plan::Monthly,
                    address: None,
                    emergency_contact: None,
                },
            )
            .await
            .unwrap()
        };

        let db = Connection::open(&dir).await.unwrap();
        let members: Vec<Member> = db.list().await;
        assert_eq!(members, vec![member.clone()]);
        // Ids keep increasing across reopen, even with the same clock
        let next = db.lock().await.next_id(&ctx.now);
        assert!(next > member.id);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
