use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use gym_domain::{
    AttendanceFilter, AttendancePatch, AttendanceRecord, CheckIn, Context, Id, Insert, Query,
    Update,
};

use crate::{results::StoreError, Connection};

#[async_trait]
impl Query<AttendanceRecord> for Connection {
    type Filter = AttendanceFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<AttendanceRecord>> {
        let records: Vec<AttendanceRecord> = self.list().await;
        Ok(records.into_iter().filter(|r| filter.accepts(r)).collect())
    }
}

#[async_trait]
impl Insert<AttendanceRecord> for Connection {
    type Draft = CheckIn;

    /// Append a check-in. The member is not looked up and repeated
    /// check-ins on one day are all kept.
    async fn insert(&self, ctx: &Context, check_in: CheckIn) -> Result<AttendanceRecord> {
        let mut conn = self.lock().await;
        let mut records: Vec<AttendanceRecord> = conn.load().await;
        let record = AttendanceRecord {
            id: conn.next_id(&ctx.now),
            member_id: check_in.member_id,
            member_name: check_in.member_name,
            check_in: ctx.now,
            date: ctx.today(),
        };
        records.push(record.clone());
        conn.store(&records).await?;

        info!(id = record.id, member_id = record.member_id, "checked in");
        Ok(record)
    }
}

#[async_trait]
impl Update<AttendanceRecord> for Connection {
    type Patch = AttendancePatch;

    async fn update(&self, id: Id, patch: AttendancePatch) -> Result<AttendanceRecord> {
        let mut conn = self.lock().await;
        let mut records: Vec<AttendanceRecord> = conn.load().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound {
                collection: "attendance",
                id,
            })?;
        if let Some(member_name) = patch.member_name {
            record.member_name = member_name;
        }
        let record = record.clone();
        conn.store(&records).await?;
        Ok(record)
    }
}

impl Connection {
    pub async fn mark_attendance(
        &self,
        ctx: &Context,
        member_id: Id,
        member_name: impl Into<String>,
    ) -> Result<AttendanceRecord> {
        let check_in = CheckIn {
            member_id,
            member_name: member_name.into(),
        };
        self.insert(ctx, check_in).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, NaiveDate};

    use gym_domain::{Delete, Member, MemberDraft, Plan};

    use super::*;

    fn ctx(s: &str) -> Context {
        Context::at(DateTime::parse_from_rfc3339(s).unwrap())
    }

    #[tokio::test]
    async fn test_mark_attendance_appends() {
        let db = Connection::open_test().await;
        let morning = ctx("2024-03-15T07:00:00+00:00");
        for i in 0..3 {
            let at = Context::at(morning.now + Duration::minutes(i));
            db.mark_attendance(&at, 1, "Jo Doe").await.unwrap();
        }

        let records: Vec<AttendanceRecord> = db.list().await;
        assert_eq!(records.len(), 3);
        let mut ids: Vec<Id> = records.iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(records.iter().all(|r| r.member_id == 1 && r.member_name == "Jo Doe"));
    }

    #[tokio::test]
    async fn test_mark_attendance_same_instant() {
        let db = Connection::open_test().await;
        let now = ctx("2024-03-15T07:00:00+00:00");
        let a = db.mark_attendance(&now, 1, "Jo Doe").await.unwrap();
        let b = db.mark_attendance(&now, 1, "Jo Doe").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.date, b.date);
    }

    #[tokio::test]
    async fn test_attendance_date_is_local_day() {
        let db = Connection::open_test().await;
        // Still the 15th at UTC-5, already the 16th in UTC
        let late = ctx("2024-03-15T22:30:00-05:00");
        let record = db.mark_attendance(&late, 1, "Jo Doe").await.unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(record.check_in, late.now);
    }

    #[tokio::test]
    async fn test_attendance_survives_member_delete() {
        let db = Connection::open_test().await;
        let now = ctx("2024-03-15T07:00:00+00:00");
        let member: Member = db
            .insert(
                &now,
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
            .unwrap();
        db.mark_attendance(&now, member.id, &member.name).await.unwrap();
        Delete::<Member>::delete(&db, member.id).await.unwrap();

        let records: Vec<AttendanceRecord> = db
            .query(&AttendanceFilter {
                member_id: Some(member.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_name, "Jo Doe");
    }

    #[tokio::test]
    async fn test_attendance_rename() {
        let db = Connection::open_test().await;
        let now = ctx("2024-03-15T07:00:00+00:00");
        let record = db.mark_attendance(&now, 1, "Jo Do").await.unwrap();
        let patch = AttendancePatch {
            member_name: Some("Jo Doe".to_string()),
        };
        let renamed: AttendanceRecord = db.update(record.id, patch).await.unwrap();
        assert_eq!(renamed.member_name, "Jo Doe");
        assert_eq!(renamed.check_in, record.check_in);
    }
}
