use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Id;

/// A single check-in. `member_name` is copied at check-in time and
/// stays readable after the member is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Id,
    pub member_id: Id,
    pub member_name: String,
    pub check_in: DateTime<FixedOffset>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CheckIn {
    pub member_id: Id,
    pub member_name: String,
}

/// Attendance records only allow correcting the copied name.
#[derive(Debug, Default, Clone)]
pub struct AttendancePatch {
    pub member_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub member_id: Option<Id>,
    pub date: Option<NaiveDate>,
    pub member_name: Option<String>,
}

impl AttendanceFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn accepts(&self, record: &AttendanceRecord) -> bool {
        if let Some(member_id) = self.member_id {
            if record.member_id != member_id {
                return false;
            }
        }
        if let Some(date) = self.date {
            if record.date != date {
                return false;
            }
        }
        if let Some(name) = &self.member_name {
            let name = name.to_lowercase();
            if !record.member_name.to_lowercase().contains(&name) {
                return false;
            }
        }
        true
    }
}
