use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, Months, TimeZone};
use serde::{Deserialize, Serialize};

use crate::Id;

/// Prefix of the human readable membership id.
pub const MEMBERSHIP_ID_PREFIX: &str = "FP";

/// A membership is "expiring soon" within this many days.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    Monthly,
    Quarterly,
    Yearly,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Monthly, Plan::Quarterly, Plan::Yearly];

    /// Revenue counted per paid member.
    pub fn price(&self) -> f64 {
        match self {
            Plan::Monthly => 50.0,
            Plan::Quarterly => 45.0,
            Plan::Yearly => 41.67,
        }
    }

    pub fn months(&self) -> u32 {
        match self {
            Plan::Monthly => 1,
            Plan::Quarterly => 3,
            Plan::Yearly => 12,
        }
    }

    /// Expiry of a membership on this plan starting at `anchor`.
    ///
    /// Month arithmetic happens on the wall-clock date of the anchor and
    /// keeps its time of day and offset. A day past the end of the target
    /// month overflows into the following month, so Jan 31 + 1 month is
    /// Mar 2 in a leap year and Feb 29 + 1 year is Mar 1. Returns `None`
    /// only outside chrono's date range.
    pub fn expiry_from(&self, anchor: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        let local = anchor.naive_local();
        let date = local
            .date()
            .with_day(1)?
            .checked_add_months(Months::new(self.months()))?
            .checked_add_days(Days::new(u64::from(local.day() - 1)))?;
        anchor
            .offset()
            .from_local_datetime(&date.and_time(local.time()))
            .single()
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Plan::Monthly => "Monthly",
            Plan::Quarterly => "Quarterly",
            Plan::Yearly => "Yearly",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlan(pub String);

impl fmt::Display for UnknownPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown plan '{}', expected Monthly, Quarterly or Yearly", self.0)
    }
}

impl std::error::Error for UnknownPlan {}

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(Plan::Monthly),
            "quarterly" => Ok(Plan::Quarterly),
            "yearly" => Ok(Plan::Yearly),
            _ => Err(UnknownPlan(s.to_string())),
        }
    }
}

/// Build the membership id for a record id: prefix plus the last
/// eight decimal digits.
pub fn membership_id(id: Id) -> String {
    let digits = id.to_string();
    let tail = &digits[digits.len().saturating_sub(8)..];
    format!("{}{}", MEMBERSHIP_ID_PREFIX, tail)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan: Plan,
    pub paid: bool,
    pub join_date: DateTime<FixedOffset>,
    pub last_payment: Option<DateTime<FixedOffset>>,
    pub membership_id: String,
    pub expiry_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact: String,
}

impl Member {
    /// Paid, and the expiry lies in `(now, now + 7 days]`.
    pub fn is_expiring_soon(&self, now: DateTime<FixedOffset>) -> bool {
        let horizon = now + Duration::days(EXPIRY_WARNING_DAYS);
        self.paid && self.expiry_date > now && self.expiry_date <= horizon
    }

    pub fn is_expired(&self, now: DateTime<FixedOffset>) -> bool {
        self.expiry_date <= now
    }

    /// Case insensitive match against name, email, phone, plan and
    /// membership id.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self.phone.contains(&term)
            || self.plan.to_string().to_lowercase().contains(&term)
            || self.membership_id.to_lowercase().contains(&term)
    }
}

/// Caller supplied fields of a new member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub plan: Plan,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

/// Member fields that may be edited. Payment state is not in here, it
/// only changes by toggling the payment.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan: Option<Plan>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.plan.is_none()
            && self.address.is_none()
            && self.emergency_contact.is_none()
    }

    /// Shallow merge into `member`.
    pub fn apply(self, member: &mut Member) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(phone) = self.phone {
            member.phone = phone;
        }
        if let Some(plan) = self.plan {
            member.plan = plan;
        }
        if let Some(address) = self.address {
            member.address = address;
        }
        if let Some(emergency_contact) = self.emergency_contact {
            member.emergency_contact = emergency_contact;
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<Id>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub plan: Option<Plan>,
    pub paid: Option<bool>,
    pub search: Option<String>,
}

impl MemberFilter {
    pub fn accepts(&self, member: &Member) -> bool {
        if let Some(id) = self.id {
            if member.id != id {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !member.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(email) = &self.email {
            if !member.email.eq_ignore_ascii_case(email) {
                return false;
            }
        }
        if let Some(plan) = self.plan {
            if member.plan != plan {
                return false;
            }
        }
        if let Some(paid) = self.paid {
            if member.paid != paid {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !member.matches(term) {
                return false;
            }
        }
        true
    }
}
