use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use gym_domain::{AttendanceRecord, Context, Expense, Member, Plan};
use gym_store::Connection;

use crate::datetime::same_month;

/// Sum of plan prices over paid members.
pub fn total_revenue(members: &[Member]) -> f64 {
    members
        .iter()
        .filter(|m| m.paid)
        .map(|m| m.plan.price())
        .sum()
}

/// Check-ins recorded on a calendar day.
pub fn attendance_on(records: &[AttendanceRecord], day: NaiveDate) -> usize {
    records.iter().filter(|r| r.date == day).count()
}

/// Today's check-ins as a percentage of all members, `None` without
/// members.
pub fn attendance_rate(checked_in: usize, members: usize) -> Option<f64> {
    if members == 0 {
        return None;
    }
    Some(checked_in as f64 / members as f64 * 100.0)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanMix {
    pub monthly: usize,
    pub quarterly: usize,
    pub yearly: usize,
}

impl PlanMix {
    pub fn count(&self, plan: Plan) -> usize {
        match plan {
            Plan::Monthly => self.monthly,
            Plan::Quarterly => self.quarterly,
            Plan::Yearly => self.yearly,
        }
    }
}

pub fn plan_mix(members: &[Member]) -> PlanMix {
    members.iter().fold(PlanMix::default(), |mut mix, m| {
        match m.plan {
            Plan::Monthly => mix.monthly += 1,
            Plan::Quarterly => mix.quarterly += 1,
            Plan::Yearly => mix.yearly += 1,
        }
        mix
    })
}

/// Paid members whose membership ends within the next seven days.
pub fn expiring_soon(members: &[Member], now: DateTime<FixedOffset>) -> Vec<Member> {
    members
        .iter()
        .filter(|m| m.is_expiring_soon(now))
        .cloned()
        .collect()
}

/// Expenses dated in the current calendar month. Amounts that are
/// not numbers make the total NaN.
pub fn monthly_expenses(expenses: &[Expense], now: DateTime<FixedOffset>) -> f64 {
    expenses
        .iter()
        .filter(|e| same_month(e.date, now))
        .map(|e| e.amount)
        .sum()
}

/// The `limit` most recently joined members, newest first.
pub fn recent_members(members: &[Member], limit: usize) -> Vec<Member> {
    let mut members = members.to_vec();
    members.sort_by(|a, b| b.join_date.cmp(&a.join_date));
    members.truncate(limit);
    members
}

/// Number of recent members on the dashboard.
pub const RECENT_MEMBERS: usize = 5;

/// Everything the dashboard shows, computed in one pass over the
/// stored collections.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_memberships: usize,
    pub pending_payments: usize,
    pub total_revenue: f64,
    pub today_attendance: usize,
    pub attendance_rate: Option<f64>,
    pub monthly_expenses: f64,
    pub plan_mix: PlanMix,
    pub expiring_soon: Vec<Member>,
    pub recent_members: Vec<Member>,
}

impl DashboardStats {
    pub fn compute(
        members: &[Member],
        expenses: &[Expense],
        attendance: &[AttendanceRecord],
        ctx: &Context,
    ) -> Self {
        let active = members.iter().filter(|m| m.paid).count();
        let today_attendance = attendance_on(attendance, ctx.today());
        Self {
            total_members: members.len(),
            active_memberships: active,
            pending_payments: members.len() - active,
            total_revenue: total_revenue(members),
            today_attendance,
            attendance_rate: attendance_rate(today_attendance, members.len()),
            monthly_expenses: monthly_expenses(expenses, ctx.now),
            plan_mix: plan_mix(members),
            expiring_soon: expiring_soon(members, ctx.now),
            recent_members: recent_members(members, RECENT_MEMBERS),
        }
    }

    /// Read the collections and compute. Never writes.
    pub async fn load(db: &Connection, ctx: &Context) -> Self {
        let members: Vec<Member> = db.list().await;
        let expenses: Vec<Expense> = db.list().await;
        let attendance: Vec<AttendanceRecord> = db.list().await;
        Self::compute(&members, &expenses, &attendance, ctx)
    }
}
