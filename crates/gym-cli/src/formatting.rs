use chrono::{DateTime, FixedOffset};

use gym_domain::{AttendanceRecord, Expense, Fields, GymClass, Member, Trainer};
use gym_reports::{datetime, DashboardStats};

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

fn date(d: &DateTime<FixedOffset>) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn money(amount: f64) -> String {
    if amount.is_nan() {
        return "n/a".to_string();
    }
    format!("${:.2}", amount)
}

/// Caller fields as `key=value`, string values unquoted.
fn fields_line(fields: &Fields) -> String {
    fields
        .iter()
        .map(|(k, v)| match v.as_str() {
            Some(s) => format!("{}={}", k, s),
            None => format!("{}={}", k, v),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        let last_payment = match self.last_payment {
            Some(at) => date(&at),
            None => "None".to_string(),
        };
        let status = if self.paid { "Paid" } else { "Pending" };

        println!("ID:\t\t\t{}", self.id);
        println!("Membership:\t\t{}", self.membership_id);
        println!("Name:\t\t\t{}", self.name);
        println!("Email:\t\t\t{}", self.email);
        println!("Phone:\t\t\t{}", self.phone);
        println!("Plan:\t\t\t{}", self.plan);
        println!("Status:\t\t\t{}", status);
        println!("Joined:\t\t\t{}", date(&self.join_date));
        println!("Last Payment:\t\t{}", last_payment);
        println!("Expires:\t\t{}", date(&self.expiry_date));
        println!("Address:\t\t{}", self.address);
        println!("Emergency Contact:\t{}", self.emergency_contact);
    }
}

impl PrintFormatted for (Member, Member) {
    fn print_formatted(&self) {
        let (old, new) = self;

        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t\t{}{}", old.name, next_name);
        let next_email = next_attr!(old, new, email);
        println!("Email:\t\t\t{}{}", old.email, next_email);
        let next_phone = next_attr!(old, new, phone);
        println!("Phone:\t\t\t{}{}", old.phone, next_phone);
        let next_plan = next_attr!(old, new, plan);
        println!("Plan:\t\t\t{}{}", old.plan, next_plan);
        let next_address = next_attr!(old, new, address);
        println!("Address:\t\t{}{}", old.address, next_address);
        let next_contact = next_attr!(old, new, emergency_contact);
        println!("Emergency Contact:\t{}{}", old.emergency_contact, next_contact);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>14}\t{:<10}\t{:<24}\t{:<30}\t{:<16}\t{:<10}\t{:<8}\t{}",
            "ID", "Membership", "Name", "Email", "Phone", "Plan", "Status", "Expires"
        );
        println!("{:-<150}", "-");
        for member in self {
            let status = if member.paid { "Paid" } else { "Pending" };
            println!(
                "{:>14}\t{:<10}\t{:<24}\t{:<30}\t{:<16}\t{:<10}\t{:<8}\t{}",
                member.id,
                member.membership_id,
                member.name,
                member.email,
                member.phone,
                member.plan.to_string(),
                status,
                date(&member.expiry_date),
            );
        }
    }
}

impl PrintFormatted for Vec<AttendanceRecord> {
    fn print_formatted(&self) {
        println!(
            "{:>14}\t{:<24}\t{:>14}\t{:<10}\t{}",
            "ID", "Member", "Member ID", "Date", "Check-In"
        );
        println!("{:-<100}", "-");
        for record in self {
            println!(
                "{:>14}\t{:<24}\t{:>14}\t{:<10}\t{}",
                record.id,
                record.member_name,
                record.member_id,
                record.date,
                record.check_in.format("%H:%M"),
            );
        }
    }
}

impl PrintFormatted for Vec<Expense> {
    fn print_formatted(&self) {
        println!(
            "{:>14}\t{:<10}\t{:<16}\t{:>12}\t{:<12}\t{}",
            "ID", "Date", "Category", "Amount", "By", "Description"
        );
        println!("{:-<120}", "-");
        for expense in self {
            println!(
                "{:>14}\t{:<10}\t{:<16}\t{:>12}\t{:<12}\t{}",
                expense.id,
                date(&expense.date),
                expense.category,
                money(expense.amount),
                expense.created_by,
                expense.description,
            );
        }
    }
}

impl PrintFormatted for Vec<Trainer> {
    fn print_formatted(&self) {
        println!("{:>14}\t{:<10}\t{}", "ID", "Joined", "Details");
        println!("{:-<100}", "-");
        for trainer in self {
            println!(
                "{:>14}\t{:<10}\t{}",
                trainer.id,
                date(&trainer.join_date),
                fields_line(&trainer.fields)
            );
        }
    }
}

impl PrintFormatted for Vec<GymClass> {
    fn print_formatted(&self) {
        println!("{:>14}\t{:>8}\t{:<8}\t{}", "ID", "Enrolled", "Active", "Details");
        println!("{:-<100}", "-");
        for class in self {
            let active = if class.active { "yes" } else { "no" };
            println!(
                "{:>14}\t{:>8}\t{:<8}\t{}",
                class.id,
                class.enrolled,
                active,
                fields_line(&class.fields)
            );
        }
    }
}

/// Dashboard, relative to `now`.
pub fn print_dashboard(stats: &DashboardStats, now: DateTime<FixedOffset>) {
    let rate = match stats.attendance_rate {
        Some(rate) => format!("{:.0}%", rate),
        None => "-".to_string(),
    };
    println!("Dashboard\t\t{}", now.format("%b %d, %Y %H:%M"));
    println!("{:-<60}", "-");
    println!("Members:\t\t{}", stats.total_members);
    println!("Active:\t\t\t{}", stats.active_memberships);
    println!("Pending Payments:\t{}", stats.pending_payments);
    println!("Revenue:\t\t{}", money(stats.total_revenue));
    println!("Today's Check-Ins:\t{}\t({})", stats.today_attendance, rate);
    println!("Expenses This Month:\t{}", money(stats.monthly_expenses));
    println!(
        "Plans:\t\t\tMonthly {} / Quarterly {} / Yearly {}",
        stats.plan_mix.monthly, stats.plan_mix.quarterly, stats.plan_mix.yearly
    );

    if !stats.expiring_soon.is_empty() {
        println!();
        println!("{} membership(s) expiring soon:", stats.expiring_soon.len());
        for member in &stats.expiring_soon {
            println!(
                "  {}\t{:<24}\t{}\tin {} day(s)",
                member.membership_id,
                member.name,
                date(&member.expiry_date),
                datetime::days_until(member.expiry_date, now),
            );
        }
    }

    if !stats.recent_members.is_empty() {
        println!();
        println!("Recently joined:");
        for member in &stats.recent_members {
            println!(
                "  {}\t{:<24}\t{}\t{}",
                member.membership_id,
                member.name,
                member.plan,
                date(&member.join_date)
            );
        }
    }
}

/// Today's check-ins with time on the floor.
pub fn print_check_ins(records: &[AttendanceRecord], now: DateTime<FixedOffset>) {
    println!("{:<24}\t{:<8}\t{}", "Member", "Check-In", "Duration");
    println!("{:-<60}", "-");
    for record in records {
        println!(
            "{:<24}\t{:<8}\t{}",
            record.member_name,
            record.check_in.format("%H:%M"),
            datetime::elapsed_label(record.check_in, now),
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(178.34), "$178.34");
        assert_eq!(money(50.0), "$50.00");
        assert_eq!(money(f64::NAN), "n/a");
    }

    #[test]
    fn test_fields_line() {
        let fields = json!({"capacity": 20, "name": "Spin"}).as_object().cloned().unwrap();
        assert_eq!(fields_line(&fields), "capacity=20, name=Spin");
    }
}
