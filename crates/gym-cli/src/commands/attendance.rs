use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use gym_domain::{
    AttendanceFilter, AttendancePatch, AttendanceRecord, Context, Delete, Id, Member, Query,
    Retrieve, Update,
};
use gym_store::Connection;

use crate::commands::confirm;
use crate::formatting::{print_check_ins, PrintFormatted};

#[derive(Subcommand, Debug)]
pub enum Attendance {
    /// Check a member in
    #[clap(name = "checkin")]
    CheckIn(CheckInMember),
    /// List check-ins, by default today's
    #[clap(name = "list")]
    List(ListAttendance),
    /// Correct the member name stored on a check-in
    #[clap(name = "rename")]
    Rename(RenameAttendance),
    #[clap(name = "delete")]
    Delete(DeleteAttendance),
}

impl Attendance {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        match self {
            Attendance::CheckIn(cmd) => cmd.run(db, ctx).await,
            Attendance::List(cmd) => cmd.run(db, ctx).await,
            Attendance::Rename(cmd) => cmd.run(db).await,
            Attendance::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckInMember {
    /// Member id
    #[clap(short, long)]
    pub member: Id,
}

impl CheckInMember {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        let member: Member = db
            .retrieve(self.member)
            .await
            .map_err(|_| anyhow!("No member with id {}.", self.member))?;
        let record = db.mark_attendance(ctx, member.id, member.name).await?;
        println!(
            "{} checked in at {}.",
            record.member_name,
            record.check_in.format("%H:%M")
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListAttendance {
    /// Day to list (YYYY-MM-DD), today when omitted
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
    /// All days
    #[clap(short, long, conflicts_with = "date")]
    pub all: bool,
    #[clap(short, long)]
    pub member: Option<Id>,
    #[clap(short, long)]
    pub name: Option<String>,
}

impl ListAttendance {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        let today = ctx.today();
        let date = match (self.all, self.date) {
            (true, _) => None,
            (false, date) => Some(date.unwrap_or(today)),
        };
        let filter = AttendanceFilter {
            member_id: self.member,
            date,
            member_name: self.name,
        };

        let mut records: Vec<AttendanceRecord> = db.query(&filter).await?;
        records.sort_by(|a, b| b.check_in.cmp(&a.check_in));
        println!("{} check-ins.", records.len());
        if date == Some(today) {
            print_check_ins(&records, ctx.now);
        } else {
            records.print_formatted();
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RenameAttendance {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub name: String,
}

impl RenameAttendance {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let patch = AttendancePatch {
            member_name: Some(self.name),
        };
        let record: AttendanceRecord = db.update(self.id, patch).await?;
        println!("Check-in {} now reads {}.", record.id, record.member_name);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteAttendance {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteAttendance {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let record: AttendanceRecord = db.retrieve(self.id).await?;
        let question = format!(
            "Delete check-in of {} on {}?",
            record.member_name, record.date
        );
        if !confirm(&question, self.yes)? {
            return Ok(());
        }
        Delete::<AttendanceRecord>::delete(db, record.id).await?;
        println!("Check-in deleted.");
        Ok(())
    }
}
