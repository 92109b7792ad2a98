use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use gym_domain::{
    Context, Delete, Id, Insert, Member, MemberDraft, MemberFilter, MemberPatch, Plan, Query,
    Retrieve, Update,
};
use gym_store::Connection;

use crate::commands::confirm;
use crate::formatting::PrintFormatted;
use crate::validate;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Search name, email, phone, plan and membership id
    #[clap(name = "search")]
    Search(SearchMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
    /// Toggle the payment status of a member
    #[clap(name = "pay")]
    Pay(TogglePayment),
}

impl Members {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Search(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db, ctx).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
            Members::Pay(cmd) => cmd.run(db, ctx).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: Id,
}

impl ShowMember {
    /// Run the command and show a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub plan: Option<Plan>,
    /// Only paid members
    #[clap(long, conflicts_with = "unpaid")]
    pub paid: bool,
    /// Only members with a pending payment
    #[clap(long)]
    pub unpaid: bool,
}

impl ListMembers {
    /// Run the command and list members, newest first
    pub async fn run(self, db: &Connection) -> Result<()> {
        let paid = match (self.paid, self.unpaid) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        let filter = MemberFilter {
            name: self.name,
            email: self.email,
            plan: self.plan,
            paid,
            ..Default::default()
        };

        let mut members: Vec<Member> = db.query(&filter).await?;
        members.sort_by(|a, b| b.join_date.cmp(&a.join_date));
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SearchMembers {
    pub term: String,
}

impl SearchMembers {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter {
            search: Some(self.term.clone()),
            ..Default::default()
        };
        let mut members: Vec<Member> = db.query(&filter).await?;
        if members.is_empty() {
            println!("No members found matching \"{}\".", self.term);
            return Ok(());
        }
        members.sort_by(|a, b| b.join_date.cmp(&a.join_date));
        members.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub email: String,
    #[clap(short = 't', long)]
    pub phone: String,
    #[clap(short, long, default_value_t = Plan::Monthly)]
    pub plan: Plan,
    #[clap(long)]
    pub address: Option<String>,
    #[clap(long)]
    pub emergency_contact: Option<String>,
    /// Do not ask for confirmation
    #[clap(short, long)]
    pub yes: bool,
}

impl AddMember {
    /// Run the command and add a member to the store
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        validate::not_empty("name", &self.name)?;
        validate::email(&self.email)?;
        validate::phone(&self.phone)?;

        // Check if a member with this email already exists
        let members: Vec<Member> = db
            .query(&MemberFilter {
                email: Some(self.email.clone()),
                ..Default::default()
            })
            .await?;
        if !members.is_empty() {
            return Err(anyhow!("Member with email {} already exists.", self.email));
        }

        println!();
        println!("Name:\t\t{}", self.name);
        println!("Email:\t\t{}", self.email);
        println!("Phone:\t\t{}", self.phone);
        println!("Plan:\t\t{} (${:.2})", self.plan, self.plan.price());
        println!();
        if !confirm("Add member?", self.yes)? {
            return Ok(());
        }

        let draft = MemberDraft {
            name: self.name.trim().to_string(),
            email: self.email,
            phone: self.phone,
            plan: self.plan,
            address: self.address,
            emergency_contact: self.emergency_contact,
        };
        let member: Member = db.insert(ctx, draft).await?;
        println!(
            "Member added with id {} ({}), expires {}.",
            member.id,
            member.membership_id,
            member.expiry_date.format("%Y-%m-%d")
        );

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short = 't', long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub plan: Option<Plan>,
    #[clap(long)]
    pub address: Option<String>,
    #[clap(long)]
    pub emergency_contact: Option<String>,
    #[clap(short, long)]
    pub yes: bool,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Connection) -> Result<()> {
        if let Some(email) = &self.email {
            validate::email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate::phone(phone)?;
        }
        let patch = MemberPatch {
            name: self.name,
            email: self.email,
            phone: self.phone,
            plan: self.plan,
            address: self.address,
            emergency_contact: self.emergency_contact,
        };
        if patch.is_empty() {
            println!("Nothing to update.");
            return Ok(());
        }

        let member: Member = db.retrieve(self.id).await?;
        if let Some(email) = &patch.email {
            let others: Vec<Member> = db
                .query(&MemberFilter {
                    email: Some(email.clone()),
                    ..Default::default()
                })
                .await?;
            if others.iter().any(|m| m.id != member.id) {
                return Err(anyhow!("Member with email {} already exists.", email));
            }
        }

        let mut preview = member.clone();
        patch.clone().apply(&mut preview);
        println!();
        (member, preview).print_formatted();
        println!();
        if !confirm("Update member?", self.yes)? {
            return Ok(());
        }

        let _: Member = db.update(self.id, patch).await?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteMember {
    /// Delete a member. Check-ins of the member are kept.
    pub async fn run(&self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        if !confirm("Delete member?", self.yes)? {
            return Ok(());
        }
        Delete::<Member>::delete(db, member.id).await?;
        println!("Member deleted.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct TogglePayment {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub yes: bool,
}

impl TogglePayment {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let question = if member.paid {
            format!("Mark {} as unpaid?", member.name)
        } else {
            format!("Mark {} as paid?", member.name)
        };
        if !confirm(&question, self.yes)? {
            return Ok(());
        }

        let member = db.toggle_payment(ctx, self.id).await?;
        if member.paid {
            println!(
                "{} paid, membership runs until {}.",
                member.name,
                member.expiry_date.format("%Y-%m-%d")
            );
        } else {
            println!("{} marked as pending.", member.name);
        }
        Ok(())
    }
}
