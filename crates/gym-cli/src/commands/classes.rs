use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use gym_domain::{ClassFilter, Context, Delete, GymClass, Id, Insert, Query, Retrieve, Update};
use gym_store::Connection;

use crate::commands::{confirm, parse_fields};
use crate::formatting::PrintFormatted;
use crate::validate;

#[derive(Subcommand, Debug)]
pub enum Classes {
    #[clap(name = "list")]
    List(ListClasses),
    /// Add a class with free-form fields
    #[clap(name = "add")]
    Add(AddClass),
    /// Update fields of a class, `active` and `enrolled` included
    #[clap(name = "set")]
    Update(UpdateClass),
    #[clap(name = "delete")]
    Delete(DeleteClass),
}

impl Classes {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        match self {
            Classes::List(cmd) => cmd.run(db).await,
            Classes::Add(cmd) => cmd.run(db, ctx).await,
            Classes::Update(cmd) => cmd.run(db).await,
            Classes::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListClasses {
    #[clap(short, long)]
    pub search: Option<String>,
    /// Only active classes
    #[clap(short, long, conflicts_with = "inactive")]
    pub active: bool,
    #[clap(long)]
    pub inactive: bool,
}

impl ListClasses {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let active = match (self.active, self.inactive) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        let filter = ClassFilter {
            active,
            search: self.search,
        };
        let classes: Vec<GymClass> = db.query(&filter).await?;
        println!("{} classes.", classes.len());
        classes.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddClass {
    #[clap(short, long)]
    pub name: String,
    /// Additional `key=value` fields, e.g. `capacity=20`
    #[clap(short, long = "field")]
    pub fields: Vec<String>,
}

impl AddClass {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        validate::not_empty("name", &self.name)?;
        let mut fields = parse_fields(&self.fields)?;
        fields.insert("name".to_string(), Value::String(self.name));

        let class: GymClass = db.insert(ctx, fields).await?;
        println!("Class added with id {}.", class.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateClass {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long = "field", required = true)]
    pub fields: Vec<String>,
}

impl UpdateClass {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let patch = parse_fields(&self.fields)?;
        let class: GymClass = db.update(self.id, patch).await?;
        vec![class].print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteClass {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteClass {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let class: GymClass = db.retrieve(self.id).await?;
        let name = class.text("name").unwrap_or("class").to_string();
        if !confirm(&format!("Delete {}?", name), self.yes)? {
            return Ok(());
        }
        Delete::<GymClass>::delete(db, class.id).await?;
        println!("Class deleted.");
        Ok(())
    }
}
