use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use gym_domain::{Context, Delete, Id, Insert, Query, Retrieve, Trainer, TrainerFilter, Update};
use gym_store::Connection;

use crate::commands::{confirm, parse_fields};
use crate::formatting::PrintFormatted;
use crate::validate;

#[derive(Subcommand, Debug)]
pub enum Trainers {
    #[clap(name = "list")]
    List(ListTrainers),
    /// Add a trainer with free-form fields
    #[clap(name = "add")]
    Add(AddTrainer),
    #[clap(name = "set")]
    Update(UpdateTrainer),
    #[clap(name = "delete")]
    Delete(DeleteTrainer),
}

impl Trainers {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        match self {
            Trainers::List(cmd) => cmd.run(db).await,
            Trainers::Add(cmd) => cmd.run(db, ctx).await,
            Trainers::Update(cmd) => cmd.run(db).await,
            Trainers::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListTrainers {
    #[clap(short, long)]
    pub search: Option<String>,
}

impl ListTrainers {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = TrainerFilter {
            search: self.search,
        };
        let trainers: Vec<Trainer> = db.query(&filter).await?;
        println!("{} trainers.", trainers.len());
        trainers.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTrainer {
    #[clap(short, long)]
    pub name: String,
    /// Additional `key=value` fields, e.g. `specialty=Yoga`
    #[clap(short, long = "field")]
    pub fields: Vec<String>,
}

impl AddTrainer {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        validate::not_empty("name", &self.name)?;
        let mut fields = parse_fields(&self.fields)?;
        fields.insert("name".to_string(), Value::String(self.name));

        let trainer: Trainer = db.insert(ctx, fields).await?;
        println!("Trainer added with id {}.", trainer.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateTrainer {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long = "field", required = true)]
    pub fields: Vec<String>,
}

impl UpdateTrainer {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let patch = parse_fields(&self.fields)?;
        let trainer: Trainer = db.update(self.id, patch).await?;
        vec![trainer].print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteTrainer {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteTrainer {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let trainer: Trainer = db.retrieve(self.id).await?;
        let name = trainer.text("name").unwrap_or("trainer").to_string();
        if !confirm(&format!("Delete {}?", name), self.yes)? {
            return Ok(());
        }
        Delete::<Trainer>::delete(db, trainer.id).await?;
        println!("Trainer deleted.");
        Ok(())
    }
}
