use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use gym_domain::{
    Context, Delete, Expense, ExpenseDraft, ExpenseFilter, ExpensePatch, Id, Insert, Query,
    Retrieve, Update,
};
use gym_store::Connection;

use crate::commands::confirm;
use crate::formatting::PrintFormatted;
use crate::validate;

#[derive(Subcommand, Debug)]
pub enum Expenses {
    #[clap(name = "list")]
    List(ListExpenses),
    /// Record an expense
    #[clap(name = "add")]
    Add(AddExpense),
    #[clap(name = "set")]
    Update(UpdateExpense),
    #[clap(name = "delete")]
    Delete(DeleteExpense),
}

impl Expenses {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        match self {
            Expenses::List(cmd) => cmd.run(db).await,
            Expenses::Add(cmd) => cmd.run(db, ctx).await,
            Expenses::Update(cmd) => cmd.run(db).await,
            Expenses::Delete(cmd) => cmd.run(db).await,
        }
    }
}

/// Parse a `YYYY-MM` month.
fn parse_month(value: &str) -> Result<(i32, u32)> {
    let invalid = || anyhow!("'{}' is not a month, expected YYYY-MM", value);
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[derive(Args, Debug)]
pub struct ListExpenses {
    /// Month to list, as YYYY-MM
    #[clap(short, long)]
    pub month: Option<String>,
    #[clap(short, long)]
    pub category: Option<String>,
}

impl ListExpenses {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let month = self.month.as_deref().map(parse_month).transpose()?;
        let filter = ExpenseFilter {
            category: self.category,
            month,
        };
        let mut expenses: Vec<Expense> = db.query(&filter).await?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        let total: f64 = expenses.iter().map(|e| e.amount).sum();
        println!("{} expenses, total ${:.2}.", expenses.len(), total);
        expenses.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddExpense {
    #[clap(short, long)]
    pub category: String,
    #[clap(short, long)]
    pub amount: String,
    #[clap(short, long, default_value = "")]
    pub description: String,
    #[clap(short, long)]
    pub yes: bool,
}

impl AddExpense {
    pub async fn run(self, db: &Connection, ctx: &Context) -> Result<()> {
        validate::not_empty("category", &self.category)?;
        let amount = validate::amount(&self.amount)?;

        let question = format!(
            "Record ${:.2} for {}?",
            amount.parse(),
            self.category
        );
        if !confirm(&question, self.yes)? {
            return Ok(());
        }

        let draft = ExpenseDraft {
            category: self.category,
            amount,
            description: self.description,
        };
        let expense: Expense = db.insert(ctx, draft).await?;
        println!("Expense recorded with id {} by {}.", expense.id, expense.created_by);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateExpense {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub category: Option<String>,
    #[clap(short, long)]
    pub amount: Option<String>,
    #[clap(short, long)]
    pub description: Option<String>,
}

impl UpdateExpense {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let amount = self.amount.as_deref().map(validate::amount).transpose()?;
        let patch = ExpensePatch {
            category: self.category,
            amount,
            description: self.description,
        };
        let expense: Expense = db.update(self.id, patch).await?;
        vec![expense].print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteExpense {
    #[clap(short, long)]
    pub id: Id,
    #[clap(short, long)]
    pub yes: bool,
}

impl DeleteExpense {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let expense: Expense = db.retrieve(self.id).await?;
        vec![expense.clone()].print_formatted();
        if !confirm("Delete expense?", self.yes)? {
            return Ok(());
        }
        Delete::<Expense>::delete(db, expense.id).await?;
        println!("Expense deleted.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), (2024, 3));
        assert_eq!(parse_month("2024-12").unwrap(), (2024, 12));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024").is_err());
        assert!(parse_month("March").is_err());
    }
}
