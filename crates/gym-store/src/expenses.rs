use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use gym_domain::{Context, Expense, ExpenseDraft, ExpenseFilter, ExpensePatch, Id, Insert, Query, Update};

use crate::{results::StoreError, Connection};

#[async_trait]
impl Query<Expense> for Connection {
    type Filter = ExpenseFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Expense>> {
        let expenses: Vec<Expense> = self.list().await;
        Ok(expenses.into_iter().filter(|e| filter.accepts(e)).collect())
    }
}

#[async_trait]
impl Insert<Expense> for Connection {
    type Draft = ExpenseDraft;

    /// Record an expense. The amount is parsed but not validated,
    /// callers reject malformed amounts before getting here.
    async fn insert(&self, ctx: &Context, draft: ExpenseDraft) -> Result<Expense> {
        let mut conn = self.lock().await;
        let mut expenses: Vec<Expense> = conn.load().await;
        let expense = Expense {
            id: conn.next_id(&ctx.now),
            category: draft.category,
            amount: draft.amount.parse(),
            description: draft.description,
            date: ctx.now,
            created_by: ctx.operator().to_string(),
        };
        if expense.amount.is_nan() {
            warn!(id = expense.id, "expense amount is not a number");
        }
        expenses.push(expense.clone());
        conn.store(&expenses).await?;

        info!(id = expense.id, category = %expense.category, "added expense");
        Ok(expense)
    }
}

#[async_trait]
impl Update<Expense> for Connection {
    type Patch = ExpensePatch;

    async fn update(&self, id: Id, patch: ExpensePatch) -> Result<Expense> {
        let mut conn = self.lock().await;
        let mut expenses: Vec<Expense> = conn.load().await;
        let expense = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound {
                collection: "expenses",
                id,
            })?;
        patch.apply(expense);
        let expense = expense.clone();
        conn.store(&expenses).await?;
        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use gym_domain::{Amount, Delete};

    use super::*;

    fn ctx() -> Context {
        Context::at(DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap())
    }

    fn draft(amount: Amount) -> ExpenseDraft {
        ExpenseDraft {
            category: "Equipment".to_string(),
            amount,
            description: "kettlebells".to_string(),
        }
    }

    #[tokio::test]
    async fn test_expense_insert() {
        let db = Connection::open_test().await;
        let expense: Expense = db
            .insert(&ctx().with_user("desk"), draft("120.50".into()))
            .await
            .unwrap();
        assert_eq!(expense.amount, 120.5);
        assert_eq!(expense.created_by, "desk");
        assert_eq!(expense.date, ctx().now);

        let anonymous: Expense = db.insert(&ctx(), draft(30.0.into())).await.unwrap();
        assert_eq!(anonymous.created_by, "Admin");
    }

    #[tokio::test]
    async fn test_expense_malformed_amount_is_kept() {
        let db = Connection::open_test().await;
        let expense: Expense = db.insert(&ctx(), draft("lots".into())).await.unwrap();
        assert!(expense.amount.is_nan());

        let stored: Vec<Expense> = db.list().await;
        assert_eq!(stored.len(), 1);
        assert!(stored[0].amount.is_nan());
    }

    #[tokio::test]
    async fn test_expense_update_and_delete() {
        let db = Connection::open_test().await;
        let expense: Expense = db.insert(&ctx(), draft(30.0.into())).await.unwrap();
        let patch = ExpensePatch {
            amount: Some("45".into()),
            ..Default::default()
        };
        let updated: Expense = db.update(expense.id, patch).await.unwrap();
        assert_eq!(updated.amount, 45.0);
        assert_eq!(updated.category, "Equipment");

        Delete::<Expense>::delete(&db, expense.id).await.unwrap();
        assert!(db.list::<Expense>().await.is_empty());
    }

    #[tokio::test]
    async fn test_expense_query_by_month() {
        let db = Connection::open_test().await;
        let march = ctx();
        let april = Context::at(DateTime::parse_from_rfc3339("2024-04-02T10:00:00+00:00").unwrap());
        let _: Expense = db.insert(&march, draft(10.0.into())).await.unwrap();
        let _: Expense = db.insert(&april, draft(20.0.into())).await.unwrap();

        let filter = ExpenseFilter {
            month: Some((2024, 4)),
            ..Default::default()
        };
        let found: Vec<Expense> = db.query(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 20.0);
    }
}
