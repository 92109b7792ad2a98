use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Id;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Id,
    pub category: String,
    /// NaN when the caller handed in something that is not a number.
    /// Serializes as `null`, which reads back as NaN.
    #[serde(deserialize_with = "nan_from_null")]
    pub amount: f64,
    pub description: String,
    pub date: DateTime<FixedOffset>,
    pub created_by: String,
}

impl PartialEq for Expense {
    fn eq(&self, other: &Self) -> bool {
        let same_amount = self.amount == other.amount
            || (self.amount.is_nan() && other.amount.is_nan());
        self.id == other.id
            && self.category == other.category
            && same_amount
            && self.description == other.description
            && self.date == other.date
            && self.created_by == other.created_by
    }
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Expense amount as entered: a number or a string still to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Parse the leading decimal number of the input, ignoring anything
    /// after it. Yields NaN when there is no leading number.
    pub fn parse(&self) -> f64 {
        match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => parse_leading_float(s),
        }
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

fn parse_leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let prefix_len = s
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let prefix = &s[..prefix_len];

    // Longest prefix that is a valid number wins
    (1..=prefix.len())
        .rev()
        .find_map(|end| prefix[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub category: String,
    pub amount: Amount,
    pub description: String,
}

#[derive(Debug, Default, Clone)]
pub struct ExpensePatch {
    pub category: Option<String>,
    pub amount: Option<Amount>,
    pub description: Option<String>,
}

impl ExpensePatch {
    pub fn apply(self, expense: &mut Expense) {
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount.parse();
        }
        if let Some(description) = self.description {
            expense.description = description;
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    /// (year, month) of the expense date.
    pub month: Option<(i32, u32)>,
}

impl ExpenseFilter {
    pub fn accepts(&self, expense: &Expense) -> bool {
        if let Some(category) = &self.category {
            if !expense.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some((year, month)) = self.month {
            if expense.date.year() != year || expense.date.month() != month {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(Amount::from(12.5).parse(), 12.5);
        assert_eq!(Amount::from("12.5").parse(), 12.5);
        assert_eq!(Amount::from("  40").parse(), 40.0);
        assert_eq!(Amount::from("12.5kg").parse(), 12.5);
        assert_eq!(Amount::from("3e2 units").parse(), 300.0);
        assert_eq!(Amount::from("7.").parse(), 7.0);
        assert!(Amount::from("abc").parse().is_nan());
        assert!(Amount::from("").parse().is_nan());
        assert!(Amount::from("-").parse().is_nan());
    }

    #[test]
    fn test_amount_untagged() {
        let a: Amount = serde_json::from_str("19.99").unwrap();
        assert_eq!(a, Amount::Number(19.99));
        let a: Amount = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(a, Amount::Text("19.99".to_string()));
    }

    #[test]
    fn test_nan_amount_survives_json() {
        let expense = Expense {
            id: 1,
            category: "Equipment".to_string(),
            amount: f64::NAN,
            description: "dumbbells".to_string(),
            date: DateTime::parse_from_rfc3339("2024-03-15T10:00:00Z").unwrap(),
            created_by: "Admin".to_string(),
        };
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"amount\":null"));
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert!(back.amount.is_nan());
        assert_eq!(back, expense);
    }
}
