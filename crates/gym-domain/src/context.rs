use chrono::{DateTime, FixedOffset, Local, NaiveDate};

/// Operator name recorded when no session is active.
pub const DEFAULT_OPERATOR: &str = "Admin";

/// Everything an operation needs to know about "now" and "who".
#[derive(Debug, Clone)]
pub struct Context {
    pub now: DateTime<FixedOffset>,
    pub user: Option<String>,
}

impl Context {
    /// Context for the local wall clock, without an operator.
    ///
    /// The local offset is fixed at the current instant. Dates derived
    /// from this context, plan expiries included, keep that offset even
    /// when they fall on the other side of a daylight saving change.
    pub fn current() -> Self {
        Self::at(Local::now().fixed_offset())
    }

    /// Context pinned to an instant.
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self { now, user: None }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Calendar day of `now` in the context's own offset.
    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn operator(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_OPERATOR)
    }
}
