// Expense data model
// One spending event, plus the unvalidated shape a client posts

use crate::error::{ExpenseError, Result, MISSING_FIELDS, NON_POSITIVE_AMOUNT};
use serde::{Deserialize, Serialize};

/// A stored expense. Only the store hands these out, so every one of them
/// has an id and a positive amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub category: String,
    pub amount: f64,
    /// Kept exactly as the client sent it, parsed only for date filters
    pub date: String,
}

/// A validated expense that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
    pub date: String,
}

impl NewExpense {
    pub(crate) fn into_expense(self, id: u64) -> Expense {
        Expense {
            id,
            category: self.category,
            amount: self.amount,
            date: self.date,
        }
    }
}

/// Request body of `POST /expenses`. Every field is optional here so that a
/// missing field becomes a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ExpenseDraft {
    pub fn new(category: &str, amount: f64, date: &str) -> Self {
        ExpenseDraft {
            category: Some(category.to_string()),
            amount: Some(amount),
            date: Some(date.to_string()),
        }
    }

    /// Presence check first, then positivity.
    pub fn validate(self) -> Result<NewExpense> {
        let category = non_blank(self.category);
        let date = non_blank(self.date);

        let (category, amount, date) = match (category, self.amount, date) {
            (Some(category), Some(amount), Some(date)) => (category, amount, date),
            _ => return Err(ExpenseError::validation(MISSING_FIELDS)),
        };

        if amount.is_nan() || amount <= 0.0 {
            return Err(ExpenseError::validation(NON_POSITIVE_AMOUNT));
        }

        Ok(NewExpense { category, amount, date })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
