// List filtering for GET /expenses
// Category is an exact match, dates are inclusive calendar-day bounds

use crate::expense::Expense;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Query parameters of `GET /expenses`. Filters compose with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Set when the query string could not be read; nothing matches
    #[serde(skip)]
    pub unsatisfiable: bool,
}

/// One side of a date range after parsing
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Open,
    At(NaiveDate),
    /// Unparseable bound, nothing can satisfy it
    Invalid,
}

impl Bound {
    fn from_param(param: Option<&str>) -> Self {
        match param {
            None => Bound::Open,
            Some(raw) => parse_date(raw).map_or(Bound::Invalid, Bound::At),
        }
    }
}

impl ExpenseFilter {
    pub fn by_category(category: &str) -> Self {
        ExpenseFilter {
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    pub fn between(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        ExpenseFilter {
            start_date: start_date.map(str::to_string),
            end_date: end_date.map(str::to_string),
            ..Default::default()
        }
    }

    /// Filter for a query that could not be read, e.g. a repeated key.
    pub fn nothing() -> Self {
        ExpenseFilter {
            unsatisfiable: true,
            ..Default::default()
        }
    }

    /// Keep matching expenses, preserving their order.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        if self.unsatisfiable {
            return Vec::new();
        }

        let category = present(&self.category);
        let start = Bound::from_param(present(&self.start_date));
        let end = Bound::from_param(present(&self.end_date));

        expenses
            .iter()
            .filter(|expense| category.map_or(true, |c| expense.category == c))
            .filter(|expense| within(&expense.date, start, end))
            .cloned()
            .collect()
    }
}

// Empty query values behave as if the parameter was not sent
fn present(param: &Option<String>) -> Option<&str> {
    param.as_deref().filter(|p| !p.is_empty())
}

fn within(date: &str, start: Bound, end: Bound) -> bool {
    if start == Bound::Open && end == Bound::Open {
        return true;
    }

    let date = match parse_date(date) {
        Some(d) => d,
        None => return false,
    };

    let after_start = match start {
        Bound::Open => true,
        Bound::At(s) => date >= s,
        Bound::Invalid => false,
    };
    let before_end = match end {
        Bound::Open => true,
        Bound::At(e) => date <= e,
        Bound::Invalid => false,
    };

    after_start && before_end
}

/// Parse the calendar date out of `YYYY-MM-DD`, RFC 3339, or a naive
/// `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
