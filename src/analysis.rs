// Spending analysis
// Per-category totals and the top category

use crate::expense::Expense;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Totals keyed by category, in order of each category's first appearance.
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category with the largest total. On a tie the earlier category wins.
    pub fn highest(&self) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (category, total) in self.iter() {
            match best {
                Some((_, best_total)) if total <= best_total => {}
                _ => best = Some((category, total)),
            }
        }
        best.map(|(category, _)| category)
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, total) in &self.entries {
            map.serialize_entry(category, total)?;
        }
        map.end()
    }
}

/// Payload of `GET /expenses/analysis`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalysis {
    pub total_by_category: CategoryTotals,
    /// `null` when there are no expenses
    pub highest_spending_category: Option<String>,
}

pub fn analyze(expenses: &[Expense]) -> SpendingAnalysis {
    let mut totals = CategoryTotals::default();
    for expense in expenses {
        totals.add(&expense.category, expense.amount);
    }

    let highest_spending_category = totals.highest().map(str::to_string);

    SpendingAnalysis {
        total_by_category: totals,
        highest_spending_category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expense(id: u64, category: &str, amount: f64) -> Expense {
        Expense {
            id,
            category: category.to_string(),
            amount,
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = analyze(&[]);

        assert!(analysis.total_by_category.is_empty());
        assert_eq!(analysis.highest_spending_category, None);
        assert_eq!(
            serde_json::to_value(&analysis).unwrap(),
            json!({"totalByCategory": {}, "highestSpendingCategory": null})
        );
    }

    #[test]
    fn test_totals_and_highest() {
        let expenses = vec![
            expense(1, "food", 10.0),
            expense(2, "travel", 5.0),
            expense(3, "food", 20.0),
        ];

        let analysis = analyze(&expenses);

        assert_eq!(analysis.total_by_category.get("food"), Some(30.0));
        assert_eq!(analysis.total_by_category.get("travel"), Some(5.0));
        assert_eq!(analysis.total_by_category.get("rent"), None);
        assert_eq!(analysis.highest_spending_category.as_deref(), Some("food"));
    }

    #[test]
    fn test_tie_goes_to_first_seen_category() {
        let expenses = vec![
            expense(1, "travel", 7.0),
            expense(2, "food", 3.0),
            expense(3, "food", 4.0),
        ];

        let analysis = analyze(&expenses);
        assert_eq!(analysis.highest_spending_category.as_deref(), Some("travel"));
    }

    #[test]
    fn test_totals_keep_first_appearance_order() {
        let expenses = vec![
            expense(1, "rent", 1.0),
            expense(2, "food", 1.0),
            expense(3, "rent", 1.0),
            expense(4, "books", 1.0),
        ];

        let analysis = analyze(&expenses);
        let order: Vec<&str> = analysis.total_by_category.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["rent", "food", "books"]);

        let text = serde_json::to_string(&analysis.total_by_category).unwrap();
        assert_eq!(text, r#"{"rent":2.0,"food":1.0,"books":1.0}"#);
    }
}
