// In-memory Expense Store
// Ordered, append-only, shared between handlers and the scheduler

use crate::error::{ExpenseError, Result};
use crate::expense::{Expense, NewExpense};
use crate::filter::ExpenseFilter;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct StoreInner {
    expenses: Vec<Expense>,
    /// Last id handed out. Independent of `expenses.len()`.
    last_id: u64,
}

/// Cheap-to-clone handle to the process's expenses. Build one at startup and
/// hand clones to whoever needs it.
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| ExpenseError::StoreUnavailable)
    }

    /// Assign the next id and append. Counter bump and push happen under
    /// the same lock.
    pub fn append(&self, new: NewExpense) -> Result<Expense> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let expense = new.into_expense(inner.last_id);
        inner.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Snapshot of every expense in insertion order
    pub fn all(&self) -> Result<Vec<Expense>> {
        Ok(self.lock()?.expenses.clone())
    }

    pub fn query(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let inner = self.lock()?;
        Ok(filter.apply(&inner.expenses))
    }

    /// Sum of every stored amount
    pub fn total_spending(&self) -> Result<f64> {
        let inner = self.lock()?;
        Ok(inner.expenses.iter().map(|e| e.amount).sum())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.expenses.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Panic while holding the lock. Call from a throwaway thread.
    #[cfg(test)]
    pub(crate) fn poison_for_test(&self) {
        let _guard = self.inner.lock();
        panic!("poisoning expense store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseDraft;
    use std::thread;

    fn new_expense(category: &str, amount: f64) -> NewExpense {
        ExpenseDraft::new(category, amount, "2024-01-01").validate().unwrap()
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = ExpenseStore::new();

        for expected in 1..=5 {
            let expense = store.append(new_expense("food", 1.0)).unwrap();
            assert_eq!(expense.id, expected);
        }
        assert_eq!(store.len().unwrap(), 5);
    }

    #[test]
    fn test_all_returns_insertion_order() {
        let store = ExpenseStore::new();
        store.append(new_expense("food", 10.0)).unwrap();
        store.append(new_expense("travel", 5.0)).unwrap();

        let all = store.all().unwrap();
        let categories: Vec<&str> = all.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["food", "travel"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = ExpenseStore::new();
        store.append(new_expense("food", 10.0)).unwrap();

        let mut snapshot = store.all().unwrap();
        snapshot.clear();

        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ExpenseStore::new();
        let handle = store.clone();

        handle.append(new_expense("food", 2.5)).unwrap();

        assert!(!store.is_empty().unwrap());
        assert_eq!(store.total_spending().unwrap(), 2.5);
    }

    #[test]
    fn test_total_spending() {
        let store = ExpenseStore::new();
        assert_eq!(store.total_spending().unwrap(), 0.0);

        store.append(new_expense("food", 10.0)).unwrap();
        store.append(new_expense("travel", 5.5)).unwrap();
        assert_eq!(store.total_spending().unwrap(), 15.5);
    }

    #[test]
    fn test_query_uses_filter() {
        let store = ExpenseStore::new();
        store.append(new_expense("food", 10.0)).unwrap();
        store.append(new_expense("travel", 5.0)).unwrap();
        store.append(new_expense("food", 20.0)).unwrap();

        let food = store.query(&ExpenseFilter::by_category("food")).unwrap();
        let ids: Vec<u64> = food.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_concurrent_appends_get_unique_ids() {
        let store = ExpenseStore::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        store.append(new_expense("food", 1.0)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<u64> = store.all().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=400).collect::<Vec<u64>>());
    }

    #[test]
    fn test_poisoned_lock_reports_unavailable() {
        let store = ExpenseStore::new();
        let poisoner = store.clone();

        let _ = thread::spawn(move || poisoner.poison_for_test()).join();

        assert!(matches!(store.all(), Err(ExpenseError::StoreUnavailable)));
    }
}
