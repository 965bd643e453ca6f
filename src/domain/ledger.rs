use std::slice;

use thiserror::Error;

use super::subscription::normalize_name;
use super::{Cents, Subscription};

/// Months in a billing year, used for the yearly projection.
pub const MONTHS_PER_YEAR: Cents = 12;

/// Largest monthly total a ledger can hold; its yearly projection still fits in `Cents`.
pub const MAX_TOTAL: Cents = Cents::MAX / MONTHS_PER_YEAR;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Subscription name cannot be empty")]
    EmptyName,

    #[error("Cost must be greater than zero (got {0} cents)")]
    NonPositiveCost(Cents),

    #[error("Cost {cost} cents would push the monthly total past {max} cents")]
    TotalTooLarge { cost: Cents, max: Cents },

    #[error("Subscription already exists: {0}")]
    Duplicate(String),

    #[error("Index {index} is out of range ({len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No subscriptions yet")]
    Empty,
}

impl LedgerError {
    /// Returns true for errors caused by invalid user input on add.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::EmptyName
                | LedgerError::NonPositiveCost(_)
                | LedgerError::TotalTooLarge { .. }
        )
    }
}

/// The subscriptions entered during one session, in insertion order.
///
/// No two entries share a name when compared case-insensitively, and every
/// cost is strictly positive, so the total is zero only for an empty ledger.
/// The total never exceeds [`MAX_TOTAL`], which keeps every aggregate free of
/// overflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<Subscription>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a subscription. The name is stored trimmed.
    pub fn add(&mut self, name: &str, cost_cents: Cents) -> Result<&Subscription, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if cost_cents <= 0 {
            return Err(LedgerError::NonPositiveCost(cost_cents));
        }
        if let Some(existing) = self.find(name) {
            return Err(LedgerError::Duplicate(existing.name.clone()));
        }
        if cost_cents > MAX_TOTAL - self.total() {
            return Err(LedgerError::TotalTooLarge {
                cost: cost_cents,
                max: MAX_TOTAL,
            });
        }

        self.entries.push(Subscription::new(name, cost_cents));
        let index = self.entries.len() - 1;
        Ok(&self.entries[index])
    }

    /// Remove the entry at a zero-based index, shifting later entries down.
    pub fn remove(&mut self, index: usize) -> Result<Subscription, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Subscription> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Subscription> {
        self.entries.get(index)
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Subscription> {
        let key = normalize_name(name);
        self.entries.iter().find(|s| s.name_key() == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Sum of all monthly costs; zero when empty.
    pub fn total(&self) -> Cents {
        self.entries.iter().map(|s| s.cost_cents).sum()
    }

    /// Mean monthly cost, rounded half-up to the cent.
    pub fn average(&self) -> Result<Cents, LedgerError> {
        if self.entries.is_empty() {
            return Err(LedgerError::Empty);
        }
        let count = self.entries.len() as Cents;
        let total = self.total();
        let (quotient, remainder) = (total / count, total % count);
        Ok(if 2 * remainder >= count {
            quotient + 1
        } else {
            quotient
        })
    }

    /// The costliest entry. Ties go to the one added first.
    pub fn most_expensive(&self) -> Result<&Subscription, LedgerError> {
        self.entries
            .iter()
            .reduce(|best, s| if s.cost_cents > best.cost_cents { s } else { best })
            .ok_or(LedgerError::Empty)
    }

    /// The cheapest entry. Ties go to the one added first.
    pub fn cheapest(&self) -> Result<&Subscription, LedgerError> {
        self.entries
            .iter()
            .reduce(|best, s| if s.cost_cents < best.cost_cents { s } else { best })
            .ok_or(LedgerError::Empty)
    }

    /// Lazily yields each entry's share of the total, in insertion order.
    pub fn percentage_breakdown(&self) -> Result<Breakdown<'_>, LedgerError> {
        let total = self.total();
        if total == 0 {
            return Err(LedgerError::Empty);
        }
        Ok(Breakdown {
            entries: self.entries.iter(),
            total,
        })
    }

    /// Monthly total projected over a year.
    pub fn yearly_projection(&self) -> Cents {
        self.total() * MONTHS_PER_YEAR
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Subscription;
    type IntoIter = slice::Iter<'a, Subscription>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One row of the percentage breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share<'a> {
    pub name: &'a str,
    pub cost_cents: Cents,
    pub percentage: f64,
}

/// Iterator returned by [`Ledger::percentage_breakdown`].
#[derive(Debug, Clone)]
pub struct Breakdown<'a> {
    entries: slice::Iter<'a, Subscription>,
    total: Cents,
}

impl<'a> Iterator for Breakdown<'a> {
    type Item = Share<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let sub = self.entries.next()?;
        Some(Share {
            name: &sub.name,
            cost_cents: sub.cost_cents,
            percentage: sub.cost_cents as f64 / self.total as f64 * 100.0,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Breakdown<'_> {}
