use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Ledger, Subscription};

/// Everything the presentation layer renders after an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReport {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub total: Cents,
    pub average: Option<Cents>,
    pub most_expensive: Option<Subscription>,
    pub cheapest: Option<Subscription>,
    pub yearly_projection: Cents,
    pub breakdown: Vec<ShareSummary>,
    /// name -> cost series, shared by the pie and bar charts
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareSummary {
    pub position: usize,
    pub name: String,
    pub cost: Cents,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Cents,
}

impl LedgerReport {
    /// Recompute every aggregate from the ledger.
    pub fn build(ledger: &Ledger) -> Self {
        Self::build_at(ledger, Utc::now())
    }

    pub fn build_at(ledger: &Ledger, generated_at: DateTime<Utc>) -> Self {
        let breakdown: Vec<ShareSummary> = ledger
            .percentage_breakdown()
            .map(|shares| {
                shares
                    .enumerate()
                    .map(|(i, share)| ShareSummary {
                        position: i + 1,
                        name: share.name.to_string(),
                        cost: share.cost_cents,
                        percentage: share.percentage,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            generated_at,
            count: ledger.len(),
            total: ledger.total(),
            average: ledger.average().ok(),
            most_expensive: ledger.most_expensive().ok().cloned(),
            cheapest: ledger.cheapest().ok().cloned(),
            yearly_projection: ledger.yearly_projection(),
            breakdown,
            chart: chart_series(ledger),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Chart data in insertion order.
pub fn chart_series(ledger: &Ledger) -> Vec<ChartPoint> {
    ledger
        .iter()
        .map(|sub| ChartPoint {
            label: sub.name.clone(),
            value: sub.cost_cents,
        })
        .collect()
}
