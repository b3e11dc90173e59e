//! Display classification for budgets, transactions and anomalies.
//!
//! Thresholds are percentages of the budget limit and 0-100 risk scores.

use crate::domain::model::{Budget, RiskLevel, TransactionStatus};
use serde::Serialize;
use std::fmt;

pub const WATCH_OUT_PERCENT: f64 = 60.0;
pub const OVER_BUDGET_PERCENT: f64 = 80.0;

pub const MEDIUM_RISK_SCORE: f64 = 60.0;
pub const HIGH_RISK_SCORE: f64 = 80.0;

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    OnTrack,
    WatchOut,
    OverBudget,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        // NaN falls through both comparisons.
        if percentage < WATCH_OUT_PERCENT {
            Self::OnTrack
        } else if percentage < OVER_BUDGET_PERCENT {
            Self::WatchOut
        } else {
            Self::OverBudget
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::WatchOut => "Watch Out",
            Self::OverBudget => "Over Budget",
        }
    }

    pub fn chart_color(&self) -> &'static str {
        match self {
            Self::OnTrack => "#10B981",
            Self::WatchOut => "#F59E0B",
            Self::OverBudget => "#EF4444",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::OnTrack => Tone::Positive,
            Self::WatchOut => Tone::Caution,
            Self::OverBudget => Tone::Negative,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Budget {
    /// Share of the limit already spent, in percent.
    ///
    /// `None` when the limit is zero or negative; such budgets are always
    /// classified as over budget.
    pub fn percentage(&self) -> Option<f64> {
        if self.limit > 0.0 {
            Some(self.spent / self.limit * 100.0)
        } else {
            None
        }
    }

    pub fn status(&self) -> BudgetStatus {
        match self.percentage() {
            Some(percentage) => BudgetStatus::from_percentage(percentage),
            None => BudgetStatus::OverBudget,
        }
    }

    /// Negative once the budget is overspent.
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    /// Progress bar fill, capped at 100.
    pub fn fill_percentage(&self) -> f64 {
        self.percentage().map_or(100.0, |p| p.clamp(0.0, 100.0))
    }
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_SCORE {
            Self::High
        } else if score >= MEDIUM_RISK_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Self::High => Tone::Negative,
            Self::Medium => Tone::Caution,
            Self::Low => Tone::Positive,
        }
    }
}

impl TransactionStatus {
    pub fn tone(&self) -> Tone {
        match self {
            Self::Approved => Tone::Positive,
            Self::Denied | Self::Flagged => Tone::Negative,
            Self::Review => Tone::Caution,
            Self::Cleared | Self::Unknown => Tone::Neutral,
        }
    }
}

/// Aggregates shown above the budget cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTotals {
    pub count: usize,
    pub allocated: f64,
    pub spent: f64,
}

impl BudgetTotals {
    pub fn of(budgets: &[Budget]) -> Self {
        Self {
            count: budgets.len(),
            allocated: budgets.iter().map(|b| b.limit).sum(),
            spent: budgets.iter().map(|b| b.spent).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget(limit: f64, spent: f64) -> Budget {
        Budget {
            id: 1,
            name: "Groceries".to_string(),
            limit,
            spent,
            category: "Food".to_string(),
            color: "#10B981".to_string(),
        }
    }

    #[test]
    fn test_budget_thresholds() {
        assert_eq!(budget(500.0, 0.0).status(), BudgetStatus::OnTrack);
        assert_eq!(budget(500.0, 299.0).status(), BudgetStatus::OnTrack);
        assert_eq!(budget(500.0, 300.0).status(), BudgetStatus::WatchOut);
        assert_eq!(budget(500.0, 399.0).status(), BudgetStatus::WatchOut);
        assert_eq!(budget(500.0, 400.0).status(), BudgetStatus::OverBudget);
        assert_eq!(budget(500.0, 900.0).status(), BudgetStatus::OverBudget);
    }

    #[test]
    fn test_percentage_divides_before_scaling() {
        for (limit, spent) in [(0.5, 0.3), (0.7, 0.42), (3.0, 1.8), (150.0, 120.0)] {
            let b = budget(limit, spent);
            let expected = spent / limit * 100.0;
            assert_eq!(b.percentage(), Some(expected));
            assert_eq!(b.status(), BudgetStatus::from_percentage(expected));
        }
    }

    #[test]
    fn test_mock_budget_labels() {
        // Groceries 64%, Entertainment 90%, Transportation 93%, Utilities 80%
        assert_eq!(budget(500.0, 320.0).status().label(), "Watch Out");
        assert_eq!(budget(200.0, 180.0).status().label(), "Over Budget");
        assert_eq!(budget(300.0, 280.0).status().label(), "Over Budget");
        assert_eq!(budget(150.0, 120.0).status().label(), "Over Budget");
    }

    #[test]
    fn test_zero_limit_is_over_budget() {
        let b = budget(0.0, 0.0);
        assert_eq!(b.percentage(), None);
        assert_eq!(b.status(), BudgetStatus::OverBudget);
        assert_eq!(b.fill_percentage(), 100.0);
    }

    #[test]
    fn test_remaining_and_fill() {
        let over = budget(200.0, 250.0);
        assert_eq!(over.remaining(), -50.0);
        assert_eq!(over.fill_percentage(), 100.0);

        let under = budget(200.0, 50.0);
        assert_eq!(under.remaining(), 150.0);
        assert_eq!(under.fill_percentage(), 25.0);
    }

    #[test]
    fn test_status_colors_and_tones() {
        assert_eq!(BudgetStatus::OnTrack.chart_color(), "#10B981");
        assert_eq!(BudgetStatus::WatchOut.chart_color(), "#F59E0B");
        assert_eq!(BudgetStatus::OverBudget.chart_color(), "#EF4444");
        assert_eq!(BudgetStatus::WatchOut.tone(), Tone::Caution);
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(59.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(72.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(79.99), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(80.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::High);
    }

    #[test]
    fn test_transaction_status_tone() {
        assert_eq!(TransactionStatus::Approved.tone(), Tone::Positive);
        assert_eq!(TransactionStatus::Denied.tone(), Tone::Negative);
        assert_eq!(TransactionStatus::Flagged.tone(), Tone::Negative);
        assert_eq!(TransactionStatus::Review.tone(), Tone::Caution);
        assert_eq!(TransactionStatus::Cleared.tone(), Tone::Neutral);
    }

    #[test]
    fn test_totals() {
        let budgets = vec![budget(500.0, 320.0), budget(200.0, 180.0)];
        let totals = BudgetTotals::of(&budgets);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.allocated, 700.0);
        assert_eq!(totals.spent, 500.0);
        assert_eq!(BudgetTotals::of(&[]).count, 0);
    }
}
