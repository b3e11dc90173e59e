use crate::app::budgets::BudgetCard;
use crate::domain::classify::BudgetTotals;
use crate::domain::model::{AnomalySummary, Budget, Overview};
use crate::domain::ports::{AnomalyService, BudgetService};
use serde::Serialize;

/// Budgets shown on the landing page.
pub const DASHBOARD_BUDGETS: usize = 4;

/// Everything the landing page shows, fetched in one go.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub budgets: Vec<Budget>,
    pub summary: AnomalySummary,
    pub overview: Overview,
}

impl Dashboard {
    pub async fn load<B, A>(money: &B, anomalies: &A) -> Self
    where
        B: BudgetService + ?Sized,
        A: AnomalyService + ?Sized,
    {
        let (mut budgets, summary, overview) =
            tokio::join!(money.budgets(), anomalies.summary(), money.overview());

        budgets.truncate(DASHBOARD_BUDGETS);
        tracing::debug!(
            "Dashboard loaded: {} budgets, {} anomalies",
            budgets.len(),
            summary.total_anomalies
        );

        Self {
            budgets,
            summary,
            overview,
        }
    }

    pub fn security_alerts(&self) -> u32 {
        self.summary.total_anomalies
    }

    pub fn budget_cards(&self) -> Vec<BudgetCard> {
        self.budgets.iter().map(BudgetCard::from).collect()
    }

    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals::of(&self.budgets)
    }

    pub fn savings_progress(&self) -> Option<f64> {
        (self.overview.savings_goal > 0.0)
            .then(|| self.overview.current_savings * 100.0 / self.overview.savings_goal)
    }
}
