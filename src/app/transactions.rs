use crate::api::anomalies::DEFAULT_LOG_LIMIT;
use crate::api::transactions::DEFAULT_PAGE_SIZE;
use crate::domain::model::{
    Anomaly, AnomalyStatus, RecordId, RiskFilter, StatusUpdate, Transaction, TransactionStatus,
};
use crate::domain::ports::{AnomalyService, TransactionService};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Flagged,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tab::All => "all",
            Tab::Flagged => "flagged",
        })
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Tab::All),
            "flagged" => Ok(Tab::Flagged),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Deny,
}

impl ReviewDecision {
    fn status(self) -> TransactionStatus {
        match self {
            ReviewDecision::Approve => TransactionStatus::Approved,
            ReviewDecision::Deny => TransactionStatus::Denied,
        }
    }
}

/// Decisions still available for a transaction.
pub fn review_actions(transaction: &Transaction) -> &'static [ReviewDecision] {
    if transaction.status.is_settled() {
        &[]
    } else {
        &[ReviewDecision::Approve, ReviewDecision::Deny]
    }
}

/// Transactions page state: the full list and the flagged feed.
pub struct TransactionsView<'a, T, A>
where
    T: TransactionService + ?Sized,
    A: AnomalyService + ?Sized,
{
    transactions: &'a T,
    anomalies: &'a A,
    tab: Tab,
    all: Vec<Transaction>,
    suspicious: Vec<Transaction>,
    logs: Vec<Anomaly>,
}

impl<'a, T, A> TransactionsView<'a, T, A>
where
    T: TransactionService + ?Sized,
    A: AnomalyService + ?Sized,
{
    pub fn new(transactions: &'a T, anomalies: &'a A) -> Self {
        Self {
            transactions,
            anomalies,
            tab: Tab::All,
            all: Vec::new(),
            suspicious: Vec::new(),
            logs: Vec::new(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.all
    }

    pub fn suspicious(&self) -> &[Transaction] {
        &self.suspicious
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.logs
    }

    /// Switches tab and loads what that tab shows.
    pub async fn open(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::All => {
                self.all = self.transactions.list(DEFAULT_PAGE_SIZE, 0).await;
            }
            Tab::Flagged => {
                let (suspicious, logs) = tokio::join!(
                    self.transactions.suspicious(),
                    self.anomalies.logs(DEFAULT_LOG_LIMIT, RiskFilter::All)
                );
                self.suspicious = suspicious;
                self.logs = logs;
            }
        }
    }

    /// Applies the decision to the transaction in both lists.
    ///
    /// Returns false when no open transaction with that id is loaded.
    /// Settled transactions keep their status.
    pub fn review(&mut self, id: RecordId, decision: ReviewDecision) -> bool {
        let mut changed = false;
        for transaction in self
            .all
            .iter_mut()
            .chain(self.suspicious.iter_mut())
            .filter(|t| t.id == id && !t.status.is_settled())
        {
            transaction.status = decision.status();
            changed = true;
        }

        if changed {
            tracing::info!("Transaction {} marked {}", id, decision.status());
        } else {
            tracing::warn!("Transaction {} is not open for review", id);
        }
        changed
    }

    pub fn approve(&mut self, id: RecordId) -> bool {
        self.review(id, ReviewDecision::Approve)
    }

    pub fn deny(&mut self, id: RecordId) -> bool {
        self.review(id, ReviewDecision::Deny)
    }

    /// Sends the new status, then mirrors it on the anomaly if it is loaded.
    pub async fn set_anomaly_status(
        &mut self,
        id: RecordId,
        status: AnomalyStatus,
        notes: &str,
    ) -> StatusUpdate {
        let update = self.anomalies.update_status(id, status, notes).await;
        if !update.success {
            tracing::warn!(
                "Anomaly {} status update was not confirmed: {}",
                id,
                update.error.as_deref().unwrap_or("unknown error")
            );
        }
        match self.logs.iter_mut().find(|a| a.id == id) {
            Some(anomaly) => anomaly.status = status,
            None => tracing::debug!("Anomaly {} is not loaded, nothing to mirror", id),
        }
        update
    }
}
