use crate::api::client::{ApiClient, NO_QUERY};
use crate::api::mock;
use crate::domain::model::Transaction;
use crate::domain::ports::TransactionService;
use async_trait::async_trait;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct TransactionHistory {
    client: ApiClient,
}

impl TransactionHistory {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransactionService for TransactionHistory {
    async fn list(&self, limit: u32, offset: u32) -> Vec<Transaction> {
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        self.client
            .fetch_or(
                "transactions",
                || self.client.get_json("/transactions", &query),
                mock::transactions,
            )
            .await
    }

    async fn suspicious(&self) -> Vec<Transaction> {
        self.client
            .fetch_or(
                "suspicious_transactions",
                || self.client.get_json("/transactions/suspicious", NO_QUERY),
                mock::suspicious_transactions,
            )
            .await
    }
}
