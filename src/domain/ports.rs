use crate::domain::model::{
    Anomaly, AnomalyStatus, AnomalySummary, Budget, BudgetDraft, ChatMessage, ChatReply, Contact,
    ContactDraft, Overview, RecordId, RiskFilter, StatusUpdate, Transaction,
};
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn db_api_base_url(&self) -> &str;
    fn use_mock_api(&self) -> bool;
    fn auth_token(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
}

// Service operations never fail: implementations resolve every call with a
// value of the expected shape, falling back to static data on their own.

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn chat(&self, message: &str, history: &[ChatMessage]) -> ChatReply;
}

#[async_trait]
pub trait ContactService: Send + Sync {
    async fn list(&self, search: &str) -> Vec<Contact>;
    async fn create(&self, draft: &ContactDraft) -> Contact;
    async fn update(&self, id: RecordId, draft: &ContactDraft) -> Contact;
    async fn delete(&self, id: RecordId) -> bool;
    async fn fuzzy_search(&self, query: &str) -> Vec<Contact>;
}

#[async_trait]
pub trait BudgetService: Send + Sync {
    async fn budgets(&self) -> Vec<Budget>;
    async fn create_budget(&self, draft: &BudgetDraft) -> Budget;
    async fn update_budget(&self, id: RecordId, draft: &BudgetDraft) -> Budget;
    async fn delete_budget(&self, id: RecordId) -> bool;
    async fn overview(&self) -> Overview;
    async fn tips(&self) -> Vec<String>;
}

#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn list(&self, limit: u32, offset: u32) -> Vec<Transaction>;
    async fn suspicious(&self) -> Vec<Transaction>;
}

#[async_trait]
pub trait AnomalyService: Send + Sync {
    async fn summary(&self) -> AnomalySummary;
    async fn logs(&self, limit: u32, filter: RiskFilter) -> Vec<Anomaly>;
    async fn update_status(&self, id: RecordId, status: AnomalyStatus, notes: &str)
        -> StatusUpdate;
}
