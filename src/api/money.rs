use crate::api::client::{ApiClient, NO_QUERY};
use crate::api::mock;
use crate::domain::model::{Budget, BudgetDraft, Overview, RecordId};
use crate::domain::ports::BudgetService;
use async_trait::async_trait;
use reqwest::Method;

/// Budgets, spending overview and savings tips.
#[derive(Debug, Clone)]
pub struct MoneySage {
    client: ApiClient,
}

impl MoneySage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BudgetService for MoneySage {
    async fn budgets(&self) -> Vec<Budget> {
        self.client
            .fetch_or("budgets", || self.client.get_json("/budgets", NO_QUERY), mock::budgets)
            .await
    }

    async fn create_budget(&self, draft: &BudgetDraft) -> Budget {
        self.client
            .fetch_or(
                "create_budget",
                || self.client.send_json(Method::POST, "/budgets", draft),
                || draft.clone().into_budget(mock::generated_id()),
            )
            .await
    }

    async fn update_budget(&self, id: RecordId, draft: &BudgetDraft) -> Budget {
        let path = format!("/budgets/{}", id);
        self.client
            .fetch_or(
                "update_budget",
                || self.client.send_json(Method::PUT, &path, draft),
                || draft.clone().into_budget(id),
            )
            .await
    }

    async fn delete_budget(&self, id: RecordId) -> bool {
        let path = format!("/budgets/{}", id);
        self.client
            .dispatch(
                "delete_budget",
                || async move { self.client.delete(&path).await.map(|_| true) },
                || true,
                |_| false,
            )
            .await
    }

    async fn overview(&self) -> Overview {
        self.client
            .fetch_or("overview", || self.client.get_json("/overview", NO_QUERY), mock::overview)
            .await
    }

    async fn tips(&self) -> Vec<String> {
        self.client
            .fetch_or("tips", || self.client.get_json("/tips", NO_QUERY), mock::tips)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::Client;

    fn service(base_url: &str, use_mock: bool) -> MoneySage {
        MoneySage::new(ApiClient::new(
            Client::new(),
            base_url,
            Some("secret".to_string()),
            use_mock,
        ))
    }

    fn draft() -> BudgetDraft {
        BudgetDraft {
            name: "Travel".to_string(),
            limit: 800.0,
            spent: 0.0,
            category: "Travel".to_string(),
            color: "#8B5CF6".to_string(),
        }
    }

    #[tokio::test]
    async fn test_budgets_from_server() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/budgets")
                .header("Authorization", "Bearer secret");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": 10, "name": "Rent", "limit": 1500, "spent": 1500,
                     "category": "Bills", "color": "#6B7280"}
                ]));
        });

        let budgets = service(&server.base_url(), false).budgets().await;

        api_mock.assert();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].name, "Rent");
        assert_eq!(budgets[0].limit, 1500.0);
    }

    #[tokio::test]
    async fn test_budgets_fall_back_on_server_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/budgets");
            then.status(500);
        });

        let budgets = service(&server.base_url(), false).budgets().await;

        api_mock.assert();
        assert_eq!(budgets, mock::budgets());
    }

    #[tokio::test]
    async fn test_create_budget_posts_draft() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/budgets")
                .header("Content-Type", "application/json")
                .body_contains("\"name\":\"Travel\"");
            then.status(201).json_body(serde_json::json!({
                "id": 77, "name": "Travel", "limit": 800, "spent": 0,
                "category": "Travel", "color": "#8B5CF6"
            }));
        });

        let created = service(&server.base_url(), false)
            .create_budget(&draft())
            .await;

        api_mock.assert();
        assert_eq!(created.id, 77);
    }

    #[tokio::test]
    async fn test_create_budget_offline_assigns_local_id() {
        let created = service("http://127.0.0.1:1", false)
            .create_budget(&draft())
            .await;

        assert!(created.id > 0);
        assert_eq!(created.name, "Travel");
    }

    #[tokio::test]
    async fn test_update_budget_keeps_id_on_failure() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(PUT).path("/budgets/3");
            then.status(502);
        });

        let updated = service(&server.base_url(), false)
            .update_budget(3, &draft())
            .await;

        api_mock.assert();
        assert_eq!(updated, draft().into_budget(3));
    }

    #[tokio::test]
    async fn test_delete_budget_outcomes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/budgets/1");
            then.status(204);
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/budgets/2");
            then.status(404);
        });

        let money = service(&server.base_url(), false);
        assert!(money.delete_budget(1).await);
        assert!(!money.delete_budget(2).await);
        assert!(service(&server.base_url(), true).delete_budget(2).await);
    }

    #[tokio::test]
    async fn test_mock_mode_never_calls_server() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.path_contains("/");
            then.status(200);
        });

        let money = service(&server.base_url(), true);
        assert_eq!(money.overview().await, mock::overview());
        assert_eq!(money.tips().await, mock::tips());
        assert_eq!(money.budgets().await.len(), 4);

        api_mock.assert_hits(0);
    }
}
