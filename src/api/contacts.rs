use crate::api::client::ApiClient;
use crate::api::mock;
use crate::domain::model::{Contact, ContactDraft, RecordId};
use crate::domain::ports::ContactService;
use async_trait::async_trait;
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct ContactSage {
    client: ApiClient,
}

impl ContactSage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactService for ContactSage {
    async fn list(&self, search: &str) -> Vec<Contact> {
        let query = [("search", search.to_string())];
        self.client
            .fetch_or(
                "contacts",
                || self.client.get_json("/contacts", &query),
                || mock::contacts(search),
            )
            .await
    }

    async fn create(&self, draft: &ContactDraft) -> Contact {
        self.client
            .fetch_or(
                "create_contact",
                || self.client.send_json(Method::POST, "/contacts", draft),
                || draft.clone().into_contact(mock::generated_id()),
            )
            .await
    }

    async fn update(&self, id: RecordId, draft: &ContactDraft) -> Contact {
        let path = format!("/contacts/{}", id);
        self.client
            .fetch_or(
                "update_contact",
                || self.client.send_json(Method::PUT, &path, draft),
                || draft.clone().into_contact(id),
            )
            .await
    }

    async fn delete(&self, id: RecordId) -> bool {
        let path = format!("/contacts/{}", id);
        self.client
            .dispatch(
                "delete_contact",
                || async move { self.client.delete(&path).await.map(|_| true) },
                || true,
                |_| false,
            )
            .await
    }

    /// Server-side fuzzy matching; degrades to the plain listing filter.
    async fn fuzzy_search(&self, query: &str) -> Vec<Contact> {
        if self.client.is_mock() {
            return self.list(query).await;
        }

        let params = [("q", query.to_string())];
        match self.client.get_json("/contacts/search", &params).await {
            Ok(contacts) => contacts,
            Err(e) => {
                tracing::error!(operation = "fuzzy_search", error = %e, "search failed, using contact listing");
                self.list(query).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use reqwest::Client;

    fn service(base_url: &str, use_mock: bool) -> ContactSage {
        ContactSage::new(ApiClient::new(Client::new(), base_url, None, use_mock))
    }

    fn draft() -> ContactDraft {
        ContactDraft {
            name: "Dana Lee".to_string(),
            email: "dana@example.com".to_string(),
            phone: "15550199".to_string(),
            is_external: true,
        }
    }

    #[tokio::test]
    async fn test_list_passes_search_term() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/contacts")
                .query_param("search", "ali ce");
            then.status(200).json_body(serde_json::json!([
                {"id": 1, "name": "Alice Johnson", "email": "alice@example.com",
                 "phone": "+1-555-0123", "isExternal": false}
            ]));
        });

        let contacts = service(&server.base_url(), false).list("ali ce").await;

        api_mock.assert();
        assert_eq!(contacts.len(), 1);
        assert!(!contacts[0].is_external);
    }

    #[tokio::test]
    async fn test_list_without_token_sends_no_authorization() {
        let server = MockServer::start();
        let with_auth = server.mock(|when, then| {
            when.method(GET).path("/contacts").header_exists("Authorization");
            then.status(401);
        });
        let without_auth = server.mock(|when, then| {
            when.method(GET).path("/contacts");
            then.status(200).json_body(serde_json::json!([]));
        });

        let contacts = service(&server.base_url(), false).list("").await;

        with_auth.assert_hits(0);
        without_auth.assert();
        assert!(contacts.is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_filters_mock_contacts() {
        let contacts = service("http://127.0.0.1:1", false).list("smith").await;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Bob Smith");
    }

    #[tokio::test]
    async fn test_create_and_update_in_mock_mode() {
        let contacts = service("http://unused.invalid", true);

        let created = contacts.create(&draft()).await;
        assert!(created.id > 0);
        assert_eq!(created.email, "dana@example.com");

        let updated = contacts.update(42, &draft()).await;
        assert_eq!(updated, draft().into_contact(42));
    }

    #[tokio::test]
    async fn test_update_sends_camel_case_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/contacts/9")
                .body_contains("\"isExternal\":true");
            then.status(200).json_body(serde_json::json!({
                "id": 9, "name": "Dana Lee", "email": "dana@example.com",
                "phone": "15550199", "isExternal": true
            }));
        });

        let updated = service(&server.base_url(), false).update(9, &draft()).await;

        api_mock.assert();
        assert_eq!(updated.id, 9);
    }

    #[tokio::test]
    async fn test_delete_failure_reports_false() {
        assert!(!service("http://127.0.0.1:1", false).delete(1).await);
        assert!(service("http://127.0.0.1:1", true).delete(1).await);
    }

    #[tokio::test]
    async fn test_fuzzy_search_uses_search_endpoint() {
        let server = MockServer::start();
        let search_mock = server.mock(|when, then| {
            when.method(GET).path("/contacts/search").query_param("q", "chrl");
            then.status(200).json_body(serde_json::json!([
                {"id": 3, "name": "Charlie Davis", "email": "charlie@bank.com",
                 "phone": "+1-555-0125", "isExternal": false}
            ]));
        });

        let found = service(&server.base_url(), false).fuzzy_search("chrl").await;

        search_mock.assert();
        assert_eq!(found[0].id, 3);
    }

    #[tokio::test]
    async fn test_fuzzy_search_falls_back_to_listing() {
        let server = MockServer::start();
        let search_mock = server.mock(|when, then| {
            when.method(GET).path("/contacts/search");
            then.status(500);
        });
        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/contacts").query_param("search", "bob");
            then.status(200).json_body(serde_json::json!([
                {"id": 2, "name": "Bob Smith", "email": "bob@external.com",
                 "phone": "+1-555-0124", "isExternal": true}
            ]));
        });

        let found = service(&server.base_url(), false).fuzzy_search("bob").await;

        search_mock.assert();
        list_mock.assert();
        assert_eq!(found.len(), 1);
        assert!(found[0].is_external);
    }

    #[tokio::test]
    async fn test_fuzzy_search_in_mock_mode_filters_locally() {
        let found = service("http://unused.invalid", true).fuzzy_search("example").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice Johnson");
    }
}
