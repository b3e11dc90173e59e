use crate::domain::ports::ConfigProvider;
use crate::utils::error::{FinboardError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;

pub const NO_QUERY: &[(&str, String)] = &[];

/// HTTP access to one service base URL, with the mock switch every
/// operation consults before touching the network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    use_mock: bool,
}

impl ApiClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        auth_token: Option<String>,
        use_mock: bool,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            auth_token,
            use_mock,
        }
    }

    pub fn build_http_client<C: ConfigProvider>(config: &C) -> Result<Client> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("finboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(client)
    }

    pub fn for_api<C: ConfigProvider>(client: Client, config: &C) -> Self {
        Self::new(
            client,
            config.api_base_url(),
            config.auth_token().map(str::to_string),
            config.use_mock_api(),
        )
    }

    pub fn for_database<C: ConfigProvider>(client: Client, config: &C) -> Self {
        Self::new(
            client,
            config.db_api_base_url(),
            config.auth_token().map(str::to_string),
            config.use_mock_api(),
        )
    }

    pub fn is_mock(&self) -> bool {
        self.use_mock
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(&self, path: &str, request: RequestBuilder) -> Result<Response> {
        tracing::debug!("Making API request to: {}", self.endpoint(path));
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(FinboardError::StatusError {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.execute(path, request).await?;
        Self::decode(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path).json(body);
        let response = self.execute(path, request).await?;
        Self::decode(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path);
        self.execute(path, request).await?;
        Ok(())
    }

    /// Resolves an operation without ever surfacing an error.
    ///
    /// In mock mode `on_mock` answers and no request is made. Otherwise the
    /// result of `call` is returned, or `on_failure` is handed the error.
    pub async fn dispatch<T, Fut>(
        &self,
        operation: &str,
        call: impl FnOnce() -> Fut,
        on_mock: impl FnOnce() -> T,
        on_failure: impl FnOnce(FinboardError) -> T,
    ) -> T
    where
        Fut: Future<Output = Result<T>>,
    {
        if self.use_mock {
            tracing::debug!(operation, "mock API enabled, serving static data");
            return on_mock();
        }

        match call().await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(operation, error = %e, "request failed, falling back");
                on_failure(e)
            }
        }
    }

    /// [`dispatch`](Self::dispatch) with one fallback for both mock mode and failures.
    pub async fn fetch_or<T, Fut>(
        &self,
        operation: &str,
        call: impl FnOnce() -> Fut,
        fallback: impl Fn() -> T,
    ) -> T
    where
        Fut: Future<Output = Result<T>>,
    {
        self.dispatch(operation, call, &fallback, |_| fallback()).await
    }
}
