use crate::api::client::{ApiClient, NO_QUERY};
use crate::api::mock;
use crate::domain::model::{
    Anomaly, AnomalyStatus, AnomalySummary, RecordId, RiskFilter, StatusUpdate,
};
use crate::domain::ports::AnomalyService;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;

pub const DEFAULT_LOG_LIMIT: u32 = 20;

const REVIEWER: &str = "current_user";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange<'a> {
    status: AnomalyStatus,
    review_notes: &'a str,
    reviewed_by: &'a str,
    reviewed_at: DateTime<Utc>,
}

/// Security anomaly log, served from the database API.
#[derive(Debug, Clone)]
pub struct AnomalyLog {
    client: ApiClient,
}

impl AnomalyLog {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnomalyService for AnomalyLog {
    async fn summary(&self) -> AnomalySummary {
        self.client
            .fetch_or(
                "anomaly_summary",
                || self.client.get_json("/anomaly_logs/summary", NO_QUERY),
                mock::anomaly_summary,
            )
            .await
    }

    async fn logs(&self, limit: u32, filter: RiskFilter) -> Vec<Anomaly> {
        let mut query = vec![("limit", limit.to_string())];
        if let RiskFilter::Level(level) = filter {
            query.push(("risk_level", level.to_string()));
        }

        self.client
            .fetch_or(
                "anomaly_logs",
                || self.client.get_json("/anomaly_logs", &query),
                mock::anomalies,
            )
            .await
    }

    async fn update_status(
        &self,
        id: RecordId,
        status: AnomalyStatus,
        notes: &str,
    ) -> StatusUpdate {
        let path = format!("/anomaly_logs/{}/status", id);
        let change = StatusChange {
            status,
            review_notes: notes,
            reviewed_by: REVIEWER,
            reviewed_at: Utc::now(),
        };

        self.client
            .dispatch(
                "update_anomaly_status",
                || self.client.send_json(Method::PUT, &path, &change),
                mock::status_updated,
                |e| mock::status_failed(e.to_string()),
            )
            .await
    }
}
