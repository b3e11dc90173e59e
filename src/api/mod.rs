// API layer: one client per service base URL, each operation wrapped in the
// mock switch and the fallback-to-static-data policy.

pub mod anomalies;
pub mod client;
pub mod contacts;
pub mod mock;
pub mod money;
pub mod orchestrator;
pub mod transactions;

pub use anomalies::AnomalyLog;
pub use client::ApiClient;
pub use contacts::ContactSage;
pub use money::MoneySage;
pub use orchestrator::Orchestrator;
pub use transactions::TransactionHistory;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

/// Every dashboard service, built from one configuration.
#[derive(Debug, Clone)]
pub struct Backend {
    pub orchestrator: Orchestrator,
    pub contacts: ContactSage,
    pub money: MoneySage,
    pub transactions: TransactionHistory,
    pub anomalies: AnomalyLog,
}

impl Backend {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let http = ApiClient::build_http_client(config)?;
        let api = ApiClient::for_api(http.clone(), config);
        let database = ApiClient::for_database(http, config);

        tracing::debug!(
            api = api.base_url(),
            database = database.base_url(),
            mock = api.is_mock(),
            "backend configured"
        );

        Ok(Self {
            orchestrator: Orchestrator::new(api.clone()),
            contacts: ContactSage::new(api.clone()),
            money: MoneySage::new(api.clone()),
            transactions: TransactionHistory::new(api),
            anomalies: AnomalyLog::new(database),
        })
    }
}
