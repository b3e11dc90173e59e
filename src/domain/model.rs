use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub name: String,
    pub limit: f64,
    pub spent: f64,
    pub category: String,
    pub color: String,
}

/// Payload for creating or updating a budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDraft {
    pub name: String,
    pub limit: f64,
    pub spent: f64,
    pub category: String,
    pub color: String,
}

impl BudgetDraft {
    pub fn into_budget(self, id: RecordId) -> Budget {
        Budget {
            id,
            name: self.name,
            limit: self.limit,
            spent: self.spent,
            category: self.category,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Cleared,
    Flagged,
    Review,
    Approved,
    Denied,
    #[default]
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::Flagged => "flagged",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::Unknown => "unknown",
        }
    }

    /// Approved and denied transactions accept no further decisions.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction dates arrive as `2024-01-11` or as a full RFC 3339 timestamp;
/// both decode to the calendar date.
mod calendar_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
            .map_err(|_| de::Error::custom(format!("unrecognised date '{}'", raw)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    #[serde(with = "calendar_date")]
    pub date: NaiveDate,
    /// Negative amounts are debits.
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    /// `+$2500.00` for credits, `$85.50` for debits.
    pub fn display_amount(&self) -> String {
        let sign = if self.is_credit() { "+" } else { "" };
        format!("{}${:.2}", sign, self.amount.abs())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_external: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_external: bool,
}

impl ContactDraft {
    pub fn into_contact(self, id: RecordId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            is_external: self.is_external,
        }
    }
}

impl Contact {
    /// Case-insensitive substring match on name or email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyStatus {
    PendingReview,
    Investigating,
    Resolved,
}

impl AnomalyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingReview => "pending_review",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
        }
    }

    /// Human label: `pending review`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    pub fn awaits_review(&self) -> bool {
        matches!(self, Self::PendingReview)
    }
}

impl fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnomalyStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending_review" => Ok(Self::PendingReview),
            "investigating" => Ok(Self::Investigating),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("unknown anomaly status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub transaction_id: Option<RecordId>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub details: HashMap<String, serde_json::Value>,
    pub status: AnomalyStatus,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyTrends {
    pub total_anomalies: u32,
    pub avg_risk_score: f64,
    pub most_common_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalySummary {
    pub total_anomalies: u32,
    pub high_risk: u32,
    pub medium_risk: u32,
    pub low_risk: u32,
    pub last_updated: DateTime<Utc>,
    #[serde(rename = "trendsLast30Days")]
    pub trends_last_30_days: AnomalyTrends,
}

/// Filter applied to the anomaly log query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiskFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl std::str::FromStr for RiskFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Level)
        }
    }
}

// A 2xx reply without a `success` field counts as acknowledged.
fn acknowledged() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(default = "acknowledged")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_budget: f64,
    pub total_spent: f64,
    pub savings_goal: f64,
    pub current_savings: f64,
    pub monthly_income: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: RecordId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_wire_format() {
        let json = serde_json::json!({
            "id": 5,
            "date": "2024-01-11",
            "amount": -1200.0,
            "description": "Unusual Wire Transfer",
            "category": "Transfer",
            "status": "flagged",
            "riskScore": 85,
            "reason": "Large amount to unfamiliar recipient"
        });

        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.status, TransactionStatus::Flagged);
        assert_eq!(tx.risk_score, Some(85.0));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert_eq!(tx.display_amount(), "$1200.00");

        let back = serde_json::to_value(&tx).unwrap();
        assert_eq!(back["riskScore"], 85.0);
        assert_eq!(back["date"], "2024-01-11");
        assert!(back.get("recipient").is_none());
    }

    #[test]
    fn test_unknown_transaction_status_is_tolerated() {
        let json = serde_json::json!({
            "id": 1, "date": "2024-01-15", "amount": 10.0,
            "description": "Refund", "category": "Income", "status": "pending"
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.status, TransactionStatus::Unknown);
        assert!(!tx.status.is_settled());
        assert_eq!(tx.display_amount(), "+$10.00");
    }

    #[test]
    fn test_loose_server_rows_decode() {
        let json = serde_json::json!({
            "id": 42,
            "date": "2024-03-02T14:05:00Z",
            "amount": -19.99,
            "riskScore": 72.5
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(tx.risk_score, Some(72.5));
        assert_eq!(tx.status, TransactionStatus::Unknown);
        assert!(tx.description.is_empty());

        let contact: Contact = serde_json::from_value(serde_json::json!({
            "id": 7, "name": "Dana Lee", "email": "dana@example.com", "phone": "+15550109"
        }))
        .unwrap();
        assert!(!contact.is_external);

        let bad: Result<Transaction, _> = serde_json::from_value(serde_json::json!({
            "id": 1, "date": "last tuesday", "amount": 1.0
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_anomaly_wire_format() {
        let json = serde_json::json!({
            "id": 3,
            "timestamp": "2024-01-13T09:15:00Z",
            "type": "velocity_check",
            "riskLevel": "low",
            "riskScore": 35,
            "description": "Multiple small transactions in short time",
            "transactionId": null,
            "userId": "user_123",
            "details": {"transactionCount": 8},
            "status": "pending_review",
            "reviewedBy": null,
            "resolvedAt": null
        });

        let anomaly: Anomaly = serde_json::from_value(json).unwrap();
        assert_eq!(anomaly.kind, "velocity_check");
        assert_eq!(anomaly.risk_level, RiskLevel::Low);
        assert_eq!(anomaly.status.label(), "pending review");
        assert!(anomaly.status.awaits_review());
        assert_eq!(anomaly.details["transactionCount"], 8);
    }

    #[test]
    fn test_anomaly_without_user_and_fractional_score() {
        let json = serde_json::json!({
            "id": 4,
            "timestamp": "2024-01-16T12:00:00Z",
            "type": "new_device",
            "riskLevel": "medium",
            "riskScore": 61.4,
            "status": "investigating"
        });

        let anomaly: Anomaly = serde_json::from_value(json).unwrap();
        assert_eq!(anomaly.risk_score, 61.4);
        assert!(anomaly.user_id.is_empty());
        assert!(anomaly.details.is_empty());
    }

    #[test]
    fn test_contact_matches_name_or_email() {
        let contact = Contact {
            id: 2,
            name: "Bob Smith".to_string(),
            email: "bob@external.com".to_string(),
            phone: "+1-555-0124".to_string(),
            is_external: true,
        };
        assert!(contact.matches("SMITH"));
        assert!(contact.matches("external"));
        assert!(contact.matches(""));
        assert!(!contact.matches("alice"));
    }

    #[test]
    fn test_parse_levels_and_statuses() {
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("severe".parse::<RiskLevel>().is_err());
        assert_eq!(
            "investigating".parse::<AnomalyStatus>().unwrap(),
            AnomalyStatus::Investigating
        );
        assert!("closed".parse::<AnomalyStatus>().is_err());
        assert_eq!("all".parse::<RiskFilter>().unwrap(), RiskFilter::All);
        assert_eq!(
            "medium".parse::<RiskFilter>().unwrap(),
            RiskFilter::Level(RiskLevel::Medium)
        );
    }
}
