//! Static data served in mock mode and when a request fails.

use crate::domain::model::{
    Anomaly, AnomalyStatus, AnomalySummary, AnomalyTrends, Budget, ChatReply, Contact, Overview,
    RecordId, RiskLevel, StatusUpdate, Transaction, TransactionStatus,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;

/// Client-side id for records the server never acknowledged.
pub fn generated_id() -> RecordId {
    Utc::now().timestamp_millis()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

fn details(value: Value) -> HashMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    }
}

pub fn chat_reply(message: &str) -> ChatReply {
    ChatReply {
        response: format!(
            "I understand you're asking about \"{}\". As your AI financial assistant, I can help \
             you with budgets, transactions, contacts, and security alerts. How can I assist you \
             further?",
            message
        ),
        suggestions: vec![
            "Check my budget status".to_string(),
            "Show recent transactions".to_string(),
            "Security overview".to_string(),
        ],
        timestamp: Utc::now(),
    }
}

fn contact(id: RecordId, name: &str, email: &str, phone: &str, is_external: bool) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        is_external,
    }
}

/// The three demo contacts, filtered by name or email.
pub fn contacts(search: &str) -> Vec<Contact> {
    vec![
        contact(1, "Alice Johnson", "alice@example.com", "+1-555-0123", false),
        contact(2, "Bob Smith", "bob@external.com", "+1-555-0124", true),
        contact(3, "Charlie Davis", "charlie@bank.com", "+1-555-0125", false),
    ]
    .into_iter()
    .filter(|c| c.matches(search))
    .collect()
}

fn budget(id: RecordId, name: &str, limit: f64, spent: f64, category: &str, color: &str) -> Budget {
    Budget {
        id,
        name: name.to_string(),
        limit,
        spent,
        category: category.to_string(),
        color: color.to_string(),
    }
}

pub fn budgets() -> Vec<Budget> {
    vec![
        budget(1, "Groceries", 500.0, 320.0, "Food", "#10B981"),
        budget(2, "Entertainment", 200.0, 180.0, "Leisure", "#F59E0B"),
        budget(3, "Transportation", 300.0, 280.0, "Transport", "#EF4444"),
        budget(4, "Utilities", 150.0, 120.0, "Bills", "#3B82F6"),
    ]
}

pub fn overview() -> Overview {
    Overview {
        total_budget: 1150.0,
        total_spent: 900.0,
        savings_goal: 2000.0,
        current_savings: 1500.0,
        monthly_income: 5000.0,
    }
}

pub fn tips() -> Vec<String> {
    vec![
        "Consider reducing entertainment spending by 10%".to_string(),
        "Your grocery spending is within healthy limits".to_string(),
        "Set up automatic savings of $200/month".to_string(),
    ]
}

fn transaction(
    id: RecordId,
    on: NaiveDate,
    amount: f64,
    description: &str,
    category: &str,
    status: TransactionStatus,
) -> Transaction {
    Transaction {
        id,
        date: on,
        amount,
        description: description.to_string(),
        category: category.to_string(),
        status,
        risk_score: None,
        reason: None,
        recipient: None,
        location: None,
    }
}

pub fn transactions() -> Vec<Transaction> {
    use TransactionStatus::*;

    vec![
        transaction(1, date(2024, 1, 15), -85.50, "Grocery Store", "Groceries", Cleared),
        transaction(2, date(2024, 1, 14), -120.00, "Gas Station", "Transportation", Cleared),
        transaction(3, date(2024, 1, 13), 2500.00, "Salary Deposit", "Income", Cleared),
        transaction(4, date(2024, 1, 12), -45.99, "Streaming Service", "Entertainment", Cleared),
        Transaction {
            risk_score: Some(85.0),
            ..transaction(5, date(2024, 1, 11), -1200.00, "Unusual Wire Transfer", "Transfer", Flagged)
        },
    ]
}

pub fn suspicious_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            risk_score: Some(85.0),
            reason: Some("Large amount to unfamiliar recipient".to_string()),
            recipient: Some("Unknown Account 12345".to_string()),
            ..transaction(
                5,
                date(2024, 1, 11),
                -1200.00,
                "Unusual Wire Transfer",
                "Transfer",
                TransactionStatus::Flagged,
            )
        },
        Transaction {
            risk_score: Some(65.0),
            reason: Some("ATM usage in unusual location".to_string()),
            location: Some("Downtown ATM #4521".to_string()),
            ..transaction(
                8,
                date(2024, 1, 10),
                -250.00,
                "ATM Withdrawal",
                "Cash",
                TransactionStatus::Review,
            )
        },
    ]
}

pub fn anomaly_summary() -> AnomalySummary {
    AnomalySummary {
        total_anomalies: 12,
        high_risk: 3,
        medium_risk: 5,
        low_risk: 4,
        last_updated: Utc::now(),
        trends_last_30_days: AnomalyTrends {
            total_anomalies: 45,
            avg_risk_score: 42.0,
            most_common_type: "unusual_transaction_pattern".to_string(),
        },
    }
}

pub fn anomalies() -> Vec<Anomaly> {
    vec![
        Anomaly {
            id: 1,
            timestamp: at(2024, 1, 15, 10, 30),
            kind: "unusual_transaction_pattern".to_string(),
            risk_level: RiskLevel::High,
            risk_score: 85.0,
            description: "Large wire transfer to unfamiliar recipient".to_string(),
            transaction_id: Some(5),
            user_id: "user_123".to_string(),
            details: details(json!({
                "amount": 1200.00,
                "recipient": "Unknown Account 12345",
                "location": "Online Banking",
                "deviceInfo": "Chrome on Windows"
            })),
            status: AnomalyStatus::PendingReview,
            reviewed_by: None,
            resolved_at: None,
        },
        Anomaly {
            id: 2,
            timestamp: at(2024, 1, 14, 15, 45),
            kind: "location_anomaly".to_string(),
            risk_level: RiskLevel::Medium,
            risk_score: 65.0,
            description: "ATM usage in unusual location".to_string(),
            transaction_id: Some(8),
            user_id: "user_123".to_string(),
            details: details(json!({
                "amount": 250.00,
                "location": "Downtown ATM #4521",
                "distanceFromHome": "125 miles",
                "timeOfDay": "3:45 PM"
            })),
            status: AnomalyStatus::Investigating,
            reviewed_by: Some("security_team".to_string()),
            resolved_at: None,
        },
        Anomaly {
            id: 3,
            timestamp: at(2024, 1, 13, 9, 15),
            kind: "velocity_check".to_string(),
            risk_level: RiskLevel::Low,
            risk_score: 35.0,
            description: "Multiple small transactions in short time".to_string(),
            transaction_id: None,
            user_id: "user_123".to_string(),
            details: details(json!({
                "transactionCount": 8,
                "timeWindow": "15 minutes",
                "totalAmount": 45.99,
                "merchantTypes": ["coffee", "convenience", "gas"]
            })),
            status: AnomalyStatus::Resolved,
            reviewed_by: Some("ai_system".to_string()),
            resolved_at: Some(at(2024, 1, 13, 10, 0)),
        },
    ]
}

pub fn status_updated() -> StatusUpdate {
    StatusUpdate {
        success: true,
        message: Some("Status updated successfully".to_string()),
        error: None,
    }
}

pub fn status_failed(error: String) -> StatusUpdate {
    StatusUpdate {
        success: false,
        message: None,
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify::BudgetStatus;

    #[test]
    fn test_contact_filter() {
        assert_eq!(contacts("").len(), 3);
        let found = contacts("BANK.COM");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Charlie Davis");
        assert!(contacts("zelda").is_empty());
    }

    #[test]
    fn test_fixture_dates_are_real() {
        assert_eq!(transactions()[0].date, date(2024, 1, 15));
        assert_eq!(
            anomalies()[0].timestamp.to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn test_overview_matches_budget_fixtures() {
        let total_limit: f64 = budgets().iter().map(|b| b.limit).sum();
        let total_spent: f64 = budgets().iter().map(|b| b.spent).sum();
        assert_eq!(overview().total_budget, total_limit);
        assert_eq!(overview().total_spent, total_spent);
    }

    #[test]
    fn test_fixture_budget_statuses() {
        let statuses: Vec<BudgetStatus> = budgets().iter().map(|b| b.status()).collect();
        assert_eq!(
            statuses,
            vec![
                BudgetStatus::WatchOut,
                BudgetStatus::OverBudget,
                BudgetStatus::OverBudget,
                BudgetStatus::OverBudget
            ]
        );
    }

    #[test]
    fn test_chat_reply_quotes_message() {
        let reply = chat_reply("budget help");
        assert!(reply.response.contains("\"budget help\""));
        assert_eq!(reply.suggestions.len(), 3);
    }
}
