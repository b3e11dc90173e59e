use crate::domain::classify::{BudgetStatus, BudgetTotals};
use crate::domain::model::{Budget, BudgetDraft, RecordId};
use crate::domain::ports::BudgetService;
use crate::utils::error::{FinboardError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::Serialize;

pub const DEFAULT_COLOR: &str = "#3B82F6";

pub const PALETTE: [&str; 10] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#84CC16", "#F97316",
    "#EC4899", "#6B7280",
];

pub const CATEGORIES: [&str; 10] = [
    "Food",
    "Transportation",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Shopping",
    "Education",
    "Travel",
    "Insurance",
    "Other",
];

/// One budget as the cards and charts present it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCard {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub remaining: f64,
    pub percentage: Option<f64>,
    pub fill: f64,
    pub status: &'static str,
    pub status_color: &'static str,
    pub color: String,
}

impl From<&Budget> for BudgetCard {
    fn from(budget: &Budget) -> Self {
        let status: BudgetStatus = budget.status();
        Self {
            id: budget.id,
            name: budget.name.clone(),
            category: budget.category.clone(),
            spent: budget.spent,
            limit: budget.limit,
            remaining: budget.remaining(),
            percentage: budget.percentage(),
            fill: budget.fill_percentage(),
            status: status.label(),
            status_color: status.chart_color(),
            color: budget.color.clone(),
        }
    }
}

/// The editable fields of the budget form. `spent` is not user editable.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetForm {
    pub name: String,
    pub limit: f64,
    pub category: String,
    pub color: String,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            limit: 0.0,
            category: String::new(),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl BudgetForm {
    pub fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("category", &self.category)?;
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(FinboardError::ValidationError {
                message: format!("limit must be a positive amount, got {}", self.limit),
            });
        }
        Ok(())
    }

    fn into_draft(self, spent: f64) -> BudgetDraft {
        BudgetDraft {
            name: self.name,
            limit: self.limit,
            spent,
            category: self.category,
            color: self.color,
        }
    }
}

impl From<&Budget> for BudgetForm {
    fn from(budget: &Budget) -> Self {
        Self {
            name: budget.name.clone(),
            limit: budget.limit,
            category: budget.category.clone(),
            color: budget.color.clone(),
        }
    }
}

/// Client-held list of budgets, kept in step with the service.
pub struct BudgetBook<'a, S: BudgetService + ?Sized> {
    service: &'a S,
    budgets: Vec<Budget>,
}

impl<'a, S: BudgetService + ?Sized> BudgetBook<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            budgets: Vec::new(),
        }
    }

    pub async fn load(&mut self) -> &[Budget] {
        self.budgets = self.service.budgets().await;
        tracing::debug!("Loaded {} budgets", self.budgets.len());
        &self.budgets
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn find(&self, id: RecordId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// New budgets start with nothing spent.
    pub async fn create(&mut self, form: BudgetForm) -> Result<&Budget> {
        form.validate()?;
        let created = self.service.create_budget(&form.into_draft(0.0)).await;
        tracing::info!("Created budget '{}' ({})", created.name, created.id);
        self.budgets.push(created);
        Ok(&self.budgets[self.budgets.len() - 1])
    }

    /// Edits keep the amount already spent.
    pub async fn update(&mut self, id: RecordId, form: BudgetForm) -> Result<&Budget> {
        form.validate()?;
        let index = self
            .budgets
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| FinboardError::ValidationError {
                message: format!("no budget with id {}", id),
            })?;

        let draft = form.into_draft(self.budgets[index].spent);
        self.budgets[index] = self.service.update_budget(id, &draft).await;
        Ok(&self.budgets[index])
    }

    /// Removes the budget locally whatever the service answers; returns
    /// whether the service confirmed the deletion.
    pub async fn delete(&mut self, id: RecordId) -> bool {
        let confirmed = self.service.delete_budget(id).await;
        if !confirmed {
            tracing::warn!("Budget {} was not deleted on the server", id);
        }
        self.budgets.retain(|b| b.id != id);
        confirmed
    }

    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals::of(&self.budgets)
    }

    pub fn cards(&self) -> Vec<BudgetCard> {
        self.budgets.iter().map(BudgetCard::from).collect()
    }
}
