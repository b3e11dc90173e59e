// Page-level workflows driven on top of the service ports.

pub mod budgets;
pub mod chat;
pub mod contacts;
pub mod dashboard;
pub mod transactions;

pub use budgets::{BudgetBook, BudgetCard, BudgetForm};
pub use chat::ChatSession;
pub use contacts::ContactBook;
pub use dashboard::Dashboard;
pub use transactions::{ReviewDecision, Tab, TransactionsView};
