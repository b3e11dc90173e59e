use anyhow::Context;
use clap::Parser;
use finboard::api::Backend;
use finboard::app::{
    BudgetBook, BudgetCard, BudgetForm, ChatSession, ContactBook, Dashboard, Tab, TransactionsView,
};
use finboard::config::cli::{
    AnomalyCommand, BudgetArgs, BudgetCommand, Command, ContactArgs, ContactCommand,
    TransactionCommand,
};
use finboard::config::{LogFormat, Settings};
use finboard::domain::model::{Anomaly, Contact, ContactDraft, RiskLevel, Transaction};
use finboard::domain::ports::{AnomalyService, BudgetService, ContactService, TransactionService};
use finboard::utils::{logger, validation::Validate};
use finboard::{CliConfig, FinboardError};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    cli.apply(&mut settings);

    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose, settings.log_level.as_deref()),
        LogFormat::Json => logger::init_json_logger(cli.verbose, settings.log_level.as_deref()),
    }
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let backend = Backend::from_config(&settings).context("failed to build the HTTP client")?;

    if let Err(e) = run(cli.command, &backend, cli.json).await {
        if let Some(finboard_error) = e.downcast_ref::<FinboardError>() {
            eprintln!("❌ {}", finboard_error.user_friendly_message());
            eprintln!("💡 {}", finboard_error.recovery_suggestion());
            std::process::exit(1);
        }
        return Err(e);
    }
    Ok(())
}

async fn run(command: Command, backend: &Backend, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Dashboard => {
            let dashboard = Dashboard::load(&backend.money, &backend.anomalies).await;
            if json {
                #[derive(Serialize)]
                #[serde(rename_all = "camelCase")]
                struct DashboardOutput<'a> {
                    security_alerts: u32,
                    #[serde(flatten)]
                    dashboard: &'a Dashboard,
                    cards: Vec<BudgetCard>,
                }
                return print_json(&DashboardOutput {
                    security_alerts: dashboard.security_alerts(),
                    dashboard: &dashboard,
                    cards: dashboard.budget_cards(),
                });
            }

            let overview = &dashboard.overview;
            println!("Monthly income   ${:>10.2}", overview.monthly_income);
            println!("Total budget     ${:>10.2}", overview.total_budget);
            println!("Total spent      ${:>10.2}", overview.total_spent);
            match dashboard.savings_progress() {
                Some(progress) => println!(
                    "Savings          ${:>10.2} of ${:.2} ({:.0}%)",
                    overview.current_savings, overview.savings_goal, progress
                ),
                None => println!("Savings          ${:>10.2}", overview.current_savings),
            }
            println!("Security alerts  {:>11}", dashboard.security_alerts());
            println!();
            print_budget_cards(&dashboard.budget_cards());
        }

        Command::Budgets(budgets) => run_budgets(budgets, backend, json).await?,

        Command::Overview => {
            let overview = backend.money.overview().await;
            if json {
                return print_json(&overview);
            }
            println!("Monthly income   ${:>10.2}", overview.monthly_income);
            println!("Total budget     ${:>10.2}", overview.total_budget);
            println!("Total spent      ${:>10.2}", overview.total_spent);
            println!("Savings goal     ${:>10.2}", overview.savings_goal);
            println!("Current savings  ${:>10.2}", overview.current_savings);
        }

        Command::Tips => {
            let tips = backend.money.tips().await;
            if json {
                return print_json(&tips);
            }
            for tip in tips {
                println!("• {}", tip);
            }
        }

        Command::Transactions(TransactionCommand::List { limit, offset }) => {
            let transactions = backend.transactions.list(limit, offset).await;
            if json {
                return print_json(&transactions);
            }
            print_transactions(&transactions);
        }

        Command::Transactions(TransactionCommand::Suspicious) => {
            let mut view = TransactionsView::new(&backend.transactions, &backend.anomalies);
            view.open(Tab::Flagged).await;
            if json {
                #[derive(Serialize)]
                struct FlaggedOutput<'a> {
                    suspicious: &'a [Transaction],
                    anomalies: &'a [Anomaly],
                }
                return print_json(&FlaggedOutput {
                    suspicious: view.suspicious(),
                    anomalies: view.anomalies(),
                });
            }
            print_transactions(view.suspicious());
            println!();
            print_anomalies(view.anomalies());
        }

        Command::Anomalies(anomalies) => run_anomalies(anomalies, backend, json).await?,

        Command::Contacts(contacts) => run_contacts(contacts, backend, json).await?,

        Command::Chat { message } => {
            let mut session = ChatSession::new(&backend.orchestrator);
            if let Some(reply) = session.send(&message.join(" ")).await {
                if json {
                    return print_json(reply);
                }
                println!("{}", reply.text);
                for suggestion in reply.suggestions.iter().flatten() {
                    println!("  → {}", suggestion);
                }
            }
        }
    }
    Ok(())
}

async fn run_budgets(command: BudgetCommand, backend: &Backend, json: bool) -> anyhow::Result<()> {
    let mut book = BudgetBook::new(&backend.money);
    match command {
        BudgetCommand::List => {
            book.load().await;
            if json {
                return print_json(&book.cards());
            }
            print_budget_cards(&book.cards());
            let totals = book.totals();
            println!(
                "\n{} budgets, ${:.2} allocated, ${:.2} spent",
                totals.count, totals.allocated, totals.spent
            );
        }
        BudgetCommand::Create(args) => {
            let created = book.create(budget_form(args)).await?;
            if json {
                return print_json(created);
            }
            println!("✅ Created budget '{}' ({})", created.name, created.id);
        }
        BudgetCommand::Update { id, budget } => {
            book.load().await;
            let updated = book.update(id, budget_form(budget)).await?;
            if json {
                return print_json(updated);
            }
            println!("✅ Updated budget '{}' ({})", updated.name, updated.id);
        }
        BudgetCommand::Delete { id } => {
            book.load().await;
            let confirmed = book.delete(id).await;
            if json {
                return print_json(&serde_json::json!({ "id": id, "deleted": confirmed }));
            }
            report_delete("budget", id, confirmed);
        }
    }
    Ok(())
}

async fn run_anomalies(
    command: AnomalyCommand,
    backend: &Backend,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        AnomalyCommand::Summary => {
            let summary = backend.anomalies.summary().await;
            if json {
                return print_json(&summary);
            }
            println!("Total anomalies  {:>6}", summary.total_anomalies);
            println!("High risk        {:>6}", summary.high_risk);
            println!("Medium risk      {:>6}", summary.medium_risk);
            println!("Low risk         {:>6}", summary.low_risk);
            println!(
                "Last 30 days     {:>6}  avg score {}, mostly {}",
                summary.trends_last_30_days.total_anomalies,
                summary.trends_last_30_days.avg_risk_score,
                summary.trends_last_30_days.most_common_type
            );
            println!("Updated          {}", summary.last_updated.to_rfc3339());
        }
        AnomalyCommand::List { limit, risk } => {
            let logs = backend.anomalies.logs(limit, risk).await;
            if json {
                return print_json(&logs);
            }
            print_anomalies(&logs);
        }
        AnomalyCommand::SetStatus { id, status, notes } => {
            let update = backend.anomalies.update_status(id, status, &notes).await;
            if json {
                return print_json(&update);
            }
            if update.success {
                println!("✅ Anomaly {} is now {}", id, status.label());
            } else {
                println!(
                    "⚠️  Anomaly {} was not updated: {}",
                    id,
                    update.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }
    Ok(())
}

async fn run_contacts(
    command: ContactCommand,
    backend: &Backend,
    json: bool,
) -> anyhow::Result<()> {
    let mut book = ContactBook::new(&backend.contacts);
    match command {
        ContactCommand::List { search } => {
            let contacts = backend.contacts.list(&search).await;
            if json {
                return print_json(&contacts);
            }
            print_contacts(&contacts);
        }
        ContactCommand::Search { query } => {
            if query.trim().is_empty() {
                book.load().await;
            }
            let contacts = book.search(&query).await;
            if json {
                return print_json(contacts);
            }
            print_contacts(contacts);
        }
        ContactCommand::Create(args) => {
            let created = book.create(contact_draft(args)).await?;
            if json {
                return print_json(created);
            }
            println!("✅ Added contact '{}' ({})", created.name, created.id);
        }
        ContactCommand::Update { id, contact } => {
            book.load().await;
            let updated = book.update(id, contact_draft(contact)).await?;
            if json {
                return print_json(updated);
            }
            println!("✅ Updated contact '{}' ({})", updated.name, updated.id);
        }
        ContactCommand::Delete { id } => {
            book.load().await;
            let confirmed = book.delete(id).await;
            if json {
                return print_json(&serde_json::json!({ "id": id, "deleted": confirmed }));
            }
            report_delete("contact", id, confirmed);
        }
    }
    Ok(())
}

fn budget_form(args: BudgetArgs) -> BudgetForm {
    BudgetForm {
        name: args.name,
        limit: args.limit,
        category: args.category,
        color: args.color,
    }
}

fn contact_draft(args: ContactArgs) -> ContactDraft {
    ContactDraft {
        name: args.name,
        email: args.email,
        phone: args.phone,
        is_external: args.external,
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report_delete(kind: &str, id: i64, confirmed: bool) {
    if confirmed {
        println!("🗑️  Deleted {} {}", kind, id);
    } else {
        println!("⚠️  The server did not confirm deleting {} {}", kind, id);
    }
}

fn print_budget_cards(cards: &[BudgetCard]) {
    println!(
        "{:<6} {:<18} {:<14} {:>10} {:>10} {:>7}  {}",
        "ID", "NAME", "CATEGORY", "SPENT", "LIMIT", "USED", "STATUS"
    );
    for card in cards {
        let used = card
            .percentage
            .map(|p| format!("{:.0}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<6} {:<18} {:<14} {:>10.2} {:>10.2} {:>7}  {}",
            card.id, card.name, card.category, card.spent, card.limit, used, card.status
        );
    }
}

fn print_transactions(transactions: &[Transaction]) {
    println!(
        "{:<6} {:<10} {:<26} {:<14} {:>11} {:<9} {}",
        "ID", "DATE", "DESCRIPTION", "CATEGORY", "AMOUNT", "STATUS", "RISK"
    );
    for t in transactions {
        let risk = t
            .risk_score
            .map(|score| format!("{} ({})", score, RiskLevel::from_score(score)))
            .unwrap_or_default();
        println!(
            "{:<6} {:<10} {:<26} {:<14} {:>11} {:<9} {}",
            t.id,
            t.date.to_string(),
            t.description,
            t.category,
            t.display_amount(),
            t.status.as_str(),
            risk
        );
        if let Some(reason) = &t.reason {
            println!("       ↳ {}", reason);
        }
    }
}

fn print_anomalies(anomalies: &[Anomaly]) {
    println!(
        "{:<6} {:<20} {:<28} {:<7} {:>5}  {}",
        "ID", "TIME", "TYPE", "RISK", "SCORE", "STATUS"
    );
    for a in anomalies {
        println!(
            "{:<6} {:<20} {:<28} {:<7} {:>5}  {}",
            a.id,
            a.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            a.kind,
            a.risk_level.as_str(),
            a.risk_score,
            a.status.label()
        );
        println!("       {}", a.description);
    }
}

fn print_contacts(contacts: &[Contact]) {
    println!("{:<6} {:<20} {:<26} {:<14} {}", "ID", "NAME", "EMAIL", "PHONE", "");
    for c in contacts {
        let external = if c.is_external { "external" } else { "" };
        println!(
            "{:<6} {:<20} {:<26} {:<14} {}",
            c.id, c.name, c.email, c.phone, external
        );
    }
}
