use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gofinances_core::{
    initialize_core_with, AppState, CategoryRegistry, CoreConfig, Currency, DisplayConfig, Locale,
};
use log::info;
use shared::{FormattedTransaction, HighlightCard, MonthRef, RegisterForm, TransactionKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gofin", version, about = "GoFinances terminal client")]
struct Cli {
    /// User whose data to operate on
    #[arg(long, global = true, default_value = "default")]
    user: String,

    /// Data directory (defaults to ~/Documents/GoFinances)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Language for formatted output
    #[arg(long, global = true, value_enum, default_value_t = LocaleArg::PtBr)]
    locale: LocaleArg,

    /// Currency convention for amounts
    #[arg(long, global = true, value_enum, default_value_t = CurrencyArg::Brl)]
    currency: CurrencyArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new transaction
    Register {
        /// Short description, e.g. "Mercado"
        name: String,

        /// Amount, e.g. 59.90
        amount: String,

        /// Whether money came in or went out
        #[arg(value_enum)]
        kind: KindArg,

        /// Category key (see `gofin categories`)
        category: String,
    },

    /// Show the highlight cards and the transaction list
    Dashboard,

    /// List every stored transaction
    List,

    /// Per-category expense breakdown for one month
    Summary {
        /// Month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,

        /// Year, e.g. 2023 (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show the available categories
    Categories,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    PtBr,
    EnUs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CurrencyArg {
    Brl,
    Usd,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::PtBr => Locale::PtBr,
            LocaleArg::EnUs => Locale::EnUs,
        }
    }
}

impl From<CurrencyArg> for Currency {
    fn from(value: CurrencyArg) -> Self {
        match value {
            CurrencyArg::Brl => Currency::Brl,
            CurrencyArg::Usd => Currency::Usd,
        }
    }
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for debugging
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting gofin for user '{}'", cli.user);

    let state = initialize_core_with(CoreConfig {
        data_directory: cli.data_dir.clone(),
        display: DisplayConfig {
            locale: cli.locale.into(),
            currency: cli.currency.into(),
        },
        categories: CategoryRegistry::with_defaults(),
    })?;

    match &cli.command {
        Command::Register {
            name,
            amount,
            kind,
            category,
        } => {
            register(&state, &cli, name, amount, *kind, category).await?;
        }
        Command::Dashboard => {
            dashboard(&state, &cli).await?;
        }
        Command::List => {
            list(&state, &cli).await?;
        }
        Command::Summary { month, year } => {
            summary(&state, &cli, *month, *year).await?;
        }
        Command::Categories => {
            categories(&state);
        }
    }

    Ok(())
}

async fn register(
    state: &AppState,
    cli: &Cli,
    name: &str,
    amount: &str,
    kind: KindArg,
    category: &str,
) -> Result<()> {
    if state.categories.get(category).is_none() {
        eprintln!(
            "warning: unknown category '{}', it will not appear in summaries",
            category
        );
    }

    let form = RegisterForm::new(name, amount, Some(kind.into()), Some(category));
    let transaction = state.registration_service.register(&cli.user, &form).await?;

    let rows = state
        .display_service
        .format_transactions(&[transaction], &state.categories)?;
    println!("{}", format_row(&rows[0]));

    Ok(())
}

async fn dashboard(state: &AppState, cli: &Cli) -> Result<()> {
    let transactions = state
        .transaction_service
        .list_transactions(&cli.user)
        .await?;
    let summary = state.dashboard_service.summarize(&transactions);
    let highlights = state.display_service.dashboard_highlights(&summary)?;

    let (entries_title, expenses_title, total_title) = card_titles(cli.locale);
    print_card(entries_title, &highlights.entries);
    print_card(expenses_title, &highlights.expenses);
    print_card(total_title, &highlights.total);

    if transactions.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", list_title(cli.locale));
    let rows = state
        .display_service
        .format_transactions(&transactions, &state.categories)?;
    for row in &rows {
        println!("{}", format_row(row));
    }

    Ok(())
}

async fn list(state: &AppState, cli: &Cli) -> Result<()> {
    let transactions = state
        .transaction_service
        .list_transactions(&cli.user)
        .await?;

    if transactions.is_empty() {
        println!("{}", empty_list_label(cli.locale));
        return Ok(());
    }

    let rows = state
        .display_service
        .format_transactions(&transactions, &state.categories)?;
    for (transaction, row) in transactions.iter().zip(&rows) {
        println!("{}  {}", transaction.id, format_row(row));
    }

    Ok(())
}

async fn summary(state: &AppState, cli: &Cli, month: Option<u32>, year: Option<i32>) -> Result<()> {
    if let Some(month) = month {
        if !(1..=12).contains(&month) {
            bail!("month must be between 1 and 12, got {}", month);
        }
    }

    let current = state.spending_service.current_month();
    let selected = MonthRef::new(month.unwrap_or(current.month), year.unwrap_or(current.year));
    state.spending_service.set_month(selected);

    let transactions = state
        .transaction_service
        .list_transactions(&cli.user)
        .await?;
    let summaries =
        state
            .spending_service
            .summarize_month(&transactions, &selected, &state.categories);

    println!("{}", state.display_service.format_month_ref(&selected));

    if summaries.is_empty() {
        println!("{}", empty_month_label(cli.locale));
        return Ok(());
    }

    let cards = state.display_service.history_cards(&summaries)?;
    for card in &cards {
        println!("{:<16} {:>16} {:>6}", card.name, card.total, card.percent);
    }

    Ok(())
}

fn categories(state: &AppState) {
    for category in state.categories.iter() {
        println!("{:<12} {:<16} {}", category.key, category.name, category.color);
    }
}

fn print_card(title: &str, card: &HighlightCard) {
    println!("{:<10} {:>16}   {}", title, card.amount, card.last_transaction);
}

fn format_row(row: &FormattedTransaction) -> String {
    let sign = if row.kind.is_expense() { "-" } else { "+" };
    format!(
        "{}  {} {:>14}  {:<14}  {}",
        row.date, sign, row.amount, row.category, row.name
    )
}

fn card_titles(locale: LocaleArg) -> (&'static str, &'static str, &'static str) {
    match locale {
        LocaleArg::PtBr => ("Entradas", "Saídas", "Total"),
        LocaleArg::EnUs => ("Income", "Expenses", "Total"),
    }
}

fn list_title(locale: LocaleArg) -> &'static str {
    match locale {
        LocaleArg::PtBr => "Listagem",
        LocaleArg::EnUs => "Transactions",
    }
}

fn empty_list_label(locale: LocaleArg) -> &'static str {
    match locale {
        LocaleArg::PtBr => "Nenhuma transação registrada",
        LocaleArg::EnUs => "No transactions recorded",
    }
}

fn empty_month_label(locale: LocaleArg) -> &'static str {
    match locale {
        LocaleArg::PtBr => "Sem gastos neste mês",
        LocaleArg::EnUs => "No spending this month",
    }
}
