use std::io::{BufWriter, Write, stderr, stdin, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use pfand_tracker::auth::{CredentialStore, StaticCredentials};
use pfand_tracker::config::{Config, Language};
use pfand_tracker::engine::{AppContext, Summary};
use pfand_tracker::messages::Messages;
use pfand_tracker::models::{Transaction, TransactionType};
use pfand_tracker::remote::RestRemote;
use pfand_tracker::storage::FileStore;
use pfand_tracker::types::{BottleCount, UNIT_VALUE, parse_amount, parse_bottle_count};

type Context = AppContext<FileStore, RestRemote>;

const HISTOGRAM_WIDTH: usize = 24;
const LABEL_WIDTH: usize = 10;

#[derive(Parser, Debug)]
#[command(version, about = "Shared bottle deposit ledger", long_about = None)]
struct Args {
    /// One of error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with a name and access key.
    Login {
        name: String,
        #[arg(long)]
        key: String,
    },
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List the names that may log in.
    Users,
    /// Balance, bottles, sync state and the last seven days.
    Status,
    /// Record returned bottles.
    Deposit { bottles: String },
    /// Cash out an amount, confirming how many bottles it covers.
    Withdraw {
        amount: String,
        /// Bottle count to confirm instead of asking.
        #[arg(long)]
        bottles: Option<String>,
        /// Accept the proposed bottle count without asking.
        #[arg(long)]
        yes: bool,
    },
    /// List transactions, newest first.
    History {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write the history to a CSV file.
    Export { path: PathBuf },
    /// Delete the whole transaction history.
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Delete everything and start over.
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Show or toggle the theme.
    Theme { action: Option<ThemeAction> },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ThemeAction {
    Toggle,
}

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    date: &'a str,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: Decimal,
    bottles: Option<BottleCount>,
    user_id: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    setup_logging(parse_log_level(&args.log_level));

    let config = Config::from_env()?;
    let store = Arc::new(FileStore::open(&config.data_dir)?);
    let remote = config.remote.as_ref().map(RestRemote::new).transpose()?;
    let credentials: Arc<dyn CredentialStore> = Arc::new(config.credentials.clone().unwrap_or_else(StaticCredentials::builtin));

    info!("Using data directory {}", store.directory().display());

    let mut context: Context = AppContext::new(store, remote, credentials);

    if !context.has_remote() {
        info!("No remote store configured, running local-only");
    }

    let result = run(args.command, &mut context, config.language).await;
    context.shutdown().await?;

    result
}

async fn run(command: Command, context: &mut Context, language: Language) -> Result<()> {
    let messages = Messages::for_language(language);
    let mut output = BufWriter::new(stdout());

    match command {
        Command::Login { name, key } => {
            let user = context.login(&name, &key)?;
            writeln!(output, "{} {user}", messages.logged_in_as)?;
        }
        Command::Logout => {
            context.logout()?;
            writeln!(output, "{}", messages.logged_out)?;
        }
        Command::Whoami => match context.current_user()? {
            Some(user) => writeln!(output, "{user}")?,
            None => writeln!(output, "{}", messages.not_logged_in)?,
        },
        Command::Users => {
            writeln!(output, "{}:", messages.known_users)?;

            for user in context.known_users() {
                writeln!(output, "  {user}")?;
            }
        }
        Command::Status => {
            context.refresh().await?;
            let summary = context.summary(Local::now().date_naive(), &Local)?;
            write_summary(&mut output, &summary, language, messages)?;
        }
        Command::Deposit { bottles } => {
            let bottles = parse_bottle_count(&bottles)?;

            if bottles == 0 {
                writeln!(output, "{}", messages.nothing_to_deposit)?;
            } else {
                context.refresh().await?;
                let transaction = context.deposit(bottles)?;

                writeln!(output, "+{} ({bottles} {})", language.format_money(transaction.amount), messages.bottles)?;
                writeln!(output, "{}: {}", messages.balance, language.format_money(context.ledger().balance()))?;
            }
        }
        Command::Withdraw { amount, bottles, yes } => {
            let amount = parse_amount(&amount)?;
            context.refresh().await?;

            let pending = context.request_withdrawal(amount)?;
            writeln!(
                output,
                "{} ÷ {} = {} {}",
                language.format_money(pending.amount),
                language.format_money(UNIT_VALUE),
                pending.proposed_bottles,
                messages.bottles
            )?;
            output.flush()?;

            let bottles = match bottles {
                Some(bottles) => parse_bottle_count(&bottles)?,
                None if yes => pending.proposed_bottles,
                None => prompt_bottles(messages.take_out_prompt, pending.proposed_bottles)?,
            };

            let transaction = context.confirm_withdrawal(bottles)?;

            writeln!(
                output,
                "-{} ({} {})",
                language.format_money(transaction.amount),
                transaction.bottles.unwrap_or(bottles),
                messages.bottles
            )?;
            writeln!(output, "{}: {}", messages.balance, language.format_money(context.ledger().balance()))?;
        }
        Command::History { limit } => {
            context.refresh().await?;
            let transactions = context.ledger().transactions();

            if transactions.is_empty() {
                writeln!(output, "{}", messages.no_transactions)?;
            }

            for transaction in transactions.iter().take(limit.unwrap_or(usize::MAX)) {
                write_transaction(&mut output, transaction, language, messages)?;
            }
        }
        Command::Export { path } => {
            context.refresh().await?;
            let count = export_csv(&path, context.ledger().transactions())?;
            writeln!(output, "{} ({count}): {}", messages.exported, path.display())?;
        }
        Command::Clear { yes } => {
            context.refresh().await?;

            if yes || confirm(messages.clear_confirm)? {
                context.clear_history()?;
                writeln!(output, "{}", messages.history_cleared)?;
            }
        }
        Command::Reset { yes } => {
            context.refresh().await?;

            if yes || confirm(messages.reset_confirm)? {
                context.reset_all()?;
                writeln!(output, "{}", messages.reset_done)?;
            }
        }
        Command::Theme { action } => {
            let theme = match action {
                Some(ThemeAction::Toggle) => context.toggle_theme()?,
                None => context.theme()?,
            };
            writeln!(output, "{theme}")?;
        }
    }

    output.flush()?;

    Ok(())
}

fn write_summary(output: &mut impl Write, summary: &Summary, language: Language, messages: &Messages) -> Result<()> {
    write_row(output, messages.user, summary.user.as_deref().unwrap_or("-"))?;
    write_row(output, messages.balance, &language.format_money(summary.balance))?;
    write_row(output, messages.bottles_label, &summary.total_bottles.round_dp(2).normalize().to_string())?;
    write_row(output, messages.status, messages.connectivity(summary.online))?;
    write_row(output, messages.records, &summary.transaction_count.to_string())?;
    write_row(output, messages.theme, messages.theme_name(summary.theme))?;

    if !summary.quick_amounts.is_empty() {
        let amounts: Vec<String> = summary.quick_amounts.iter().map(|amount| language.format_money(*amount)).collect();
        write_row(output, messages.quick_amounts, &amounts.join("  "))?;
    }

    writeln!(output)?;
    writeln!(output, "{}", messages.last_7_days)?;

    for bucket in summary.histogram.buckets() {
        let bar = "█".repeat(summary.histogram.bar_length(bucket, HISTOGRAM_WIDTH));
        writeln!(
            output,
            "{}  {:<width$}  {}",
            bucket.date.format("%a %d.%m"),
            bar,
            bucket.bottles.round_dp(2).normalize(),
            width = HISTOGRAM_WIDTH
        )?;
    }

    Ok(())
}

fn write_row(output: &mut impl Write, label: &str, value: &str) -> Result<()> {
    writeln!(output, "{:<width$}{value}", format!("{label}:"), width = LABEL_WIDTH)?;

    Ok(())
}

fn write_transaction(
    output: &mut impl Write,
    transaction: &Transaction,
    language: Language,
    messages: &Messages,
) -> Result<()> {
    let sign = if transaction.is_deposit() { '+' } else { '-' };

    writeln!(
        output,
        "{}  {:<10}  {}{:>9}  {:>5} {}  {}",
        transaction.date,
        transaction.transaction_type,
        sign,
        language.format_money(transaction.amount),
        transaction.bottle_equivalent().round_dp(2).normalize(),
        messages.bottles,
        transaction.user_id.as_deref().unwrap_or("-")
    )?;

    Ok(())
}

fn export_csv(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;

    for transaction in transactions {
        writer.serialize(ExportRow {
            id: &transaction.id,
            date: &transaction.date,
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            bottles: transaction.bottles,
            user_id: transaction.user_id.as_deref(),
        })?;
    }

    writer.flush()?;

    Ok(transactions.len())
}

fn prompt_bottles(prompt: &str, proposed: BottleCount) -> Result<BottleCount> {
    print!("{prompt} [{proposed}]: ");
    stdout().flush()?;

    let mut answer = String::new();

    if stdin().read_line(&mut answer)? == 0 {
        bail!("No bottle count entered");
    }

    if answer.trim().is_empty() {
        return Ok(proposed);
    }

    Ok(parse_bottle_count(&answer)?)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    stdout().flush()?;

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "j" | "ja"))
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries command output and CSV-friendly listings, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
