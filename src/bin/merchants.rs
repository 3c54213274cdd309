//! CLI binary for managing merchants through the REST API.

use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use merchant_admin::client::{API_URL_ENV, DEFAULT_BASE_URL, MerchantBlockingClient};
use merchant_admin::download::Download;
use merchant_admin::error::MerchantError;
use merchant_admin::models::{Merchant, MerchantId, MerchantQuery, MerchantStatus};
use merchant_admin::view::{BoardState, FormField, MerchantBlockingBoard, StatisticsPanel};
use owo_colors::OwoColorize;

/// Prompt shown before deleting a merchant.
const DELETE_PROMPT: &str = "Are you sure you want to delete this merchant?";

/// Merchant management CLI: list, edit and summarize merchants.
#[derive(Debug, Parser)]
#[command(name = "merchants", version, about)]
struct Cli {
    /// Base URL of the merchant API.
    #[arg(
        long,
        global = true,
        env = API_URL_ENV,
        default_value = DEFAULT_BASE_URL,
        value_name = "URL"
    )]
    api_url: String,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// List merchants, optionally filtered by status.
    List {
        /// Only show merchants with this status (Active, Pending, Suspended).
        #[arg(long)]
        status: Option<MerchantStatus>,
    },
    /// Search merchants by name, email or registration number.
    Search {
        /// Search term.
        term: String,
        /// Only match merchants with this status.
        #[arg(long)]
        status: Option<MerchantStatus>,
    },
    /// Show one merchant.
    Show {
        /// Merchant id.
        id: i64,
    },
    /// Create a merchant.
    Create(CreateArgs),
    /// Edit a merchant; only the given fields change.
    Edit(EditArgs),
    /// Change a merchant's status.
    SetStatus {
        /// Merchant id.
        id: i64,
        /// New status.
        status: MerchantStatus,
    },
    /// Delete a merchant.
    Delete {
        /// Merchant id.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show merchant statistics.
    Stats {
        /// Pick a status card and list its merchants.
        #[arg(long)]
        select: Option<MerchantStatus>,
    },
    /// Download the CSV export of all merchants.
    Export(DownloadArgs),
    /// Download the JSON merchant report.
    Report(DownloadArgs),
}

/// Arguments for the `create` subcommand.
#[derive(Debug, Args)]
struct CreateArgs {
    /// Business name.
    #[arg(long)]
    name: String,
    /// Business registration number (e.g. BRN123456).
    #[arg(long)]
    registration_number: String,
    /// Contact email.
    #[arg(long)]
    email: String,
    /// Contact phone number (e.g. +1234567890).
    #[arg(long)]
    phone: String,
    /// Initial status (default: Pending).
    #[arg(long)]
    status: Option<MerchantStatus>,
}

/// Arguments for the `edit` subcommand.
#[derive(Debug, Args)]
struct EditArgs {
    /// Merchant id.
    id: i64,
    /// New business name.
    #[arg(long)]
    name: Option<String>,
    /// New registration number.
    #[arg(long)]
    registration_number: Option<String>,
    /// New contact email.
    #[arg(long)]
    email: Option<String>,
    /// New contact phone number.
    #[arg(long)]
    phone: Option<String>,
    /// New status.
    #[arg(long)]
    status: Option<MerchantStatus>,
}

/// Arguments for the `export` and `report` subcommands.
#[derive(Debug, Args)]
struct DownloadArgs {
    /// Directory to save into (default: the user's download directory).
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let client = match MerchantBlockingClient::builder()
        .base_url(cli.api_url)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            print_error(&format!("failed to build client: {err}"))?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut board = MerchantBlockingBoard::new(client);
    dispatch(&mut board, cli.command)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch(board: &mut MerchantBlockingBoard, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::List { status } => cmd_list(board, status),
        Command::Search { term, status } => cmd_search(board, &term, status),
        Command::Show { id } => cmd_show(board, MerchantId::new(id)),
        Command::Create(args) => cmd_create(board, &args),
        Command::Edit(args) => cmd_edit(board, &args),
        Command::SetStatus { id, status } => cmd_set_status(board, MerchantId::new(id), status),
        Command::Delete { id, yes } => {
            let confirmed = yes || confirm(DELETE_PROMPT, &mut io::stdin().lock())?;
            if !confirmed {
                writeln!(io::stderr().lock(), "{}", "Cancelled.".dimmed())?;
                return Ok(ExitCode::SUCCESS);
            }
            cmd_delete(board, MerchantId::new(id))
        }
        Command::Stats { select } => cmd_stats(board, select),
        Command::Export(args) => cmd_download(board, DownloadTarget::Export, args.out_dir),
        Command::Report(args) => cmd_download(board, DownloadTarget::Report, args.out_dir),
    }
}

/// Executes the `list` subcommand: mounts the board and shows the table.
fn cmd_list(
    board: &mut MerchantBlockingBoard,
    status: Option<MerchantStatus>,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading merchants...");
    board.refresh();
    spinner.finish_and_clear();

    board.state_mut().set_status_filter(status);
    print_board(board.state())
}

/// Executes the `search` subcommand: server-side search.
fn cmd_search(
    board: &MerchantBlockingBoard,
    term: &str,
    status: Option<MerchantStatus>,
) -> io::Result<ExitCode> {
    let mut query = MerchantQuery::new().with_search(term);
    if let Some(wanted) = status {
        query = query.with_status(wanted);
    }

    let spinner = make_spinner("Searching merchants...");
    let result = board.client().search_merchants(&query);
    spinner.finish_and_clear();

    match result {
        Ok(merchants) => {
            let rows: Vec<&Merchant> = merchants.iter().collect();
            print_merchants_table(&rows)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&err.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `show` subcommand: prints one merchant.
fn cmd_show(board: &MerchantBlockingBoard, id: MerchantId) -> io::Result<ExitCode> {
    match board.client().get_merchant(id) {
        Ok(merchant) => {
            print_merchant_detail(&merchant)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&err.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Fills the open form from `(field, value)` pairs, skipping absent values.
fn fill_form(state: &mut BoardState, inputs: &[(FormField, Option<&str>)]) -> Result<(), MerchantError> {
    let Some(form) = state.form_mut() else {
        return Err(MerchantError::InvalidForm {
            field: "form",
            message: "No form is open".to_owned(),
        });
    };
    for &(field, value) in inputs {
        if let Some(text) = value {
            form.set_field(field, text)?;
        }
    }
    Ok(())
}

/// Executes the `create` subcommand.
fn cmd_create(board: &mut MerchantBlockingBoard, args: &CreateArgs) -> io::Result<ExitCode> {
    board.state_mut().open_create_form();
    let status = args.status.map(MerchantStatus::as_str);
    let inputs = [
        (FormField::Name, Some(args.name.as_str())),
        (
            FormField::BusinessRegistrationNumber,
            Some(args.registration_number.as_str()),
        ),
        (FormField::Email, Some(args.email.as_str())),
        (FormField::Phone, Some(args.phone.as_str())),
        (FormField::Status, status),
    ];
    if let Err(err) = fill_form(board.state_mut(), &inputs) {
        print_error(&err.to_string())?;
        return Ok(ExitCode::FAILURE);
    }
    submit(board)
}

/// Executes the `edit` subcommand: loads the merchant, applies the given
/// fields and submits a full update.
fn cmd_edit(board: &mut MerchantBlockingBoard, args: &EditArgs) -> io::Result<ExitCode> {
    let merchant = match board.client().get_merchant(MerchantId::new(args.id)) {
        Ok(merchant) => merchant,
        Err(err) => {
            print_error(&err.to_string())?;
            return Ok(ExitCode::FAILURE);
        }
    };
    board.state_mut().open_edit_form(&merchant);
    let inputs = [
        (FormField::Name, args.name.as_deref()),
        (
            FormField::BusinessRegistrationNumber,
            args.registration_number.as_deref(),
        ),
        (FormField::Email, args.email.as_deref()),
        (FormField::Phone, args.phone.as_deref()),
        (FormField::Status, args.status.map(MerchantStatus::as_str)),
    ];
    if let Err(err) = fill_form(board.state_mut(), &inputs) {
        print_error(&err.to_string())?;
        return Ok(ExitCode::FAILURE);
    }
    submit(board)
}

/// Submits the open form and prints the re-fetched collection.
fn submit(board: &mut MerchantBlockingBoard) -> io::Result<ExitCode> {
    let action = if board.state().editing().is_some() {
        "updated"
    } else {
        "created"
    };
    let spinner = make_spinner("Saving...");
    let result = board.submit_form();
    spinner.finish_and_clear();

    match result {
        Ok(merchant) => {
            writeln!(
                io::stdout().lock(),
                "{} merchant {} {action} {}",
                "\u{2713}".green().bold(),
                merchant.name.bold(),
                format_args!("(id {})", merchant.id).dimmed()
            )?;
            print_board(board.state())
        }
        Err(err) => {
            print_error(&err.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `set-status` subcommand.
fn cmd_set_status(
    board: &mut MerchantBlockingBoard,
    id: MerchantId,
    status: MerchantStatus,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Updating status...");
    let result = board.set_status(id, status);
    spinner.finish_and_clear();

    match result {
        Ok(merchant) => {
            writeln!(
                io::stdout().lock(),
                "{} merchant {} is now {}",
                "\u{2713}".green().bold(),
                merchant.name.bold(),
                merchant.status
            )?;
            print_board(board.state())
        }
        Err(err) => {
            print_error(&err.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `delete` subcommand (after confirmation).
fn cmd_delete(board: &mut MerchantBlockingBoard, id: MerchantId) -> io::Result<ExitCode> {
    let spinner = make_spinner("Deleting merchant...");
    let result = board.delete_merchant(id);
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            writeln!(
                io::stdout().lock(),
                "{} merchant {id} deleted",
                "\u{2713}".green().bold()
            )?;
            print_board(board.state())
        }
        Err(err) => {
            print_error(&err.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `stats` subcommand: mounts the board and prints the cards.
/// With `--select`, also lists the merchants of the picked card.
fn cmd_stats(
    board: &mut MerchantBlockingBoard,
    select: Option<MerchantStatus>,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading statistics...");
    board.mount();
    spinner.finish_and_clear();

    print_statistics(board.statistics())?;
    match select {
        Some(status) => {
            board.select_statistic(Some(status));
            writeln!(io::stdout().lock())?;
            print_board(board.state())
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

/// Which document `cmd_download` fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadTarget {
    /// CSV export.
    Export,
    /// JSON report.
    Report,
}

/// Executes the `export` / `report` subcommands.
fn cmd_download(
    board: &mut MerchantBlockingBoard,
    target: DownloadTarget,
    out_dir: Option<PathBuf>,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Downloading...");
    let result = match target {
        DownloadTarget::Export => board.export_csv(),
        DownloadTarget::Report => board.generate_report(),
    };
    spinner.finish_and_clear();

    match result {
        Ok(download) => {
            let dir = out_dir.unwrap_or_else(default_download_dir);
            save_download(&download, &dir)
        }
        Err(err) => {
            print_error(&err.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Directory downloads go to when `--out-dir` is not given.
fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Saves a download and reports where it went.
fn save_download(download: &Download, dir: &Path) -> io::Result<ExitCode> {
    match download.save_in(dir) {
        Ok(path) => {
            writeln!(
                io::stdout().lock(),
                "{} saved {} {}",
                "\u{2713}".green().bold(),
                path.display().bold(),
                format_args!("({} bytes)", download.bytes().len()).dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&format!("failed to save {}: {err}", download.filename()))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Asks a yes/no question on stderr and reads the answer from `input`.
/// Anything but `y`/`yes` (any case) is a no.
fn confirm<R: BufRead>(prompt: &str, input: &mut R) -> io::Result<bool> {
    {
        let mut err = io::stderr().lock();
        write!(err, "{prompt} {} ", "[y/N]".dimmed())?;
        err.flush()?;
    }
    let mut answer = String::new();
    let _read = input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints an error banner to stderr.
fn print_error(message: &str) -> io::Result<()> {
    writeln!(io::stderr().lock(), "{} {message}", "error:".red().bold())
}

/// Prints the banner (if any) and the filtered merchant table. Returns a
/// failure exit code when the banner is shown.
fn print_board(state: &BoardState) -> io::Result<ExitCode> {
    print_merchants_table(&state.visible_merchants())?;
    match state.error() {
        Some(message) => {
            print_error(message)?;
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

/// Table color of a status badge.
const fn status_color(status: MerchantStatus) -> Color {
    match status {
        MerchantStatus::Active => Color::Green,
        MerchantStatus::Pending => Color::Yellow,
        MerchantStatus::Suspended => Color::Red,
    }
}

/// Prints merchants in a table.
fn print_merchants_table(merchants: &[&Merchant]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if merchants.is_empty() {
        writeln!(out, "{}", "No merchants".bold())?;
        writeln!(out, "{}", "Get started by creating a new merchant.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Registration Number").fg(Color::Cyan),
        Cell::new("Email").fg(Color::Cyan),
        Cell::new("Phone").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for merchant in merchants {
        _ = table.add_row(vec![
            Cell::new(merchant.id),
            Cell::new(&merchant.name),
            Cell::new(&merchant.business_registration_number),
            Cell::new(&merchant.email),
            Cell::new(&merchant.phone),
            Cell::new(merchant.status).fg(status_color(merchant.status)),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Merchants".green().bold(),
        format_args!("({})", merchants.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints one merchant as a key/value list.
fn print_merchant_detail(merchant: &Merchant) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} {}",
        merchant.name.green().bold(),
        format_args!("(id {})", merchant.id).dimmed()
    )?;
    writeln!(out)?;
    let rows: [(&str, &str); 6] = [
        ("Registration Number:", &merchant.business_registration_number),
        ("Email:", &merchant.email),
        ("Phone:", &merchant.phone),
        ("Status:", merchant.status.as_str()),
        ("Created:", &merchant.created_at),
        ("Updated:", &merchant.updated_at),
    ];
    for (label, value) in rows {
        writeln!(out, "  {} {value}", label.bold())?;
    }
    Ok(())
}

/// Prints the statistics cards in a table.
fn print_statistics(panel: &StatisticsPanel) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Merchants").fg(Color::Cyan),
        Cell::new("Count").fg(Color::Cyan),
    ]);

    for card in panel.cards() {
        let color = card.filter.map_or(Color::Blue, status_color);
        _ = table.add_row(vec![Cell::new(card.label), Cell::new(card.count).fg(color)]);
    }

    writeln!(out, "{}", "Statistics".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // stderr itself may be gone; nothing left to report to.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
