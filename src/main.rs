//! AuctionSphere console entry point
//!
//! Runs the client helpers against a JSON file standing in for browser storage, so demo
//! data can be seeded and sessions inspected outside the pages.

use anyhow::{anyhow, Context};
use auctionsphere_config::{Config, ConfigError, ConfigErrorSeverity};
use auctionsphere_core::{
    file_to_base64, AlertTarget, AuthOutcome, Client, CoreError, ElementId, ErrorSeverity,
    FileStore, HeadlessView, LocalFile, NewUser, Role,
};
use auctionsphere_utils::{
    format_amount, format_date_time, is_valid_bank_account, is_valid_email, is_valid_ifsc,
    is_valid_password, is_valid_upi,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "auctionsphere")]
#[command(author = "AuctionSphere Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Session, validation and demo-data helpers for the AuctionSphere demo", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create missing collections and the default admin
    Init,
    /// Seed the demo seller, buyer and auctions
    Demo,
    /// Show the signed-in user
    Whoami,
    /// Sign in with an email and password
    Login { email: String, password: String },
    /// Register a seller or buyer account
    Register {
        #[arg(value_enum)]
        role: RoleArg,
        email: String,
        password: String,
        name: String,
        /// Seller UPI id
        #[arg(long)]
        upi: Option<String>,
        /// Buyer bank account number
        #[arg(long)]
        bank_account: Option<String>,
        /// Buyer IFSC code
        #[arg(long)]
        ifsc: Option<String>,
        #[arg(long)]
        bank_name: Option<String>,
    },
    /// Sign out
    Logout,
    /// Print the navigation bar for the current session
    Nav,
    /// Run the page access guard
    Check {
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Format an amount as currency
    Currency { amount: f64 },
    /// Check a form value
    Validate {
        #[arg(value_enum)]
        kind: FieldKind,
        value: String,
    },
    /// Encode a file as a data URL
    EncodeFile { path: PathBuf },
    /// Print a default configuration file
    DefaultConfig,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoleArg {
    Admin,
    Seller,
    Buyer,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Seller => Role::Seller,
            RoleArg::Buyer => Role::Buyer,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldKind {
    Email,
    Password,
    Upi,
    BankAccount,
    Ifsc,
}

fn report(error: CoreError) -> anyhow::Error {
    match error.severity() {
        ErrorSeverity::Warning => log::warn!("{}", error),
        ErrorSeverity::Error => log::error!("{}", error),
    }
    anyhow!("{}", error.to_details())
}

fn load_config(path: PathBuf) -> (Config, Option<ConfigError>) {
    match Config::load(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Command::DefaultConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, config_error) = load_config(args.config.clone());
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Some(error) = config_error {
        match error.severity() {
            ConfigErrorSeverity::Warning => log::warn!("{}; using defaults", error),
            ConfigErrorSeverity::Error => {
                return Err(anyhow!("{} ({})", error, error.suggestions().join(" ")));
            }
        }
    }

    let store = FileStore::open(config.storage_path()).map_err(report)?;
    log::info!("Storage file: {}", store.path().display());
    let view = HeadlessView::full_page(&config.alerts.container_class);
    let mut client = Client::new(store, view, config);
    client.on_page_load().map_err(report)?;

    match args.command {
        Command::Init => {
            println!("Storage ready at {}", client.store().path().display());
        }
        Command::Demo => {
            let summary = client.create_demo_data().map_err(report)?;
            println!("{}", summary.message);
            println!("  Seller: {}", summary.seller);
            println!("  Buyer:  {}", summary.buyer);
            println!("  Admin:  {}", summary.admin);
            let currency = &client.config().currency;
            let now_ms = chrono::Utc::now().timestamp_millis();
            for product in client.products().map_err(report)? {
                let ends = match product.auction_end_time {
                    Some(_) if product.has_ended(now_ms) => "ended".to_string(),
                    Some(end) => format!("ends {}", format_date_time(end)),
                    None => "no end time".to_string(),
                };
                println!(
                    "  [{}] {} - {} ({})",
                    product.status,
                    product.name,
                    format_amount(product.current_bid, &currency.symbol, currency.decimal_places),
                    ends
                );
            }
        }
        Command::Whoami => match client.current_user().map_err(report)? {
            Some(user) => println!("{}", user.summary()),
            None => println!("Not signed in"),
        },
        Command::Login { email, password } => {
            let user = client.sign_in(&email, &password).map_err(report)?;
            println!("Signed in as {}", user.summary());
        }
        Command::Register {
            role,
            email,
            password,
            name,
            upi,
            bank_account,
            ifsc,
            bank_name,
        } => {
            let form = NewUser {
                email,
                password,
                name,
                upi_id: upi,
                bank_account,
                ifsc_code: ifsc,
                bank_name,
            };
            let user = client.register_user(role.into(), form).map_err(report)?;
            println!("Registered {}", user.summary());
        }
        Command::Logout => {
            client.logout().map_err(report)?;
            println!("Signed out; redirect to {}", client.view().location().unwrap_or("-"));
        }
        Command::Nav => {
            client.update_navigation().map_err(report)?;
            for id in ElementId::all() {
                if let Some(element) = client.view().element(id) {
                    let visible = element.visible.unwrap_or(false);
                    println!(
                        "#{:<14} {:<7} {} {}",
                        id.dom_id(),
                        if visible { "shown" } else { "hidden" },
                        element.text.as_deref().unwrap_or(""),
                        element.href.as_deref().map(|h| format!("-> {}", h)).unwrap_or_default()
                    );
                }
            }
        }
        Command::Check { role } => {
            let outcome = client.check_auth(role.map(Role::from)).map_err(report)?;
            match &outcome {
                AuthOutcome::Granted(user) => println!("Access granted to {}", user.summary()),
                AuthOutcome::NotLoggedIn => println!("Not signed in"),
                AuthOutcome::Forbidden { role } => println!("Access denied for role {}", role),
            }
            for alert in client.view().alerts(AlertTarget::Container) {
                println!("[{}] {}", alert.kind, alert.message);
            }
            if let Some(location) = client.view().location() {
                println!("Redirect to {}", location);
            }
            if !outcome.is_granted() {
                std::process::exit(1);
            }
        }
        Command::Currency { amount } => {
            let currency = &client.config().currency;
            println!("{}", format_amount(amount, &currency.symbol, currency.decimal_places));
        }
        Command::Validate { kind, value } => {
            let valid = match kind {
                FieldKind::Email => is_valid_email(&value),
                FieldKind::Password => is_valid_password(&value),
                FieldKind::Upi => is_valid_upi(&value),
                FieldKind::BankAccount => is_valid_bank_account(&value),
                FieldKind::Ifsc => is_valid_ifsc(&value),
            };
            println!("{}", if valid { "valid" } else { "invalid" });
            if !valid {
                std::process::exit(1);
            }
        }
        Command::EncodeFile { path } => {
            let rt = Runtime::new()?;
            let file = LocalFile::new(&path);
            let data_url = rt
                .block_on(file_to_base64(&file))
                .with_context(|| format!("Failed to read {}", path.display()))?;
            println!("{}", data_url);
        }
        Command::DefaultConfig => print!("{}", Config::generate_default()),
    }

    Ok(())
}
