//! Bank Widgets CLI
//!
//! Thin wrapper around bankwidgets-core for exercising the widget actions
//! against a backend from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Link an external checking account
//! bankwidgets link "First Bank" 021000021 12345678 --name "Rainy day"
//!
//! # Unlink an account
//! bankwidgets unlink ach 91
//!
//! # Verify a pending account with its two micro-deposits
//! bankwidgets verify ACH-7 0.12 0.34
//!
//! # Preview upcoming scheduled transfers
//! bankwidgets transfers --date 2026-10-18
//!
//! # Run a host action with key=value arguments
//! bankwidgets host-action RemoveLinkedAccount LinkedAccountId=91 AccountType=ach
//! bankwidgets host-action VerifyAccount AchId=ACH-7 "AccountName=Rainy day" --deposits 0.12 0.34
//!
//! # Offline helpers
//! bankwidgets validate-deposits 0.12 0.34
//! bankwidgets month-key 2026-10-18
//! bankwidgets config
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use bankwidgets_core::{
    add_account, deposits_valid, dollars_to_cents, is_valid_deposit, month_key,
    remove_linked_account, unlink_account, verify_account, AccountEvents, AccountType, ApiClient,
    ClientConfig, DepositField, LinkRequest, LinkedAccountCreated, LinkedAccountRef, PreviewLoader,
    ReqwestTransport, VerificationAttempt, VerificationForm, VerificationPhase, VerificationTarget,
};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};

/// Bank Widgets - linked accounts and scheduled transfers
#[derive(Parser)]
#[command(name = "bankwidgets")]
#[command(version = "0.1.0")]
#[command(about = "Bank Widgets - linked accounts and scheduled transfers")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Backend origin (overrides config file and environment)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file (default: <config dir>/bankwidgets/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON object of string resource overrides
    #[arg(long, global = true)]
    strings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Link an external account
    Link {
        /// Financial institution name
        institution: String,
        /// Nine-digit routing number
        routing_number: String,
        account_number: String,
        /// checking or savings
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Nickname shown in account lists
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Unlink an account
    Unlink {
        /// Backend account category (e.g. ach)
        account_type: String,
        account_id: String,
    },

    /// Verify a pending account with its two micro-deposit amounts
    Verify {
        ach_id: String,
        deposit_one: String,
        deposit_two: String,
    },

    /// Preview upcoming scheduled transfers
    Transfers {
        /// Day to preview from (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Maximum number of transfers (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run a host action from its argument list (`ACTION key=value ...`)
    HostAction {
        /// Action name followed by its key=value arguments
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
        /// Deposit amounts for VerifyAccount
        #[arg(long, num_args = 2, value_names = ["DEPOSIT_ONE", "DEPOSIT_TWO"])]
        deposits: Option<Vec<String>>,
    },

    /// Check micro-deposit amounts without contacting the backend
    ValidateDeposits { deposit_one: String, deposit_two: String },

    /// Print the month key used by the transfers endpoint
    MonthKey {
        /// Day inside the month (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Print the effective configuration
    Config,
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let mut config = ClientConfig::load(Some(&path))
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(path) = &cli.strings {
        config.strings_file = Some(path.clone());
    }
    Ok(config)
}

fn client(config: &ClientConfig) -> Result<ApiClient<ReqwestTransport>> {
    ApiClient::from_config(config).context("Failed to build HTTP client")
}

fn deposit_verdict(input: &str) -> &'static str {
    if is_valid_deposit(input) {
        "valid"
    } else {
        "invalid"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    bankwidgets_core::logging::init(cli.verbose, None)?;

    let config = load_config(&cli)?;
    let strings = config.strings().context("Failed to load string overrides")?;

    match cli.command {
        Commands::Link {
            institution,
            routing_number,
            account_number,
            account_type,
            name,
        } => {
            let request = LinkRequest {
                institution_name: institution,
                routing_number,
                account_number,
                account_type: account_type.parse::<AccountType>()?,
                account_name: name,
            };
            let client = client(&config)?;
            let response = add_account(&client, &request).await?;
            let created = LinkedAccountCreated::from_response(&response);

            println!("Linked account: {}", request.institution_name);
            if let Some(id) = &created.linked_account_id {
                println!("  ID: {}", id);
            }
            if created.requires_verification() {
                if let Some(ach_id) = &created.ach_id {
                    println!("  Pending verification. ACH ID: {}", ach_id);
                }
            }
        }

        Commands::Unlink {
            account_type,
            account_id,
        } => {
            let account = LinkedAccountRef {
                account_type,
                account_id,
            };
            let client = client(&config)?;
            let events = AccountEvents::new();
            if unlink_account(&client, &events, &account).await {
                println!("Unlinked account: {}", account.account_id);
            } else {
                anyhow::bail!("Failed to unlink account {}", account.account_id);
            }
        }

        Commands::Verify {
            ach_id,
            deposit_one,
            deposit_two,
        } => {
            if !deposits_valid(&deposit_one, &deposit_two) {
                anyhow::bail!("{}", strings.resource("linkedaccounts.invaliddepositamount"));
            }
            let attempt = VerificationAttempt::from_inputs(ach_id, &deposit_one, &deposit_two)?;
            let client = client(&config)?;
            if verify_account(&client, &attempt).await {
                println!("Verified account: {}", attempt.ach_id);
            } else {
                anyhow::bail!("{}", strings.resource("linkedaccounts.verifyaccounterror"));
            }
        }

        Commands::Transfers { date, limit } => {
            let client = client(&config)?;
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let preview = PreviewLoader::new(&client, &strings)
                .with_limit(limit.unwrap_or(config.preview_limit))
                .load(today, Utc::now())
                .await;

            if preview.ordered.is_empty() {
                println!("{}", preview.placeholder(&strings));
            } else {
                for transfer in &preview.ordered {
                    println!("{}", transfer.header(&strings));
                    println!("  {}", transfer.summary(&strings));
                }
            }
        }

        Commands::HostAction { args, deposits } => {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            match args[0] {
                "RemoveLinkedAccount" => {
                    let client = client(&config)?;
                    let events = AccountEvents::new();
                    if remove_linked_account(&client, &events, &args).await? {
                        println!("Unlinked account");
                    } else {
                        anyhow::bail!("Failed to unlink account");
                    }
                }
                "VerifyAccount" => {
                    let target = VerificationTarget::from_args(&args)?;
                    let Some([deposit_one, deposit_two]) = deposits.as_deref() else {
                        anyhow::bail!("VerifyAccount requires --deposits DEPOSIT_ONE DEPOSIT_TWO");
                    };
                    let mut form = VerificationForm::new(target);
                    form.edit(DepositField::First, deposit_one.as_str());
                    form.edit(DepositField::Second, deposit_two.as_str());
                    if !form.submit_enabled() {
                        anyhow::bail!("{}", strings.resource("linkedaccounts.invaliddepositamount"));
                    }

                    let client = client(&config)?;
                    match form.submit(&client).await? {
                        VerificationPhase::Success => {
                            let target = form.target();
                            let name = if target.account_name.is_empty() {
                                &target.ach_id
                            } else {
                                &target.account_name
                            };
                            println!("Verified account: {}", name);
                        }
                        _ => anyhow::bail!("{}", strings.resource("linkedaccounts.verifyaccounterror")),
                    }
                }
                other => anyhow::bail!(
                    "Unknown host action '{}'. Expected RemoveLinkedAccount or VerifyAccount",
                    other
                ),
            }
        }

        Commands::ValidateDeposits {
            deposit_one,
            deposit_two,
        } => {
            println!("Deposit 1: {} ({})", deposit_one, deposit_verdict(&deposit_one));
            println!("Deposit 2: {} ({})", deposit_two, deposit_verdict(&deposit_two));
            if !deposits_valid(&deposit_one, &deposit_two) {
                anyhow::bail!("{}", strings.resource("linkedaccounts.invaliddepositamount"));
            }
            println!(
                "Cents: {} {}",
                dollars_to_cents(&deposit_one)?,
                dollars_to_cents(&deposit_two)?
            );
        }

        Commands::MonthKey { date } => {
            println!("{}", month_key(date));
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
