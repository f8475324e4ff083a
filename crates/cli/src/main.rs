//! StoreDesk CLI - terminal front end for the admin console.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (prompts for the password when --password is omitted)
//! storedesk login -e admin@example.com
//!
//! # Browse
//! storedesk dashboard
//! storedesk orders list --search asha
//! storedesk products list --category apparel --status "low stock"
//!
//! # Change things
//! storedesk orders status 42 delivered
//! storedesk --yes customers delete 7
//! ```
//!
//! Every command goes through the navigation shell; signed out, anything but
//! `login` answers "sign in first". Destructive commands ask for confirmation
//! unless `--yes` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storedesk_admin::{Console, ConsoleConfig, ConsoleError, Shell};
use storedesk_core::{CustomerId, OrderId, OrderStatus, ProductId, TicketPriority};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "storedesk")]
#[command(author, version, about = "StoreDesk admin console")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a super admin
    Login {
        #[arg(short, long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Store summary
    Dashboard,
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Support tickets
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },
    /// Your own profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Account security
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(clap::Args, Clone, Default)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Register a customer
    Add {
        #[command(flatten)]
        fields: CustomerFields,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },
    /// Edit a customer; omitted fields keep their value
    Edit {
        id: CustomerId,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer
    Delete { id: CustomerId },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List every order
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one order with its items
    Show { id: OrderId },
    /// Set an order's status
    Status { id: OrderId, status: OrderStatus },
}

#[derive(clap::Args, Clone, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub quantity: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub tax_percentage: Option<String>,
    #[arg(long)]
    pub discount: Option<String>,
    #[arg(long)]
    pub main_category_id: Option<String>,
    #[arg(long)]
    pub child_category_id: Option<String>,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        #[arg(short, long)]
        search: Option<String>,
        /// Category title, or "all"
        #[arg(long, default_value = "all")]
        category: String,
        /// active, inactive, "low stock", "out of stock", or "all"
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Create a product
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Edit a product; omitted fields keep their value
    Edit {
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(Subcommand)]
enum TicketAction {
    /// List tickets
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Open a ticket
    Add {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "medium")]
        priority: TicketPriority,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show your profile
    Show,
    /// Update your profile; omitted fields keep their value
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Turn two-factor authentication on or off
    TwoFactor {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
    /// Change your password; you are signed out afterwards
    Password,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ConsoleConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(config: &ConsoleConfig) {
    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storedesk=info,storedesk_admin=info".into());

    let json_layer = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConsoleConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::notice(&ConsoleError::from(e).notice());
            std::process::exit(2);
        }
    };

    // Sentry first so the tracing layer has a client to report to
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    if let Err(e) = run(cli, config).await {
        e.report();
        output::notice(&e.notice());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ConsoleConfig) -> Result<(), ConsoleError> {
    let shell = Shell::new(Console::new(config)?);
    let confirm = commands::Prompt::new(cli.yes);

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&shell, &email, password).await
        }
        Commands::Logout => commands::session::logout(&shell),
        Commands::Whoami => commands::session::whoami(&shell),
        Commands::Dashboard => commands::dashboard::show(&shell).await,
        Commands::Customers { action } => match action {
            CustomerAction::List { search } => commands::customers::list(&shell, search).await,
            CustomerAction::Add {
                fields,
                password,
                password_confirmation,
            } => commands::customers::add(&shell, fields, password, password_confirmation).await,
            CustomerAction::Edit { id, fields } => {
                commands::customers::edit(&shell, id, fields).await
            }
            CustomerAction::Delete { id } => {
                commands::customers::delete(&shell, id, &confirm).await
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List { search } => commands::orders::list(&shell, search).await,
            OrderAction::Show { id } => commands::orders::show(&shell, id).await,
            OrderAction::Status { id, status } => {
                commands::orders::set_status(&shell, id, status).await
            }
        },
        Commands::Products { action } => match action {
            ProductAction::List {
                search,
                category,
                status,
            } => commands::products::list(&shell, search, category, status).await,
            ProductAction::Add { fields } => commands::products::add(&shell, fields).await,
            ProductAction::Edit { id, fields } => {
                commands::products::edit(&shell, id, fields).await
            }
            ProductAction::Delete { id } => {
                commands::products::delete(&shell, id, &confirm).await
            }
        },
        Commands::Tickets { action } => match action {
            TicketAction::List { search } => commands::tickets::list(&shell, search),
            TicketAction::Add {
                customer,
                subject,
                priority,
            } => commands::tickets::add(&shell, customer, subject, priority),
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&shell).await,
            ProfileAction::Update {
                first_name,
                last_name,
                email,
                mobile,
                city,
                bio,
            } => {
                let edits = commands::profile::ProfileEdits {
                    first_name,
                    last_name,
                    email,
                    mobile,
                    city,
                    bio,
                };
                commands::profile::update(&shell, edits).await
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::TwoFactor { enabled } => {
                commands::settings::two_factor(&shell, enabled).await
            }
            SettingsAction::Password => commands::settings::password(&shell).await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_login_without_password_flag_prompts() {
        let cli = Cli::try_parse_from(["storedesk", "login", "-e", "asha@example.com"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Login { password: None, .. })
        ));
    }

    #[test]
    fn test_two_factor_takes_boolish_values() {
        let cli = Cli::try_parse_from(["storedesk", "settings", "two-factor", "off"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Settings {
                action: SettingsAction::TwoFactor { enabled: false }
            })
        ));
    }
}
