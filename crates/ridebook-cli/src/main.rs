use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use ridebook_cli::{admin, inspect, seeder};
use ridebook_config::{DatabaseConfig, JwtConfig};
use ridebook_core::UserRole;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "ridebook-cli")]
#[command(about = "Ridebook CLI - permission administration and seeding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every registered permission section
    Sections,
    /// Print the effective permissions a stored document grants
    Resolve {
        #[arg(short, long, value_parser = inspect::parse_role)]
        role: UserRole,

        /// JSON permission document (`-` for stdin)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Evaluate a single permission check
    Check {
        #[arg(short, long, value_parser = inspect::parse_role)]
        role: UserRole,

        /// JSON permission document (`-` for stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Section key, e.g. rentalBookings
        #[arg(short, long)]
        section: String,

        /// view, edit or downloadCsv (omit for action flags)
        #[arg(short, long)]
        capability: Option<String>,
    },
    /// Create a super admin account
    CreateSuperadmin {
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        #[arg(short = 'l', long)]
        last_name: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,
    },
    /// Seed the database with fake employees (no permissions)
    SeedEmployees {
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
    /// Delete seeded employees (keeps super admins)
    ClearSeed,
    /// Print a development access token for an existing user
    IssueToken {
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Sections => {
            print!("{}", inspect::render_sections());
        }
        Commands::Resolve { role, file } => {
            let permissions = inspect::load_permissions(&file)?;
            print!("{}", inspect::render_matrix(&inspect::resolve(role, permissions)));
        }
        Commands::Check {
            role,
            file,
            section,
            capability,
        } => {
            let permissions = inspect::load_permissions(&file)?;
            let allowed = inspect::check(role, permissions, &section, capability.as_deref())?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                std::process::exit(2);
            }
        }
        Commands::CreateSuperadmin {
            first_name,
            last_name,
            email,
        } => {
            let first_name = prompt_if_missing(first_name, "First name")?;
            let last_name = prompt_if_missing(last_name, "Last name")?;
            let email = prompt_if_missing(email, "Email address")?;

            let pool = connect().await?;
            let admin = admin::create_superadmin(&pool, &first_name, &last_name, &email).await?;
            println!("\n✅ Super admin created successfully!");
            println!("   Email: {}", admin.email);
            println!("   Name: {}", admin.full_name());
        }
        Commands::SeedEmployees { count } => {
            let pool = connect().await?;
            seeder::seed_employees(&pool, count).await?;
        }
        Commands::ClearSeed => {
            let pool = connect().await?;
            seeder::clear_seeded_employees(&pool).await?;
        }
        Commands::IssueToken { email } => {
            let pool = connect().await?;
            let token = admin::issue_token(&pool, &email, &JwtConfig::from_env()).await?;
            println!("{token}");
        }
    }
    Ok(())
}

fn prompt_if_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env();
    ridebook_db::init_db_pool(&config)
        .await
        .context("Failed to connect to database")
}
