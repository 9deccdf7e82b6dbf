use clap::{Parser, Subcommand};
use migration::Migrator;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

#[derive(Parser, Debug)]
#[command(name = "migration")]
#[command(about = "Apply or roll back the Pursebook schema")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./pursebook.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Step>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Step {
    /// Apply pending migrations (all of them by default).
    Up {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations (the last one by default).
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Drop every table and apply all migrations again.
    Fresh,
    /// List applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Step::Up { steps: None }) {
        Step::Up { steps } => Migrator::up(&db, steps).await?,
        Step::Down { steps } => Migrator::down(&db, Some(steps)).await?,
        Step::Fresh => Migrator::fresh(&db).await?,
        Step::Status => Migrator::status(&db).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defaults_to_up() {
        let cli = Cli::try_parse_from(["migration", "--database-url", "sqlite::memory:"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.database_url, "sqlite::memory:");
    }

    #[test]
    fn down_rolls_back_one_step_unless_told_otherwise() {
        let cli = Cli::try_parse_from(["migration", "down"]).unwrap();
        assert_eq!(cli.command, Some(Step::Down { steps: 1 }));
        let cli = Cli::try_parse_from(["migration", "down", "--steps", "3"]).unwrap();
        assert_eq!(cli.command, Some(Step::Down { steps: 3 }));
    }
}
