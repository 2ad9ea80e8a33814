use crate::report::{run_browse, run_calendar, BrowseArgs, CalendarArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use freebie_calendar::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Birthday Freebie Calendar",
    about = "Browse birthday freebies and plan signup deadlines from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Filter and sort the catalog
    Browse(BrowseArgs),
    /// Show the birthday calendar for a set of saved freebies
    Calendar(CalendarArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Catalog file (JSON or CSV); defaults to APP_CATALOG_PATH or the bundled sample
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Browse(args) => run_browse(args),
        Command::Calendar(args) => run_calendar(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use freebie_calendar::catalog::Category;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn browse_flags_parse() {
        let cli = Cli::try_parse_from([
            "freebie-calendar-api",
            "browse",
            "--category",
            "drinks",
            "--category",
            "food",
            "--easy",
            "--sort",
            "name",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Browse(args)) => {
                assert_eq!(args.category, vec![Category::Drinks, Category::Food]);
                assert!(args.easy);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn calendar_takes_comma_separated_ids() {
        let cli = Cli::try_parse_from([
            "freebie-calendar-api",
            "calendar",
            "--birthday",
            "01-05",
            "--saved",
            "a,b",
            "--today",
            "2025-12-30",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Calendar(args)) => {
                assert_eq!(args.saved, vec!["a".to_string(), "b".to_string()]);
                assert!(args.today.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
