use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use wedding_planner::cli::{
    handle_budget_command, handle_config_command, handle_export_command, handle_history_command,
    handle_init_command, handle_item_command, handle_signout_command, handle_summary_command,
    handle_todo_command, handle_vendor_command, handle_whoami_command, BudgetCommands, CliContext,
    ExportArgs, InitArgs, ItemCommands, TodoCommands, VendorCommands,
};
use wedding_planner::config::PlannerPaths;
use wedding_planner::PlannerError;

/// Environment variable holding a sign-in token
const TOKEN_ENV: &str = "WEDDING_PLANNER_AUTH_TOKEN";

#[derive(Parser)]
#[command(
    name = "wedplan",
    version,
    about = "Budget, checklist and vendor planner for a Batak Toba wedding",
    long_about = "Wedding Planner tracks the initial budget per category, every \
                  payment made against it, the to-do checklist for each stage of \
                  the wedding, and the vendors and contacts involved."
)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Sign-in token, used when no session is saved
    #[arg(long, global = true, env = TOKEN_ENV, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the backend configuration
    Init(InitArgs),

    /// Show current configuration and paths
    Config,

    /// Show the signed-in user
    Whoami,

    /// Forget the saved session
    Signout,

    /// Budget summary per category
    Summary {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Initial budget per category
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Budget items (payments)
    #[command(subcommand, alias = "items")]
    Item(ItemCommands),

    /// To-do checklist
    #[command(subcommand, alias = "todos")]
    Todo(TodoCommands),

    /// Vendors and important contacts
    #[command(subcommand, alias = "vendors")]
    Vendor(VendorCommands),

    /// Export data
    Export(ExportArgs),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let paths = PlannerPaths::new()?;
    let token = cli.token.as_deref();

    match cli.command {
        Some(Commands::Init(args)) => handle_init_command(&paths, args)?,
        Some(Commands::Config) => handle_config_command(&paths)?,
        Some(Commands::Signout) => handle_signout_command(&paths)?,
        Some(Commands::History { count }) => handle_history_command(&paths, count)?,
        Some(Commands::Whoami) => {
            let ctx = CliContext::open(paths, token)?;
            handle_whoami_command(&ctx)?;
        }
        Some(Commands::Summary { csv }) => {
            let mut ctx = CliContext::open(paths, token)?;
            handle_summary_command(&mut ctx, csv)?;
        }
        Some(Commands::Budget(cmd)) => {
            let mut ctx = CliContext::open(paths, token)?;
            handle_budget_command(&mut ctx, cmd)?;
        }
        Some(Commands::Item(cmd)) => {
            let mut ctx = CliContext::open(paths, token)?;
            handle_item_command(&mut ctx, cmd)?;
        }
        Some(Commands::Todo(cmd)) => {
            let mut ctx = CliContext::open(paths, token)?;
            handle_todo_command(&mut ctx, cmd)?;
        }
        Some(Commands::Vendor(cmd)) => {
            let mut ctx = CliContext::open(paths, token)?;
            handle_vendor_command(&mut ctx, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let mut ctx = CliContext::open(paths, token)?;
            handle_export_command(&mut ctx, args)?;
        }
        None => {
            println!("Wedding Planner - Batak Toba");
            println!();
            println!("Run 'wedplan init' to configure the backend.");
            println!("Run 'wedplan --help' for usage information.");
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<PlannerError>() {
            Some(planner) => eprintln!("{}", planner.notice()),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}
