use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::Result;

use scl90_cli::commands::{self, ReportFormat, ReportRequest};
use scl90_cli::config::{self, Scl90Config};
use scl90_cli::logging::{self, LogTarget};
use scl90_cli::tui::{self, App};
use scl90_core::models::evaluation::Evaluation;
use scl90_core::models::respondent::Sex;

#[derive(Parser)]
#[command(name = "scl90")]
#[command(about = "Score the SCL-90-R symptom inventory and generate reports")]
#[command(version)]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Enter responses in a terminal form and save a PDF report (default)
    Form {
        /// Save here instead of asking with a file dialog
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Score a responses file and print the result
    Score {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "male")]
        sex: Sex,
        /// Print the full profile as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a report from a responses file without the form
    Report {
        #[arg(short, long)]
        input: PathBuf,
        /// Respondent name
        #[arg(short, long)]
        name: String,
        /// Defaults to the configured evaluator
        #[arg(short, long)]
        evaluator: Option<String>,
        /// Defaults to the configured sex
        #[arg(short, long)]
        sex: Option<Sex>,
        /// dd/mm/yyyy or yyyy-mm-dd; defaults to today
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Pdf)]
        format: ReportFormat,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Form { output: None });

    let target = if matches!(command, Command::Form { .. }) {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    logging::init(target, cli.verbose, cli.log_json)?;

    let config_path = cli.config.as_deref();

    match command {
        Command::Form { output } => {
            let config = config::load_config(config_path)?;
            run_form(&config, output)?;
        }
        Command::Score { input, sex, json } => {
            println!("{}", commands::score(&input, sex, json)?);
        }
        Command::Report {
            input,
            name,
            evaluator,
            sex,
            date,
            output,
            format,
        } => {
            let config = config::load_config(config_path)?;
            let request = ReportRequest {
                input,
                name,
                evaluator,
                sex,
                date,
                output,
                format,
            };
            let path = commands::report(&request, &config)?;
            println!("Report saved to {}", path.display());
        }
        Command::Config { action } => match action {
            ConfigAction::Show => println!("{}", commands::config_show(config_path)?),
            ConfigAction::Init { force } => {
                let path = commands::config_init(config_path, force)?;
                println!("Wrote default config to {}", path.display());
            }
            ConfigAction::Path => {
                let path = match config_path {
                    Some(p) => p.to_path_buf(),
                    None => config::config_path()?,
                };
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn run_form(config: &Scl90Config, output: Option<PathBuf>) -> Result<()> {
    let app = App::new(config.default_sex, config.default_evaluator.as_deref());
    let Some(evaluation) = tui::run_form(app)? else {
        return Ok(());
    };

    let path = match output {
        Some(p) => p,
        None => match ask_save_path(&evaluation, &config.output_dir()) {
            Some(p) => p,
            None => {
                tracing::info!("save dialog returned no path");
                println!("{}", commands::SAVE_CANCELLED);
                return Ok(());
            }
        },
    };

    commands::save_pdf(&evaluation, &path, &config.report)?;
    println!("Report saved to {}", path.display());
    Ok(())
}

fn ask_save_path(evaluation: &Evaluation, dir: &Path) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save SCL-90-R report")
        .set_directory(dir)
        .set_file_name(evaluation.default_file_name())
        .add_filter("PDF files", &["pdf"])
        .add_filter("All files", &["*"])
        .save_file()
}
