mod commands;
mod logging;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tablero_core::config::AppConfig;
use tablero_core::portfolio::ProgressRange;

#[derive(Parser)]
#[command(
    name = "tablero",
    version,
    about = "Read project canvas sheets into structured documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Layout selection shared by the canvas commands.
#[derive(Args, Clone, Default)]
pub struct LayoutArgs {
    /// Predefined layout: es (default), en
    #[arg(short, long = "layout", value_name = "PRESET")]
    pub layout: Option<String>,

    /// Custom JSON layout file (overrides --layout)
    #[arg(long = "layout-file", value_name = "FILE")]
    pub layout_file: Option<PathBuf>,
}

/// Output options shared by the canvas commands.
#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Write the canvas as JSON to a file
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the canvas from a workbook (.xlsx) or a saved payload (.json)
    Parse {
        /// Path to .xlsx workbook or .json payload
        input_file: PathBuf,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// JSON file with canvas metadata (director, functional lead, ratios)
        #[arg(short, long, value_name = "FILE")]
        meta: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch a canvas from the portfolio API by sheet name
    Fetch {
        /// Sheet (tab) name, e.g. "Canvas Valet Parking"
        sheet_id: String,

        /// Override the configured API base URL
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Ask the suggestion service to review a canvas
    Improve {
        /// Path to .xlsx workbook or .json payload
        #[arg(required_unless_present = "remote", conflicts_with = "remote")]
        input_file: Option<PathBuf>,

        /// Fetch the canvas from the API instead of a file
        #[arg(long, value_name = "SHEET_ID")]
        remote: Option<String>,

        /// Worksheet to read from a workbook
        #[arg(short, long)]
        sheet: Option<String>,

        /// Keep suggestions as notes: "all" or section names
        #[arg(short, long, value_name = "KEY", num_args = 1..)]
        notes: Vec<String>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect canvas layouts
    Layouts {
        #[command(subcommand)]
        action: LayoutsAction,
    },
    /// List portfolio projects with board filters or as progress chart data
    Projects {
        /// Saved project list (default: fetch from the configured API)
        input_file: Option<PathBuf>,

        /// Search in project names (case and accent insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Search in sponsors (case and accent insensitive)
        #[arg(long)]
        sponsor: Option<String>,

        /// Exact year
        #[arg(long)]
        year: Option<String>,

        /// Show chart data for a progress range: all, 10-29, 30-59, 60-90, 100
        #[arg(long)]
        range: Option<ProgressRange>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum LayoutsAction {
    /// List predefined layouts
    List,
    /// Describe a layout's sections and labels
    Show {
        /// Preset name (e.g., "es")
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            sheet,
            meta,
            layout,
            output,
        } => commands::parse::run(&config, input_file, sheet, meta, &layout, &output),
        Commands::Fetch {
            sheet_id,
            base_url,
            layout,
            output,
        } => commands::fetch::run(&config, &sheet_id, base_url, &layout, &output),
        Commands::Improve {
            input_file,
            remote,
            sheet,
            notes,
            layout,
            output,
        } => commands::improve::run(
            &config, input_file, remote, sheet, &notes, &layout, &output,
        ),
        Commands::Layouts { action } => match action {
            LayoutsAction::List => commands::layouts::list(),
            LayoutsAction::Show { preset } => commands::layouts::show(&preset),
            LayoutsAction::Validate { file } => commands::layouts::validate(&file),
        },
        Commands::Projects {
            input_file,
            search,
            sponsor,
            year,
            range,
            output,
        } => commands::projects::run(
            &config, input_file, search, sponsor, year, range, &output,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
