use std::path::PathBuf;

use tablero_core::config::AppConfig;
use tablero_core::error::TableroError;
use tablero_core::extraction::http::build_client;
use tablero_core::portfolio::{
    fetch_projects, load_projects, progress_series, visible_projects, years, ProgressRange,
    ProjectFilter,
};

use crate::output;

pub fn run(
    config: &AppConfig,
    input_file: Option<PathBuf>,
    search: Option<String>,
    sponsor: Option<String>,
    year: Option<String>,
    range: Option<ProgressRange>,
    output_format: &str,
) -> Result<(), TableroError> {
    let projects = match input_file {
        Some(path) => load_projects(&path)?,
        None => {
            let client = build_client(config.timeout())?;
            fetch_projects(&client, &config.api.projects_url)?
        }
    };

    if let Some(range) = range {
        let series = progress_series(&projects, range);
        return match output_format {
            "json" => output::json::print(&series),
            _ => {
                output::table::print_progress(&series);
                Ok(())
            }
        };
    }

    let filter = ProjectFilter {
        text: search,
        sponsor,
        year,
    };
    let visible = visible_projects(&projects, &filter);

    match output_format {
        "json" => output::json::print(&visible)?,
        _ => {
            output::table::print_board(&visible);
            let all_years = years(&projects);
            if !all_years.is_empty() {
                println!("Years: {}", all_years.join(", "));
            }
        }
    }

    Ok(())
}
