//! Command to load every missing referenced project into a solution.
//!
//! The solution file itself is never rewritten; the command reports what
//! opening the solution would add.

use crate::error::CliError;
use crate::utils::{
    load_configuration, output_format, parse_property, print_json, property_overrides,
    resolve_project_path, FormatArg, GlobalOptions,
};
use clap::Args;
use refload::{FileSystemSolution, LoadReport, OutputFormat, SolutionLoader};
use std::path::PathBuf;

/// Load every missing referenced project into a solution.
#[derive(Args)]
pub struct SolutionCommand {
    /// Solution file (.sln)
    #[arg(value_name = "SOLUTION")]
    pub solution: PathBuf,

    /// Define a global property (NAME=VALUE); may be repeated
    #[arg(long = "property", short = 'p', value_name = "NAME=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Exit with status 1 if any project could not be added
    #[arg(long)]
    pub fail_on_missing: bool,
}

impl SolutionCommand {
    /// Execute the solution command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, property_overrides(&self.properties))?;
        let path = resolve_project_path(&self.solution, &config)?;

        let mut solution = FileSystemSolution::from_solution_file(path.as_path())?.with_config(&config);

        let logger = global.logger();
        let report = SolutionLoader::new(&logger)
            .with_config(&config)
            .on_solution_open(&mut solution);

        match output_format(self.format, &config) {
            OutputFormat::Text => print_report(&report),
            OutputFormat::Json => print_json(&report)?,
        }

        if self.fail_on_missing && report.has_failures() {
            return Err(CliError::SemanticFailure(format!(
                "{} project(s) could not be added",
                report.failed.len() + report.shared_failed.len()
            )));
        }

        Ok(())
    }
}

fn print_report(report: &LoadReport) {
    let sections = [
        ("added", &report.added),
        ("failed", &report.failed),
        ("shared", &report.shared_added),
        ("shared-failed", &report.shared_failed),
    ];
    for (label, paths) in sections {
        for path in paths {
            println!("{label}\t{path}");
        }
    }
}
