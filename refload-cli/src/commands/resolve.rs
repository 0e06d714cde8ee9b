//! Command to list the projects transitively referenced by a set of projects.

use crate::error::CliError;
use crate::utils::{
    load_configuration, output_format, parse_property, print_json, property_overrides,
    resolve_project_path, FormatArg, GlobalOptions,
};
use clap::Args;
use refload::{FileSystemSolution, OutputFormat, ProjectPath, ReferenceTraversal, SolutionHost};
use serde::Serialize;
use std::path::PathBuf;

/// List the projects transitively referenced by the given projects.
#[derive(Args)]
pub struct ResolveCommand {
    /// Project files to start from
    #[arg(value_name = "PROJECT", required = true)]
    pub projects: Vec<PathBuf>,

    /// Define a global property (NAME=VALUE); may be repeated
    #[arg(long = "property", short = 'p', value_name = "NAME=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Exit with status 1 if a referenced project file does not exist
    #[arg(long)]
    pub fail_on_missing: bool,
}

#[derive(Serialize)]
struct Resolution<'a> {
    roots: &'a [ProjectPath],
    references: &'a [ProjectPath],
    missing: Vec<&'a ProjectPath>,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, property_overrides(&self.properties))?;

        let roots = self
            .projects
            .iter()
            .map(|path| resolve_project_path(path, &config))
            .collect::<Result<Vec<_>, _>>()?;

        let solution = FileSystemSolution::from_projects(roots).with_config(&config);
        let roots = solution.loaded_projects();

        let logger = global.logger();
        let references = ReferenceTraversal::new(&solution, &logger)
            .with_extractor(config.reference_extractor())
            .with_canonicalizer(config.path_canonicalizer())
            .collect_transitive_references(&roots);

        let missing: Vec<&ProjectPath> = references
            .iter()
            .filter(|path| !path.as_path().is_file())
            .collect();

        match output_format(self.format, &config) {
            OutputFormat::Text => {
                for reference in &references {
                    println!("{reference}");
                }
            }
            OutputFormat::Json => print_json(&Resolution {
                roots: &roots,
                references: &references,
                missing: missing.clone(),
            })?,
        }

        if self.fail_on_missing && !missing.is_empty() {
            return Err(CliError::SemanticFailure(format!(
                "{} referenced project(s) do not exist",
                missing.len()
            )));
        }

        Ok(())
    }
}
