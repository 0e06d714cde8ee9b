//! Command to expand `$(Name)` macros in a string.

use crate::error::CliError;
use crate::utils::{
    load_configuration, parse_property, property_overrides, resolve_project_path, GlobalOptions,
};
use clap::Args;
use refload::macros::resolve_macros;
use refload::{FileSystemSolution, ProjectProperties};
use std::path::PathBuf;

/// Expand the build macros in a string.
#[derive(Args)]
pub struct ExpandCommand {
    /// Text containing $(Name) macros
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Define a global property (NAME=VALUE); may be repeated
    #[arg(long = "property", short = 'p', value_name = "NAME=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Expand as seen from this project, with its reserved properties
    #[arg(long, value_name = "PROJECT")]
    pub project: Option<PathBuf>,
}

impl ExpandCommand {
    /// Execute the expand command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, property_overrides(&self.properties))?;
        let logger = global.logger();

        let properties = match &self.project {
            Some(path) => {
                let project = resolve_project_path(path, &config)?;
                FileSystemSolution::from_projects([project.clone()])
                    .with_config(&config)
                    .project_properties(&project)
            }
            None => ProjectProperties::from_config(&config),
        };

        println!("{}", resolve_macros(&self.text, &properties, &logger));
        Ok(())
    }
}
