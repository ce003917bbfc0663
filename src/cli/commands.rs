//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagcloud")]
#[command(about = "Tag lists and tag clouds for templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Tagging data file (default: $TAGCLOUD_DATA or ./tagging.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Settings file (default: $TAGCLOUD_SETTINGS or ./tagcloud.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template file
    Render {
        /// Template to render
        template: PathBuf,

        /// Bind one object: name=app.model:id
        #[arg(long = "bind", value_name = "NAME=OBJECT")]
        bindings: Vec<String>,

        /// Bind every object of a model: name=app.model
        #[arg(long = "bind-all", value_name = "NAME=MODEL")]
        bind_all: Vec<String>,

        /// Bind a string: name=value
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
    },

    /// List tags with usage counts
    Tags {
        /// Scope: app, app.model or app.model:field
        #[arg(long = "for", value_name = "SCOPE")]
        scope: Option<String>,

        /// Maximum number of tags
        #[arg(short, long, value_parser = parse_limit)]
        limit: Option<usize>,
    },

    /// Show the tag cloud with weights
    Cloud {
        /// Scope: app, app.model or app.model:field
        #[arg(long = "for", value_name = "SCOPE")]
        scope: Option<String>,

        /// Maximum number of tags
        #[arg(short, long, value_parser = parse_limit)]
        limit: Option<usize>,
    },

    /// Find objects sharing tags with an object
    Similar {
        /// Object reference: app.model:id
        object: String,

        /// Only look at this model
        #[arg(long = "for", value_name = "MODEL")]
        model: Option<String>,

        /// Maximum number of objects
        #[arg(short, long, value_parser = parse_limit)]
        limit: Option<usize>,
    },

    /// Classify the configured through model
    Check,
}

/// Limits follow the template grammar: positive integers only
fn parse_limit(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{}' is not a positive integer", raw)),
    }
}
