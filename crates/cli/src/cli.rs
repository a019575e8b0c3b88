//! Command-line arguments for `hrms-onboard`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hrms_core::types::DbId;

/// Drive employee onboarding against an HRMS backend
#[derive(Debug, Parser)]
#[command(name = "hrms-onboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL
    #[arg(long, global = true, env = "HRMS_API_URL")]
    pub api_url: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print a blank draft, or create one at --output
    Template {
        /// Create this draft file if it does not exist yet
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Walk the wizard over a draft file, saving every tab in order
    Run {
        /// Draft file; ids assigned by the backend are written back into it
        draft: PathBuf,
    },

    /// Print everything the backend holds for an employee
    Fetch {
        employee_id: DbId,

        /// Write the fetched draft here instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
