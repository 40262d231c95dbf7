use std::path::PathBuf;

use clap::Parser;
use viewinsta_engine::{EditSettings, DEFAULT_ENDPOINT, DEFAULT_MODEL};

use super::logging::LogDestination;

/// Watch. Earn. Withdraw.
///
/// The image editor needs the `API_KEY` environment variable.
#[derive(Debug, Parser)]
#[command(name = "viewinsta", version)]
pub struct Cli {
    /// Directory edited images are saved into.
    #[arg(long, env = "VIEWINSTA_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Base URL of the generative image service.
    #[arg(long, env = "VIEWINSTA_GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model used for image edits.
    #[arg(long, env = "VIEWINSTA_GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
}

impl Cli {
    pub fn edit_settings(&self) -> EditSettings {
        EditSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            ..EditSettings::default()
        }
    }
}
