//! Per-invocation state shared by the commands

use std::io::Write;
use std::path::Path;

use color_eyre::Result;
use tugboat_api::responses::Droplet;
use tugboat_client::HttpClient;
use tugboat_core::{Config, DropletSelector, resolve_droplet};

use crate::output;
use crate::prompt::PromptChooser;

/// Loaded config plus a ready API client
pub struct Context {
    pub config: Config,
    pub client: HttpClient,
}

impl Context {
    /// Load the config file and build a client from it
    ///
    /// # Errors
    /// Returns `CoreError::NotAuthorized` when the file or credentials are missing
    pub fn load(config_path: &Path) -> tugboat_core::Result<Self> {
        let config = Config::load(config_path)?;
        let client = config.client(config_path)?;
        Ok(Self { config, client })
    }

    /// Resolve a selector to one droplet, reporting progress on stdout
    pub async fn find_droplet(&self, selector: &DropletSelector) -> Result<Droplet> {
        print!("{}", selector.describe());
        std::io::stdout().flush()?;

        let resolution = resolve_droplet(&self.client, selector, &PromptChooser).await;
        let resolution = match resolution {
            Ok(resolution) => resolution,
            Err(e) => {
                println!("{}", output::failed("error"));
                return Err(e.into());
            }
        };

        if !resolution.chosen {
            println!(
                "{}",
                output::success(&format!(
                    "done, {} ({})",
                    resolution.droplet.id, resolution.droplet.name
                ))
            );
        }
        Ok(resolution.droplet)
    }
}
