//! tugboat CLI
//!
//! Command-line interface for managing droplets through the provider API

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;
mod prompt;

use context::Context;

#[derive(Parser)]
#[command(name = "tugboat", version)]
#[command(about = "Manage droplets from the command line", long_about = None)]
#[command(after_help = "To learn more or to contribute, please see github.com/pearkes/tugboat")]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "TUGBOAT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log API requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

// Ways to pick a droplet. Precedence: id, then exact name, then fuzzy name
#[derive(Args, Debug)]
struct DropletArgs {
    /// Case-insensitive part of the droplet's name
    #[arg(value_name = "FUZZY_NAME")]
    fuzzy_name: Option<String>,

    /// The ID of the droplet
    #[arg(short, long)]
    id: Option<u64>,

    /// The exact name of the droplet
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Authorize a DigitalOcean account with tugboat
    #[command(long_about = "Walks through adding configuration details to tugboat. \
        You are asked for your client and API keys, which are stored in ~/.tugboat. \
        You can retrieve your credentials from digitalocean.com/api_access.\n\n\
        Optionally, you can configure the SSH key path, user and port used by \
        `tugboat ssh`, and the default droplet options used by `tugboat create`.")]
    Authorize,

    /// Retrieve a list of your droplets
    Droplets,

    /// Retrieve a list of your images
    Images {
        /// Show global images
        #[arg(short, long)]
        global: bool,
    },

    /// SSH into a droplet
    Ssh {
        #[command(flatten)]
        droplet: DropletArgs,
    },

    /// Create a droplet
    Create {
        /// Name of the new droplet
        name: String,

        /// The size_id of the droplet [default: 64]
        #[arg(short, long)]
        size: Option<u64>,

        /// The image_id of the droplet [default: 2676]
        #[arg(short, long)]
        image: Option<u64>,

        /// The region_id of the droplet [default: 1]
        #[arg(short, long)]
        region: Option<u64>,

        /// A comma separated list of SSH key ids to add to the droplet
        #[arg(short, long)]
        keys: Option<String>,
    },

    /// Destroy a droplet
    Destroy {
        #[command(flatten)]
        droplet: DropletArgs,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        confirm: bool,
    },

    /// Restart a droplet
    Restart {
        #[command(flatten)]
        droplet: DropletArgs,
    },

    /// Shutdown a droplet
    Halt {
        #[command(flatten)]
        droplet: DropletArgs,

        /// Power off instead of a graceful shutdown
        #[arg(long)]
        hard: bool,
    },

    /// Show a droplet's information
    Info {
        #[command(flatten)]
        droplet: DropletArgs,
    },

    /// Queue a snapshot of the droplet
    Snapshot {
        /// Name for the snapshot image
        snapshot_name: String,

        #[command(flatten)]
        droplet: DropletArgs,
    },

    /// Show available SSH keys
    Keys,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => tugboat_core::Config::default_path()?,
    };

    let ctx = || Context::load(&config_path);

    match cli.command {
        Commands::Authorize => commands::authorize::run(&config_path).await,
        Commands::Droplets => commands::droplets::list(&ctx()?).await,
        Commands::Images { global } => commands::images::list(&ctx()?, global).await,
        Commands::Ssh { droplet } => commands::ssh::run(&ctx()?, droplet.into_selector()?).await,
        Commands::Create {
            name,
            size,
            image,
            region,
            keys,
        } => {
            let options = commands::droplets::CreateOptions {
                name,
                size,
                image,
                region,
                keys,
            };
            commands::droplets::create(&ctx()?, options).await
        }
        Commands::Destroy { droplet, confirm } => {
            commands::droplets::destroy(&ctx()?, droplet.into_selector()?, confirm).await
        }
        Commands::Restart { droplet } => {
            commands::droplets::restart(&ctx()?, droplet.into_selector()?).await
        }
        Commands::Halt { droplet, hard } => {
            commands::droplets::halt(&ctx()?, droplet.into_selector()?, hard).await
        }
        Commands::Info { droplet } => {
            commands::droplets::info(&ctx()?, droplet.into_selector()?).await
        }
        Commands::Snapshot {
            snapshot_name,
            droplet,
        } => {
            let ctx = ctx()?;
            commands::droplets::snapshot(&ctx, droplet.into_selector()?, snapshot_name).await
        }
        Commands::Keys => commands::keys::list(&ctx()?).await,
    }
}

impl DropletArgs {
    fn into_selector(self) -> tugboat_core::Result<tugboat_core::DropletSelector> {
        tugboat_core::DropletSelector::from_args(self.id, self.name, self.fuzzy_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tugboat_core::DropletSelector;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_selector_flags() {
        let cli = Cli::parse_from(["tugboat", "restart", "web", "-n", "web-01"]);
        let Commands::Restart { droplet } = cli.command else {
            panic!("expected restart");
        };
        assert_eq!(
            droplet.into_selector().unwrap(),
            DropletSelector::Name("web-01".into())
        );
    }

    #[test]
    fn test_snapshot_positional_order() {
        let cli = Cli::parse_from(["tugboat", "snapshot", "nightly", "db"]);
        let Commands::Snapshot {
            snapshot_name,
            droplet,
        } = cli.command
        else {
            panic!("expected snapshot");
        };
        assert_eq!(snapshot_name, "nightly");
        assert_eq!(
            droplet.into_selector().unwrap(),
            DropletSelector::Fuzzy("db".into())
        );
    }

    #[test]
    fn test_create_flags() {
        let cli = Cli::parse_from([
            "tugboat", "create", "web", "-s", "66", "-i", "12", "-r", "2", "-k", "1,2",
        ]);
        let Commands::Create {
            name,
            size,
            image,
            region,
            keys,
        } = cli.command
        else {
            panic!("expected create");
        };
        assert_eq!(name, "web");
        assert_eq!((size, image, region), (Some(66), Some(12), Some(2)));
        assert_eq!(keys.as_deref(), Some("1,2"));
    }

    #[test]
    fn test_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["tugboat", "info", "-i", "abc"]).is_err());
    }
}
