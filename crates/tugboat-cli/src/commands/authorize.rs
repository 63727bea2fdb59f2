//! `tugboat authorize`
//!
//! Prompts for credentials, SSH settings and droplet defaults, writes them to
//! the config file, then checks the credentials with one API call. Answers
//! default to what the existing file holds.

use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use tracing::info;
use tugboat_core::Config;

use crate::output;

/// Everything asked during authorization
#[derive(Debug, Clone, PartialEq, Eq)]
struct Answers {
    client_key: String,
    /// Blank keeps the stored key
    api_key: String,
    ssh_key_path: String,
    ssh_user: String,
    ssh_port: u16,
    region_id: u64,
    image_id: u64,
    size_id: u64,
    /// Blank clears the default
    ssh_key_ids: String,
}

impl Answers {
    fn apply(self, config: &mut Config) {
        config.authentication.client_key = self.client_key.trim().to_string();
        if !self.api_key.trim().is_empty() {
            config.authentication.api_key = self.api_key.trim().to_string();
        }

        if !self.ssh_key_path.trim().is_empty() {
            config.ssh.key_path = self.ssh_key_path.trim().to_string();
        }
        if !self.ssh_user.trim().is_empty() {
            config.ssh.user = self.ssh_user.trim().to_string();
        }
        config.ssh.port = self.ssh_port;

        config.defaults.region_id = self.region_id;
        config.defaults.image_id = self.image_id;
        config.defaults.size_id = self.size_id;
        let keys = self.ssh_key_ids.trim();
        config.defaults.ssh_key_ids = (!keys.is_empty()).then(|| keys.to_string());
    }
}

fn ask_text(theme: &ColorfulTheme, prompt: &str, current: &str) -> Result<String> {
    let input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    let input = if current.is_empty() {
        input
    } else {
        input.default(current.to_string())
    };
    Ok(input.interact_text()?)
}

fn ask_number<T>(theme: &ColorfulTheme, prompt: &str, current: T) -> Result<T>
where
    T: Clone + ToString + std::str::FromStr,
    <T as std::str::FromStr>::Err: ToString,
{
    Ok(Input::<T>::with_theme(theme)
        .with_prompt(prompt)
        .default(current)
        .interact_text()?)
}

fn ask(config: &Config) -> Result<Answers> {
    let theme = ColorfulTheme::default();

    let client_key = ask_text(
        &theme,
        "Enter your client key",
        &config.authentication.client_key,
    )?;
    let api_key = Password::with_theme(&theme)
        .with_prompt(if config.authentication.api_key.is_empty() {
            "Enter your API key"
        } else {
            "Enter your API key (blank keeps the current one)"
        })
        .allow_empty_password(true)
        .interact()?;

    let ssh_key_path = ask_text(&theme, "Enter your SSH key path", &config.ssh.key_path)?;
    let ssh_user = ask_text(&theme, "Enter your SSH user", &config.ssh.user)?;
    let ssh_port = ask_number(&theme, "Enter your SSH port number", config.ssh.port)?;

    let region_id = ask_number(
        &theme,
        "Enter your default region ID (1 is New York)",
        config.defaults.region_id,
    )?;
    let image_id = ask_number(
        &theme,
        "Enter your default image ID (2676 is Ubuntu 12.04 x64)",
        config.defaults.image_id,
    )?;
    let size_id = ask_number(
        &theme,
        "Enter your default size ID (64 is 512MB)",
        config.defaults.size_id,
    )?;
    let ssh_key_ids = ask_text(
        &theme,
        "Enter your default SSH key IDs, comma separated (optional)",
        config.defaults.ssh_key_ids.as_deref().unwrap_or_default(),
    )?;

    Ok(Answers {
        client_key,
        api_key,
        ssh_key_path,
        ssh_user,
        ssh_port,
        region_id,
        image_id,
        size_id,
        ssh_key_ids,
    })
}

pub async fn run(config_path: &Path) -> Result<()> {
    let mut config = Config::load_or_default(config_path)?;

    println!("Note: You can get this information from digitalocean.com/api_access");
    println!();

    ask(&config)?.apply(&mut config);
    config.save(config_path)?;
    info!(path = %config_path.display(), "config written");

    let client = config.client(config_path)?;
    match client.list_droplets().await {
        Ok(_) => {
            println!(
                "{}",
                output::success("Authentication with DigitalOcean was successful!")
            );
            Ok(())
        }
        Err(e) if e.is_unauthorized() => {
            println!(
                "{}",
                output::failed("Authentication with DigitalOcean failed.")
            );
            Err(e).wrap_err("check your client and API keys, then run `tugboat authorize` again")
        }
        Err(e) => Err(e).wrap_err("could not verify credentials"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Answers {
        Answers {
            client_key: " client ".into(),
            api_key: "new-key".into(),
            ssh_key_path: "~/.ssh/deploy".into(),
            ssh_user: "deploy".into(),
            ssh_port: 2222,
            region_id: 3,
            image_id: 10,
            size_id: 66,
            ssh_key_ids: "1,2".into(),
        }
    }

    #[test]
    fn test_apply_answers() {
        let mut config = Config::default();
        answers().apply(&mut config);

        assert_eq!(config.authentication.client_key, "client");
        assert_eq!(config.authentication.api_key, "new-key");
        assert_eq!(config.ssh.key_path, "~/.ssh/deploy");
        assert_eq!(config.ssh.user, "deploy");
        assert_eq!(config.ssh.port, 2222);
        assert_eq!(
            (
                config.defaults.region_id,
                config.defaults.image_id,
                config.defaults.size_id
            ),
            (3, 10, 66)
        );
        assert_eq!(config.defaults.ssh_key_ids.as_deref(), Some("1,2"));
    }

    #[test]
    fn test_blank_api_key_keeps_existing() {
        let mut config = Config::default();
        config.authentication.api_key = "stored".into();

        Answers {
            api_key: "  ".into(),
            ..answers()
        }
        .apply(&mut config);

        assert_eq!(config.authentication.api_key, "stored");
    }

    #[test]
    fn test_blank_ssh_key_ids_clears_default() {
        let mut config = Config::default();
        config.defaults.ssh_key_ids = Some("5".into());

        Answers {
            ssh_key_ids: String::new(),
            ..answers()
        }
        .apply(&mut config);

        assert_eq!(config.defaults.ssh_key_ids, None);
    }
}
