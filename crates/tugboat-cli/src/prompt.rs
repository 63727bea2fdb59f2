//! Interactive prompts

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use tugboat_api::responses::Droplet;
use tugboat_core::{CoreError, DropletChooser};

use crate::output;

/// Asks the user to pick one of several fuzzy matches by index
pub struct PromptChooser;

impl DropletChooser for PromptChooser {
    fn choose(&self, candidates: &[&Droplet]) -> tugboat_core::Result<usize> {
        println!();
        println!("Multiple droplets found.");
        println!();
        for (index, droplet) in candidates.iter().enumerate() {
            println!("{}", output::choice_line(index, droplet));
        }
        println!();

        let count = candidates.len();
        Input::<usize>::with_theme(&ColorfulTheme::default())
            .with_prompt("Please choose a droplet")
            .validate_with(|choice: &usize| -> Result<(), String> {
                if *choice < count {
                    Ok(())
                } else {
                    Err(format!("choose a number between 0 and {}", count - 1))
                }
            })
            .interact_text()
            .map_err(|e| CoreError::Prompt(e.to_string()))
    }
}

/// Yes/no confirmation, defaulting to no
pub fn confirm(prompt: &str) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
}
