//! `tugboat keys`

use color_eyre::Result;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context) -> Result<()> {
    let keys = ctx.client.list_ssh_keys().await?;

    if keys.is_empty() {
        println!("You don't appear to have any SSH keys.");
        return Ok(());
    }

    println!("SSH Keys:");
    for key in &keys {
        println!("{}", output::key_line(key));
    }
    Ok(())
}
