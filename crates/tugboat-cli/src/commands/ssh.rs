//! `tugboat ssh`

use color_eyre::Result;
use tracing::warn;
use tugboat_core::DropletSelector;
use tugboat_exec::SshCommandBuilder;

use crate::context::Context;
use crate::output;

pub async fn run(ctx: &Context, selector: DropletSelector) -> Result<()> {
    let droplet = ctx.find_droplet(&selector).await?;
    let ssh = &ctx.config.ssh;

    let host = droplet.ip_address.clone().unwrap_or_default();
    let command = SshCommandBuilder::new(host, &ssh.user)
        .named(&droplet.name)
        .with_key_path(&ssh.key_path)
        .with_port(ssh.port)
        .build()?;

    println!("Executing SSH {}...", output::droplet_ref(&droplet));
    let result = command.run().await?;

    if !result.success() {
        warn!(status = result.status, "ssh exited with failure");
        std::process::exit(if result.status > 0 { result.status } else { 1 });
    }
    Ok(())
}
