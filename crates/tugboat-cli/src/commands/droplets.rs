//! Droplet commands: list, create, destroy, restart, halt, info, snapshot

use std::io::Write;

use color_eyre::Result;
use tracing::info;
use tugboat_api::requests::SnapshotRequest;
use tugboat_api::responses::EventResponse;
use tugboat_client::{CreateDropletBuilder, HttpClient};
use tugboat_core::{DropletDefaults, DropletSelector};

use crate::context::Context;
use crate::output;
use crate::prompt;

pub async fn list(ctx: &Context) -> Result<()> {
    let droplets = ctx.client.list_droplets().await?;

    if droplets.is_empty() {
        println!("You don't appear to have any droplets.");
        println!("Try creating one with `tugboat create`");
        return Ok(());
    }

    for droplet in &droplets {
        println!("{}", output::droplet_line(droplet));
    }
    Ok(())
}

/// Options given to `tugboat create`; unset ones come from the config defaults
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub name: String,
    pub size: Option<u64>,
    pub image: Option<u64>,
    pub region: Option<u64>,
    pub keys: Option<String>,
}

impl CreateOptions {
    fn builder(self, client: &HttpClient, defaults: &DropletDefaults) -> CreateDropletBuilder {
        let builder = client
            .create_droplet(self.name)
            .size_id(self.size.unwrap_or(defaults.size_id))
            .image_id(self.image.unwrap_or(defaults.image_id))
            .region_id(self.region.unwrap_or(defaults.region_id));

        match self.keys.or_else(|| defaults.ssh_key_ids.clone()) {
            Some(keys) => builder.ssh_key_ids(keys),
            None => builder,
        }
    }
}

pub async fn create(ctx: &Context, options: CreateOptions) -> Result<()> {
    print!("Queueing creation of droplet '{}'...", options.name);
    std::io::stdout().flush()?;

    let droplet = options
        .builder(&ctx.client, &ctx.config.defaults)
        .send()
        .await
        .inspect_err(|_| println!("{}", output::failed("failed")))?;

    info!(id = droplet.id, name = %droplet.name, event_id = ?droplet.event_id, "droplet creation queued");
    println!("{}", output::success("done"));
    Ok(())
}

pub async fn destroy(ctx: &Context, selector: DropletSelector, confirmed: bool) -> Result<()> {
    let droplet = ctx.find_droplet(&selector).await?;

    if !confirmed && !prompt::confirm("Warning! Potentially destructive action. Please confirm")? {
        println!("Aborted destroy of {}.", output::droplet_ref(&droplet));
        return Ok(());
    }

    queue(
        format!("Queuing destroy for {}", output::droplet_ref(&droplet)),
        ctx.client.destroy_droplet(droplet.id),
    )
    .await
}

pub async fn restart(ctx: &Context, selector: DropletSelector) -> Result<()> {
    let droplet = ctx.find_droplet(&selector).await?;

    queue(
        format!("Queuing restart for {}", output::droplet_ref(&droplet)),
        ctx.client.reboot_droplet(droplet.id),
    )
    .await
}

pub async fn halt(ctx: &Context, selector: DropletSelector, hard: bool) -> Result<()> {
    let droplet = ctx.find_droplet(&selector).await?;
    let target = output::droplet_ref(&droplet);

    if hard {
        queue(
            format!("Queuing hard shutdown for {target}"),
            ctx.client.power_off_droplet(droplet.id),
        )
        .await
    } else {
        queue(
            format!("Queuing shutdown for {target}"),
            ctx.client.shutdown_droplet(droplet.id),
        )
        .await
    }
}

pub async fn info(ctx: &Context, selector: DropletSelector) -> Result<()> {
    let droplet = ctx.find_droplet(&selector).await?;

    // list entries can lag behind the droplet's current state
    let droplet = ctx.client.show_droplet(droplet.id).await?;

    println!();
    println!("{}", output::info_block(&droplet));
    Ok(())
}

pub async fn snapshot(ctx: &Context, selector: DropletSelector, snapshot_name: String) -> Result<()> {
    let droplet = ctx.find_droplet(&selector).await?;
    let message = format!(
        "Queuing snapshot '{snapshot_name}' for {}",
        output::droplet_ref(&droplet)
    );

    let request = SnapshotRequest::named(snapshot_name);

    queue(message, ctx.client.snapshot_droplet(droplet.id, &request)).await
}

/// Print `message...`, run the action, then `done`
async fn queue<F>(message: String, action: F) -> Result<()>
where
    F: Future<Output = tugboat_client::Result<EventResponse>>,
{
    print!("{message}...");
    std::io::stdout().flush()?;

    let event = action
        .await
        .inspect_err(|_| println!("{}", output::failed("failed")))?;

    info!(event_id = ?event.event_id, "{message}");
    println!("{}", output::success("done"));
    Ok(())
}
