//! Terminal formatting for API records

use console::style;
use tugboat_api::responses::{Droplet, Image, SshKey};

const MISSING: &str = "-";

pub fn success(message: &str) -> String {
    style(message).green().to_string()
}

pub fn failed(message: &str) -> String {
    style(message).red().to_string()
}

/// `active` in green, anything else in red
fn status(droplet: &Droplet) -> String {
    if droplet.is_active() {
        success(&droplet.status)
    } else {
        failed(&droplet.status)
    }
}

/// One line of `tugboat droplets`
pub fn droplet_line(droplet: &Droplet) -> String {
    format!(
        "{} (ip: {}, status: {}, region: {}, id: {})",
        droplet.name,
        droplet.ip_address.as_deref().unwrap_or(MISSING),
        status(droplet),
        droplet.region_id,
        droplet.id
    )
}

/// Block printed by `tugboat info`
pub fn info_block(droplet: &Droplet) -> String {
    let rows = [
        ("Name", droplet.name.clone()),
        ("ID", droplet.id.to_string()),
        ("Status", status(droplet)),
        (
            "IP",
            droplet.ip_address.as_deref().unwrap_or(MISSING).to_string(),
        ),
        (
            "Private IP",
            droplet
                .private_ip_address
                .as_deref()
                .unwrap_or(MISSING)
                .to_string(),
        ),
        ("Region ID", droplet.region_id.to_string()),
        ("Image ID", droplet.image_id.to_string()),
        ("Size ID", droplet.size_id.to_string()),
        (
            "Backups Active",
            droplet.backups_active.unwrap_or(false).to_string(),
        ),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<18}{value}", format!("{label}:")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn image_line(image: &Image) -> String {
    format!(
        "{} (id: {}, distro: {})",
        image.name,
        image.id,
        image.distribution.as_deref().unwrap_or(MISSING)
    )
}

pub fn key_line(key: &SshKey) -> String {
    format!("{} (id: {})", key.name, key.id)
}

/// Entry in the fuzzy match menu
pub fn choice_line(index: usize, droplet: &Droplet) -> String {
    format!(
        "{index}) {} ({})",
        droplet.name,
        droplet.ip_address.as_deref().unwrap_or(MISSING)
    )
}

/// `id (name)` as shown in queue messages
pub fn droplet_ref(droplet: &Droplet) -> String {
    format!("{} ({})", droplet.id, droplet.name)
}
