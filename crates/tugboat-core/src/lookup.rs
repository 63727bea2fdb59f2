//! Droplet selection
//!
//! Commands that act on an existing droplet identify it by id, by exact name,
//! or by a fuzzy (case-insensitive substring) name. Precedence is id, then
//! name, then fuzzy name; so `tugboat restart foo -n foo-server-001` uses the
//! exact name and never looks at `foo`.

use tracing::{debug, info};
use tugboat_api::responses::Droplet;
use tugboat_client::HttpClient;

use crate::error::{CoreError, Result};

/// How the user identified a droplet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropletSelector {
    Id(u64),
    Name(String),
    Fuzzy(String),
}

impl DropletSelector {
    /// Pick the strongest identifier provided
    ///
    /// Blank names count as absent.
    ///
    /// # Errors
    /// Returns `CoreError::NoSelector` when nothing usable was given
    pub fn from_args(id: Option<u64>, name: Option<String>, fuzzy: Option<String>) -> Result<Self> {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        if let Some(id) = id {
            Ok(DropletSelector::Id(id))
        } else if let Some(name) = present(name) {
            Ok(DropletSelector::Name(name))
        } else if let Some(fuzzy) = present(fuzzy) {
            Ok(DropletSelector::Fuzzy(fuzzy))
        } else {
            Err(CoreError::NoSelector)
        }
    }

    /// Progress line shown while resolving
    #[must_use]
    pub fn describe(&self) -> &'static str {
        match self {
            DropletSelector::Id(_) => "Droplet id provided. Finding droplet...",
            DropletSelector::Name(_) => "Droplet name provided. Finding droplet ID...",
            DropletSelector::Fuzzy(_) => "Droplet fuzzy name provided. Finding droplet ID...",
        }
    }
}

/// First droplet whose name matches exactly
#[must_use]
pub fn find_exact<'a>(droplets: &'a [Droplet], name: &str) -> Option<&'a Droplet> {
    droplets.iter().find(|d| d.name == name)
}

/// Droplets whose name contains `query`, ignoring case, in list order
#[must_use]
pub fn find_fuzzy<'a>(droplets: &'a [Droplet], query: &str) -> Vec<&'a Droplet> {
    let needle = query.to_lowercase();
    droplets
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&needle))
        .collect()
}

/// Picks one droplet out of several fuzzy matches
pub trait DropletChooser {
    /// Return the index of the chosen candidate
    ///
    /// # Errors
    /// Returns `CoreError::Prompt` if the choice could not be obtained
    fn choose(&self, candidates: &[&Droplet]) -> Result<usize>;
}

/// Outcome of resolving a selector
#[derive(Debug, Clone)]
pub struct Resolution {
    pub droplet: Droplet,
    /// The user had to pick between several matches
    pub chosen: bool,
}

/// Resolve a selector to a single droplet
///
/// Ids are looked up directly; names are matched against the full droplet
/// list. Several fuzzy matches are handed to `chooser`.
///
/// # Errors
/// Returns `CoreError::DropletNotFound` when nothing matches, or the API error
pub async fn resolve_droplet(
    client: &HttpClient,
    selector: &DropletSelector,
    chooser: &dyn DropletChooser,
) -> Result<Resolution> {
    debug!(?selector, "resolving droplet");

    let resolution = match selector {
        DropletSelector::Id(id) => Resolution {
            droplet: client.show_droplet(*id).await?,
            chosen: false,
        },
        DropletSelector::Name(name) => {
            let droplets = client.list_droplets().await?;
            let droplet = find_exact(&droplets, name)
                .cloned()
                .ok_or_else(|| CoreError::DropletNotFound(name.clone()))?;
            Resolution {
                droplet,
                chosen: false,
            }
        }
        DropletSelector::Fuzzy(query) => {
            let droplets = client.list_droplets().await?;
            let matches = find_fuzzy(&droplets, query);
            pick(&matches, query, chooser)?
        }
    };

    info!(
        id = resolution.droplet.id,
        name = %resolution.droplet.name,
        "resolved droplet"
    );
    Ok(resolution)
}

fn pick(matches: &[&Droplet], query: &str, chooser: &dyn DropletChooser) -> Result<Resolution> {
    match matches {
        [] => Err(CoreError::DropletNotFound(query.to_string())),
        [only] => Ok(Resolution {
            droplet: (*only).clone(),
            chosen: false,
        }),
        _ => {
            let choice = chooser.choose(matches)?;
            let droplet = matches.get(choice).ok_or(CoreError::SelectionOutOfRange {
                choice,
                count: matches.len(),
            })?;
            Ok(Resolution {
                droplet: (*droplet).clone(),
                chosen: true,
            })
        }
    }
}
