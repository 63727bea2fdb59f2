//! Request types for the API
//!
//! The v1 API takes every option as a query parameter, so each request type
//! knows how to render itself as `(key, value)` pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDropletRequest {
    pub name: String,
    pub size_id: u64,
    pub image_id: u64,
    pub region_id: u64,
    /// Comma separated SSH key ids, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_key_ids: Option<String>,
}

impl CreateDropletRequest {
    /// 512MB droplet
    pub const DEFAULT_SIZE_ID: u64 = 64;
    /// Ubuntu 12.04 x64
    pub const DEFAULT_IMAGE_ID: u64 = 2676;
    /// New York 1
    pub const DEFAULT_REGION_ID: u64 = 1;

    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("name", self.name.clone()),
            ("size_id", self.size_id.to_string()),
            ("image_id", self.image_id.to_string()),
            ("region_id", self.region_id.to_string()),
        ];
        if let Some(keys) = &self.ssh_key_ids {
            pairs.push(("ssh_key_ids", keys.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SnapshotRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.name
            .iter()
            .map(|name| ("name", name.clone()))
            .collect()
    }
}

/// Which image listing to request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFilter {
    MyImages,
    Global,
}

impl ImageFilter {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFilter::MyImages => "my_images",
            ImageFilter::Global => "global",
        }
    }
}

impl fmt::Display for ImageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
