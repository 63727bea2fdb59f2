//! tugboat-api: Shared API types
//!
//! Contains the request option bags and response records exchanged with the
//! droplet provider's v1 API, used by the client, core and CLI crates.

pub mod requests;
pub mod responses;
