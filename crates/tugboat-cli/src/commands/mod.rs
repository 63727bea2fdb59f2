//! One module per command group

pub mod authorize;
pub mod droplets;
pub mod images;
pub mod keys;
pub mod ssh;
