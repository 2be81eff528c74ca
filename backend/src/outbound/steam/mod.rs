//! Steam Web API provider adapter.

mod dto;
mod http_provider;

pub use http_provider::{SteamHttpProvider, SteamProviderSettings};
