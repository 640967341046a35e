//! Account service client.

pub mod api;
pub mod middleware;
pub mod service;

pub use api::BinstarApiClient;
#[cfg(test)]
pub use service::MockAccountService;
pub use service::AccountService;
