//! # control-sdk
//!
//! Client SDK for the VSHN Control API.
//!
//! It exposes the server inventory (customer IDs, FQDNs, server definitions
//! and configuration facts) as typed async Rust calls.
//!
//! ## Features
//!
//! - **Token authentication**: every request carries the `X-AccessToken` header
//! - **Servers API**: list customers and FQDNs, fetch definitions and facts
//! - **Plain error bodies**: non-2xx responses surface the API's error text
//! - **Pluggable transport**: anything implementing [`HttpTransport`] can send requests
//!
//! ## Architecture
//!
//! - [`transport`] - `HttpTransport` seam and the token-injecting decorator
//! - [`control_client`] - base URL resolution, status checks, body decoding
//! - [`servers`] - the servers endpoint
//! - [`models`] - response types
//! - [`config`] - configuration from environment variables
//! - [`error`] - the `ControlError` type
//!
//! ## Configuration
//!
//! [`Config::from_env`] reads:
//!
//! - `CONTROL_API_TOKEN`: access token (required)
//! - `CONTROL_API_URL`: base URL override
//! - `CONTROL_USER_AGENT`: prefix for the `User-Agent` header
//! - `CONTROL_TIMEOUT_SECS`: request timeout (default 10)
//!
//! ## Security Considerations
//!
//! The access token is held only by the transport. It is never logged and
//! is redacted from `Debug` output.
//!
//! ## Example
//!
//! ```ignore
//! use control_sdk::{ControlClient, ServersApi};
//!
//! async fn example() -> control_sdk::Result<()> {
//!     let mut client = ControlClient::from_token("my-token")?;
//!     client.set_user_agent("inventory-report/1.0");
//!
//!     let servers = client.servers();
//!     for customer in servers.list_customer_ids().await? {
//!         for fqdn in servers.list_fqdns(&customer).await? {
//!             let definition = servers.get_definition(&fqdn).await?;
//!             println!("{} ({})", definition.fqdn, definition.stage);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod control_client;
pub mod error;
pub mod models;
pub mod servers;
pub mod transport;

pub use config::Config;
pub use control_client::ControlClient;
pub use error::{ControlError, Result};
pub use models::{Facts, ServerDefinition};
pub use servers::{Servers, ServersApi};
pub use transport::{HttpTransport, TokenTransport};
