//! Servers endpoint of the Control API.
//!
//! Lists customers and FQDNs visible to the access token and fetches server
//! definitions and facts. Every operation is a single GET; identifiers are
//! passed through as-is and the API decides what it accepts.

use async_trait::async_trait;

use crate::control_client::ControlClient;
use crate::error::Result;
use crate::models::{Facts, ServerDefinition};

/// Path prefix of the servers API.
const SERVERS_BASE_PATH: &str = "api/servers/1";

/// Customer placeholder that selects every customer the token can see.
pub const ALL_CUSTOMERS: &str = "_";

/// Operations of the servers API.
///
/// Implemented by [`Servers`]; code that only needs inventory data can take
/// `&dyn ServersApi` and be tested against a fake.
#[async_trait]
pub trait ServersApi: Send + Sync {
    /// Lists the customer IDs the token has access to.
    async fn list_customer_ids(&self) -> Result<Vec<String>>;

    /// Lists the FQDNs of a customer's servers.
    ///
    /// An empty `customer_id` (or [`ALL_CUSTOMERS`]) lists every FQDN the
    /// token has access to.
    async fn list_fqdns(&self, customer_id: &str) -> Result<Vec<String>>;

    /// Fetches the definition of one server.
    async fn get_definition(&self, fqdn: &str) -> Result<ServerDefinition>;

    /// Fetches the facts reported for one server.
    async fn get_facts(&self, fqdn: &str) -> Result<Facts>;
}

/// Servers API client, obtained from [`ControlClient::servers`].
#[derive(Debug, Clone, Copy)]
pub struct Servers<'a> {
    client: &'a ControlClient,
}

impl<'a> Servers<'a> {
    pub(crate) fn new(client: &'a ControlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> ServersApi for Servers<'a> {
    async fn list_customer_ids(&self) -> Result<Vec<String>> {
        self.client
            .get_string_list(&format!("{}/", SERVERS_BASE_PATH))
            .await
    }

    async fn list_fqdns(&self, customer_id: &str) -> Result<Vec<String>> {
        self.client.get_string_list(&fqdns_path(customer_id)).await
    }

    async fn get_definition(&self, fqdn: &str) -> Result<ServerDefinition> {
        self.client
            .get_json(&format!("{}/{}/{}", SERVERS_BASE_PATH, ALL_CUSTOMERS, fqdn))
            .await
    }

    async fn get_facts(&self, fqdn: &str) -> Result<Facts> {
        self.client
            .get_json(&format!(
                "{}/{}/{}/facts",
                SERVERS_BASE_PATH, ALL_CUSTOMERS, fqdn
            ))
            .await
    }
}

fn fqdns_path(customer_id: &str) -> String {
    let customer_id = if customer_id.is_empty() {
        ALL_CUSTOMERS
    } else {
        customer_id
    };
    format!("{}/{}/", SERVERS_BASE_PATH, customer_id)
}
