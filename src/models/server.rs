//! Server inventory models for the Control API.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Configuration facts reported for one server, keyed by fact name
/// (e.g. `lsbdistcodename`, `processorcount`).
pub type Facts = HashMap<String, String>;

/// A server definition as returned by `api/servers/1/_/<fqdn>`.
///
/// Fields missing from the response keep their zero value; zero-valued
/// fields are omitted again when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerDefinition {
    /// Fully-qualified domain name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fqdn: String,

    /// Customer identifier owning the server.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer: String,

    /// Environment name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub environment: String,

    /// Project within the customer.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project: String,

    /// Role of the server, e.g. `jira`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub role: String,

    /// Deployment stage, e.g. `prod` or `test`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stage: String,

    /// Physical location or cloud provider.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Region within the location.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,

    /// Last modification time in milliseconds since the Unix epoch.
    #[serde(skip_serializing_if = "is_zero")]
    pub mod_date: i64,

    /// User who last modified the definition.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mod_user: String,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl ServerDefinition {
    /// Returns the last modification time, if the API reported one.
    pub fn modified_at(&self) -> Option<SystemTime> {
        let millis = u64::try_from(self.mod_date).ok().filter(|ms| *ms > 0)?;
        UNIX_EPOCH.checked_add(Duration::from_millis(millis))
    }
}
