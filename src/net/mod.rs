//! Network layer: the gateway client and one module per backend service.
//!
//! DESIGN
//! ======
//! `client` owns transport, bearer header and status mapping. Service
//! modules own paths and the envelope depth of each endpoint.

pub mod client;
pub mod clusters;
pub mod envelope;
pub mod error;
pub mod system_images;
pub mod transport;
pub mod types;
pub mod users;
pub mod vm_host;
pub mod vm_offers;

#[cfg(test)]
pub(crate) mod test_support;

/// Client type used by the running console.
pub type ConsoleClient = client::ApiClient<transport::BrowserTransport, crate::util::storage::BrowserStorage>;
