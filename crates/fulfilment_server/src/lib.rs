//! fulfilment_server — REST surface for product fulfilment and the warehouse
//! lifecycle.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
