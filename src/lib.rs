//! # OpenCorporates client
//!
//! An async Rust client for the OpenCorporates company registry API:
//! search companies by name, fetch a company by registry number, and
//! iterate paged result sets lazily.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use opencorporates::{Client, LookupRequest, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> opencorporates::Result<()> {
//!     let client = Client::new()?;
//!
//!     // Single company by registry number
//!     let company = client.lookup(&LookupRequest::new("529591737", "fr")).await?;
//!     println!("{} ({})", company.name, company.number);
//!
//!     // Lazy iteration over a search, one HTTP call per page
//!     let mut companies = client.search(SearchRequest::new("nautic").jurisdiction("fr"));
//!     loop {
//!         match companies.next().await {
//!             Ok(company) => println!("{} ({})", company.name, company.number),
//!             Err(err) if err.is_end_of_sequence() => break,
//!             Err(err) => return Err(err),
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Client ──► search() ──► CompanyIterator ──► Pager (page/position state)
//!   │                          │
//!   │                          └── fetch_page ──► Transport (GET) ──► decode
//!   └──► lookup() ────────────────────────────► Transport (GET) ──► decode
//!
//! RequestCounter: one per client instance, shared by every call path
//! ```
//!
//! The HTTP capability is the injectable [`Transport`] trait; tests swap in
//! doubles through the same seam the default `reqwest` transport uses. No
//! retries, caching, or rate limiting happen here: every failure surfaces
//! to the caller immediately.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Company, address, and date value types
pub mod company;

/// Pagination state tracking
pub mod pager;

/// Lazy company iteration
pub mod iterator;

/// HTTP transport seam
pub mod transport;

/// Request types and URL construction
pub mod request;

/// Request accounting
pub mod counter;

/// The API client
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{Client, ClientBuilder, API_VERSION, BASE_URL};
pub use company::{Address, Company, Date};
pub use counter::RequestCounter;
pub use error::{Error, Result};
pub use iterator::CompanyIterator;
pub use pager::{Pageable, Pager};
pub use request::{LookupRequest, SearchRequest};
pub use transport::{HttpTransport, Transport, TransportResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
