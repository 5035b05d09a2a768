//! IPv4 address and CIDR subnet arithmetic.
//!
//! # Modules
//! - [`models`] - the [`AddrV4`] value type and its helpers
//! - [`error`] - errors raised while parsing addresses
//!
//! # Example
//! ```
//! use addrv4::Addr;
//!
//! let subnet: Addr = "10.0.0.0/16".parse().unwrap();
//! let host = Addr::new("10.0.3.0", Some(24)).unwrap();
//! assert!(subnet.contains(&host));
//! assert_eq!(subnet.broadcast().to_string(), "10.0.255.255/32");
//! ```

pub mod error;
pub mod models;

pub use error::InvalidAddressError;
pub use models::{cidr_mask, AddrInput, AddrV4, DEFAULT_ADDRESS, DEFAULT_PREFIX, MAX_LENGTH};

/// Address type exposed under its protocol-neutral name.
pub type Addr = AddrV4;
