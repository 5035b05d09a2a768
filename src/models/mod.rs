//! Domain models for IPv4 addressing.
//!
//! - [`AddrV4`] - IPv4 address with CIDR prefix length
//! - [`AddrInput`] - the representations an address can be built from

mod addrv4;

// Re-export public types
pub use addrv4::{
    cidr_mask, AddrInput, AddrV4, DEFAULT_ADDRESS, DEFAULT_PREFIX, MAX_LENGTH, MAX_OCTET,
};
