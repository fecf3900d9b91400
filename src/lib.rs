//! Conversions between IP address ranges, CIDR prefixes and network masks,
//! for both IPv4 and IPv6.
//!
//! ```
//! use iptool::{decompose_range, parse_address};
//!
//! let blocks = decompose_range(
//!     parse_address("10.0.0.0").unwrap(),
//!     parse_address("10.0.0.192").unwrap(),
//! )
//! .unwrap();
//! let text: Vec<String> = blocks.iter().map(|p| p.to_string()).collect();
//! assert_eq!(vec!["10.0.0.0/25", "10.0.0.128/26", "10.0.0.192/32"], text);
//! ```

pub mod addr;
pub mod cidr;
pub mod cli;
mod error;
pub mod mask;
pub mod range;

pub use addr::{parse_address, Address, Family};
pub use cidr::{expand_prefix, network_mask, Prefix};
pub use error::{Error, Result};
pub use mask::{address_and_mask_to_prefix, mask_to_prefix_len, prefix_len_to_mask};
pub use range::{decompose_range, Range};
