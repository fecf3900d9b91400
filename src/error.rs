use crate::addr::{Address, Family};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("prefix length /{bits} is too long for {family}")]
    InvalidPrefixLength { bits: u8, family: Family },
    #[error("address family mismatch between {0} and {1}")]
    FamilyMismatch(Address, Address),
    #[error("invalid range: {start} is greater than {end}")]
    InvalidRange { start: Address, end: Address },
    #[error("non-canonical mask {0}: ones and zeros are interleaved")]
    NonCanonicalMask(Address),
    /// An intermediate value did not map back to an address. Indicates a bug.
    #[error("address conversion error: {0}")]
    AddressConversion(String),
    #[error("expected one or two arguments")]
    Usage,
    #[error("no conversion applies to {0:?}")]
    Unrecognized(String),
}

pub type Result<T> = std::result::Result<T, Error>;
