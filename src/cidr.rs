use crate::addr::Address;
use crate::error::{Error, Result};
use crate::range::Range;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An address paired with a prefix length.
///
/// The address is kept exactly as given, host bits included; use
/// [`Prefix::masked`] for the network address form.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Prefix {
    address: Address,
    bits: u8,
}

impl Prefix {
    pub fn new(address: Address, bits: u8) -> Result<Self> {
        let family = address.family();
        if bits > family.bit_len() {
            return Err(Error::InvalidPrefixLength { bits, family });
        }
        Ok(Prefix { address, bits })
    }

    /// A prefix holding only `address`.
    pub fn host(address: Address) -> Self {
        Prefix {
            address,
            bits: address.bit_len(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Number of host bits.
    pub fn size(&self) -> u8 {
        self.address.bit_len() - self.bits
    }

    pub fn is_canonical(&self) -> bool {
        self.masked() == *self
    }

    /// The same prefix with its host bits cleared.
    pub fn masked(&self) -> Self {
        let net = self.address.family().net_mask(self.bits);
        Prefix {
            address: self.address.and(net),
            bits: self.bits,
        }
    }

    pub fn first_ip(&self) -> Address {
        self.masked().address
    }

    /// The inclusive range of addresses covered by this prefix.
    pub fn expand(&self) -> Range {
        let start = self.first_ip();
        let end = start.or(start.family().host_mask(self.size()));
        Range::from_sorted(start, end)
    }

    pub fn network_mask(&self) -> Address {
        let p = self.masked();
        let family = p.address.family();
        Address::zero(family).or(family.net_mask(p.bits))
    }

    pub fn contains(&self, ip: &Address) -> bool {
        if ip.family() != self.address.family() {
            return false;
        }
        let net = self.address.family().net_mask(self.bits);
        self.address.to_u128() & net == ip.to_u128() & net
    }

    pub fn contains_prefix(&self, other: &Prefix) -> bool {
        self.bits <= other.bits && self.contains(&other.address)
    }
}

/// Parses `addr/bits`; a bare address is taken as a host prefix.
impl FromStr for Prefix {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^\s*([0-9A-Fa-f:.]+)(/([0-9]{1,3}))?\s*$")
                .expect("Not possible");
        }
        let v = RE
            .captures(s)
            .ok_or_else(|| Error::InvalidAddress(format!("{:?} is not a CIDR prefix", s)))?;
        let address = Address::from_str(&v[1])?;
        match v.get(3) {
            Some(m) => {
                let bits = m.as_str().parse::<u8>().map_err(|_| {
                    Error::InvalidAddress(format!("{:?} has an invalid prefix length", s))
                })?;
                Prefix::new(address, bits)
            }
            None => Ok(Prefix::host(address)),
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.bits)
    }
}

pub fn expand_prefix(prefix: Prefix) -> Range {
    prefix.expand()
}

pub fn network_mask(prefix: Prefix) -> Address {
    prefix.network_mask()
}
