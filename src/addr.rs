//! Fixed-width address values shared by every conversion.

use crate::error::{Error, Result};
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Number of bytes in an address of this family.
    pub fn width(self) -> usize {
        match self {
            Family::V4 => 4,
            Family::V6 => 16,
        }
    }

    pub fn bit_len(self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// The all-ones address value.
    pub fn max_value(self) -> u128 {
        match self {
            Family::V4 => u128::from(u32::MAX),
            Family::V6 => u128::MAX,
        }
    }

    /// Value with the low `bits` bits set.
    pub(crate) fn host_mask(self, bits: u8) -> u128 {
        let keep = u32::from(self.bit_len().saturating_sub(bits));
        self.max_value().checked_shr(keep).unwrap_or(0)
    }

    /// Value with the top `bits` bits (of this family's width) set.
    pub(crate) fn net_mask(self, bits: u8) -> u128 {
        self.max_value() ^ self.host_mask(self.bit_len().saturating_sub(bits))
    }
}

impl Display for Family {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// One IPv4 or IPv6 address, held as an unsigned integer of the family width.
///
/// Ordering is numeric within a family. Values are never mutated in place:
/// every adjustment returns a new `Address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    family: Family,
    value: u128,
}

impl Address {
    pub fn from_u128(family: Family, value: u128) -> Result<Self> {
        if value > family.max_value() {
            return Err(Error::InvalidAddress(format!(
                "{} does not fit in {} bits",
                value,
                family.bit_len()
            )));
        }
        Ok(Address { family, value })
    }

    /// Builds an address from its big-endian bytes; the length picks the family.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if let Ok(b) = <[u8; 4]>::try_from(bytes) {
            return Ok(Ipv4Addr::from(b).into());
        }
        if let Ok(b) = <[u8; 16]>::try_from(bytes) {
            return Ok(Ipv6Addr::from(b).into());
        }
        Err(Error::InvalidAddress(format!(
            "expected 4 or 16 bytes, got {}",
            bytes.len()
        )))
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn bit_len(&self) -> u8 {
        self.family.bit_len()
    }

    pub fn to_u128(&self) -> u128 {
        self.value
    }

    /// Big-endian bytes, 4 or 16 of them.
    pub fn octets(&self) -> Vec<u8> {
        let all = self.value.to_be_bytes();
        all[all.len() - self.family.width()..].to_vec()
    }

    /// The address one below this one.
    pub fn checked_pred(&self) -> Result<Self> {
        match self.value.checked_sub(1) {
            Some(v) => Address::from_u128(self.family, v),
            None => Err(Error::AddressConversion(format!(
                "no address below {}",
                self
            ))),
        }
    }

    /// A copy of this address with its final byte replaced.
    pub fn with_last_octet(&self, octet: u8) -> Self {
        Address {
            family: self.family,
            value: (self.value & !0xFF) | u128::from(octet),
        }
    }

    pub(crate) fn zero(family: Family) -> Self {
        Address { family, value: 0 }
    }

    /// Bitwise AND; the result always fits the family width.
    pub(crate) fn and(&self, mask: u128) -> Self {
        Address {
            family: self.family,
            value: self.value & mask,
        }
    }

    /// Bitwise OR, truncated to the family width.
    pub(crate) fn or(&self, bits: u128) -> Self {
        Address {
            family: self.family,
            value: (self.value | bits) & self.family.max_value(),
        }
    }

    pub(crate) fn same_family(&self, other: &Address) -> Result<Family> {
        if self.family != other.family {
            return Err(Error::FamilyMismatch(*self, *other));
        }
        Ok(self.family)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address {
            family: Family::V4,
            value: u128::from(u32::from(ip)),
        }
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address {
            family: Family::V6,
            value: u128::from(ip),
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> Self {
        match addr.family {
            // from_u128 keeps V4 values within 32 bits
            Family::V4 => IpAddr::V4(Ipv4Addr::from(addr.value as u32)),
            Family::V6 => IpAddr::V6(Ipv6Addr::from(addr.value)),
        }
    }
}

impl FromStr for Address {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        IpAddr::from_str(s.trim())
            .map(Address::from)
            .map_err(|e| Error::InvalidAddress(format!("{:?}: {}", s, e)))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", IpAddr::from(*self))
    }
}

pub fn parse_address(text: &str) -> Result<Address> {
    Address::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn parse_and_format() {
        let a = parse_address("10.0.0.1").unwrap();
        assert_eq!(Family::V4, a.family());
        assert_eq!(0x0A00_0001, a.to_u128());
        assert_eq!("10.0.0.1", a.to_string());

        let b = parse_address("::1").unwrap();
        assert_eq!(Family::V6, b.family());
        assert_eq!(1, b.to_u128());
        assert_eq!(16, b.octets().len());
        assert_eq!("::1", b.to_string());

        assert!(matches!(
            parse_address("10.0.0.256"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(parse_address(""), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn byte_lengths() {
        assert_eq!(
            "192.168.1.2",
            Address::from_bytes(&[192, 168, 1, 2]).unwrap().to_string()
        );
        let mut v6 = [0u8; 16];
        v6[15] = 1;
        assert_eq!("::1", Address::from_bytes(&v6).unwrap().to_string());
        assert!(matches!(
            Address::from_bytes(&[1, 2, 3]),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::from_bytes(&[0; 8]),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn overflow_and_underflow() {
        assert!(matches!(
            Address::from_u128(Family::V4, 1 << 32),
            Err(Error::InvalidAddress(_))
        ));
        let zero = Address::from_u128(Family::V4, 0).unwrap();
        assert!(matches!(
            zero.checked_pred(),
            Err(Error::AddressConversion(_))
        ));
        let one = Address::from_u128(Family::V6, 1).unwrap();
        assert_eq!("::", one.checked_pred().unwrap().to_string());
    }

    #[test]
    fn last_octet() {
        let a = parse_address("1.0.0.1").unwrap();
        let b = a.with_last_octet(255);
        assert_eq!("1.0.0.1", a.to_string());
        assert_eq!("1.0.0.255", b.to_string());
        assert!(a < b);
    }

    #[test]
    fn masks() {
        assert_eq!(0xFFFF_FF00, Family::V4.net_mask(24));
        assert_eq!(0xFF, Family::V4.host_mask(8));
        assert_eq!(0, Family::V4.net_mask(0));
        assert_eq!(u128::MAX, Family::V6.net_mask(128));
        assert_eq!(u128::MAX, Family::V6.host_mask(128));
        assert_eq!(0, Family::V6.host_mask(0));
    }

    #[quickcheck]
    fn v4_bytes_round_trip(ip: u32) -> bool {
        let a = Address::from(Ipv4Addr::from(ip));
        a.octets() == ip.to_be_bytes().to_vec()
            && Address::from_bytes(&a.octets()).unwrap() == a
            && Address::from_u128(Family::V4, u128::from(ip)).unwrap() == a
    }

    #[quickcheck]
    fn v6_text_round_trip(ip: u128) -> bool {
        let a = Address::from_u128(Family::V6, ip).unwrap();
        a == a.to_string().parse::<Address>().unwrap()
    }

    #[quickcheck]
    fn order_is_numeric(x: u32, y: u32) -> bool {
        let a = Address::from(Ipv4Addr::from(x));
        let b = Address::from(Ipv4Addr::from(y));
        a.cmp(&b) == x.cmp(&y)
    }
}
