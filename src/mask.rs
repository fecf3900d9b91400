//! Network mask ⇄ prefix length.

use crate::addr::{Address, Family};
use crate::cidr::Prefix;
use crate::error::{Error, Result};

/// Counts the leading one bits of `mask`.
///
/// The mask must be a run of ones followed by a run of zeros, otherwise
/// `NonCanonicalMask` is returned. `255.255.255.0` is `24`; `255.0.255.0`
/// is rejected.
pub fn mask_to_prefix_len(mask: Address) -> Result<u8> {
    let family = mask.family();
    let shifted = mask.to_u128() << (128 - u32::from(family.bit_len()));
    let bits = shifted.leading_ones() as u8;
    if family.net_mask(bits) != mask.to_u128() {
        return Err(Error::NonCanonicalMask(mask));
    }
    Ok(bits)
}

pub fn prefix_len_to_mask(bits: u8, family: Family) -> Result<Address> {
    if bits > family.bit_len() {
        return Err(Error::InvalidPrefixLength { bits, family });
    }
    Address::from_u128(family, family.net_mask(bits))
}

/// Pairs `ip` with the length of `mask`. The host bits of `ip` are kept.
pub fn address_and_mask_to_prefix(ip: Address, mask: Address) -> Result<Prefix> {
    ip.same_family(&mask)?;
    Prefix::new(ip, mask_to_prefix_len(mask)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::parse_address;
    use quickcheck_macros::quickcheck;
    use std::net::Ipv4Addr;

    fn addr(s: &str) -> Address {
        parse_address(s).unwrap()
    }

    #[test]
    fn some_tests() {
        assert_eq!(24, mask_to_prefix_len(addr("255.255.255.0")).unwrap());
        assert_eq!(0, mask_to_prefix_len(addr("0.0.0.0")).unwrap());
        assert_eq!(32, mask_to_prefix_len(addr("255.255.255.255")).unwrap());
        assert_eq!(17, mask_to_prefix_len(addr("255.255.128.0")).unwrap());
        assert_eq!(64, mask_to_prefix_len(addr("ffff:ffff:ffff:ffff::")).unwrap());
        assert_eq!(
            Err(Error::NonCanonicalMask(addr("255.0.255.0"))),
            mask_to_prefix_len(addr("255.0.255.0"))
        );
        // trailing zeros alone would call this a /31
        assert!(mask_to_prefix_len(addr("0.0.0.2")).is_err());
        assert!(mask_to_prefix_len(addr("::ffff")).is_err());
    }

    #[test]
    fn lengths_to_masks() {
        assert_eq!(addr("255.255.255.0"), prefix_len_to_mask(24, Family::V4).unwrap());
        assert_eq!(addr("0.0.0.0"), prefix_len_to_mask(0, Family::V4).unwrap());
        assert_eq!(addr("ffff:ff00::"), prefix_len_to_mask(24, Family::V6).unwrap());
        assert_eq!(
            Err(Error::InvalidPrefixLength {
                bits: 33,
                family: Family::V4
            }),
            prefix_len_to_mask(33, Family::V4)
        );
    }

    #[test]
    fn masks_round_trip() {
        for family in [Family::V4, Family::V6] {
            for bits in 0..=family.bit_len() {
                let mask = prefix_len_to_mask(bits, family).unwrap();
                assert_eq!(bits, mask_to_prefix_len(mask).unwrap());
            }
        }
    }

    #[test]
    fn with_address() {
        let p = address_and_mask_to_prefix(addr("192.168.1.77"), addr("255.255.255.0")).unwrap();
        assert_eq!("192.168.1.77/24", p.to_string());
        assert!(!p.is_canonical());
        assert!(matches!(
            address_and_mask_to_prefix(addr("192.168.1.77"), addr("255.0.255.0")),
            Err(Error::NonCanonicalMask(_))
        ));
        assert!(matches!(
            address_and_mask_to_prefix(addr("::1"), addr("255.255.255.0")),
            Err(Error::FamilyMismatch(_, _))
        ));
    }

    #[quickcheck]
    fn canonical_iff_contiguous(m: u32) -> bool {
        let contiguous = m.leading_ones() + m.trailing_zeros() == 32;
        mask_to_prefix_len(Address::from(Ipv4Addr::from(m))).is_ok() == contiguous
    }
}
