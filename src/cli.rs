//! Argument dispatch for the `iptool` binary.
//!
//! One argument may be a CIDR prefix, a range (`start-end` or
//! `start-lastOctet`), an address or a decimal integer. Two arguments are an
//! address and its mask, or the two ends of a range. The rules are tried in
//! order; a rule that does not apply is logged and the next one is tried.

use crate::addr::{Address, Family};
use crate::cidr::{expand_prefix, network_mask, Prefix};
use crate::error::{Error, Result};
use crate::mask::address_and_mask_to_prefix;
use crate::range::decompose_range;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;
use std::str::FromStr;

enum Step {
    /// Input handled, stop trying rules.
    Stop,
    /// Output written, later rules still apply.
    Continue,
}

type Rule = fn(&str, &mut Vec<String>) -> Result<Step>;
type PairRule = fn(&str, &str, &mut Vec<String>) -> Result<Step>;

const SINGLE: [(&str, Rule); 4] = [
    ("cidr", cidr_to_range),
    ("range", range_to_cidr),
    ("bits", print_bits),
    ("integer", integer),
];

const PAIR: [(&str, PairRule); 2] = [("mask", mask_to_cidr), ("range", pair_to_cidr)];

/// Runs the first matching conversion and returns the lines to print.
pub fn run<S: AsRef<str>>(args: &[S]) -> Result<Vec<String>> {
    let mut out = Vec::new();
    match args {
        [one] => {
            let one = one.as_ref();
            for (name, rule) in SINGLE.iter() {
                match rule(one, &mut out) {
                    Ok(Step::Stop) => break,
                    Ok(Step::Continue) => {}
                    Err(e) => log::debug!("{} rule rejected {:?}: {}", name, one, e),
                }
            }
        }
        [a, b] => {
            let (a, b) = (a.as_ref(), b.as_ref());
            for (name, rule) in PAIR.iter() {
                match rule(a, b, &mut out) {
                    Ok(Step::Stop) => break,
                    Ok(Step::Continue) => {}
                    Err(e) => log::debug!("{} rule rejected {:?} {:?}: {}", name, a, b, e),
                }
            }
        }
        _ => return Err(Error::Usage),
    }
    if out.is_empty() {
        let joined: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        return Err(Error::Unrecognized(joined.join(" ")));
    }
    Ok(out)
}

fn cidr_to_range(s: &str, out: &mut Vec<String>) -> Result<Step> {
    if !s.contains('/') {
        return Err(Error::InvalidAddress(format!("{:?} has no prefix length", s)));
    }
    let prefix = Prefix::from_str(s)?;
    let range = expand_prefix(prefix);
    out.push("To IP Range:".to_string());
    out.push(format!("{} {}", range.start(), range.end()));
    out.push(format!("Mask: {}", network_mask(prefix)));
    Ok(Step::Stop)
}

fn range_to_cidr(s: &str, out: &mut Vec<String>) -> Result<Step> {
    lazy_static! {
        static ref RANGE: Regex = Regex::new(r"^\s*([^\s-]+)-([^\s-]+)\s*$").expect("Not possible");
        static ref OCTET: Regex = Regex::new(r"^[0-9]{1,3}$").expect("Not possible");
    }
    let v = RANGE
        .captures(s)
        .ok_or_else(|| Error::InvalidAddress(format!("{:?} is not a range", s)))?;
    let start = Address::from_str(&v[1])?;
    let end = if OCTET.is_match(&v[2]) {
        let last = v[2]
            .parse::<u8>()
            .map_err(|e| Error::InvalidAddress(format!("{:?}: {}", &v[2], e)))?;
        let end = start.with_last_octet(last);
        // the shorthand must move the last byte upwards
        if (start.to_u128() & 0xFF) as u8 >= last {
            return Err(Error::InvalidRange { start, end });
        }
        end
    } else {
        Address::from_str(&v[2])?
    };
    let blocks = decompose_range(start, end)?;
    out.push("To CIDR:".to_string());
    out.extend(blocks.iter().map(|p| p.to_string()));
    Ok(Step::Stop)
}

fn print_bits(s: &str, out: &mut Vec<String>) -> Result<Step> {
    // every byte is followed by a space, the last one included
    fn binary<'a>(bytes: impl Iterator<Item = &'a u8>) -> String {
        bytes.map(|b| format!("{:08b} ", b)).collect()
    }
    let octets = Address::from_str(s)?.octets();
    out.push(format!("BigEndian Bits:\t\t{}", binary(octets.iter())));
    out.push(format!("LittleEndian Bits:\t{}", binary(octets.iter().rev())));
    Ok(Step::Continue)
}

fn integer(s: &str, out: &mut Vec<String>) -> Result<Step> {
    let mut handled = false;
    if let Ok(ip) = Address::from_str(s) {
        match ip.family() {
            Family::V4 => {
                let n = ip.to_u128() as u32;
                out.push(format!("To Uint32 BigEndian:\t {}", n));
                out.push(format!("To Uint32 LittleEndian:\t {}", n.swap_bytes()));
            }
            Family::V6 => out.push(format!("To BigInt:\t {}", ip.to_u128())),
        }
        handled = true;
    }
    if let Ok(n) = s.trim().parse::<u128>() {
        out.push(format!("To IPv6:\t {}", Address::from_u128(Family::V6, n)?));
        if let Ok(n) = u32::try_from(n) {
            out.push(format!("To IPv4 BigEndian:\t {}", Ipv4Addr::from(n)));
            out.push(format!("To IPv4 LittleEndian:\t {}", Ipv4Addr::from(n.swap_bytes())));
        }
        handled = true;
    }
    if !handled {
        return Err(Error::InvalidAddress(format!(
            "{:?} is neither an address nor an integer",
            s
        )));
    }
    Ok(Step::Stop)
}

fn mask_to_cidr(ip: &str, mask: &str, out: &mut Vec<String>) -> Result<Step> {
    let prefix = address_and_mask_to_prefix(Address::from_str(ip)?, Address::from_str(mask)?)?;
    out.push("IPMask To CIDR:".to_string());
    out.push(prefix.to_string());
    Ok(Step::Stop)
}

fn pair_to_cidr(start: &str, end: &str, out: &mut Vec<String>) -> Result<Step> {
    range_to_cidr(&format!("{}-{}", start, end), out)
}
