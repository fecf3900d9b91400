//! Inclusive address ranges and their decomposition into CIDR blocks.

use crate::addr::Address;
use crate::cidr::Prefix;
use crate::error::{Error, Result};
use std::fmt::{Display, Formatter};

/// An inclusive `start..=end` run of addresses of one family.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Range {
    start: Address,
    end: Address,
}

impl Range {
    pub fn new(start: Address, end: Address) -> Result<Self> {
        start.same_family(&end)?;
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Range { start, end })
    }

    /// Callers guarantee `start <= end` within one family.
    pub(crate) fn from_sorted(start: Address, end: Address) -> Self {
        debug_assert!(start.family() == end.family() && start <= end);
        Range { start, end }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> Address {
        self.end
    }

    pub fn contains(&self, ip: &Address) -> bool {
        ip.family() == self.start.family() && self.start <= *ip && *ip <= self.end
    }

    /// Splits the range into the fewest CIDR blocks covering it exactly,
    /// ordered by address.
    ///
    /// Works down from `end`: at each step the largest aligned block that
    /// ends at the cursor and does not reach below `start` is taken.
    pub fn decompose(&self) -> Result<Vec<Prefix>> {
        let family = self.start.family();
        let bit_len = family.bit_len();
        let start = self.start.to_u128();
        let mut blocks = Vec::new();
        let mut cursor = self.end;
        loop {
            let c = cursor.to_u128();
            // a block of 2^b addresses ending at c needs the low b bits of c set
            let mut b = (c.trailing_ones() as u8).min(bit_len);
            while c & !family.host_mask(b) < start {
                b -= 1;
            }
            let begin = cursor.and(!family.host_mask(b));
            blocks.push(Prefix::new(begin, bit_len - b)?);
            if begin.to_u128() == start {
                break;
            }
            cursor = begin.checked_pred()?;
        }
        blocks.reverse();
        Ok(blocks)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Prefixes covering `start..=end`, lowest address first.
pub fn decompose_range(start: Address, end: Address) -> Result<Vec<Prefix>> {
    Range::new(start, end)?.decompose()
}
