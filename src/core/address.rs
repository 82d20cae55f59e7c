//! Caller identity.
//!
//! Every mutating operation is invoked on behalf of an `Address`. The engine
//! never produces addresses itself; the host supplies the call origin.
//!
//! ## Text Form
//!
//! Addresses render as `0x` followed by 40 lowercase hex digits and parse
//! from the same form (the `0x` prefix is optional, case is ignored).
//!
//! ```
//! use ludo_engine::core::Address;
//!
//! let alice = Address::from_low_u64(1);
//! assert_eq!(alice.to_string(), "0x0000000000000000000000000000000000000001");
//!
//! let parsed: Address = "0x0000000000000000000000000000000000000001".parse().unwrap();
//! assert_eq!(parsed, alice);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::AddressParseError;

/// Number of bytes in an address.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte external identity.
///
/// Serializes as its hex text form so snapshots and JSON output stay readable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0; ADDRESS_LEN]);

    /// Create an address from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Create an address whose low 8 bytes hold `value` (big-endian).
    ///
    /// Handy for tests and simulations that need a handful of distinct callers.
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::Length(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidHex(digits.to_string()));
        }

        let mut bytes = [0; ADDRESS_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| AddressParseError::InvalidHex(digits.to_string()))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| AddressParseError::InvalidHex(digits.to_string()))?;
        }

        Ok(Self(bytes))
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_low_u64_is_distinct() {
        let a = Address::from_low_u64(1);
        let b = Address::from_low_u64(2);

        assert_ne!(a, b);
        assert_eq!(a.as_bytes()[19], 1);
        assert_eq!(b.as_bytes()[19], 2);
        assert_eq!(Address::from_low_u64(0), Address::ZERO);
    }

    #[test]
    fn test_display() {
        let addr = Address::from_low_u64(0xabcd);
        assert_eq!(addr.to_string(), "0x000000000000000000000000000000000000abcd");
    }

    #[test]
    fn test_parse_accepts_upper_case_and_missing_prefix() {
        let addr = Address::from_low_u64(0xabcd);

        let upper: Address = "0x000000000000000000000000000000000000ABCD".parse().unwrap();
        let bare: Address = "000000000000000000000000000000000000abcd".parse().unwrap();

        assert_eq!(upper, addr);
        assert_eq!(bare, addr);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("0x1234".parse::<Address>(), Err(AddressParseError::Length(4)));
        assert!(matches!(
            "0xzz00000000000000000000000000000000000000".parse::<Address>(),
            Err(AddressParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let addr = Address::from_low_u64(7);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0x0000000000000000000000000000000000000007\"");

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
