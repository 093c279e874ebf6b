//! Core ledger types.
//!
//! All monetary values are fixed-point integers with 18 fractional decimal
//! digits (1 EMBR = 10^18 base units) and use `u128` so the full initial
//! supply fits without overflow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A 20-byte account identifier.
///
/// Addresses are opaque: the ledger never interprets their contents beyond
/// equality and ordering. The human-readable form is `0x`-prefixed lowercase
/// hex, which is also the serde representation so address-keyed maps
/// serialize to string-keyed JSON objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(bincode::Encode, bincode::Decode)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero (null) address. Never a valid transfer recipient.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Create an address from a byte array.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| AddressError::InvalidHex)?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength)?;
        Ok(Self(arr))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The four-way decomposition of a gross transfer amount.
///
/// Produced by the fee engine. The parts always reconstruct the gross
/// amount exactly: `net + burn + liquidity + lottery == gross`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Amount credited to the recipient.
    pub net: u128,
    /// Amount destroyed (total supply reduction).
    pub burn: u128,
    /// Amount credited to the liquidity accumulator.
    pub liquidity: u128,
    /// Amount credited to the lottery pool.
    pub lottery: u128,
}

impl FeeBreakdown {
    /// A fee-free breakdown: the full gross amount passes through as net.
    pub fn fee_free(gross: u128) -> Self {
        Self {
            net: gross,
            burn: 0,
            liquidity: 0,
            lottery: 0,
        }
    }

    /// Sum of the three fee parts. Returns `None` on overflow.
    pub fn total_fee(&self) -> Option<u128> {
        self.burn
            .checked_add(self.liquidity)?
            .checked_add(self.lottery)
    }

    /// Reconstructed gross amount. Returns `None` on overflow.
    pub fn gross(&self) -> Option<u128> {
        self.net.checked_add(self.total_fee()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Address ---

    #[test]
    fn zero_address_is_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_bytes([1; 20]).is_zero());
    }

    #[test]
    fn address_display_round_trip() {
        let addr = Address::from_bytes([0xAB; 20]);
        let s = addr.to_string();
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 42);
        assert_eq!(s.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn address_parse_without_prefix() {
        let addr = Address::from_bytes([0x11; 20]);
        let bare = hex::encode(addr.0);
        assert_eq!(bare.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn address_parse_rejects_bad_length() {
        let err = "0xabcd".parse::<Address>().unwrap_err();
        assert_eq!(err, AddressError::InvalidLength);
    }

    #[test]
    fn address_parse_rejects_bad_hex() {
        let err = "0xzz".parse::<Address>().unwrap_err();
        assert_eq!(err, AddressError::InvalidHex);
    }

    #[test]
    fn address_serde_as_string() {
        let addr = Address::from_bytes([0x42; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{addr}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn address_ordering_is_byte_order() {
        let a = Address::from_bytes([1; 20]);
        let b = Address::from_bytes([2; 20]);
        assert!(a < b);
    }

    // --- FeeBreakdown ---

    #[test]
    fn fee_free_breakdown() {
        let b = FeeBreakdown::fee_free(1_000);
        assert_eq!(b.net, 1_000);
        assert_eq!(b.total_fee(), Some(0));
        assert_eq!(b.gross(), Some(1_000));
    }

    #[test]
    fn breakdown_gross_reconstruction() {
        let b = FeeBreakdown {
            net: 9_500,
            burn: 300,
            liquidity: 100,
            lottery: 100,
        };
        assert_eq!(b.total_fee(), Some(500));
        assert_eq!(b.gross(), Some(10_000));
    }

    #[test]
    fn breakdown_overflow_is_none() {
        let b = FeeBreakdown {
            net: u128::MAX,
            burn: 1,
            liquidity: 0,
            lottery: 0,
        };
        assert_eq!(b.gross(), None);
    }

    // --- proptest ---

    proptest::proptest! {
        #[test]
        fn address_hex_round_trip(bytes: [u8; 20]) {
            let addr = Address::from_bytes(bytes);
            let parsed: Address = addr.to_string().parse().unwrap();
            proptest::prop_assert_eq!(parsed, addr);
        }
    }
}
