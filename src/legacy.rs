//! Conversion between UUIDv7 and the 12-byte MongoDB ObjectId
//!
//! An ObjectId consists of a 4-byte big-endian Unix timestamp in seconds, a 5-byte opaque tag,
//! and a 3-byte counter. The conversion places the data-carrying bytes into a UUIDv7 as follows:
//!
//! ```text
//! ObjectId  | seconds (4)         | tag (5)              | counter (3) |
//!             x 1000 -> unix_ts_ms  tag[0]   tag[1..5]      counter
//!                 |                   |         |              |
//! UUIDv7    | unix_ts_ms (6)  | 70 | tag[0] | 80 | tag[1..5] + counter (7) |
//! ```
//!
//! The UUID side thus looks like a valid UUIDv7 but carries no randomness: it is fully derived
//! from the ObjectId, and the ObjectId is recovered byte for byte by [`Uuid::to_legacy_id()`].

use std::{fmt, str};

use fstr::FStr;

use crate::id::{decode_hex, encode_hex};
use crate::v7::{put_unix_ts_ms, set_version_and_variant};
use crate::{Error, Uuid};

/// Represents a 12-byte MongoDB ObjectId.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct LegacyId([u8; 12]);

impl LegacyId {
    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }

    /// Creates an object from the 24-digit hexadecimal string representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the input is not 24 bytes long and
    /// [`Error::HexDecode`] if it contains a non-hexadecimal character.
    pub fn parse_str(src: &str) -> Result<Self, Error> {
        let src = src.as_bytes();
        if src.len() != 24 {
            return Err(Error::invalid_format("expected 24 characters"));
        }
        let mut dst = [0u8; 12];
        decode_hex("legacy", src, &mut dst)?;
        Ok(Self(dst))
    }

    /// Returns the 24-digit lowercase hexadecimal string representation stored in a
    /// stack-allocated string type.
    pub fn encode(&self) -> FStr<24> {
        encode_hex(&self.0)
    }

    /// Returns the Unix timestamp in seconds.
    pub const fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Returns the 5-byte opaque tag (machine and process identifier).
    pub const fn tag(&self) -> [u8; 5] {
        [self.0[4], self.0[5], self.0[6], self.0[7], self.0[8]]
    }

    /// Returns the 24-bit counter.
    pub const fn counter(&self) -> u32 {
        u32::from_be_bytes([0, self.0[9], self.0[10], self.0[11]])
    }
}

impl fmt::Display for LegacyId {
    /// Returns the 24-digit lowercase hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for LegacyId {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_str(src)
    }
}

impl From<LegacyId> for [u8; 12] {
    fn from(src: LegacyId) -> Self {
        src.0
    }
}

impl From<[u8; 12]> for LegacyId {
    fn from(src: [u8; 12]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for LegacyId {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Uuid {
    /// Creates a UUIDv7 from the 24-digit hexadecimal string representation of an ObjectId.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the input is not 24 bytes long and
    /// [`Error::HexDecode`] if it contains a non-hexadecimal character.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_oid::Uuid;
    ///
    /// let uuid = Uuid::from_legacy_id("63ede45a8d0137fc1b631091")?;
    /// assert_eq!(uuid.to_string(), "01865943-ff90-708d-8001-37fc1b631091");
    /// assert_eq!(uuid.to_legacy_id_hex(), "63ede45a8d0137fc1b631091");
    /// # Ok::<(), uuid7_oid::Error>(())
    /// ```
    pub fn from_legacy_id(src: &str) -> Result<Self, Error> {
        LegacyId::parse_str(src).map(Self::from_legacy)
    }

    /// Creates a UUIDv7 from an ObjectId.
    ///
    /// The low six bits of byte 8 carry no ObjectId data and are always zero.
    pub fn from_legacy(src: LegacyId) -> Self {
        let mut bytes = [0u8; 16];
        put_unix_ts_ms(&mut bytes, u64::from(src.timestamp_secs()) * 1000);
        bytes[7] = src.0[4];
        bytes[9..].copy_from_slice(&src.0[5..]);
        set_version_and_variant(&mut bytes);
        Self::from(bytes)
    }

    /// Returns the ObjectId embedded in the UUID.
    ///
    /// The timestamp is truncated to whole seconds and then to 32 bits. The version and variant
    /// fields are not checked.
    pub fn to_legacy_id(&self) -> LegacyId {
        let bytes = self.as_bytes();
        let secs = (self.unix_ts_ms() / 1000) as u32;
        let mut dst = [0u8; 12];
        dst[..4].copy_from_slice(&secs.to_be_bytes());
        dst[4] = bytes[7];
        dst[5..].copy_from_slice(&bytes[9..]);
        LegacyId(dst)
    }

    /// Returns the 24-digit lowercase hexadecimal string representation of the embedded ObjectId.
    pub fn to_legacy_id_hex(&self) -> String {
        String::from(&self.to_legacy_id().encode() as &str)
    }
}

impl From<LegacyId> for Uuid {
    fn from(src: LegacyId) -> Self {
        Self::from_legacy(src)
    }
}
