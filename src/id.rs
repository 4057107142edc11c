use std::{fmt, str, time};

use fstr::FStr;

use crate::Error;

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation or from the
    /// 32-digit hexadecimal string without hyphens.
    ///
    /// Digits are case-insensitive. The version and variant fields are not validated, so any
    /// correctly shaped hexadecimal string is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the input is neither 32 nor 36 bytes long or if a
    /// 36-byte input lacks a hyphen at position 8, 13, 18 or 23. Returns [`Error::HexDecode`] if a
    /// group contains a non-hexadecimal character.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_oid::Uuid;
    ///
    /// let x = Uuid::parse_str("0189dd43-c284-7f4f-806e-e7d238e9babb")?;
    /// let y = Uuid::parse_str("0189dd43c2847f4f806ee7d238e9babb")?;
    /// assert_eq!(x, y);
    /// # Ok::<(), uuid7_oid::Error>(())
    /// ```
    pub fn parse_str(src: &str) -> Result<Self, Error> {
        // (field, text offset, byte offset, byte length)
        const GROUPS: [(&str, usize, usize, usize); 5] = [
            ("time_low", 0, 0, 4),
            ("time_mid", 9, 4, 2),
            ("time_hi_and_version", 14, 6, 2),
            ("clock_seq", 19, 8, 2),
            ("node", 24, 10, 6),
        ];

        let src = src.as_bytes();
        let mut dst = [0u8; 16];
        match src.len() {
            32 => decode_hex("compact", src, &mut dst)?,
            36 => {
                if src[8] != b'-' || src[13] != b'-' || src[18] != b'-' || src[23] != b'-' {
                    return Err(Error::invalid_format(
                        "hyphens must be at positions 8, 13, 18 and 23",
                    ));
                }
                for (field, text_at, byte_at, len) in GROUPS {
                    decode_hex(
                        field,
                        &src[text_at..text_at + len * 2],
                        &mut dst[byte_at..byte_at + len],
                    )?;
                }
            }
            _ => return Err(Error::invalid_format("expected 32 or 36 characters")),
        }
        Ok(Self(dst))
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_oid::Uuid;
    ///
    /// let x = "0189dd43-c284-7f4f-806e-e7d238e9babb".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "0189dd43-c284-7f4f-806e-e7d238e9babb");
    /// assert_eq!(format!("{}", y), "0189dd43-c284-7f4f-806e-e7d238e9babb");
    /// # Ok::<(), uuid7_oid::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.0.iter().enumerate() {
            let [hi, lo] = hex_digits(*e);
            *buf_iter.next().unwrap() = hi;
            *buf_iter.next().unwrap() = lo;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens stored in a
    /// stack-allocated string type.
    pub fn encode_compact(&self) -> FStr<32> {
        encode_hex(&self.0)
    }

    /// Returns the 8-4-4-4-12 lowercase hexadecimal string representation.
    pub fn format(&self) -> String {
        String::from(&self.encode() as &str)
    }

    /// Returns the 32-digit lowercase hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_oid::Uuid;
    ///
    /// let x = Uuid::parse_str("0189dd43-c284-7f4f-806e-e7d238e9babb")?;
    /// assert_eq!(x.format_compact(), "0189dd43c2847f4f806ee7d238e9babb");
    /// # Ok::<(), uuid7_oid::Error>(())
    /// ```
    pub fn format_compact(&self) -> String {
        String::from(&self.encode_compact() as &str)
    }

    /// Returns the `unix_ts_ms` field, i.e. the first 48 bits read as a big-endian integer.
    ///
    /// The version field is not checked, so the result is only meaningful for identifiers whose
    /// leading bytes hold a millisecond timestamp.
    pub const fn unix_ts_ms(&self) -> u64 {
        u64::from_be_bytes([
            0, 0, self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        ])
    }

    /// Returns the embedded timestamp as a [`SystemTime`](time::SystemTime).
    pub fn timestamp(&self) -> time::SystemTime {
        time::UNIX_EPOCH + time::Duration::from_millis(self.unix_ts_ms())
    }

    /// Returns the embedded timestamp as a UTC date and time.
    #[cfg(feature = "chrono")]
    #[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
    pub fn timestamp_utc(&self) -> chrono::DateTime<chrono::Utc> {
        self.timestamp().into()
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `0b10`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_oid::Uuid;
    ///
    /// let x = Uuid::parse_str("0189dd43-c284-7f4f-806e-e7d238e9babb")?;
    /// assert_eq!(x.version(), Some(7));
    /// assert_eq!(Uuid::NIL.version(), None);
    /// # Ok::<(), uuid7_oid::Error>(())
    /// ```
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }
}

/// Variant field values of UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0b0`: reserved for NCS backward compatibility.
    Var0,
    /// `0b10`: the variant of RFC 9562 UUIDs, including UUIDv7.
    Var10,
    /// `0b110`: reserved for Microsoft backward compatibility.
    Var110,
    /// `0b111`: reserved for future definition.
    VarReserved,
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

const fn hex_digits(e: u8) -> [u8; 2] {
    [DIGITS[(e >> 4) as usize], DIGITS[(e & 15) as usize]]
}

/// Encodes `src` into `N` lowercase hexadecimal digits; `N` must be twice the length of `src`.
pub(crate) fn encode_hex<const N: usize>(src: &[u8]) -> FStr<N> {
    debug_assert_eq!(src.len() * 2, N);
    let mut buffer = [0u8; N];
    for (dst, e) in buffer.chunks_exact_mut(2).zip(src) {
        dst.copy_from_slice(&hex_digits(*e));
    }
    debug_assert!(buffer.is_ascii());
    unsafe { FStr::from_inner_unchecked(buffer) }
}

/// Decodes the hexadecimal `src` into `dst`, tagging a failure with `field`.
pub(crate) fn decode_hex(field: &'static str, src: &[u8], dst: &mut [u8]) -> Result<(), Error> {
    hex::decode_to_slice(src, dst).map_err(|source| Error::HexDecode { field, source })
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 or 32-digit hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse_str(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.format()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Uuid::parse_str(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
