//! UUID version 7 generation and parsing, with conversion to and from MongoDB ObjectIds
//!
//! ```rust
//! use uuid7_oid::{uuid7, Uuid};
//!
//! let uuid = uuid7()?;
//! println!("{}", uuid); // e.g., "0189dd43-c284-7f4f-806e-e7d238e9babb"
//! println!("{}", uuid.format_compact()); // e.g., "0189dd43c2847f4f806ee7d238e9babb"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let parsed = Uuid::parse_str("0189dd43c2847f4f806ee7d238e9babb")?;
//! assert_eq!(parsed.to_string(), "0189dd43-c284-7f4f-806e-e7d238e9babb");
//! # Ok::<(), uuid7_oid::Error>(())
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds, truncated to 48 bits (enough until the year 10889).
//! - The 4-bit `ver` field is set at `0111`.
//! - The 2-bit `var` field is set at `10`.
//! - The 12-bit `rand_a` and 62-bit `rand_b` fields are filled with bytes from
//!   the operating system's cryptographically secure random source.
//!
//! There is no counter: identifiers generated within the same millisecond are
//! not guaranteed to be ordered and rely on their 74 random bits for
//! uniqueness.
//!
//! # MongoDB ObjectId
//!
//! A 12-byte ObjectId can be mapped into a UUIDv7 and recovered from it byte for
//! byte. See the [`legacy`] module for the layout.
//!
//! ```rust
//! use uuid7_oid::Uuid;
//!
//! let uuid = Uuid::from_legacy_id("63ede45a8d0137fc1b631091")?;
//! assert_eq!(uuid.version(), Some(7));
//! assert_eq!(uuid.to_legacy_id_hex(), "63ede45a8d0137fc1b631091");
//! # Ok::<(), uuid7_oid::Error>(())
//! ```
//!
//! # Crate features
//!
//! - `serde` enables serialization and deserialization of [`Uuid`].
//! - `uuid` enables conversion from and to `uuid::Uuid`.
//! - `chrono` enables `Uuid::timestamp_utc()`.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
pub use id::{Uuid, Variant};

pub mod legacy;
pub use legacy::LegacyId;

mod v7;
pub use v7::uuid7;
