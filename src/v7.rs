//! UUIDv7 generation from the system clock and the operating system's secure random source

use std::time;

use rand::{rngs::OsRng, RngCore};

use crate::{Error, Uuid};

/// Generates a UUIDv7 object from the current time and the operating system's secure random
/// source.
///
/// Each call is independent: there is no shared state between calls and no counter, so UUIDs
/// generated within the same millisecond are distinguished by their 74 random bits only.
///
/// # Errors
///
/// Returns [`Error::RandomSource`] if the random source cannot supply the requested bytes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_oid::uuid7()?;
/// println!("{}", uuid); // e.g., "0189dd43-c284-7f4f-806e-e7d238e9babb"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), uuid7_oid::Error>(())
/// ```
pub fn uuid7() -> Result<Uuid, Error> {
    Uuid::generate()
}

impl Uuid {
    /// Generates a UUIDv7 object from the current time and the operating system's secure random
    /// source.
    ///
    /// See [`uuid7()`] for details.
    pub fn generate() -> Result<Self, Error> {
        Self::generate_with(&mut OsRng, now_unix_ts_ms())
    }

    /// Generates a UUIDv7 object from a `unix_ts_ms` and a random number generator.
    ///
    /// Only the lower 48 bits of `unix_ts_ms` are used. The other ten bytes are filled by `rng`
    /// before the version and variant bits are set in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RandomSource`] if `rng` fails to fill the random bytes. No partially
    /// filled UUID is returned in this case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_oid::Uuid;
    ///
    /// let uuid = Uuid::generate_with(&mut rand::thread_rng(), 0x0189_dd43_c284)?;
    /// assert!(uuid.to_string().starts_with("0189dd43-c284-7"));
    /// # Ok::<(), uuid7_oid::Error>(())
    /// ```
    pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R, unix_ts_ms: u64) -> Result<Self, Error> {
        let mut bytes = [0u8; 16];
        put_unix_ts_ms(&mut bytes, unix_ts_ms);
        rng.try_fill_bytes(&mut bytes[6..])?;
        set_version_and_variant(&mut bytes);
        Ok(Self::from(bytes))
    }
}

/// Writes the lower 48 bits of `unix_ts_ms` into `bytes[0..6]` in big-endian order.
pub(crate) fn put_unix_ts_ms(bytes: &mut [u8; 16], unix_ts_ms: u64) {
    bytes[..6].copy_from_slice(&unix_ts_ms.to_be_bytes()[2..]);
}

/// Sets the version and variant fields in place, keeping the other bits of bytes 6 and 8.
pub(crate) fn set_version_and_variant(bytes: &mut [u8; 16]) {
    // ver: high nibble of byte 6 = 0111
    bytes[6] = (bytes[6] & 0x0f) | 0x70;
    // var: top two bits of byte 8 = 10
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}

/// Returns the current Unix time in milliseconds, or zero if the clock is set before the epoch.
fn now_unix_ts_ms() -> u64 {
    time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::{now_unix_ts_ms, uuid7};
    use crate::{Error, Uuid, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid7().unwrap().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-7[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 1M identifiers without collision
    #[test]
    fn generates_1m_identifiers_without_collision() {
        use std::collections::HashSet;
        const N: usize = 1_000_000;
        let s: HashSet<Uuid> = (0..N).map(|_| uuid7().unwrap()).collect();
        assert_eq!(s.len(), N);
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        for _ in 0..10_000 {
            let ts_now = now_unix_ts_ms() as i64;
            let e = uuid7().unwrap();
            assert!((ts_now - e.unix_ts_ms() as i64).abs() < 16);

            let skew = match e.timestamp().duration_since(time::SystemTime::now()) {
                Ok(ahead) => ahead,
                Err(behind) => behind.duration(),
            };
            assert!(skew < time::Duration::from_millis(16));
        }
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], n, "version bit 50");
        assert_eq!(bins[51], n, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = uuid7().unwrap();
            assert_eq!(e.as_bytes()[6] >> 4, 0b0111);
            assert_eq!(e.as_bytes()[8] >> 6, 0b10);
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(7));
        }
    }

    /// Keeps random low bits of tagged bytes
    #[test]
    fn keeps_random_low_bits_of_tagged_bytes() {
        let mut ones = rand::rngs::mock::StepRng::new(u64::MAX, 0);
        let e = Uuid::generate_with(&mut ones, 0).unwrap();
        assert_eq!(&e.encode() as &str, "00000000-0000-7fff-bfff-ffffffffffff");

        let mut zeros = rand::rngs::mock::StepRng::new(0, 0);
        let e = Uuid::generate_with(&mut zeros, 0).unwrap();
        assert_eq!(&e.encode() as &str, "00000000-0000-7000-8000-000000000000");
    }

    /// Truncates timestamp to 48 bits
    #[test]
    fn truncates_timestamp_to_48_bits() {
        let mut rng = rand::thread_rng();
        let ts = 0x0123_4567_89abu64;
        let e = Uuid::generate_with(&mut rng, ts).unwrap();
        assert_eq!(e.as_bytes()[..6], ts.to_be_bytes()[2..]);
        assert_eq!(e.unix_ts_ms(), ts);

        let e = Uuid::generate_with(&mut rng, (0xabcd << 48) | ts).unwrap();
        assert_eq!(e.unix_ts_ms(), ts);
    }

    /// Returns random source error when random number generator fails
    #[test]
    fn returns_random_source_error_when_random_number_generator_fails() {
        struct FailingRng;

        impl rand::RngCore for FailingRng {
            fn next_u32(&mut self) -> u32 {
                unimplemented!()
            }

            fn next_u64(&mut self) -> u64 {
                unimplemented!()
            }

            fn fill_bytes(&mut self, _: &mut [u8]) {
                unimplemented!()
            }

            fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
                Err(rand::Error::new("entropy source unavailable"))
            }
        }

        let result = Uuid::generate_with(&mut FailingRng, 0x0123_4567_89ab);
        assert!(matches!(result, Err(Error::RandomSource(_))));
    }

    /// Generates no duplicates under multithreading
    #[test]
    fn generates_no_duplicates_under_multithreading() -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(uuid7().unwrap()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut s = HashSet::new();
        while let Ok(e) = rx.recv() {
            s.insert(e);
        }

        assert_eq!(s.len(), 4 * 10_000);
        Ok(())
    }
}
