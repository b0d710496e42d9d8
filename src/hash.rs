use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// Keys must have at least this many characters for [`HashKind::Burris`]
pub const BURRIS_MIN_KEY_LEN: usize = 11;

/// Hash function used to pick the initial bucket of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashKind {
    /// Alternating weighted sum over every character
    #[default]
    Custom,

    /// Fixed-offset fingerprint sampling characters 0, 4, 6 and 10
    Burris,

    /// XXH3 over the key bytes, a well-mixed baseline
    Xxh3,
}

impl HashKind {
    /// All hash functions, in a stable order.
    pub const ALL: [Self; 3] = [Self::Custom, Self::Burris, Self::Xxh3];

    /// Hashes `key` into a 1-based bucket in `[1, size]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyTooShort`] if [`HashKind::Burris`] is given a key
    /// with fewer than [`BURRIS_MIN_KEY_LEN`] characters.
    pub fn hash(self, key: &str, size: usize) -> Result<usize> {
        debug_assert!(size > 0, "table size must be non-zero");

        let value = match self {
            Self::Custom => custom_hash(key, size as u64),
            Self::Burris => burris_hash(key, size as u64)?,
            Self::Xxh3 => xxhash_rust::xxh3::xxh3_64(key.as_bytes()) % size as u64,
        };

        Ok(value as usize + 1)
    }
}

/// The weighted sum is a 32-bit integer that wraps on overflow.
fn custom_hash(key: &str, size: u64) -> u64 {
    let sum = key.chars().enumerate().fold(0i32, |sum, (pos, c)| {
        let weighted = (u32::from(c) as i32).wrapping_mul((pos as i32).wrapping_add(1));
        if pos % 2 == 0 {
            sum.wrapping_add(weighted)
        } else {
            sum.wrapping_sub(weighted)
        }
    });

    (i64::from(sum) % size as i64).unsigned_abs()
}

fn burris_hash(key: &str, size: u64) -> Result<u64> {
    let sampled = key
        .chars()
        .take(BURRIS_MIN_KEY_LEN)
        .map(|c| u64::from(u32::from(c)))
        .collect::<Vec<_>>();

    let Ok([c0, _, _, _, c4, _, c6, _, _, _, c10]) =
        <[u64; BURRIS_MIN_KEY_LEN]>::try_from(sampled.as_slice())
    else {
        return Err(Error::KeyTooShort {
            len: key.chars().count(),
            required: BURRIS_MIN_KEY_LEN,
        });
    };

    let high_bit = (c0 / 128) * 128;
    let middle = ((c4 + c6) * 5) / 512;
    let tail = c10 / 128;

    Ok((high_bit + middle + tail) % size)
}

impl fmt::Display for HashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Custom => "custom",
            Self::Burris => "burris",
            Self::Xxh3 => "xxh3",
        })
    }
}

impl FromStr for HashKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "custom" => Ok(Self::Custom),
            "burris" => Ok(Self::Burris),
            "xxh3" => Ok(Self::Xxh3),
            other => Err(Error::InvalidConfig(format!("unknown hash function: {other}"))),
        }
    }
}
