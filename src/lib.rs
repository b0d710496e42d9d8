//! A fixed-capacity open-addressing hash table for studying collisions.
//!
//! Keys are placed into a `SlotTable` using one of several hash functions and
//! either linear or pseudo-random probing. Every placed key remembers the
//! bucket it hashed to, the slot it landed in, how many slots were examined,
//! and when it was inserted, so probe statistics can be aggregated over any
//! block of insertions afterwards.
//!
//! ```
//! use probe_lab::{HashKind, ProbeStrategy, SlotTable};
//!
//! let mut table = SlotTable::new(100, HashKind::Custom, ProbeStrategy::Linear)?;
//! assert!(table.insert("aaaaaaaaaaaaaaaa")?);
//! assert!(!table.insert("aaaaaaaaaaaaaaaa")?);
//!
//! let stats = table.range_stats(1, 75);
//! assert_eq!(1, stats.max());
//! # Ok::<(), probe_lab::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

mod error;

pub mod config;
pub mod experiment;
pub mod hash;
pub mod map;
pub mod parser;
pub mod probe;
pub mod report;
pub mod source;
pub mod stats;

pub use {
    config::LabConfig,
    error::{Error, Result},
    experiment::{compare, run, Outcome},
    hash::HashKind,
    map::{Entry, Slot, SlotTable},
    probe::{ProbeSequencer, ProbeStrategy},
    stats::{ProbeStats, StatRange},
};
