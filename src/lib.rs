#![forbid(unsafe_code)]

//! NASA-TLX workload assessor — single-participant administration of the
//! NASA Task Load indeX protocol.
//!
//! The session flow:
//! 1. **Ratings** — six subjective workload scales, 0–100 in steps of 5
//! 2. **Comparisons** — all 15 pairwise importance matchups, randomized
//!    order and layout, each presented exactly once
//! 3. **Export** — per-factor weighted scores appended as one CSV row
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use nasa_tlx::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use nasa_tlx::wizard::model::SessionModel;
//! use nasa_tlx::wizard::update::{SessionMsg, update};
//! ```

pub mod prelude;

#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod export;
pub mod protocol;
pub mod wizard;
