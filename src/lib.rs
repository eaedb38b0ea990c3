//! Workspace facade: re-exports `geoborders-core` so the demos can use
//! `geoborders_rs::prelude::*`.
pub use geoborders_core::*;
