//! Live match feed
//!
//! This module provides:
//! - **Client**: bounded-timeout HTTP access to the local feed endpoints
//! - **Model**: typed views over the feed's JSON (players, snapshot, events)
//!
//! Every failure at this boundary is reported as a value. The poll loop
//! treats all of them as transient and retries on its next cycle.

mod client;
mod error;
mod model;

pub use client::{Endpoint, FeedClient, FeedSource};
pub use error::{FeedError, SnapshotError};
pub use model::{ActivePlayer, FeedEvent, GameEvent, MatchSnapshot, PlayerEntry, Team};
