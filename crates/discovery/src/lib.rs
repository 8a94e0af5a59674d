//! Discovery crate for CineMatch.
//!
//! This crate contains the session that wires the engine operations into
//! one browsing flow: what is trending, what fits your taste, what is like
//! the movie you picked, and how the critics feel about what is on screen.

pub mod session;

pub use session::{
    DiscoverySession, DiscoverySnapshot, SentimentSubject, SentimentView, SessionConfig,
};
