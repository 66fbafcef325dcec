//! Core workflow engine for a community waste-collection service.
//!
//! The crate tracks waste-pickup requests through a multi-actor lifecycle
//! (resident creates, admin assigns, collector executes) and converts
//! successful collections into an append-only reward-points ledger that funds
//! a redemption catalog. Transport, authentication, and persistence mechanics
//! are boundary concerns: callers supply an authenticated [`Actor`] and
//! implementations of the storage ports, and the services here enforce the
//! lifecycle, authorization, and ledger-consistency rules.
//!
//! [`Actor`]: workflows::collection::domain::Actor

pub mod config;
pub mod workflows;
