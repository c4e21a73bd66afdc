//! Link Saver: a local-first bookmark keeper.
//!
//! Accounts, sessions and an ordered per-user bookmark list, all persisted
//! in a local key-value store with no backend server. This library crate
//! exposes every module for use by the RPC binary and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
