//! Worklog: track work items with their status, repository branches, and notes.
//!
//! The [`store::LogStore`] owns all state and persists a snapshot through a
//! [`storage::KeyValueStore`] after every change. The [`cli`] module is the
//! presentation layer on top.

pub mod cli;
pub mod config;
pub mod form;
pub mod model;
pub mod storage;
pub mod store;
pub mod transfer;
