//! LSP Request and Notification Handlers
//!
//! This module contains handlers for all LSP protocol messages.
//! Each submodule handles a specific category of LSP functionality.
//!
//! # Handler Categories
//!
//! - [`initialize`]: Server initialization and project activation
//! - [`shutdown`]: Server shutdown handling
//! - [`document`]: Text document synchronization
//! - [`hover`]: Class documentation on hover
//! - [`completion`]: Class completion inside class values

pub mod completion;
pub mod document;
pub mod hover;
pub mod initialize;
pub mod shutdown;
