//! # Bankledger Reports
//!
//! Account listings and their CSV, JSON and Markdown exporters.
//!
//! ## Exporters
//!
//! - [`CsvExporter`] - one line per account, text cells quoted as needed
//! - [`JsonExporter`] - the whole listing, pretty or compact
//! - [`MarkdownExporter`] - summary bullets plus an accounts table
//!
//! The fixed-width table lives on [`Ledger::print_accounts`](bankledger_core::Ledger::print_accounts).
//!
//! ## Example
//!
//! ```rust,ignore
//! use bankledger_reports::{AccountListing, CsvExporter, ListingExporter};
//!
//! let listing = AccountListing::from_ledger("Accounts", &ledger);
//! CsvExporter::new().write(&listing, &mut std::io::stdout())?;
//! ```

pub mod exporters;
pub mod listing;

// Re-export main types
pub use exporters::{CsvExporter, JsonExporter, ListingExporter, MarkdownExporter};
pub use listing::{AccountListing, AccountRow};
