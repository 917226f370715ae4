//! Listing exporters - CSV, JSON, Markdown
//!
//! Each exporter writes an [`AccountListing`] straight into an `io::Write`.
//! Balances keep their decimal scale in every format.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::listing::{AccountListing, AccountRow};

const COLUMNS: [&str; 5] = ["Full Name", "Account Number", "Account Type", "Balance", "Note"];

/// Writes an account listing in one output format
pub trait ListingExporter {
    fn write(&self, listing: &AccountListing, out: &mut dyn Write) -> io::Result<()>;

    /// File extension for this format
    fn extension(&self) -> &'static str;
}

/// CSV: one header line, then one line per account. No summary.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    include_header: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }
}

/// Quote a text cell when it holds a comma, quote or line break
fn csv_text(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

impl ListingExporter for CsvExporter {
    fn write(&self, listing: &AccountListing, out: &mut dyn Write) -> io::Result<()> {
        if self.include_header {
            writeln!(out, "{}", COLUMNS.join(","))?;
        }

        for row in &listing.accounts {
            // Numbers and decimals never need quoting
            writeln!(
                out,
                "{},{},{},{},{}",
                csv_text(&row.full_name),
                row.account_number,
                csv_text(&row.account_type),
                row.balance,
                csv_text(&row.note)
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

/// JSON: the listing serialized as-is (balances as strings, timestamp RFC 3339)
#[derive(Debug, Clone)]
pub struct JsonExporter {
    pretty: bool,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl ListingExporter for JsonExporter {
    fn write(&self, listing: &AccountListing, out: &mut dyn Write) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, listing)?;
        } else {
            serde_json::to_writer(&mut *out, listing)?;
        }
        writeln!(out)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Markdown: title, optional summary bullets, then an accounts table with a
/// right-aligned balance column.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    include_summary: bool,
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self {
            include_summary: true,
        }
    }
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_summary(mut self) -> Self {
        self.include_summary = false;
        self
    }

    fn write_row(row: &AccountRow, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            md_text(&row.full_name),
            row.account_number,
            md_text(&row.account_type),
            row.balance,
            md_text(&row.note)
        )
    }
}

/// Pipes split cells and line breaks end the table
fn md_text(value: &str) -> Cow<'_, str> {
    if value.contains(['|', '\n']) {
        Cow::Owned(value.replace('|', "\\|").replace('\n', " "))
    } else {
        Cow::Borrowed(value)
    }
}

impl ListingExporter for MarkdownExporter {
    fn write(&self, listing: &AccountListing, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "# {}\n", listing.title)?;

        if self.include_summary {
            writeln!(out, "- **Accounts**: {}", listing.account_count())?;
            writeln!(out, "- **Savings accounts**: {}", listing.savings_count)?;
            writeln!(out, "- **Total balance**: {}", listing.total_balance_text())?;
            writeln!(out, "- **Generated at**: {}\n", listing.generated_at.to_rfc3339())?;
        }

        writeln!(out, "| {} |", COLUMNS.join(" | "))?;
        writeln!(out, "| --- | --- | --- | ---: | --- |")?;
        for row in &listing.accounts {
            Self::write_row(row, out)?;
        }

        Ok(())
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
