//! Paginated business documents rendered to PDF
//!
//! Budgets, invoices and receipts are validated, compiled into a flat list of
//! content [`Block`]s and laid out onto fixed-size pages. Every page repeats
//! the company header, a table that crosses a page boundary reprints its
//! column header, and each footer carries "page n / total".
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use backoffice_docs::{Budget, Client, Company, LayoutSettings, LineItem, Locale, Printable};
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let issued = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap_or_default();
//! let budget = Budget::new("42", issued, Company::new("ACME"), Client::new("Ana Souza"))
//!     .with_item(LineItem::new("Website redesign", 1.0, 4800.0));
//!
//! let pdf = budget.render_pdf(&LayoutSettings::default(), Locale::PtBr)?;
//! std::fs::write("orcamento-42.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```
//!
//! Layout is deterministic: text is measured with fixed Courier advances, so
//! the same input always produces the same pages.

pub mod blocks;
mod budget;
mod document;
mod error;
pub mod format;
mod invoice;
pub mod layout;
pub mod metrics;
mod model;
pub mod pdf;
mod receipt;
pub mod settings;
mod validation;
pub mod wrap;

pub use blocks::{Align, Block, TableColumn};
pub use budget::Budget;
pub use document::Printable;
pub use error::{DocumentError, FieldIssue, Result};
pub use format::{format_currency, Locale};
pub use invoice::Invoice;
pub use layout::{layout_blocks, LaidOutDocument, Page};
pub use metrics::{CourierMetrics, TextMetrics};
pub use model::{Client, Company, LineItem, PaymentMethod, Project};
pub use receipt::{Receipt, TRANSCRIPT_WIDTH};
pub use settings::LayoutSettings;
pub use validation::is_valid_email;
