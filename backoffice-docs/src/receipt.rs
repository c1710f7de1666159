//! Receipts and their plain-text transcript

use crate::blocks::Block;
use crate::budget::{client_blocks, item_blocks};
use crate::document::Printable;
use crate::error::Result;
use crate::format::{format_currency, format_date, format_quantity, Label, Locale};
use crate::metrics::CourierMetrics;
use crate::model::{items_total, Client, Company, LineItem, PaymentMethod};
use crate::validation::Validator;
use crate::wrap::{truncate, wrap_text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Character width of the plain-text transcript
pub const TRANSCRIPT_WIDTH: usize = 48;

/// Proof of a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub company: Company,
    pub client: Client,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Amount handed over; the total when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_received: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

impl Receipt {
    pub fn new(number: impl Into<String>, date: NaiveDate, company: Company, client: Client) -> Self {
        Self {
            number: number.into(),
            date,
            company,
            client,
            items: Vec::new(),
            payment_method: PaymentMethod::default(),
            amount_received: None,
            notes: String::new(),
        }
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_payment(mut self, method: PaymentMethod, amount_received: Option<f64>) -> Self {
        self.payment_method = method;
        self.amount_received = amount_received;
        self
    }

    pub fn total(&self) -> f64 {
        items_total(&self.items)
    }

    pub fn received(&self) -> f64 {
        self.amount_received.unwrap_or_else(|| self.total())
    }

    /// Change owed to the client, never negative
    pub fn change(&self) -> f64 {
        (self.received() - self.total()).max(0.0)
    }

    /// Fixed-width plain-text rendering, one line per row
    pub fn transcript(&self, locale: Locale) -> String {
        let mut out = Transcript::default();
        out.rule('=');
        out.center(self.company.name.trim());
        let contact = self.company.contact_line();
        if !contact.is_empty() {
            out.center(&contact);
        }
        out.rule('=');
        out.center(&format!(
            "{} {} {}",
            Label::Receipt.text(locale),
            Label::Number.text(locale),
            self.number.trim()
        ));
        out.line(&format!("{}: {}", Label::IssueDate.text(locale), format_date(self.date)));
        out.line(&format!("{}: {}", Label::Client.text(locale), self.client.name.trim()));
        if !self.client.tax_id.trim().is_empty() {
            out.line(&format!("{}: {}", Label::TaxId.text(locale), self.client.tax_id.trim()));
        }
        out.rule('-');

        for item in &self.items {
            out.line(item.description.trim());
            out.pair(
                &format!(
                    "  {} x {}",
                    format_quantity(item.quantity, locale),
                    format_currency(item.unit_price, locale)
                ),
                &format_currency(item.total(), locale),
            );
        }
        out.rule('-');

        out.pair(
            &Label::Total.text(locale).to_uppercase(),
            &format_currency(self.total(), locale),
        );
        out.pair(
            Label::AmountReceived.text(locale),
            &format_currency(self.received(), locale),
        );
        if self.change() > 0.0 {
            out.pair(Label::Change.text(locale), &format_currency(self.change(), locale));
        }
        out.line(&format!(
            "{}: {}",
            Label::PaymentMethod.text(locale),
            self.payment_method.label(locale)
        ));

        if !self.notes.trim().is_empty() {
            out.rule('-');
            for line in wrap_text(
                self.notes.trim(),
                TRANSCRIPT_WIDTH as f32 * CourierMetrics::glyph_width(1.0),
                1.0,
                &CourierMetrics,
            ) {
                out.line(&line);
            }
        }
        out.rule('=');
        out.finish()
    }
}

/// Line builder for the transcript; every line is at most [`TRANSCRIPT_WIDTH`] characters
#[derive(Default)]
struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// `text` as-is when it fits `width` columns, otherwise cut with an ellipsis
    fn fit(text: &str, width: usize) -> String {
        if text.chars().count() <= width {
            return text.to_string();
        }
        truncate(
            text,
            width as f32 * CourierMetrics::glyph_width(1.0),
            1.0,
            &CourierMetrics,
        )
    }

    fn line(&mut self, text: &str) {
        self.lines.push(Self::fit(text, TRANSCRIPT_WIDTH));
    }

    fn rule(&mut self, c: char) {
        self.lines.push(c.to_string().repeat(TRANSCRIPT_WIDTH));
    }

    fn center(&mut self, text: &str) {
        let text = Self::fit(text, TRANSCRIPT_WIDTH);
        let pad = (TRANSCRIPT_WIDTH - text.chars().count()) / 2;
        self.lines.push(format!("{}{}", " ".repeat(pad), text));
    }

    /// `left` and `right` pushed to opposite edges
    fn pair(&mut self, left: &str, right: &str) {
        let right_len = right.chars().count();
        let room = TRANSCRIPT_WIDTH.saturating_sub(right_len + 1);
        let left = Self::fit(left, room);
        let gap = TRANSCRIPT_WIDTH
            .saturating_sub(left.chars().count() + right_len)
            .max(1);
        self.lines.push(format!("{}{}{}", left, " ".repeat(gap), right));
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl Printable for Receipt {
    fn validate(&self) -> Result<()> {
        let mut v = Validator::new();
        v.require("number", &self.number);
        self.company.check(&mut v);
        self.client.check(&mut v);
        v.items(&self.items);
        if let Some(received) = self.amount_received {
            v.non_negative("amount_received", received);
        }
        v.finish()
    }

    fn to_blocks(&self, locale: Locale) -> Vec<Block> {
        let contact = self.company.contact_line();
        let mut subtitle = format!(
            "{} {} {}",
            Label::Receipt.text(locale),
            Label::Number.text(locale),
            self.number.trim()
        );
        if !contact.is_empty() {
            subtitle = format!("{} | {}", subtitle, contact);
        }

        let mut blocks = vec![
            Block::header(self.company.name.trim(), subtitle),
            Block::field(Label::IssueDate.text(locale), format_date(self.date)),
            Block::spacer(8.0),
        ];
        client_blocks(&self.client, locale, &mut blocks);
        blocks.push(Block::spacer(8.0));
        item_blocks(&self.items, locale, &mut blocks);

        blocks.push(Block::field(
            Label::PaymentMethod.text(locale),
            self.payment_method.label(locale),
        ));
        blocks.push(Block::field(
            Label::AmountReceived.text(locale),
            format_currency(self.received(), locale),
        ));
        if self.change() > 0.0 {
            blocks.push(Block::field(
                Label::Change.text(locale),
                format_currency(self.change(), locale),
            ));
        }

        if !self.notes.trim().is_empty() {
            blocks.push(Block::spacer(8.0));
            blocks.push(Block::section(Label::Notes.text(locale)));
            blocks.push(Block::paragraph(self.notes.trim()));
        }
        blocks
    }

    fn title(&self, locale: Locale) -> String {
        format!("{} {}", Label::Receipt.text(locale), self.number.trim())
    }
}
