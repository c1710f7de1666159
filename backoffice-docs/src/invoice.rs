//! Invoices

use crate::blocks::Block;
use crate::budget::{client_blocks, item_blocks};
use crate::document::Printable;
use crate::error::Result;
use crate::format::{format_date, Label, Locale};
use crate::model::{items_total, Client, Company, LineItem};
use crate::validation::Validator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bill for delivered work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub company: Company,
    pub client: Client,
    /// Project or order the invoice refers to
    #[serde(default)]
    pub reference: String,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: String,
}

impl Invoice {
    pub fn new(
        number: impl Into<String>,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        company: Company,
        client: Client,
    ) -> Self {
        Self {
            number: number.into(),
            issue_date,
            due_date,
            company,
            client,
            reference: String::new(),
            items: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn total(&self) -> f64 {
        items_total(&self.items)
    }
}

impl Printable for Invoice {
    fn validate(&self) -> Result<()> {
        let mut v = Validator::new();
        v.require("number", &self.number);
        self.company.check(&mut v);
        self.client.check(&mut v);
        if self.due_date < self.issue_date {
            v.issue("due_date", "cannot be before the issue date");
        }
        v.items(&self.items);
        v.finish()
    }

    fn to_blocks(&self, locale: Locale) -> Vec<Block> {
        let contact = self.company.contact_line();
        let mut subtitle = format!(
            "{} {} {}",
            Label::Invoice.text(locale),
            Label::Number.text(locale),
            self.number.trim()
        );
        if !contact.is_empty() {
            subtitle = format!("{} | {}", subtitle, contact);
        }

        let mut blocks = vec![
            Block::header(self.company.name.trim(), subtitle),
            Block::field(Label::IssueDate.text(locale), format_date(self.issue_date)),
            Block::field(Label::DueDate.text(locale), format_date(self.due_date)),
        ];
        if !self.reference.trim().is_empty() {
            blocks.push(Block::field(Label::Project.text(locale), self.reference.trim()));
        }
        blocks.push(Block::spacer(8.0));

        client_blocks(&self.client, locale, &mut blocks);
        blocks.push(Block::spacer(8.0));

        item_blocks(&self.items, locale, &mut blocks);

        if !self.notes.trim().is_empty() {
            blocks.push(Block::spacer(8.0));
            blocks.push(Block::section(Label::Notes.text(locale)));
            blocks.push(Block::paragraph(self.notes.trim()));
        }
        blocks
    }

    fn title(&self, locale: Locale) -> String {
        format!("{} {}", Label::Invoice.text(locale), self.number.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice() -> Invoice {
        Invoice::new(
            "F-100",
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
            Company {
                name: "ACME".into(),
                email: "financeiro@acme.com".into(),
                ..Default::default()
            },
            Client::new("Bruno Lima"),
        )
        .with_reference("Site institucional")
        .with_item(LineItem::new("Manutenção mensal", 1.0, 800.0))
        .with_notes("Pagamento via Pix.")
    }

    #[test]
    fn test_invoice_blocks() {
        let blocks = invoice().to_blocks(Locale::PtBr);
        assert_eq!(
            blocks[0],
            Block::header("ACME", "FATURA Nº F-100 | financeiro@acme.com")
        );
        assert_eq!(blocks[2], Block::field("Vencimento", "31/10/2026"));
        assert!(blocks.contains(&Block::field("Projeto", "Site institucional")));
        assert!(blocks.contains(&Block::total("Total", "R$ 800,00")));
        assert_eq!(blocks.last(), Some(&Block::paragraph("Pagamento via Pix.")));
    }

    #[test]
    fn test_due_date_before_issue() {
        let mut bad = invoice();
        bad.due_date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let err = bad.validate().unwrap_err();
        assert_eq!(err.issues()[0].field, "due_date");
    }

    #[test]
    fn test_deserialize_minimal() {
        let invoice: Invoice = serde_json::from_str(
            r#"{
                "number": "7",
                "issue_date": "2026-10-01",
                "due_date": "2026-10-10",
                "client": {"name": "Carla"},
                "items": [{"description": "Consultoria", "quantity": 2, "unit_price": 100}]
            }"#,
        )
        .unwrap();
        assert_eq!(invoice.total(), 200.0);
        assert!(invoice.company.name.is_empty());
    }
}
