//! Budgets (quotes)

use crate::blocks::Block;
use crate::document::Printable;
use crate::error::Result;
use crate::format::{format_currency, format_date, format_quantity, Label, Locale};
use crate::model::{item_columns, items_total, Client, Company, LineItem, Project};
use crate::validation::Validator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A priced proposal for a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub number: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub company: Company,
    pub client: Client,
    #[serde(default)]
    pub project: Project,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: String,
}

impl Budget {
    pub fn new(
        number: impl Into<String>,
        issue_date: NaiveDate,
        company: Company,
        client: Client,
    ) -> Self {
        Self {
            number: number.into(),
            issue_date,
            valid_until: None,
            company,
            client,
            project: Project::default(),
            items: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.project = project;
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
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

/// Client section shared by budgets and invoices
pub(crate) fn client_blocks(client: &Client, locale: Locale, blocks: &mut Vec<Block>) {
    blocks.push(Block::section(Label::Client.text(locale)));
    blocks.push(Block::field(Label::Name.text(locale), client.name.trim()));
    for (label, value) in [
        (Label::Email, &client.email),
        (Label::Phone, &client.phone),
        (Label::TaxId, &client.tax_id),
    ] {
        if !value.trim().is_empty() {
            blocks.push(Block::field(label.text(locale), value.trim()));
        }
    }
}

/// Item table followed by its total
pub(crate) fn item_blocks(items: &[LineItem], locale: Locale, blocks: &mut Vec<Block>) {
    blocks.push(Block::section(Label::Items.text(locale)));
    blocks.push(Block::table_header(item_columns(locale)));
    for item in items {
        blocks.push(Block::table_row([
            item.description.trim().to_string(),
            format_quantity(item.quantity, locale),
            format_currency(item.unit_price, locale),
            format_currency(item.total(), locale),
        ]));
    }
    blocks.push(Block::total(
        Label::Total.text(locale),
        format_currency(items_total(items), locale),
    ));
}

impl Printable for Budget {
    fn validate(&self) -> Result<()> {
        let mut v = Validator::new();
        v.require("number", &self.number);
        self.company.check(&mut v);
        self.client.check(&mut v);
        v.require("project.name", &self.project.name);
        if let Some(valid_until) = self.valid_until {
            if valid_until < self.issue_date {
                v.issue("valid_until", "cannot be before the issue date");
            }
        }
        v.items(&self.items);
        v.finish()
    }

    fn to_blocks(&self, locale: Locale) -> Vec<Block> {
        let mut blocks = vec![Block::header(
            self.company.name.trim(),
            format!(
                "{} {} {} | {}",
                Label::Budget.text(locale),
                Label::Number.text(locale),
                self.number.trim(),
                self.company.contact_line()
            )
            .trim_end_matches(" | ")
            .to_string(),
        )];

        blocks.push(Block::field(Label::IssueDate.text(locale), format_date(self.issue_date)));
        if let Some(valid_until) = self.valid_until {
            blocks.push(Block::field(Label::ValidUntil.text(locale), format_date(valid_until)));
        }
        blocks.push(Block::spacer(8.0));

        client_blocks(&self.client, locale, &mut blocks);
        blocks.push(Block::spacer(8.0));

        blocks.push(Block::section(Label::Project.text(locale)));
        blocks.push(Block::field(Label::Name.text(locale), self.project.name.trim()));
        if !self.project.description.trim().is_empty() {
            blocks.push(Block::paragraph(self.project.description.trim()));
        }
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
        format!("{} {}", Label::Budget.text(locale), self.number.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocumentError;

    fn budget() -> Budget {
        Budget::new(
            "2026-031",
            NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
            Company::new("ACME Serviços"),
            Client::new("Ana Souza").with_email("ana@example.com"),
        )
        .with_project(Project::new("Site institucional", "Novo site com blog."))
        .with_item(LineItem::new("Design", 1.0, 1234.5))
        .with_item(LineItem::new("Hospedagem", 12.0, 30.0))
    }

    #[test]
    fn test_blocks_order() {
        let blocks = budget().to_blocks(Locale::PtBr);
        assert_eq!(blocks[0], Block::header("ACME Serviços", "ORÇAMENTO Nº 2026-031"));
        assert!(blocks.contains(&Block::field("Data de emissão", "15/10/2026")));
        assert!(blocks.contains(&Block::field("E-mail", "ana@example.com")));
        assert!(blocks.contains(&Block::paragraph("Novo site com blog.")));
        assert!(blocks.contains(&Block::table_row(["Design", "1", "R$ 1.234,50", "R$ 1.234,50"])));
        assert_eq!(blocks.last(), Some(&Block::total("Total", "R$ 1.594,50")));
    }

    #[test]
    fn test_en_us_labels() {
        let blocks = budget().to_blocks(Locale::EnUs);
        assert_eq!(blocks[0], Block::header("ACME Serviços", "BUDGET No. 2026-031"));
        assert_eq!(blocks.last(), Some(&Block::total("Total", "$1,594.50")));
    }

    #[test]
    fn test_validation() {
        assert!(budget().validate().is_ok());

        let mut bad = budget();
        bad.items.clear();
        bad.client.email = "not-an-email".into();
        bad.valid_until = NaiveDate::from_ymd_opt(2026, 1, 1);
        let err = bad.validate().unwrap_err();
        let fields: Vec<_> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, ["client.email", "valid_until", "items"]);
        assert!(matches!(err, DocumentError::Validation { .. }));
    }

    #[test]
    fn test_invalid_budget_is_not_rendered() {
        let mut bad = budget();
        bad.number = String::new();
        assert!(bad.render_pdf(&Default::default(), Locale::PtBr).is_err());
    }
}
