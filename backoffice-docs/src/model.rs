//! Shared document parts: issuer, client, project, line items

use crate::format::{Label, Locale};
use crate::validation::Validator;
use serde::{Deserialize, Serialize};

/// The business issuing the document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
    pub address: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Contact line under the header, e.g. `contato@acme.com | (11) 5555-0000`
    pub fn contact_line(&self) -> String {
        [&self.tax_id, &self.email, &self.phone, &self.address]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub(crate) fn check(&self, v: &mut Validator) {
        v.require("company.name", &self.name);
        v.optional_email("company.email", &self.email);
    }
}

/// Client contact data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tax_id: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub(crate) fn check(&self, v: &mut Validator) {
        v.require("client.name", &self.name);
        v.optional_email("client.email", &self.email);
    }
}

/// Project a budget or invoice refers to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
}

impl Project {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One billed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Sum of all line totals
pub fn items_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::total).sum()
}

/// How a receipt was paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Pix,
    CreditCard,
    DebitCard,
    BankTransfer,
    Check,
}

impl PaymentMethod {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Cash, Locale::PtBr) => "Dinheiro",
            (Self::Cash, Locale::EnUs) => "Cash",
            (Self::Pix, _) => "Pix",
            (Self::CreditCard, Locale::PtBr) => "Cartão de crédito",
            (Self::CreditCard, Locale::EnUs) => "Credit card",
            (Self::DebitCard, Locale::PtBr) => "Cartão de débito",
            (Self::DebitCard, Locale::EnUs) => "Debit card",
            (Self::BankTransfer, Locale::PtBr) => "Transferência bancária",
            (Self::BankTransfer, Locale::EnUs) => "Bank transfer",
            (Self::Check, Locale::PtBr) => "Cheque",
            (Self::Check, Locale::EnUs) => "Check",
        }
    }
}

/// Column layout shared by every item table
pub(crate) fn item_columns(locale: Locale) -> Vec<crate::blocks::TableColumn> {
    use crate::blocks::TableColumn;
    vec![
        TableColumn::new(Label::Description.text(locale), 5.0),
        TableColumn::new(Label::Quantity.text(locale), 1.0).right(),
        TableColumn::new(Label::UnitPrice.text(locale), 2.0).right(),
        TableColumn::new(Label::Total.text(locale), 2.0).right(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals() {
        let items = vec![LineItem::new("Design", 2.0, 150.0), LineItem::new("Hosting", 12.0, 29.9)];
        assert_eq!(items[0].total(), 300.0);
        assert!((items_total(&items) - 658.8).abs() < 1e-9);
    }

    #[test]
    fn test_contact_line_skips_blanks() {
        let company = Company {
            name: "ACME".into(),
            email: "contato@acme.com".into(),
            phone: " ".into(),
            tax_id: "12.345.678/0001-90".into(),
            address: String::new(),
        };
        assert_eq!(company.contact_line(), "12.345.678/0001-90 | contato@acme.com");
    }

    #[test]
    fn test_payment_method_serde() {
        let m: PaymentMethod = serde_json::from_str("\"credit_card\"").unwrap();
        assert_eq!(m, PaymentMethod::CreditCard);
        assert_eq!(m.label(Locale::PtBr), "Cartão de crédito");
    }
}
