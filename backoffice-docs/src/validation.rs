//! Input validation run before any layout

use crate::error::{DocumentError, FieldIssue, Result};
use crate::model::LineItem;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
});

/// Whether `value` looks like `local@domain.tld`
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Collects every failed rule so a form can show them all at once
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue::new(field, message));
    }

    /// Non-blank text
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.issue(field, "is required");
        }
    }

    /// Blank is accepted; anything else must look like an email
    pub fn optional_email(&mut self, field: &str, value: &str) {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.issue(field, "is not a valid email address");
        }
    }

    /// Finite and zero or more
    pub fn non_negative(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value < 0.0 {
            self.issue(field, "cannot be negative");
        }
    }

    /// At least one item; each with a description, positive quantity and
    /// non-negative unit price
    pub fn items(&mut self, items: &[LineItem]) {
        if items.is_empty() {
            self.issue("items", "at least one item is required");
        }
        for (i, item) in items.iter().enumerate() {
            self.require(&format!("items[{}].description", i), &item.description);
            if !item.quantity.is_finite() || item.quantity <= 0.0 {
                self.issue(format!("items[{}].quantity", i), "must be greater than zero");
            }
            self.non_negative(&format!("items[{}].unit_price", i), item.unit_price);
        }
    }

    pub fn finish(self) -> Result<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(DocumentError::Validation {
                issues: self.issues,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email(" ana.souza@empresa.com.br "));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert_eq!(Lazy::force(&EMAIL).as_str(), r"^[^\s@]+@[^\s@]+\.[^\s@]+$");
    }

    #[test]
    fn test_collects_all_issues() {
        let mut v = Validator::new();
        v.require("client.name", "  ");
        v.optional_email("client.email", "");
        v.items(&[
            LineItem::new("", 0.0, 10.0),
            LineItem::new("Ok", 1.0, -1.0),
        ]);
        let err = v.finish().unwrap_err();
        let fields: Vec<_> = err.issues().iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "client.name",
                "items[0].description",
                "items[0].quantity",
                "items[1].unit_price"
            ]
        );
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut v = Validator::new();
        v.items(&[]);
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_clean_input_passes() {
        let mut v = Validator::new();
        v.require("number", "42");
        v.items(&[LineItem::new("Design", 1.0, 0.0)]);
        assert!(v.finish().is_ok());
    }
}
