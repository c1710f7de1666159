//! Locale-aware number, currency, date and label formatting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt_BR", alias = "pt-br")]
    PtBr,
    #[serde(rename = "en-US", alias = "en_US", alias = "en-us")]
    EnUs,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::EnUs => "en-US",
        }
    }

    /// (thousands, decimal) separators
    fn separators(&self) -> (char, char) {
        match self {
            Self::PtBr => ('.', ','),
            Self::EnUs => (',', '.'),
        }
    }

    pub fn currency_symbol(&self) -> &'static str {
        match self {
            Self::PtBr => "R$",
            Self::EnUs => "$",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "pt-br" | "pt" => Ok(Self::PtBr),
            "en-us" | "en" => Ok(Self::EnUs),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

/// Format an amount with exactly two decimals and the locale's separators.
///
/// `1234.5` is `1.234,50` in pt-BR and `1,234.50` in en-US.
pub fn format_amount(value: f64, locale: Locale) -> String {
    let (thousands, decimal) = locale.separators();
    let cents = (value * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(digit);
    }

    format!(
        "{}{}{}{:02}",
        if negative { "-" } else { "" },
        grouped,
        decimal,
        fraction
    )
}

/// Amount with the locale's currency symbol: `R$ 1.234,50`, `$1,234.50`
pub fn format_currency(value: f64, locale: Locale) -> String {
    let amount = format_amount(value.abs(), locale);
    let sign = if (value * 100.0).round() < 0.0 { "-" } else { "" };
    match locale {
        Locale::PtBr => format!("{}{} {}", sign, locale.currency_symbol(), amount),
        Locale::EnUs => format!("{}{}{}", sign, locale.currency_symbol(), amount),
    }
}

/// Quantities drop a zero fraction: `3`, `2,5` / `2.5`
pub fn format_quantity(value: f64, locale: Locale) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let (_, decimal) = locale.separators();
        let text = format!("{:.2}", value);
        text.trim_end_matches('0')
            .trim_end_matches('.')
            .replace('.', &decimal.to_string())
    }
}

/// Day/month/year in every locale
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Fixed strings printed on documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Budget,
    Invoice,
    Receipt,
    Number,
    IssueDate,
    ValidUntil,
    DueDate,
    Client,
    Name,
    Email,
    Phone,
    TaxId,
    Project,
    Items,
    Description,
    Quantity,
    UnitPrice,
    Total,
    Notes,
    PaymentMethod,
    AmountReceived,
    Change,
    Page,
}

impl Label {
    pub fn text(self, locale: Locale) -> &'static str {
        use Label::*;
        match locale {
            Locale::PtBr => match self {
                Budget => "ORÇAMENTO",
                Invoice => "FATURA",
                Receipt => "RECIBO",
                Number => "Nº",
                IssueDate => "Data de emissão",
                ValidUntil => "Válido até",
                DueDate => "Vencimento",
                Client => "Cliente",
                Name => "Nome",
                Email => "E-mail",
                Phone => "Telefone",
                TaxId => "CPF/CNPJ",
                Project => "Projeto",
                Items => "Itens",
                Description => "Descrição",
                Quantity => "Qtd",
                UnitPrice => "Valor unit.",
                Total => "Total",
                Notes => "Observações",
                PaymentMethod => "Forma de pagamento",
                AmountReceived => "Valor recebido",
                Change => "Troco",
                Page => "Página",
            },
            Locale::EnUs => match self {
                Budget => "BUDGET",
                Invoice => "INVOICE",
                Receipt => "RECEIPT",
                Number => "No.",
                IssueDate => "Issue date",
                ValidUntil => "Valid until",
                DueDate => "Due date",
                Client => "Client",
                Name => "Name",
                Email => "Email",
                Phone => "Phone",
                TaxId => "Tax ID",
                Project => "Project",
                Items => "Items",
                Description => "Description",
                Quantity => "Qty",
                UnitPrice => "Unit price",
                Total => "Total",
                Notes => "Notes",
                PaymentMethod => "Payment method",
                AmountReceived => "Amount received",
                Change => "Change",
                Page => "Page",
            },
        }
    }
}

/// Footer text: `Página 2 / 3`
pub fn page_label(locale: Locale, page: usize, total: usize) -> String {
    format!("{} {} / {}", Label::Page.text(locale), page, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_separators() {
        assert_eq!(format_amount(1234.5, Locale::PtBr), "1.234,50");
        assert_eq!(format_amount(1234.5, Locale::EnUs), "1,234.50");
        assert_eq!(format_amount(0.0, Locale::PtBr), "0,00");
        assert_eq!(format_amount(999.999, Locale::EnUs), "1,000.00");
        assert_eq!(format_amount(1234567.891, Locale::PtBr), "1.234.567,89");
        assert_eq!(format_amount(-42.1, Locale::EnUs), "-42.10");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(format_currency(1234.5, Locale::PtBr), "R$ 1.234,50");
        assert_eq!(format_currency(1234.5, Locale::EnUs), "$1,234.50");
        assert_eq!(format_currency(-5.0, Locale::EnUs), "-$5.00");
    }

    #[test]
    fn test_quantity() {
        assert_eq!(format_quantity(3.0, Locale::PtBr), "3");
        assert_eq!(format_quantity(2.5, Locale::PtBr), "2,5");
        assert_eq!(format_quantity(2.25, Locale::EnUs), "2.25");
    }

    #[test]
    fn test_date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(date), "07/03/2026");
    }

    #[test]
    fn test_locale_parse_and_serde() {
        assert_eq!("pt_BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert_eq!("EN-us".parse::<Locale>().unwrap(), Locale::EnUs);
        assert!("fr-FR".parse::<Locale>().is_err());

        let json = serde_json::to_string(&Locale::EnUs).unwrap();
        assert_eq!(json, "\"en-US\"");
        let back: Locale = serde_json::from_str("\"pt-BR\"").unwrap();
        assert_eq!(back, Locale::PtBr);
    }

    #[test]
    fn test_page_label() {
        assert_eq!(page_label(Locale::PtBr, 2, 3), "Página 2 / 3");
        assert_eq!(page_label(Locale::EnUs, 1, 1), "Page 1 / 1");
    }
}
