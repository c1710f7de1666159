use backoffice_docs::{
    Budget, Client, Company, Invoice, LaidOutDocument, LayoutSettings, LineItem, Locale, Page,
    Printable, Project, Receipt,
};
use chrono::NaiveDate;
use lopdf::Document;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn company() -> Company {
    Company {
        name: "ACME Serviços".into(),
        email: "financeiro@acme.com".into(),
        ..Default::default()
    }
}

fn budget(description_lines: usize, items: usize) -> Budget {
    let description = (1..=description_lines)
        .map(|i| format!("Etapa {} do escopo do projeto", i))
        .collect::<Vec<_>>()
        .join("\n");
    let mut budget = Budget::new("2026-031", date(15), company(), Client::new("Ana Souza"))
        .with_project(Project::new("Portal do cliente", description));
    for i in 1..=items {
        budget = budget.with_item(LineItem::new(format!("Item {:02}", i), 1.0, 100.0));
    }
    budget
}

fn layout(budget: &Budget) -> LaidOutDocument {
    budget
        .layout(&LayoutSettings::default(), Locale::PtBr)
        .unwrap()
}

fn first_item_row(page: &Page) -> Option<usize> {
    page.texts().position(|t| t.text.starts_with("Item "))
}

#[test_log::test]
fn test_growing_description_pushes_items_to_second_page() {
    let (doc, lines) = (1..80)
        .map(|n| (layout(&budget(n, 5)), n))
        .find(|(doc, _)| doc.pages.get(1).and_then(first_item_row).is_some())
        .expect("some description length pushes an item row to page 2");
    assert!(lines > 1);
    assert_eq!(doc.page_count(), 2);

    for page in &doc.pages {
        assert_eq!(page.position_of("ACME Serviços"), Some(0));
        assert!(page.contains_text("ORÇAMENTO Nº 2026-031 | financeiro@acme.com"));
    }

    let second = &doc.pages[1];
    let header = second.position_of("Descrição").expect("column header on page 2");
    let row = first_item_row(second).unwrap();
    assert!(header < row);
    assert!(second.contains_text("Página 2 / 2"));
    assert!(doc.pages[0].contains_text("Página 1 / 2"));
}

#[test_log::test]
fn test_long_table_reprints_header_once_per_page() {
    let doc = layout(&budget(1, 40));
    assert_eq!(doc.page_count(), 2);

    let headers: Vec<usize> = doc
        .pages
        .iter()
        .map(|p| p.texts().filter(|t| t.text == "Descrição").count())
        .collect();
    assert_eq!(headers, [1, 1]);

    let rows: usize = doc
        .pages
        .iter()
        .map(|p| p.texts().filter(|t| t.text.starts_with("Item ")).count())
        .sum();
    assert_eq!(rows, 40);
    assert!(doc.pages[1].contains_text("R$ 4.000,00"));
}

#[test_log::test]
fn test_rendered_pdf_matches_layout() {
    let budget = budget(1, 40);
    let bytes = budget
        .render_pdf(&LayoutSettings::default(), Locale::PtBr)
        .unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let loaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}

#[test_log::test]
fn test_invalid_budget_is_not_rendered() {
    let mut budget = budget(1, 0);
    budget.client.email = "not-an-email".into();
    let err = budget
        .render_pdf(&LayoutSettings::default(), Locale::PtBr)
        .unwrap_err();
    let fields: Vec<_> = err.issues().iter().map(|i| i.field.as_str()).collect();
    assert!(fields.contains(&"client.email"));
    assert!(fields.contains(&"items"));
}

#[test_log::test]
fn test_invoice_and_receipt_render_in_english() {
    let invoice = Invoice::new("F-7", date(1), date(31), company(), Client::new("Bob"))
        .with_item(LineItem::new("Hosting", 12.0, 25.0));
    let doc = invoice
        .layout(&LayoutSettings::default(), Locale::EnUs)
        .unwrap();
    assert_eq!(doc.page_count(), 1);
    assert!(doc.pages[0].contains_text("$300.00"));
    assert!(doc.pages[0].contains_text("Page 1 / 1"));

    let receipt = Receipt::new("R-1", date(2), company(), Client::new("Bob"))
        .with_item(LineItem::new("Hosting", 1.0, 25.0));
    let bytes = receipt
        .render_pdf(&LayoutSettings::default(), Locale::EnUs)
        .unwrap();
    assert_eq!(Document::load_mem(&bytes).unwrap().get_pages().len(), 1);
}
