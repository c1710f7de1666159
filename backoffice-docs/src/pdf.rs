//! PDF serialization of a laid-out document.
//!
//! Output uses the standard Courier and Courier-Bold base fonts with
//! WinAnsi encoding, so no font program is embedded and the widths the
//! layout engine measured are the widths a viewer draws.

use crate::error::Result;
use crate::layout::{Element, FontStyle, LaidOutDocument, Page};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Encode text for a WinAnsi font; unmappable characters become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn page_content(page: &Page, height: f32) -> Content {
    let mut operations = Vec::new();
    for element in &page.elements {
        match element {
            Element::Text(text) => {
                let font = match text.style {
                    FontStyle::Regular => REGULAR_FONT,
                    FontStyle::Bold => BOLD_FONT,
                };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), text.size.into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![text.x.into(), (height - text.y).into()],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(&text.text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            Element::Rule(rule) => {
                let y = height - rule.y;
                operations.push(Operation::new("w", vec![rule.thickness.into()]));
                operations.push(Operation::new("m", vec![rule.x1.into(), y.into()]));
                operations.push(Operation::new("l", vec![rule.x2.into(), y.into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }
    Content { operations }
}

fn base_font(doc: &mut Document, name: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => name,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Serialize `document` as one PDF, optionally titled
pub fn render_pdf(document: &LaidOutDocument, title: Option<&str>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = base_font(&mut doc, "Courier");
    let bold = base_font(&mut doc, "Courier-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular,
            BOLD_FONT => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = page_content(page, document.height).encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        document.width.into(),
        document.height.into(),
    ];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::string_literal("backoffice-docs"),
    };
    if let Some(title) = title {
        info.set("Title", Object::String(encode_win_ansi(title), StringFormat::Literal));
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    debug!(pages = count, bytes = bytes.len(), "rendered PDF");
    Ok(bytes)
}
