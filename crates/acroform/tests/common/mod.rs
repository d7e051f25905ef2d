//! Fixture PDFs for facade integration tests.

#![allow(dead_code)]

use lopdf::{Document, Object, StringFormat, dictionary};

/// A PDF with `page_count` blank Letter pages and no AcroForm.
pub fn blank_pdf(page_count: usize) -> Vec<u8> {
    pdf_with_widgets(page_count, &[])
}

/// A PDF whose first page carries one text widget per `(name, rect)`, all
/// listed in the AcroForm, followed by `page_count - 1` blank pages.
pub fn pdf_with_widgets(page_count: usize, widgets: &[(&str, [i64; 4])]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    let mut fields: Vec<Object> = Vec::new();
    for page_index in 0..page_count {
        let page_id = doc.new_object_id();
        let mut annots: Vec<Object> = Vec::new();
        if page_index == 0 {
            for (name, rect) in widgets {
                let widget_id = doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Widget",
                    "FT" => "Tx",
                    "T" => Object::String(name.as_bytes().to_vec(), StringFormat::Literal),
                    "Rect" => rect.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
                    "P" => page_id,
                });
                annots.push(widget_id.into());
                fields.push(widget_id.into());
            }
        }
        doc.objects.insert(
            page_id,
            Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Annots" => annots,
            }),
        );
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if !widgets.is_empty() {
        catalog.set("AcroForm", dictionary! { "Fields" => fields });
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// Number of `/Annots` entries on 1-based `page`.
pub fn annot_count(bytes: &[u8], page: u32) -> usize {
    let doc = Document::load_mem(bytes).expect("output must reopen");
    let page_id = doc.get_pages()[&page];
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    match page.get(b"Annots") {
        Ok(Object::Array(items)) => items.len(),
        Ok(Object::Reference(id)) => doc.get_object(*id).unwrap().as_array().unwrap().len(),
        _ => 0,
    }
}
