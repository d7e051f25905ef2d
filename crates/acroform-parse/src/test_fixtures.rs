//! Small in-memory PDFs for backend tests.

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};

/// One annotation to place on a test page.
pub(crate) struct Annot {
    subtype: &'static str,
    name: String,
    rect: Option<[f64; 4]>,
    parent: Option<(String, String)>,
    value: Option<String>,
    da: Option<String>,
    max_len: Option<Object>,
    flags: Option<i64>,
}

impl Annot {
    /// A widget with `/T name` (omitted when empty) and `/FT /Tx`.
    pub(crate) fn widget(name: &str, rect: [f64; 4]) -> Self {
        Self {
            subtype: "Widget",
            name: name.to_string(),
            rect: Some(rect),
            parent: None,
            value: None,
            da: None,
            max_len: None,
            flags: None,
        }
    }

    pub(crate) fn link(rect: [f64; 4]) -> Self {
        Self {
            subtype: "Link",
            ..Self::widget("", rect)
        }
    }

    /// Hang the widget off a parent field carrying `/T` and `/FT`.
    pub(crate) fn with_parent(mut self, name: &str, field_type: &str) -> Self {
        self.parent = Some((name.to_string(), field_type.to_string()));
        self
    }

    /// `/V`, on the parent when there is one.
    pub(crate) fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub(crate) fn with_da(mut self, da: &str) -> Self {
        self.da = Some(da.to_string());
        self
    }

    /// `/MaxLen`, on the parent when there is one.
    pub(crate) fn with_max_len(mut self, max_len: Object) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub(crate) fn with_flags(mut self, flags: i64) -> Self {
        self.flags = Some(flags);
        self
    }

    pub(crate) fn without_rect(mut self) -> Self {
        self.rect = None;
        self
    }
}

fn literal(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

fn rect_array(rect: [f64; 4]) -> Object {
    Object::Array(rect.iter().map(|&v| Object::Real(v as f32)).collect())
}

/// Build a PDF with one page per entry of `pages` and an AcroForm listing
/// every widget's field.
pub(crate) fn build_pdf(pages: &[Vec<Annot>]) -> Vec<u8> {
    build(pages, true)
}

/// Build a PDF with `page_count` empty pages and no `/AcroForm`.
pub(crate) fn build_pdf_without_acroform(page_count: usize) -> Vec<u8> {
    let pages: Vec<Vec<Annot>> = (0..page_count).map(|_| Vec::new()).collect();
    build(&pages, false)
}

fn build(pages: &[Vec<Annot>], with_acroform: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();
    let mut fields = Vec::new();

    for annots in pages {
        let page_id = doc.new_object_id();
        let mut refs = Vec::new();
        for annot in annots {
            let mut widget = dictionary! {
                "Type" => "Annot",
                "Subtype" => annot.subtype,
                "P" => page_id,
            };
            if let Some(rect) = annot.rect {
                widget.set("Rect", rect_array(rect));
            }
            if let Some(da) = &annot.da {
                widget.set("DA", literal(da));
            }
            if let Some(flags) = annot.flags {
                widget.set("F", flags);
            }

            let mut field_attrs = Dictionary::new();
            if let Some(value) = &annot.value {
                field_attrs.set("V", literal(value));
            }
            if let Some(max_len) = &annot.max_len {
                field_attrs.set("MaxLen", max_len.clone());
            }

            let widget_id = doc.new_object_id();
            match &annot.parent {
                Some((name, field_type)) => {
                    let mut parent = dictionary! {
                        "T" => literal(name),
                        "FT" => field_type.as_str(),
                        "Kids" => vec![Object::Reference(widget_id)],
                    };
                    for (key, value) in field_attrs.iter() {
                        parent.set(key.clone(), value.clone());
                    }
                    let parent_id = doc.add_object(parent);
                    widget.set("Parent", parent_id);
                    fields.push(Object::Reference(parent_id));
                }
                None => {
                    if annot.subtype == "Widget" {
                        if !annot.name.is_empty() {
                            widget.set("T", literal(&annot.name));
                        }
                        widget.set("FT", "Tx");
                        for (key, value) in field_attrs.iter() {
                            widget.set(key.clone(), value.clone());
                        }
                        fields.push(Object::Reference(widget_id));
                    }
                }
            }
            doc.objects.insert(widget_id, Object::Dictionary(widget));
            refs.push(Object::Reference(widget_id));
        }

        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => refs,
        };
        doc.objects.insert(page_id, Object::Dictionary(page));
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if with_acroform {
        let acro_id = doc.add_object(dictionary! { "Fields" => fields });
        catalog.set("AcroForm", acro_id);
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Number of entries in a page's `/Annots` array.
pub(crate) fn annot_count(doc: &Document, page: u32) -> usize {
    page_id(doc, page)
        .and_then(|id| crate::objects::page_annots(doc, id))
        .map_or(0, |annots| annots.len())
}

/// Widget `index` on `page` and its parent field, cloned out of the document.
pub(crate) fn widget_and_parent(
    doc: &Document,
    page: u32,
    index: usize,
) -> (Dictionary, Option<Dictionary>) {
    let annots = page_id(doc, page)
        .and_then(|id| crate::objects::page_annots(doc, id))
        .unwrap();
    let widget = crate::objects::dict_of(doc, &annots[index]).unwrap().clone();
    let parent = crate::objects::parent_dict(doc, &widget).cloned();
    (widget, parent)
}

fn page_id(doc: &Document, page: u32) -> Option<ObjectId> {
    doc.get_pages().get(&page).copied()
}
