//! lopdf-based form backend.
//!
//! Implements [`FormBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. Every save is a full rewrite of the object graph.

use acroform_core::{ApplyOptions, ApplyReport, ExtractResult, FieldDescriptor, ParsedPatches};
use tracing::debug;

use crate::backend::FormBackend;
use crate::error::BackendError;
use crate::{apply, extract};

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based form backend.
///
/// # Example
///
/// ```ignore
/// use acroform_parse::{FormBackend, LopdfBackend};
///
/// let doc = LopdfBackend::open(pdf_bytes)?;
/// let fields = LopdfBackend::extract_fields(&doc)?;
/// ```
pub struct LopdfBackend;

impl FormBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Parse(
                "encrypted PDFs are not supported".to_string(),
            ));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();
        debug!(pages = page_ids.len(), bytes = bytes.len(), "opened PDF");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn extract_fields(
        doc: &Self::Document,
    ) -> Result<ExtractResult<Vec<FieldDescriptor>>, Self::Error> {
        Ok(extract::extract_fields(&doc.inner, &doc.page_ids))
    }

    fn field_names(doc: &Self::Document) -> Result<Vec<String>, Self::Error> {
        Ok(extract::acroform_field_names(&doc.inner))
    }

    fn apply_patches(
        doc: &mut Self::Document,
        patches: &ParsedPatches,
        options: &ApplyOptions,
    ) -> Result<ApplyReport, Self::Error> {
        apply::apply_patches(&mut doc.inner, &doc.page_ids, patches, options)
    }

    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error> {
        let mut buf = Vec::new();
        doc.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Serialize(e.to_string()))?;
        Ok(buf)
    }
}
