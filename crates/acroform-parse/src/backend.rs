//! Form backend trait.
//!
//! Defines the [`FormBackend`] trait that abstracts the PDF object library.
//! Everything above this seam works on [`FieldDescriptor`]s, patch records
//! and reports; only a backend touches PDF objects.

use acroform_core::{
    ApplyOptions, ApplyReport, ExtractResult, FieldDescriptor, FormError, ParsedPatches,
};

/// Trait abstracting the PDF object library.
///
/// # Associated Types
///
/// - `Document`: The parsed, mutable PDF object graph.
/// - `Error`: Backend-specific error type, convertible to [`FormError`].
///
/// # Usage
///
/// ```ignore
/// let mut doc = MyBackend::open(pdf_bytes)?;
/// let fields = MyBackend::extract_fields(&doc)?;
/// let report = MyBackend::apply_patches(&mut doc, &patches, &ApplyOptions::default())?;
/// let bytes = MyBackend::save(&mut doc)?;
/// ```
pub trait FormBackend {
    /// The parsed PDF document type.
    type Document;

    /// Backend-specific error type, convertible to [`FormError`].
    type Error: std::error::Error + Into<FormError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a usable PDF document.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Describe every widget annotation, page-major then in annotation
    /// array order.
    ///
    /// Malformed annotations are skipped with a warning.
    fn extract_fields(
        doc: &Self::Document,
    ) -> Result<ExtractResult<Vec<FieldDescriptor>>, Self::Error>;

    /// Names reachable from the AcroForm field list.
    fn field_names(doc: &Self::Document) -> Result<Vec<String>, Self::Error>;

    /// Apply a patch batch in place.
    ///
    /// # Errors
    ///
    /// Only structural failures of the document are errors; per-patch
    /// problems are reported in the returned [`ApplyReport`].
    fn apply_patches(
        doc: &mut Self::Document,
        patches: &ParsedPatches,
        options: &ApplyOptions,
    ) -> Result<ApplyReport, Self::Error>;

    /// Serialize the full object graph.
    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error>;
}
