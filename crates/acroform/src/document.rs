use acroform_core::{
    ApplyOptions, ApplyReport, ExtractOptions, ExtractResult, FieldDescriptor, FormError,
    ParsedPatches, check_input_size, parse_patch_list,
};
use acroform_parse::{FormBackend, LopdfBackend, LopdfDocument};
use tracing::debug;

/// A PDF document opened for form inspection and patching.
///
/// Wraps the parsed object graph; every query reads the live graph, so
/// results reflect any patches applied since opening.
///
/// # Example
///
/// ```ignore
/// let mut doc = FormDocument::open(bytes, None)?;
/// let fields = doc.fields()?;
/// let report = doc.apply_json(r#"[{"fieldId":"p1-0","defaultValue":"x"}]"#, &ApplyOptions::default())?;
/// let output = doc.save_to_bytes()?;
/// ```
pub struct FormDocument {
    doc: LopdfDocument,
}

impl FormDocument {
    /// Open a PDF document from a file path.
    ///
    /// Reads the file into memory and delegates to [`FormDocument::open`].
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if the file cannot be read or is not a valid PDF.
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<ExtractOptions>,
    ) -> Result<Self, FormError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| {
            FormError::IoError(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::open(&bytes, options)
    }

    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ResourceLimitExceeded`] if the input is larger
    /// than `max_input_bytes`, and [`FormError::ParseError`] if the bytes
    /// are not a usable PDF document.
    pub fn open(bytes: &[u8], options: Option<ExtractOptions>) -> Result<Self, FormError> {
        let options = options.unwrap_or_default();
        check_input_size(bytes.len(), options.max_input_bytes)?;
        let doc = LopdfBackend::open(bytes).map_err(FormError::from)?;
        Ok(Self { doc })
    }

    /// Return the number of pages in the document.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// Describe every widget annotation, page-major then in annotation
    /// order, with the warnings for any widget that had to be skipped.
    pub fn fields(&self) -> Result<ExtractResult<Vec<FieldDescriptor>>, FormError> {
        LopdfBackend::extract_fields(&self.doc).map_err(FormError::from)
    }

    /// Names reachable from the AcroForm field list.
    ///
    /// A hidden widget is removed from its page but its field stays listed
    /// here.
    pub fn field_names(&self) -> Result<Vec<String>, FormError> {
        LopdfBackend::field_names(&self.doc).map_err(FormError::from)
    }

    /// Value of the first widget whose trimmed field name is `name`.
    ///
    /// Returns `None` when no widget carries that name.
    pub fn field_value(&self, name: &str) -> Result<Option<String>, FormError> {
        let name = name.trim();
        Ok(self
            .fields()?
            .value
            .into_iter()
            .find(|field| field.field_name.trim() == name)
            .map(|field| field.value))
    }

    /// Apply a parsed patch batch in place.
    ///
    /// # Errors
    ///
    /// Only a structurally unusable document is an error. Unmatched records,
    /// skipped creations and failed appearances are listed in the report.
    pub fn apply(
        &mut self,
        patches: &ParsedPatches,
        options: &ApplyOptions,
    ) -> Result<ApplyReport, FormError> {
        debug!(records = patches.records.len(), total = patches.total, "applying patch batch");
        LopdfBackend::apply_patches(&mut self.doc, patches, options).map_err(FormError::from)
    }

    /// Parse a JSON patch list and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::PatchListError`] if `json` is not valid JSON.
    pub fn apply_json(
        &mut self,
        json: &str,
        options: &ApplyOptions,
    ) -> Result<ApplyReport, FormError> {
        let patches = parse_patch_list(json)?;
        self.apply(&patches, options)
    }

    /// Serialize the whole object graph.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, FormError> {
        LopdfBackend::save(&mut self.doc).map_err(FormError::from)
    }

    /// Access the backend document.
    pub fn backend_document(&self) -> &LopdfDocument {
        &self.doc
    }
}

impl std::fmt::Debug for FormDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDocument")
            .field("page_count", &self.page_count())
            .finish_non_exhaustive()
    }
}
