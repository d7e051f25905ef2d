use std::path::PathBuf;

use clap::Parser;

/// Print the AcroForm widgets of a PDF as a JSON array.
#[derive(Debug, Parser)]
#[command(name = "extract-acroform-fields", about, version)]
pub struct ExtractArgs {
    /// Path to the PDF file
    #[arg(value_name = "FILE", required_unless_present = "stdin", conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read base64-encoded PDF bytes from standard input
    #[arg(long)]
    pub stdin: bool,
}

/// Apply a JSON patch list to a PDF and write the result to stdout.
#[derive(Debug, Parser)]
#[command(name = "apply-acroform-patches", about, version)]
pub struct ApplyArgs {
    /// Path to the input PDF
    #[arg(long, value_name = "PATH")]
    pub pdf: PathBuf,

    /// Path to a JSON array of patch records
    #[arg(long, value_name = "PATH")]
    pub patches: PathBuf,

    /// Validate only: print a JSON verdict instead of PDF bytes
    #[arg(long)]
    pub dry_run: bool,

    /// Do not rebuild appearance streams for patched values
    #[arg(long)]
    pub no_appearances: bool,
}

/// Post-process a submitted PDF into an output file.
#[derive(Debug, Parser)]
#[command(name = "process-modified-pdf", about, version)]
pub struct ProcessArgs {
    /// Path to the submitted PDF
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Path of the file to write
    #[arg(long, value_name = "PATH")]
    pub output: PathBuf,

    /// Opaque document key, used for log correlation only
    #[arg(long)]
    pub document_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_accepts_file_or_stdin() {
        let args = ExtractArgs::try_parse_from(["extract-acroform-fields", "form.pdf"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("form.pdf")));
        assert!(!args.stdin);

        let args = ExtractArgs::try_parse_from(["extract-acroform-fields", "--stdin"]).unwrap();
        assert!(args.stdin);
        assert!(args.file.is_none());
    }

    #[test]
    fn extract_requires_exactly_one_source() {
        assert!(ExtractArgs::try_parse_from(["extract-acroform-fields"]).is_err());
        assert!(
            ExtractArgs::try_parse_from(["extract-acroform-fields", "a.pdf", "--stdin"]).is_err()
        );
    }

    #[test]
    fn apply_requires_pdf_and_patches() {
        assert!(ApplyArgs::try_parse_from(["apply-acroform-patches", "--pdf", "a.pdf"]).is_err());
        let args = ApplyArgs::try_parse_from([
            "apply-acroform-patches",
            "--pdf",
            "a.pdf",
            "--patches",
            "p.json",
            "--dry-run",
        ])
        .unwrap();
        assert!(args.dry_run);
        assert!(!args.no_appearances);
    }

    #[test]
    fn process_document_key_is_optional() {
        let args = ProcessArgs::try_parse_from([
            "process-modified-pdf",
            "--input",
            "in.pdf",
            "--output",
            "out.pdf",
        ])
        .unwrap();
        assert!(args.document_key.is_none());
    }
}
