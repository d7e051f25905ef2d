use acroform::{IdentityProcessor, run_post_submit};

use crate::cli::ProcessArgs;

pub fn run(args: &ProcessArgs) -> Result<(), i32> {
    if !args.input.is_file() {
        eprintln!("Error: input file not found: {}", args.input.display());
        return Err(1);
    }

    run_post_submit(
        &args.input,
        &args.output,
        args.document_key.as_deref(),
        &IdentityProcessor,
    )
    .map(|_| ())
    .map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}
