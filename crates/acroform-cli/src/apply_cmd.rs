use std::io::Write;

use acroform::{ApplyOptions, DryRunOutcome, apply_patches, dry_run, parse_patch_list};
use tracing::info;

use crate::cli::ApplyArgs;
use crate::shared::{read_file, read_text};

pub fn run(args: &ApplyArgs) -> Result<(), i32> {
    let options = ApplyOptions {
        regenerate_appearances: !args.no_appearances,
        ..ApplyOptions::default()
    };
    if args.dry_run {
        run_dry(args, &options);
        return Ok(());
    }

    let pdf = read_file(&args.pdf).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    let patches = read_text(&args.patches).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let applied = apply_patches(&pdf, &patches, &options).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    for warning in &applied.report.warnings {
        info!(%warning, "patch not fully applied");
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&applied.bytes)
        .and_then(|()| stdout.flush())
        .map_err(|e| {
            eprintln!("Error: failed to write output: {e}");
            1
        })?;
    eprintln!("{}", applied.report.summary_line(applied.bytes.len()));
    Ok(())
}

/// Print the dry-run verdict. Input failures are part of the verdict, not
/// the exit code.
fn run_dry(args: &ApplyArgs, options: &ApplyOptions) {
    let outcome = match read_text(&args.patches) {
        Err(error) => DryRunOutcome::Failure {
            error,
            patches_count: 0,
        },
        Ok(patches) => match read_file(&args.pdf) {
            Ok(pdf) => dry_run(&pdf, &patches, options),
            Err(error) => DryRunOutcome::Failure {
                error,
                patches_count: parse_patch_list(&patches).map_or(0, |p| p.total),
            },
        },
    };
    println!("{}", outcome.to_json());
}
