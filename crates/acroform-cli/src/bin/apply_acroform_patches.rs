use acroform_cli::cli::ApplyArgs;
use clap::Parser;

fn main() {
    let args = ApplyArgs::parse();
    acroform_cli::logging::init();

    if let Err(code) = acroform_cli::apply_cmd::run(&args) {
        std::process::exit(code);
    }
}
