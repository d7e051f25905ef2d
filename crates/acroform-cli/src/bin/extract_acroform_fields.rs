use acroform_cli::cli::ExtractArgs;
use clap::Parser;

fn main() {
    let args = ExtractArgs::parse();
    acroform_cli::logging::init();

    if let Err(code) = acroform_cli::extract_cmd::run(&args) {
        std::process::exit(code);
    }
}
