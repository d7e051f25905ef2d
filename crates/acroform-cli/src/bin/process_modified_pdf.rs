use acroform_cli::cli::ProcessArgs;
use clap::Parser;

fn main() {
    let args = ProcessArgs::parse();
    acroform_cli::logging::init();

    if let Err(code) = acroform_cli::process_cmd::run(&args) {
        std::process::exit(code);
    }
}
