use clap::Parser;
use console::style;

use metadata_cleaner::app;
use metadata_cleaner::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(error) = app::run(cli) {
        eprintln!("{} {error}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
