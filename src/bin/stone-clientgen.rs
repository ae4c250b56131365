use clap::Parser;
use stone_clientgen::interface::Cli;
use stone_clientgen::{GenerateConfig, GenerationDriver};

fn main() {
    let cli = Cli::parse();
    let config = GenerateConfig::from(&cli);

    if let Err(e) = GenerationDriver::new(config).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
