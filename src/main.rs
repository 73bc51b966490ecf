use clap::Parser;
use redsona::cli::Config;

fn main() {
    let config = Config::parse();
    redsona::cli::run(config)
}
