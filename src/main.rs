use env_logger::{Builder, Env};
use log::error;

fn init_logger() {
    // Level comes from RUST_LOG, default info.
    // Example: RUST_LOG=debug canopy ls --path ./ns
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = Canopy::cli::run() {
        // Log the error and exit with code 1.
        error!("{:?}", e);
        std::process::exit(1);
    }
}
