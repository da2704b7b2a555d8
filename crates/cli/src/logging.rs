use log::LevelFilter;

/// Initialize logging for the CLI.
/// Should be called once at the start of main(). `RUST_LOG` still applies on
/// top of the chosen default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}
