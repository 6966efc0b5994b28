use env_logger::Builder;
use log::LevelFilter;

/// Initialize logging for the server binary. `RUST_LOG` takes precedence in
/// `main`; this covers the default path.
pub fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
