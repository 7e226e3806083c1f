use env_logger::Env;

/// Send diagnostics to stderr. `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
