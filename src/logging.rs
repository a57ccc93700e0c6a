use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// When `verbose` is `true`, gameplay debug messages (state transitions,
/// contacts, scene loads) are printed. Otherwise only info level and above
/// are shown. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Bevy's internals are chatty at debug level; keep them at warn unless
    // RUST_LOG asks otherwise.
    let default_filter = format!("warn,puffball={level}");
    let env = Env::default().default_filter_or(default_filter);
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
