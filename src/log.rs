use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global logger writing to stderr. Subsequent calls are ignored, so tests may
/// invoke this function as often as they like.
pub fn build_pace_logger_for_level(level: LevelFilter) {
    INIT.call_once(|| {
        let mut builder = Builder::from_env(Env::default());
        builder
            .filter_level(level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "c {:<5} [{}] {}",
                    record.level(),
                    record.module_path().unwrap_or("-"),
                    record.args()
                )
            })
            .is_test(cfg!(test));

        // another crate (or test harness) may have installed a logger already
        let _ = builder.try_init();
    });
}

/// Raises `base` by one level per occurrence of `-v`
pub fn build_pace_logger_for_verbosity(base: LevelFilter, verbosity: usize) {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base_index = levels.iter().position(|&l| l == base).unwrap_or(2);
    let level = levels[(base_index + verbosity).min(levels.len() - 1)];
    build_pace_logger_for_level(level);
}
