use indicatif::ProgressBar;
use log::{Log, Metadata, Record, SetLoggerError};

/// env_logger that hides the progress bar while a record is written, so log
/// lines and the bar don't end up on the same terminal row.
pub struct ProgressLogger {
    inner: env_logger::Logger,
    pb: ProgressBar,
}

impl ProgressLogger {
    pub fn new(inner: env_logger::Logger, pb: ProgressBar) -> Self {
        Self { inner, pb }
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.inner.matches(record) {
            self.pb.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the logger. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str, pb: ProgressBar) -> Result<(), SetLoggerError> {
    let inner = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .build();
    let max_level = inner.filter();
    log::set_boxed_logger(Box::new(ProgressLogger::new(inner, pb)))?;
    log::set_max_level(max_level);
    Ok(())
}
