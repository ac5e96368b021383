use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` sink that writes to the browser console, one line per record,
/// prefixed with the record's target (the view or component that logged it).
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_record(record);
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_is_tagged_with_target() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("loaded {} donors", 12))
                .target("donors")
                .level(Level::Info)
                .build(),
        );
        assert_eq!(line, "[donors] loaded 12 donors");
    }
}
