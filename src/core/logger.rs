use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Mutex, RwLock};
use log::{
    LevelFilter,
    Metadata,
    Record
};

use crate::core::Result;

enum Sink {
    Stdout,
    File(Mutex<File>),
}

static MY_LOGGER: MyLogger = MyLogger;
static SINK: RwLock<Option<Sink>> = RwLock::new(None);

struct MyLogger;
impl log::Log for MyLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let sink = SINK.read().unwrap_or_else(|e| e.into_inner());
        let line = format!(
            "[{}] [{}] {}",
            record.target(),
            record.level(),
            record.args()
        );

        match sink.as_ref() {
            Some(Sink::Stdout) => println!("{}", line),
            Some(Sink::File(file)) => {
                let mut file = file.lock().unwrap_or_else(|e| e.into_inner());
                _ = writeln!(file, "{}", line);
            }
            None => {}
        }
    }

    fn flush(&self) {
        let sink = SINK.read().unwrap_or_else(|e| e.into_inner());
        match sink.as_ref() {
            Some(Sink::Stdout) => {
                _ = io::stdout().flush();
            }
            Some(Sink::File(file)) => {
                _ = file.lock().unwrap_or_else(|e| e.into_inner()).flush();
            }
            None => {}
        }
    }
}

/// Installs the process-wide logger. Records go to `file` when given,
/// otherwise to stdout.
pub fn setup(level: LevelFilter, file: Option<&str>) -> Result<()> {
    let sink = match file {
        Some(path) => Sink::File(Mutex::new(
            OpenOptions::new().create(true).append(true).open(path)?
        )),
        None => Sink::Stdout,
    };

    *SINK.write().unwrap_or_else(|e| e.into_inner()) = Some(sink);
    _ = log::set_logger(&MY_LOGGER);
    log::set_max_level(level);
    Ok(())
}

pub fn teardown() {
    log::logger().flush();
    *SINK.write().unwrap_or_else(|e| e.into_inner()) = None;
    log::set_max_level(LevelFilter::Off);
}
