use std::sync::Mutex;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::erx::{smp, Erx, Layouted, PreL4, ResultEX};

/// Discard is a writer that discards all data written to it.
struct Discard;

impl std::io::Write for Discard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

static LOG_WORKER_GUARD: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());

/// install the global subscriber from `Settings.log`
/// calling it again after a successful install is a no-op
pub fn logging_initialize() -> ResultEX {
    let mut installed = LOG_WORKER_GUARD.lock().map_err(smp)?;
    if !installed.is_empty() {
        return Ok(());
    }

    let (app_name, log_conf) = {
        let settings = crate::conf::settings_object().read().map_err(smp)?;
        (settings.name.clone(), settings.log.clone().unwrap_or_default())
    };

    let (nonblocking, guard) = tracing_appender::non_blocking(Discard {});
    let mut guards: Vec<WorkerGuard> = vec![guard];

    let (console, console_reload) =
        tracing_subscriber::reload::Layer::new(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(nonblocking.clone()));

    let (persist, persist_reload) =
        tracing_subscriber::reload::Layer::new(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(nonblocking.clone()));

    if log_conf.console {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);
        console_reload.reload(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(true)).map_err(smp)?;
    }

    let logs_dir = log_conf.dirs.trim();
    if !logs_dir.is_empty() {
        if !std::path::Path::new(logs_dir).is_dir() {
            return Err(Erx::new(&format!("log dir is not a directory: {}", logs_dir)).with_code(Layouted::config(PreL4::MISS, "0001")));
        }
        let prefix = format!("{}_commerce.log", app_name);

        let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, prefix));

        guards.push(guard);
        persist_reload.reload(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false)).map_err(smp)?;
    }

    let filter = tracing_subscriber::EnvFilter::new(&log_conf.level);
    tracing_subscriber::registry().with(console).with(persist).with(filter).try_init().map_err(smp)?;

    installed.extend(guards);
    Ok(())
}
