use crate::app::config::{FileRotation, LogType, LoggingConfig};
use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

type DynLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync + 'static>;

/// Flush guards of the non blocking writers, logs still buffered are
/// written out when these drop
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

fn sink_layer(writer: NonBlocking, json: bool, color: bool, spans: bool) -> DynLayer {
    let span_events = if spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if json {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_span_events(span_events)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_ansi(color)
            .with_writer(writer)
            .with_span_events(span_events)
            .boxed()
    }
}

/// Installs the global subscriber, one fmt layer per configured sink
pub fn init(config: &LoggingConfig) -> Result<LogGuards> {
    config.validate()?;

    let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
    let filter = EnvFilter::from_default_env()
        .add_directive("error".parse()?)
        .add_directive(format!("{}={}", crate_name, config.level).parse()?);

    let mut layers: Vec<DynLayer> = Vec::new();
    let mut guards = Vec::new();

    for sink in &config.sinks {
        match &sink.dest {
            LogType::Stdout { color, json } => {
                // stdout carries the command output, logs go to stderr
                let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
                guards.push(guard);
                layers.push(sink_layer(writer, *json, *color, sink.spans));
            }
            LogType::File {
                path,
                json,
                rotation,
                max_files,
            } => {
                let (writer, guard) = create_file_writer(path, rotation, *max_files)?;
                guards.push(guard);
                layers.push(sink_layer(writer, *json, false, sink.spans));
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(LogGuards { _guards: guards })
}

fn create_file_writer(
    path: &Path,
    rotation: &FileRotation,
    max_files: usize,
) -> Result<(NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name in path: {}", path.display()))?;

    let directory = path
        .parent()
        .ok_or_else(|| anyhow!("Invalid directory in path: {}", path.display()))?;

    if !directory.as_os_str().is_empty() {
        std::fs::create_dir_all(directory).with_context(|| {
            format!("failed to create log directory {}", directory.display())
        })?;
    }

    let file_appender = match rotation {
        FileRotation::Daily => tracing_appender::rolling::daily(directory, file_name),
        FileRotation::Hourly => tracing_appender::rolling::hourly(directory, file_name),
        FileRotation::Never => tracing_appender::rolling::never(directory, file_name),
    };

    cleanup_old_files(directory, file_name, max_files)?;

    Ok(tracing_appender::non_blocking(file_appender))
}

/// Keeps the newest `max_files` log files with the given prefix, zero keeps all
fn cleanup_old_files(directory: &Path, prefix: &str, max_files: usize) -> Result<()> {
    if max_files == 0 {
        return Ok(());
    }

    let directory = if directory.as_os_str().is_empty() {
        Path::new(".")
    } else {
        directory
    };

    let mut files: Vec<_> = std::fs::read_dir(directory)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix))
        })
        .filter_map(|entry| {
            entry
                .metadata()
                .ok()
                .and_then(|meta| meta.modified().ok().map(|time| (entry.path(), time)))
        })
        .collect();

    if files.len() <= max_files {
        return Ok(());
    }

    files.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in files.iter().skip(max_files) {
        let _ = std::fs::remove_file(path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_cleanup_keeps_newest() {
        let dir = std::env::temp_dir().join(format!("sw-log-cleanup-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let base = SystemTime::now() - Duration::from_secs(3600);
        for i in 0..4u64 {
            let path = dir.join(format!("adapter.log.{}", i));
            std::fs::write(&path, "x").unwrap();
            let file = std::fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(base + Duration::from_secs(i * 60)).unwrap();
        }
        std::fs::write(dir.join("other.txt"), "x").unwrap();

        cleanup_old_files(&dir, "adapter.log", 2).unwrap();

        let mut remaining: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect();
        remaining.sort();

        assert_eq!(
            remaining,
            vec!["adapter.log.2", "adapter.log.3", "other.txt"]
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
