use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Batch scripts print progress to stdout and keep a rolling daily
/// file under logs/. The guard must stay alive for the process lifetime.
pub fn init(job_name: &str) -> WorkerGuard {
    let file_appender = rolling::daily("logs", format!("{job_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking))
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    guard
}
