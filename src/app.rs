//! Process lifecycle: wiring, console input and graceful shutdown.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::signal;
use tokio::sync::mpsc;

use crate::command::help::{HELP, INVALID_INPUT, RETRY_HINT};
use crate::command::{CommandError, NotifyFlags};
use crate::config::Settings;
use crate::dispatch::{ConsoleObserver, FailureObserver};
use crate::error::{AppError, AppResult};
use crate::notify::{ClientOptions, NotificationClient};
use crate::session::{CommandSession, LineOutcome};
use crate::transport::{HttpTransport, Transport};

/// Lines read from the console, one `Result` per line
pub type ConsoleLines = mpsc::Receiver<io::Result<String>>;

/// Wired application: one shared client built from settings.
pub struct App {
    settings: Settings,
    client: NotificationClient,
    default_interval: Duration,
}

impl App {
    /// Builds the HTTP transport and client from `settings`.
    pub fn new(settings: Settings) -> AppResult<Self> {
        let transport = HttpTransport::new(&settings.http)?;
        Self::with_transport(settings, Arc::new(transport))
    }

    pub fn with_transport(settings: Settings, transport: Arc<dyn Transport>) -> AppResult<Self> {
        let default_interval = settings.dispatch.interval()?;
        let client = NotificationClient::new(
            transport,
            ClientOptions {
                verbose: settings.dispatch.verbose,
            },
        );

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            "Application starting"
        );
        tracing::info!(
            request_timeout = settings.http.request_timeout,
            connect_timeout = settings.http.connect_timeout,
            default_interval = ?default_interval,
            verbose = settings.dispatch.verbose,
            "Notification client configured"
        );

        Ok(Self {
            settings,
            client,
            default_interval,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self, observer: Arc<dyn FailureObserver>) -> CommandSession {
        CommandSession::new(self.client.clone(), observer, self.default_interval)
    }

    /// Interactive mode: reads `notify` lines from stdin until a shutdown signal.
    pub async fn listen(self) -> AppResult<()> {
        let begin = Instant::now();
        let mut session = self.session(Arc::new(ConsoleObserver));
        let lines = spawn_stdin_reader();

        tracing::info!(elapsed = ?begin.elapsed(), "Notifier started");
        let mut stdout = io::stdout();
        run_console(&mut session, lines, &mut stdout, shutdown_signal()).await?;

        tracing::info!("Shutting down notifier");
        session.shutdown().await?;
        tracing::info!(elapsed = ?begin.elapsed(), "Notifier exiting");
        Ok(())
    }

    /// One-shot mode: a single loop built from command-line flags.
    pub async fn send(self, url: &str, flags: NotifyFlags) -> AppResult<()> {
        let begin = Instant::now();
        let mut session = self.session(Arc::new(ConsoleObserver));

        if let LineOutcome::Started {
            id,
            target,
            interval,
        } = session.start(url, flags).await?
        {
            tracing::info!(loop_id = %id, url = %target, interval = ?interval, "Notification loop started");
        }

        tracing::info!(elapsed = ?begin.elapsed(), "Notifier started");
        shutdown_signal().await;

        tracing::info!("Shutting down notifier");
        session.shutdown().await?;
        tracing::info!(elapsed = ?begin.elapsed(), "Notifier exiting");
        Ok(())
    }
}

/// Feeds console lines into `session` until `shutdown` completes.
///
/// End of input stops reading but not the running loops; they keep going
/// until `shutdown`. A read error prints the retry hint and stops reading.
pub async fn run_console<W, F>(
    session: &mut CommandSession,
    mut lines: ConsoleLines,
    out: &mut W,
    shutdown: F,
) -> AppResult<()>
where
    W: Write,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    write_line(out, HELP)?;

    let mut reading = true;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            line = lines.recv(), if reading => match line {
                Some(Ok(line)) => handle_console_line(session, &line, out).await?,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Console input failed");
                    write_line(out, RETRY_HINT)?;
                    reading = false;
                }
                None => {
                    tracing::debug!("Console input closed");
                    reading = false;
                }
            },
        }
    }

    Ok(())
}

async fn handle_console_line<W: Write>(
    session: &mut CommandSession,
    line: &str,
    out: &mut W,
) -> AppResult<()> {
    match session.handle_line(line).await {
        Ok(LineOutcome::Help) => write_line(out, HELP),
        Ok(LineOutcome::Started {
            id,
            target,
            interval,
        }) => {
            tracing::info!(loop_id = %id, url = %target, interval = ?interval, "Notification loop started");
            Ok(())
        }
        Err(e) => {
            if matches!(e, AppError::Command(CommandError::InvalidInput)) {
                write_line(out, INVALID_INPUT)?;
            }
            write_line(out, &format!("An error occurred: {e}"))?;
            write_line(out, RETRY_HINT)
        }
    }
}

fn write_line<W: Write>(out: &mut W, text: &str) -> AppResult<()> {
    writeln!(out, "{text}")
        .and_then(|_| out.flush())
        .map_err(|source| AppError::Io {
            context: "writing to console".to_string(),
            source,
        })
}

/// Reads stdin on a dedicated thread.
///
/// Blocking stdin reads never finish on their own, so they stay off the
/// runtime; the thread ends with the process.
pub fn spawn_stdin_reader() -> ConsoleLines {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
