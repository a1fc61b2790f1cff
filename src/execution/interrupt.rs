//! Interrupt Handling
//!
//! A listener task turns Ctrl-C (and SIGTERM on Unix) into cancellation of
//! a shared [`CancellationToken`]. The runner races its work against the
//! token; the entry point then performs cleanup.

use std::future::Future;
use std::io;

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Marker returned when a future lost the race against cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

/// Installs the signal handlers and spawns the listener.
///
/// Handlers are registered before this returns, so a signal delivered at
/// any later point cancels `token`. The task exits after the first signal,
/// or without acting if `token` is cancelled by someone else first.
pub fn spawn_listener(token: CancellationToken) -> io::Result<JoinHandle<()>> {
    let mut signals = Signals::install()?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            name = signals.recv() => {
                info!("Received {}, cancelling demo", name);
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    }))
}

#[cfg(unix)]
struct Signals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(windows)]
struct Signals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl Signals {
    fn install() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        self.ctrl_c.recv().await;
        "Ctrl-C"
    }
}

/// Runs `future` unless `token` is cancelled first.
///
/// On cancellation the future is dropped, which kills any child process it
/// owns.
pub async fn until_cancelled<F>(token: &CancellationToken, future: F) -> Result<F::Output, Interrupted>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Interrupted),
        output = future => Ok(output),
    }
}
