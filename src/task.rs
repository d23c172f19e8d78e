//! Running a probe off the caller's task and handing the result back.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::probe::HostProbe;
use crate::result::{ProbeRequest, ProbeResult};

/// Receives the terminal result of one probe. Taking `self` by value means a
/// sink can only ever be completed once.
pub trait CompletionSink: Send + 'static {
    fn complete(self, result: ProbeResult);
}

impl CompletionSink for oneshot::Sender<ProbeResult> {
    fn complete(self, result: ProbeResult) {
        if self.send(result).is_err() {
            debug!("probe result dropped, receiver gone");
        }
    }
}

impl<F> CompletionSink for F
where
    F: FnOnce(ProbeResult) + Send + 'static,
{
    fn complete(self, result: ProbeResult) {
        self(result)
    }
}

/// Awaitable result of [`HostProbe::spawn`]. Dropping it does not stop the
/// probe.
#[derive(Debug)]
pub struct ProbeHandle {
    rx: oneshot::Receiver<ProbeResult>,
}

impl Future for ProbeHandle {
    type Output = Result<ProbeResult, oneshot::error::RecvError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx)
    }
}

impl HostProbe {
    /// Probe on a fresh tokio task and complete `sink` with the result.
    pub fn spawn_with<S: CompletionSink>(&self, request: ProbeRequest, sink: S) -> JoinHandle<()> {
        let probe = *self;
        tokio::spawn(async move {
            let result = probe.probe(&request.host).await;
            sink.complete(result);
        })
    }

    pub fn spawn(&self, request: ProbeRequest) -> ProbeHandle {
        let (tx, rx) = oneshot::channel();
        self.spawn_with(request, tx);
        ProbeHandle { rx }
    }
}
