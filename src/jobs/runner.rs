use tokio::sync::mpsc;

use crate::event::Waker;

use super::envelope::{Envelope, JobTag};

pub const RESULT_CHANNEL_CAPACITY: usize = 32;

/// Runs background jobs and queues their envelopes for the UI thread.
pub struct JobRunner {
    result_tx: mpsc::Sender<Envelope>,
    result_rx: mpsc::Receiver<Envelope>,
    waker: Waker,
}

impl JobRunner {
    pub fn new(waker: Waker) -> Self {
        let (result_tx, result_rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        Self {
            result_tx,
            result_rx,
            waker,
        }
    }

    /// Run `work` on the blocking pool, queue its envelope, then wake the UI.
    ///
    /// Exactly one envelope is queued per submission, even if `work` panics.
    pub fn submit<F>(&self, tag: JobTag, work: F)
    where
        F: FnOnce() -> Envelope + Send + 'static,
    {
        let tx = self.result_tx.clone();
        let waker = self.waker.clone();
        tracing::debug!("Submitting {tag:?} job");

        tokio::spawn(async move {
            let envelope = match tokio::task::spawn_blocking(work).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    tracing::error!("{tag:?} job did not complete: {e}");
                    Envelope::failed(
                        tag,
                        anyhow::anyhow!("{:?} job did not complete: {e}", tag.kind()),
                    )
                }
            };
            if tx.send(envelope).await.is_err() {
                tracing::debug!("Result channel closed, dropping {tag:?} result");
                return;
            }
            // The envelope is queued before the wakeup goes out.
            waker.wake();
        });
    }

    /// Non-blocking: returns the oldest queued envelope, if any.
    pub fn try_recv(&mut self) -> Option<Envelope> {
        self.result_rx.try_recv().ok()
    }

    #[cfg(test)]
    pub fn enqueue(&self, envelope: Envelope) {
        self.result_tx
            .try_send(envelope)
            .expect("result channel has room");
    }
}
