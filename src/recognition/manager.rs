use std::sync::Arc;

use log::{debug, error, info};
use tokio::runtime::Handle;

use crate::config::OverlapPolicy;
use crate::recognition::{
    client::Recognizer,
    types::{RecognitionError, RecognitionOutcome},
};
use crate::session::CompletionSender;

/// Sequence number of a recognize command, increasing per manager.
pub type RequestId = u64;

/// A finished request on its way back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionCompletion {
    pub id: RequestId,
    pub outcome: RecognitionOutcome,
}

/// Runs recognition requests in the background and queues their outcomes
/// on the event loop's queue, behind any user events already waiting there.
///
/// Requests are never cancelled or queued; overlapping commands produce
/// independent in-flight requests. Which completions reach the display is
/// decided by the [`OverlapPolicy`] in [`RecognitionManager::accept`].
pub struct RecognitionManager {
    runtime: Handle,
    recognizer: Arc<dyn Recognizer>,
    policy: OverlapPolicy,
    completions: CompletionSender,
    next_id: RequestId,
    /// Lowest id still allowed to update the display (latest-request policy)
    floor: RequestId,
    in_flight: usize,
}

impl RecognitionManager {
    /// Create a manager that reports through `completions`.
    ///
    /// # Arguments
    /// * `runtime` - Tokio runtime handle for spawning request tasks
    /// * `recognizer` - Service implementation (HTTP in production, mocks in tests)
    /// * `policy` - How overlapping results are applied
    /// * `completions` - From [`EventReceiver::completion_sender`](crate::session::EventReceiver::completion_sender)
    pub fn new(
        runtime: &Handle,
        recognizer: Arc<dyn Recognizer>,
        policy: OverlapPolicy,
        completions: CompletionSender,
    ) -> Self {
        Self {
            runtime: runtime.clone(),
            recognizer,
            policy,
            completions,
            next_id: 1,
            floor: 0,
            in_flight: 0,
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Number of submitted requests whose completion has not been accepted yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn allocate_id(&mut self) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        if self.policy == OverlapPolicy::LatestRequest {
            self.floor = id;
        }
        id
    }

    /// Starts one request for `image_png`. Returns immediately.
    pub fn submit(&mut self, image_png: Vec<u8>) -> RequestId {
        let id = self.allocate_id();
        self.in_flight += 1;
        info!(
            "Recognition request {} submitted ({} in flight)",
            id, self.in_flight
        );

        let recognizer = Arc::clone(&self.recognizer);
        let request = self
            .runtime
            .spawn(async move { recognizer.recognize(&image_png).await });

        let completions = self.completions.clone();
        self.runtime.spawn(async move {
            let result = request
                .await
                .map_err(|e| RecognitionError::Task(e.to_string()))
                .and_then(|inner| inner);

            let outcome = match result {
                Ok(description) => {
                    info!("Recognition request {} succeeded", id);
                    RecognitionOutcome::Success(description)
                }
                Err(err) => {
                    error!("Recognition request {} failed: {}", id, err);
                    RecognitionOutcome::Failure(err.to_string())
                }
            };

            if !completions.send(RecognitionCompletion { id, outcome }) {
                debug!("Event loop stopped; dropping result of request {}", id);
            }
        });

        id
    }

    /// Records a recognize command that failed before any request was sent.
    pub fn reject(&mut self, err: RecognitionError) -> RecognitionOutcome {
        let id = self.allocate_id();
        error!("Recognition request {} failed: {}", id, err);
        RecognitionOutcome::Failure(err.to_string())
    }

    /// Marks every in-flight request as stale (latest-request policy only).
    pub fn invalidate(&mut self) {
        if self.policy == OverlapPolicy::LatestRequest {
            self.floor = self.next_id;
        }
    }

    /// Accounts for a completion and returns the outcome to display, if any.
    pub fn accept(&mut self, completion: RecognitionCompletion) -> Option<RecognitionOutcome> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match self.policy {
            OverlapPolicy::LastResolved => Some(completion.outcome),
            OverlapPolicy::LatestRequest if completion.id >= self.floor => Some(completion.outcome),
            OverlapPolicy::LatestRequest => {
                info!(
                    "Discarding result of superseded recognition request {}",
                    completion.id
                );
                None
            }
        }
    }
}

#[cfg(test)]
impl RecognitionManager {
    pub(crate) fn with_closed_channel_for_test(
        runtime: &Handle,
        recognizer: Arc<dyn Recognizer>,
    ) -> Self {
        let (_events, receiver) = crate::session::event_channel();
        let manager = Self::new(
            runtime,
            recognizer,
            OverlapPolicy::LastResolved,
            receiver.completion_sender(),
        );
        drop(receiver);
        manager
    }
}
