use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use aido_core::dispatch::{
    dispatch, DispatchError, DispatchReply, DispatchRequest, Provider, SupersedePolicy,
};
use aido_core::settings::DispatchSettings;
use tracing::{debug, debug_span, warn};

// ---------------------------------------------------------------------------
// Work types
// ---------------------------------------------------------------------------

struct DispatchWork {
    request: DispatchRequest,
    generation: u64,
}

/// Generation bookkeeping shared with the worker thread.
#[derive(Default)]
struct Generations {
    /// Generation of the newest submitted request.
    latest: AtomicU64,
    /// Requests at or below this generation were cancelled.
    cancelled_through: AtomicU64,
}

impl Generations {
    fn is_discarded(&self, generation: u64, policy: SupersedePolicy) -> bool {
        if generation <= self.cancelled_through.load(Ordering::SeqCst) {
            return true;
        }
        policy == SupersedePolicy::CancelOnSupersede
            && generation != self.latest.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// DispatchWorker
// ---------------------------------------------------------------------------

/// Runs provider calls on a background thread.
///
/// Requests queued while a call is in flight are drained to the newest one.
/// Replies are collected by the owning thread with [`try_recv`] or
/// [`recv_timeout`] and handed to the session, which owns the document.
///
/// [`try_recv`]: DispatchWorker::try_recv
/// [`recv_timeout`]: DispatchWorker::recv_timeout
pub struct DispatchWorker {
    work_tx: mpsc::Sender<DispatchWork>,
    reply_rx: Mutex<mpsc::Receiver<DispatchReply>>,
    generations: Arc<Generations>,
}

impl DispatchWorker {
    pub fn new(provider: Arc<dyn Provider>, settings: DispatchSettings, timeout: Duration) -> Self {
        let generations = Arc::new(Generations::default());
        let (work_tx, work_rx) = mpsc::channel::<DispatchWork>();
        let (reply_tx, reply_rx) = mpsc::channel::<DispatchReply>();
        {
            let generations = Arc::clone(&generations);
            thread::Builder::new()
                .name("aido-dispatch".into())
                .spawn(move || {
                    dispatch_worker(work_rx, reply_tx, generations, provider, settings, timeout);
                })
                .expect("failed to spawn dispatch worker");
        }
        Self {
            work_tx,
            reply_rx: Mutex::new(reply_rx),
            generations,
        }
    }

    /// Queue a request and return its generation.
    pub fn submit(&self, request: DispatchRequest) -> u64 {
        let generation = self.generations.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, keyword = %request.keyword, "dispatch submitted");
        let work = DispatchWork {
            request,
            generation,
        };
        if self.work_tx.send(work).is_err() {
            warn!(generation, "dispatch worker has exited, request dropped");
        }
        generation
    }

    /// Discard every request submitted so far. Outstanding ones come back as
    /// [`DispatchError::Cancelled`].
    pub fn cancel(&self) {
        let latest = self.generations.latest.load(Ordering::SeqCst);
        self.generations
            .cancelled_through
            .fetch_max(latest, Ordering::SeqCst);
    }

    pub fn try_recv(&self) -> Option<DispatchReply> {
        let rx = self.reply_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<DispatchReply> {
        let rx = self.reply_rx.lock().ok()?;
        rx.recv_timeout(timeout).ok()
    }
}

// ---------------------------------------------------------------------------
// Worker thread
// ---------------------------------------------------------------------------

fn dispatch_worker(
    rx: mpsc::Receiver<DispatchWork>,
    tx: mpsc::Sender<DispatchReply>,
    generations: Arc<Generations>,
    provider: Arc<dyn Provider>,
    settings: DispatchSettings,
    timeout: Duration,
) {
    let policy = settings.supersede;
    while let Ok(work) = rx.recv() {
        // Drain: if multiple requests queued, skip to latest
        let mut latest = work;
        while let Ok(newer) = rx.try_recv() {
            let skipped = std::mem::replace(&mut latest, newer);
            debug!(generation = skipped.generation, "dispatch superseded in queue");
            if policy == SupersedePolicy::CancelOnSupersede {
                let _ = tx.send(cancelled(skipped.request));
            }
        }

        let _span = debug_span!("dispatch_work", generation = latest.generation).entered();

        // Check staleness before calling out
        if generations.is_discarded(latest.generation, policy) {
            if tx.send(cancelled(latest.request)).is_err() {
                break;
            }
            continue;
        }

        let result = dispatch(provider.as_ref(), &latest.request.prompt, &settings, timeout);

        // Check again: the owner may have moved on during the call
        let result = if generations.is_discarded(latest.generation, policy) {
            debug!("dispatch result discarded");
            Err(DispatchError::Cancelled)
        } else {
            result
        };

        let reply = DispatchReply {
            request: latest.request,
            result,
        };
        if tx.send(reply).is_err() {
            break;
        }
    }
}

fn cancelled(request: DispatchRequest) -> DispatchReply {
    DispatchReply {
        request,
        result: Err(DispatchError::Cancelled),
    }
}
