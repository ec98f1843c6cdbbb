use std::{
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::{error::Error, result::Result};
use tokio::{
    sync::{mpsc, oneshot, Semaphore},
    task::JoinHandle,
    time::{sleep_until, Instant},
};

type Job = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send>;

/// Rate-limited scheduler every outbound call of a session goes through.
///
/// Scheduled calls start in submission order, with at least `min_interval`
/// between two consecutive starts and never more than `max_concurrent`
/// calls in flight. The queue itself is unbounded.
#[derive(Debug)]
pub struct Dispatcher {
    queue: mpsc::UnboundedSender<Job>,
    counters: Arc<Counters>,
    min_interval: Duration,
    max_concurrent: usize,
    worker: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct Counters {
    scheduled: AtomicUsize,
    dispatched: AtomicUsize,
}

impl Dispatcher {
    /// Creates a dispatcher and spawns its queue worker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `max_concurrent` is zero.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn new(min_interval: Duration, max_concurrent: usize) -> Result<Self> {
        if max_concurrent == 0 {
            return Err(Error::invalid("max_concurrent must be at least 1"));
        }

        let (queue, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());
        let slots = Arc::new(Semaphore::new(max_concurrent));
        let worker = tokio::spawn(drain(rx, slots, min_interval, Arc::clone(&counters)));

        Ok(Dispatcher {
            queue,
            counters,
            min_interval,
            max_concurrent,
            worker,
        })
    }

    /// Enqueues `call` and returns a future resolving to its result.
    ///
    /// The call is queued as soon as this method returns, so the order of
    /// `schedule` invocations is the order in which calls start. Dropping the
    /// returned future does not cancel the call.
    pub fn schedule<F, Fut, T>(&self, call: F) -> impl Future<Output = Result<T>> + Send
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            Box::pin(async move {
                // the caller may have stopped waiting
                let _ = tx.send(call().await);
            })
        });

        let queued = self.queue.send(job).map_err(|_| Error::DispatcherClosed);
        if queued.is_ok() {
            self.counters.scheduled.fetch_add(1, Ordering::SeqCst);
        }

        async move {
            queued?;
            rx.await.map_err(|_| Error::DispatcherClosed)?
        }
    }

    /// Minimum spacing between the start of two calls.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Maximum number of calls allowed in flight at once.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Number of calls accepted into the queue so far.
    pub fn scheduled(&self) -> usize {
        self.counters.scheduled.load(Ordering::SeqCst)
    }

    /// Number of calls that have left the queue and started.
    pub fn dispatched(&self) -> usize {
        self.counters.dispatched.load(Ordering::SeqCst)
    }
}

async fn drain(
    mut rx: mpsc::UnboundedReceiver<Job>,
    slots: Arc<Semaphore>,
    min_interval: Duration,
    counters: Arc<Counters>,
) {
    let mut last_start: Option<Instant> = None;

    while let Some(job) = rx.recv().await {
        let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
            break;
        };

        if let Some(last) = last_start {
            sleep_until(last + min_interval).await;
        }
        last_start = Some(Instant::now());

        let n = counters.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("dispatching queued call #{n}");

        tokio::spawn(async move {
            job().await;
            drop(permit);
        });
    }
    log::debug!("dispatcher queue closed");
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{atomic::AtomicBool, Mutex};

    #[tokio::test(start_paused = true)]
    async fn back_to_back_calls_are_spaced() {
        let dispatcher = Dispatcher::new(Duration::from_millis(1000), 1).unwrap();

        let first = dispatcher.schedule(|| async { Ok(Instant::now()) });
        let second = dispatcher.schedule(|| async { Ok(Instant::now()) });

        let first = first.await.unwrap();
        let second = second.await.unwrap();
        assert!(second - first >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn starts_follow_submission_order() {
        let dispatcher = Dispatcher::new(Duration::from_millis(100), 3).unwrap();
        let starts = Arc::new(Mutex::new(Vec::new()));

        let pending: Vec<_> = (0..6)
            .map(|i| {
                let starts = Arc::clone(&starts);
                dispatcher.schedule(move || async move {
                    starts.lock().unwrap().push((i, Instant::now()));
                    tokio::time::sleep(Duration::from_millis(250)).await;
                    Ok(i)
                })
            })
            .collect();

        for (i, call) in pending.into_iter().enumerate() {
            assert_eq!(call.await.unwrap(), i);
        }

        let starts = starts.lock().unwrap();
        let order: Vec<_> = starts.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
        for pair in starts.windows(2) {
            assert!(pair[1].1 - pair[0].1 >= Duration::from_millis(100));
        }
        assert_eq!(dispatcher.scheduled(), 6);
        assert_eq!(dispatcher.dispatched(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn never_exceeds_max_concurrent() {
        let dispatcher = Dispatcher::new(Duration::ZERO, 2).unwrap();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let pending: Vec<_> = (0..8)
            .map(|_| {
                let in_flight = Arc::clone(&in_flight);
                let peak = Arc::clone(&peak);
                dispatcher.schedule(move || async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect();

        for call in pending {
            call.await.unwrap();
        }
        assert_eq!(peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_call_does_not_poison_queue() {
        let dispatcher = Dispatcher::new(Duration::from_millis(10), 1).unwrap();

        let failing = dispatcher.schedule(|| async { Err::<(), _>(Error::invalid("boom")) });
        let healthy = dispatcher.schedule(|| async { Ok("still running") });

        assert!(matches!(failing.await, Err(Error::InvalidParameter(_))));
        assert_eq!(healthy.await.unwrap(), "still running");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_still_runs() {
        let dispatcher = Dispatcher::new(Duration::from_millis(10), 1).unwrap();
        let ran = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&ran);
        drop(dispatcher.schedule(move || async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        }));
        dispatcher.schedule(|| async { Ok(()) }).await.unwrap();

        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn zero_concurrency_is_rejected() {
        let err = Dispatcher::new(Duration::ZERO, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
