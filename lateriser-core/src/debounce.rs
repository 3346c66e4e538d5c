//! Event Reducer
//!
//! Coalesces bursts of raw events (scroll, touchmove, resize) into bounded
//! handler invocations.
//!
//! # Firing Policy
//!
//! The policy is neither a plain leading-edge nor a plain trailing-edge
//! debounce:
//!
//! 1. If no timer is pending, the *previously stored* call is fired right
//!    away, then the new call is stored and a timer is armed.
//!
//! 2. If a timer is pending, it is cancelled, the stored call is replaced
//!    by the new one, and a fresh timer is armed.
//!
//! 3. When the timer fires, the stored call runs. It stays stored, so it is
//!    what step 1 fires at the start of the next burst.
//!
//! A burst therefore produces one immediate firing (the call that preceded
//! the burst) and one trailing firing `delay` after the burst goes quiet.
//! The very first burst has nothing stored yet and only fires on the
//! trailing edge.
//!
//! # Timers
//!
//! Timers are Tokio tasks spawned on the runtime handle given at
//! construction, so `call` itself can come from any thread. Each armed
//! timer carries a generation number; a timer that wakes after it was
//! superseded sees a newer generation and does nothing.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Rate limiter wrapping a handler `func`.
///
/// Cloning yields another handle to the same debounce state.
pub struct Debouncer<A>
where
    A: Clone + Send + 'static,
{
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    runtime: Handle,
    state: Mutex<State<A>>,
}

struct State<A> {
    /// Arguments of the most recent call.
    stored: Option<A>,
    /// The armed timer, if one is pending.
    timer: Option<JoinHandle<()>>,
    generation: u64,
}

impl<A> Debouncer<A>
where
    A: Clone + Send + 'static,
{
    /// Wrap `func` so that calls are coalesced over `delay`.
    pub fn new<F>(runtime: Handle, delay: Duration, func: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                func: Box::new(func),
                delay,
                runtime,
                state: Mutex::new(State {
                    stored: None,
                    timer: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Record a call.
    ///
    /// May run the previously stored call synchronously, before returning.
    pub fn call(&self, args: A) {
        let leading = {
            let mut state = self.inner.state.lock();

            let leading = match state.timer.take() {
                Some(timer) => {
                    timer.abort();
                    None
                }
                None => state.stored.clone(),
            };

            state.stored = Some(args);
            state.generation = state.generation.wrapping_add(1);

            let generation = state.generation;
            let inner = Arc::clone(&self.inner);
            state.timer = Some(self.inner.runtime.spawn(async move {
                tokio::time::sleep(inner.delay).await;
                inner.fire_trailing(generation);
            }));

            leading
        };

        // The lock is released so the handler may call back in.
        if let Some(previous) = leading {
            (self.inner.func)(previous);
        }
    }

    /// Whether a trailing firing is currently armed.
    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    /// Drop the pending timer, if any, without firing it.
    ///
    /// The stored call is kept.
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock();
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation = state.generation.wrapping_add(1);
    }

    /// The configured quiet period.
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<A> Inner<A> {
    fn fire_trailing(&self, generation: u64)
    where
        A: Clone,
    {
        let args = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            state.timer = None;
            state.stored.clone()
        };

        if let Some(args) = args {
            (self.func)(args);
        }
    }
}

impl<A> Clone for Debouncer<A>
where
    A: Clone + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> std::fmt::Debug for Debouncer<A>
where
    A: Clone + Send + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.inner.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const DELAY: Duration = Duration::from_millis(100);

    fn recording() -> (Debouncer<i32>, Arc<Mutex<Vec<i32>>>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let fired_clone = fired.clone();
        let debouncer = Debouncer::new(Handle::current(), DELAY, move |n: i32| {
            fired_clone.lock().push(n);
        });
        (debouncer, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn first_burst_fires_only_trailing() {
        let (debouncer, fired) = recording();

        debouncer.call(1);
        sleep(Duration::from_millis(10)).await;
        debouncer.call(2);
        sleep(Duration::from_millis(10)).await;
        debouncer.call(3);

        assert!(fired.lock().is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(150)).await;
        assert_eq!(*fired.lock(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn later_burst_fires_previous_call_then_trailing() {
        let (debouncer, fired) = recording();

        debouncer.call(1);
        sleep(Duration::from_millis(150)).await;
        assert_eq!(*fired.lock(), vec![1]);

        // Leading edge: the call that preceded this burst fires immediately.
        debouncer.call(2);
        assert_eq!(*fired.lock(), vec![1, 1]);

        for n in 3..=6 {
            sleep(Duration::from_millis(20)).await;
            debouncer.call(n);
        }
        assert_eq!(*fired.lock(), vec![1, 1]);

        sleep(Duration::from_millis(150)).await;
        assert_eq!(*fired.lock(), vec![1, 1, 6]);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_spaced_beyond_delay_each_fire_twice_over_time() {
        let (debouncer, fired) = recording();

        debouncer.call(10);
        sleep(Duration::from_millis(200)).await;
        debouncer.call(20);
        sleep(Duration::from_millis(200)).await;
        debouncer.call(30);
        sleep(Duration::from_millis(200)).await;

        assert_eq!(*fired.lock(), vec![10, 10, 20, 20, 30]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_timer() {
        let (debouncer, fired) = recording();

        debouncer.call(1);
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_millis(200)).await;
        assert!(fired.lock().is_empty());

        // The cancelled call is still the stored one.
        debouncer.call(2);
        assert_eq!(*fired.lock(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_state() {
        let (debouncer, fired) = recording();
        let other = debouncer.clone();

        debouncer.call(1);
        other.call(2);
        sleep(Duration::from_millis(150)).await;

        assert_eq!(*fired.lock(), vec![2]);
    }
}
