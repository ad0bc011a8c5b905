//! Frame and timer subscriptions
//!
//! The controller never owns a clock. It asks a [`Scheduler`] to wake it up
//! and keeps every handle it was given in [`Subscriptions`], so each one can
//! be cancelled before it is re-issued.

/// Why the scheduler is calling back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wake {
    /// Display frame
    Frame,
    /// One-second round clock
    Countdown,
    /// Spawn policy period
    Spawn,
    /// Game over banner has been up long enough
    EndBanner,
    /// Start the next round (also the first round after boot)
    Restart,
    /// Dismiss the speech bubble
    HideBubble,
}

impl Wake {
    pub const COUNT: usize = 6;

    fn slot(self) -> usize {
        match self {
            Wake::Frame => 0,
            Wake::Countdown => 1,
            Wake::Spawn => 2,
            Wake::EndBanner => 3,
            Wake::Restart => 4,
            Wake::HideBubble => 5,
        }
    }
}

/// When a subscription fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Once, on the next display frame
    NextFrame,
    /// Once, after a delay in milliseconds
    After(u32),
    /// Repeatedly, every period in milliseconds
    Every(u32),
}

/// Opaque handle for an outstanding subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

/// Source of frame and timer callbacks
pub trait Scheduler {
    /// Ask to be woken with `wake` according to `cadence`
    fn schedule(&mut self, wake: Wake, cadence: Cadence) -> Subscription;

    /// Cancel an outstanding subscription (unknown or fired handles are ignored)
    fn cancel(&mut self, subscription: Subscription);
}

/// Outstanding subscription per wake kind
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    slots: [Option<Subscription>; Wake::COUNT],
}

impl Subscriptions {
    /// Subscribe `wake`, cancelling whatever was outstanding for it first
    pub fn arm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, wake: Wake, cadence: Cadence) {
        self.disarm(scheduler, wake);
        self.slots[wake.slot()] = Some(scheduler.schedule(wake, cadence));
    }

    /// Cancel the outstanding subscription for `wake`, if any
    pub fn disarm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, wake: Wake) {
        if let Some(subscription) = self.slots[wake.slot()].take() {
            scheduler.cancel(subscription);
        }
    }

    /// Forget a one-shot subscription that has just fired
    pub fn fired(&mut self, wake: Wake) {
        self.slots[wake.slot()] = None;
    }

    pub fn is_armed(&self, wake: Wake) -> bool {
        self.slots[wake.slot()].is_some()
    }

    /// Number of outstanding subscriptions
    pub fn armed(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Default virtual frame interval (~60 Hz)
pub const VIRTUAL_FRAME_MS: u64 = 16;

#[derive(Debug, Clone)]
struct Pending {
    subscription: Subscription,
    wake: Wake,
    due_ms: u64,
    period_ms: Option<u64>,
}

/// Deterministic scheduler driven by a virtual clock
///
/// Nothing fires on its own: callers pull due wakes with [`pop_due`].
/// Wakes due at the same instant fire in subscription order.
///
/// [`pop_due`]: VirtualScheduler::pop_due
#[derive(Debug, Clone)]
pub struct VirtualScheduler {
    now_ms: u64,
    frame_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(VIRTUAL_FRAME_MS)
    }

    pub fn with_frame_interval(frame_ms: u64) -> Self {
        Self {
            now_ms: 0,
            frame_ms: frame_ms.max(1),
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of outstanding subscriptions
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether any outstanding subscription would wake with `wake`
    pub fn has_pending(&self, wake: Wake) -> bool {
        self.pending.iter().any(|p| p.wake == wake)
    }

    /// Pop the earliest wake due at or before `until`, advancing the clock to it
    ///
    /// Periodic subscriptions are re-armed for their next period.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Wake> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.subscription.0))
            .map(|(i, _)| i)?;

        let wake = self.pending[idx].wake;
        self.now_ms = self.now_ms.max(self.pending[idx].due_ms);

        match self.pending[idx].period_ms {
            Some(period) => self.pending[idx].due_ms += period,
            None => {
                self.pending.remove(idx);
            }
        }

        Some(wake)
    }

    /// Move the clock forward to `until` once nothing more is due
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, wake: Wake, cadence: Cadence) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;

        let (delay, period_ms) = match cadence {
            Cadence::NextFrame => (self.frame_ms, None),
            Cadence::After(ms) => (ms as u64, None),
            Cadence::Every(ms) => {
                let period = (ms as u64).max(1);
                (period, Some(period))
            }
        };

        self.pending.push(Pending {
            subscription,
            wake,
            due_ms: self.now_ms + delay,
            period_ms,
        });
        subscription
    }

    fn cancel(&mut self, subscription: Subscription) {
        self.pending.retain(|p| p.subscription != subscription);
    }
}
