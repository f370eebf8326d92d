use std::time::{Duration, Instant};

/// One scheduler tick.
#[derive(Debug, Copy, Clone)]
pub struct Tick {
    /// Tick counter after this tick. The first tick observes 1; before any
    /// tick the counter is 0. Wraps only at numeric overflow.
    pub counter: u64,

    /// Monotonic timestamp taken when the tick fired.
    pub now: Instant,
}

/// Selects which binding set a counter value uses.
///
/// Pure parity/modulo selection: `counter mod set_count`. With two sets,
/// even counters select set 0 and odd counters select set 1.
#[inline]
pub fn select_binding(counter: u64, set_count: usize) -> usize {
    debug_assert!(set_count > 0);
    (counter % set_count as u64) as usize
}

#[derive(Debug, Copy, Clone)]
enum State {
    Idle,
    Running { next: Instant },
}

/// Fixed-interval tick scheduler.
///
/// Two states: `Idle` before [`start`](Self::start) and `Running` once a
/// deadline is armed. [`poll`](Self::poll) produces at most one tick per
/// call; between ticks the event loop parks on
/// [`next_deadline`](Self::next_deadline). [`stop`](Self::stop) returns the
/// machine to `Idle` — cancellation is explicit, not process-exit-only.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    state: State,
    counter: u64,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: State::Idle,
            counter: 0,
        }
    }

    /// Idle → Running. The first tick fires one interval after `now`.
    ///
    /// Calling `start` while running is a no-op.
    pub fn start(&mut self, now: Instant) {
        if let State::Idle = self.state {
            self.state = State::Running {
                next: now + self.interval,
            };
        }
    }

    /// Stops ticking and returns to Idle. The counter is preserved.
    pub fn stop(&mut self) {
        self.state = State::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Deadline of the next tick, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            State::Running { next } => Some(next),
            State::Idle => None,
        }
    }

    /// Counter value as of the most recent tick (0 before the first).
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Produces the due tick, if any.
    ///
    /// At most one tick per call. The next deadline advances from `now`, so
    /// a stalled loop resumes at the configured cadence instead of
    /// replaying missed ticks.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        let State::Running { next } = self.state else {
            return None;
        };
        if now < next {
            return None;
        }

        self.counter = self.counter.wrapping_add(1);
        self.state = State::Running {
            next: now + self.interval,
        };

        Some(Tick {
            counter: self.counter,
            now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(200);

    fn ticker() -> TickScheduler {
        TickScheduler::new(INTERVAL)
    }

    // ── select_binding ────────────────────────────────────────────────────

    #[test]
    fn selection_is_counter_parity_with_two_sets() {
        for n in 0..16u64 {
            assert_eq!(select_binding(n, 2), (n % 2) as usize);
        }
    }

    #[test]
    fn even_counters_select_set_a_odd_select_set_b() {
        assert_eq!(select_binding(0, 2), 0);
        assert_eq!(select_binding(1, 2), 1);
        assert_eq!(select_binding(2, 2), 0);
        assert_eq!(select_binding(u64::MAX, 2), 1);
    }

    #[test]
    fn single_set_always_selects_zero() {
        for n in 0..8u64 {
            assert_eq!(select_binding(n, 1), 0);
        }
    }

    // ── state machine ─────────────────────────────────────────────────────

    #[test]
    fn idle_scheduler_never_ticks() {
        let mut s = ticker();
        assert!(!s.is_running());
        assert!(s.next_deadline().is_none());
        assert!(s.poll(Instant::now()).is_none());
        assert_eq!(s.counter(), 0);
    }

    #[test]
    fn no_tick_before_first_deadline() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);
        assert!(s.is_running());
        assert!(s.poll(t0).is_none());
        assert!(s.poll(t0 + INTERVAL / 2).is_none());
    }

    #[test]
    fn tick_fires_at_deadline_and_rearms() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);

        let tick = s.poll(t0 + INTERVAL).expect("tick due");
        assert_eq!(tick.counter, 1);
        assert_eq!(s.next_deadline(), Some(t0 + INTERVAL + INTERVAL));
    }

    #[test]
    fn counters_are_monotonic_across_ticks() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);

        let mut now = t0;
        for expected in 1..=5u64 {
            now += INTERVAL;
            let tick = s.poll(now).expect("tick due");
            assert_eq!(tick.counter, expected);
        }
    }

    #[test]
    fn at_most_one_tick_per_poll() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);

        // Stall well past several intervals; a single poll yields one tick
        // and the cadence resumes from `now`.
        let late = t0 + INTERVAL * 10;
        let tick = s.poll(late).expect("tick due");
        assert_eq!(tick.counter, 1);
        assert!(s.poll(late).is_none());
        assert_eq!(s.next_deadline(), Some(late + INTERVAL));
    }

    #[test]
    fn stop_returns_to_idle_and_suppresses_ticks() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);
        let _ = s.poll(t0 + INTERVAL);

        s.stop();
        assert!(!s.is_running());
        assert!(s.next_deadline().is_none());
        assert!(s.poll(t0 + INTERVAL * 5).is_none());
        // Counter survives the stop.
        assert_eq!(s.counter(), 1);
    }

    #[test]
    fn start_while_running_keeps_the_armed_deadline() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);
        let armed = s.next_deadline();

        s.start(t0 + INTERVAL / 2);
        assert_eq!(s.next_deadline(), armed);
    }

    // ── parity scenario over the state machine ────────────────────────────

    #[test]
    fn odd_tick_totals_bind_set_b_even_bind_set_a() {
        let mut s = ticker();
        let t0 = Instant::now();
        s.start(t0);

        // Before any tick: counter 0 → set A.
        assert_eq!(select_binding(s.counter(), 2), 0);

        let mut now = t0;
        for ticks in 1..=6u64 {
            now += INTERVAL;
            let tick = s.poll(now).expect("tick due");
            let expected = if ticks % 2 == 1 { 1 } else { 0 };
            assert_eq!(select_binding(tick.counter, 2), expected);
        }
    }
}
