//! Fixed-period tick source owned by a mounted widget.

/// Most ticks replayed after a stall; older ones are dropped.
const MAX_CATCH_UP: u32 = 4;

/// Counts how many periods elapsed since the last call.
///
/// A ticker lives inside the widget state that owns it: mounting a widget
/// starts its ticker and dropping the state stops it.
#[derive(Debug, Clone)]
pub struct Ticker {
    period_ms: u64,
    next_due_ms: u64,
}

impl Ticker {
    pub fn new(period_ms: u64, now_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Change the period, restarting the count from `now_ms`.
    pub fn retime(&mut self, period_ms: u64, now_ms: u64) {
        *self = Self::new(period_ms, now_ms);
    }

    /// Number of ticks due at `now_ms`, capped at a small catch-up window.
    pub fn due(&mut self, now_ms: u64) -> u32 {
        if now_ms < self.next_due_ms {
            return 0;
        }
        let elapsed = (now_ms - self.next_due_ms) / self.period_ms + 1;
        self.next_due_ms = self
            .next_due_ms
            .saturating_add(elapsed.saturating_mul(self.period_ms));
        elapsed.min(MAX_CATCH_UP as u64) as u32
    }
}
