//! Monotonic animation time

/// Elapsed animation time derived from a host millisecond clock
///
/// `elapsed = ((now - start) / 1000 + offset_secs) * rate`. The offset lets
/// the animation begin at an already-settled point of the pattern. The value
/// never decreases, even if the host clock steps backwards.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    start_ms: f64,
    offset_secs: f64,
    rate: f64,
    last: f64,
}

impl AnimationClock {
    pub fn new(start_ms: f64, offset_secs: f64, rate: f64) -> Self {
        Self {
            start_ms,
            offset_secs,
            rate,
            last: offset_secs * rate,
        }
    }

    /// Advance to `now_ms` and return the elapsed animation time
    pub fn elapsed(&mut self, now_ms: f64) -> f64 {
        let t = ((now_ms - self.start_ms) / 1000.0 + self.offset_secs) * self.rate;
        if t > self.last {
            self.last = t;
        }
        self.last
    }

    /// Most recent value returned by [`elapsed`](Self::elapsed)
    #[inline]
    pub fn last(&self) -> f64 {
        self.last
    }

    #[inline]
    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }
}
