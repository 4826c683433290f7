/// One-shot timers, `setTimeout`/`clearTimeout` in the browser.
pub trait TimerHost {
    type Handle: Copy;

    fn set_timeout(&mut self, delay_ms: i32) -> anyhow::Result<Self::Handle>;
    fn clear_timeout(&mut self, handle: Self::Handle);
}

/// Trailing-edge debounce: every `trigger` restarts the countdown, so a burst
/// of events produces a single `fire` once the burst has been quiet for
/// `delay_ms`.
#[derive(Debug)]
pub struct Debounce<H> {
    delay_ms: i32,
    pending: Option<H>,
}

impl<H: Copy> Debounce<H> {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn trigger<T>(&mut self, host: &mut T) -> anyhow::Result<()>
    where
        T: TimerHost<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            host.clear_timeout(handle);
        }
        self.pending = Some(host.set_timeout(self.delay_ms)?);
        Ok(())
    }

    /// Called from the timer callback. Returns false for a stale timer that
    /// should not run the debounced work.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
