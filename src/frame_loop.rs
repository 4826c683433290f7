/// Schedules and cancels display-refresh callbacks.
pub trait FrameHost {
    type Handle: Copy;

    fn request_frame(&mut self) -> anyhow::Result<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// What the caller must do after a visibility change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Entered the viewport while idle: run a render step now.
    Start,
    /// Left the viewport; the pending frame (if any) was cancelled.
    Stop,
    /// Nothing to do.
    Unchanged,
}

/// Visibility-gated render loop: IDLE while no frame is scheduled, ANIMATING
/// while exactly one is.
#[derive(Debug)]
pub struct RenderLoop<H> {
    pending: Option<H>,
}

impl<H> Default for RenderLoop<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Copy> RenderLoop<H> {
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn on_visibility<F>(&mut self, visible: bool, host: &mut F) -> Transition
    where
        F: FrameHost<Handle = H>,
    {
        match (visible, self.pending.take()) {
            (true, None) => Transition::Start,
            (true, Some(handle)) => {
                self.pending = Some(handle);
                Transition::Unchanged
            }
            (false, Some(handle)) => {
                host.cancel_frame(handle);
                Transition::Stop
            }
            (false, None) => Transition::Unchanged,
        }
    }

    /// Request the next frame at the end of a render step. The previous
    /// handle has already fired by then, so it is simply replaced.
    pub fn schedule_next<F>(&mut self, host: &mut F) -> anyhow::Result<()>
    where
        F: FrameHost<Handle = H>,
    {
        match host.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.pending = None;
                Err(e)
            }
        }
    }
}
