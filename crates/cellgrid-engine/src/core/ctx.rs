use crate::device::Gpu;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::Tick;

use super::app::AppControl;

/// Per-tick context passed to `core::App::on_tick`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub gpu: &'a Gpu<'w>,
    pub tick: Tick,
}

impl FrameCtx<'_, '_> {
    /// Acquires the current surface frame, calls `draw` with a ready
    /// [`RenderCtx`] and [`RenderTarget`], then submits the recorded
    /// commands. Submission completes within this call, so ticks never
    /// overlap in flight.
    ///
    /// There is no per-frame recovery: a failed acquire logs a warning and
    /// skips this tick.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("skipping tick {}: {err}", self.tick.counter);
                return AppControl::Continue;
            }
        };

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
        );

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.gpu.submit(frame);
        AppControl::Continue
    }
}
