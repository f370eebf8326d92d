use anyhow::Result;

use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the viewer.
pub trait App {
    /// Called exactly once, after the device and surface are ready and
    /// before the first tick. Create pipelines and upload static data here.
    ///
    /// Failures are terminal: they abort the runtime and propagate out of
    /// [`Runtime::run`](crate::window::Runtime::run).
    fn setup(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called once per scheduler tick, and once for the initial paint with
    /// the counter still at its pre-tick value.
    fn on_tick(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
