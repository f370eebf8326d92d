//! Cellgrid viewer binary.
//!
//! Renders a fixed 32×32 cell grid, swapping between two precomputed state
//! buffers every 200 ms by tick parity.

use std::time::Duration;

use anyhow::Result;

use cellgrid_engine::core::{App, AppControl, FrameCtx};
use cellgrid_engine::device::GpuInit;
use cellgrid_engine::grid::{Alternating, CellPattern, GridDescriptor, Stride};
use cellgrid_engine::logging::{LoggingConfig, init_logging};
use cellgrid_engine::render::{GridRenderer, RenderCtx};
use cellgrid_engine::time::select_binding;
use cellgrid_engine::window::{Runtime, RuntimeConfig};

/// Grid dimensions, fixed for the process lifetime.
const GRID: GridDescriptor = GridDescriptor::new(32, 32);

/// Interval between state-buffer swaps.
const TICK_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Default)]
struct GridApp {
    renderer: Option<GridRenderer>,
}

impl App for GridApp {
    fn setup(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        // Set A activates every third cell, set B the even-indexed ones.
        let states = [Stride(3).generate(&GRID), Alternating.generate(&GRID)];
        let renderer = GridRenderer::new(ctx, GRID, &states)?;

        log::info!(
            "grid ready: {}x{} cells, {} instances, {} state sets",
            GRID.width,
            GRID.height,
            renderer.instance_count(),
            renderer.binding_count(),
        );

        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Exit;
        };

        let set = select_binding(ctx.tick.counter, renderer.binding_count());
        ctx.render(|_, target| renderer.render(target, set))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "cellgrid".to_string(),
        tick_interval: TICK_INTERVAL,
        ..Default::default()
    };

    Runtime::run(config, GpuInit::default(), GridApp::default())
}
