use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::render::RenderCtx;
use crate::time::{Tick, TickScheduler};

/// Window/runtime configuration.
///
/// Both the window geometry and the tick interval are fixed for the process
/// lifetime; the window is created non-resizable.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub inner_size: LogicalSize<f64>,
    /// Interval between scheduler ticks.
    pub tick_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cellgrid".to_string(),
            inner_size: LogicalSize::new(512.0, 512.0),
            tick_interval: Duration::from_millis(200),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until the window closes or the app requests exit.
    ///
    /// Initialization failures — window creation, adapter/device
    /// acquisition, surface configuration, app setup — are terminal and
    /// returned to the caller; nothing is retried.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let scheduler = TickScheduler::new(config.tick_interval);
        let mut state = AppState::new(config, gpu_init, scheduler, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    scheduler: TickScheduler,
    pending_tick: Option<Tick>,

    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scheduler: TickScheduler, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            scheduler,
            pending_tick: None,
            fatal: None,
            exit_requested: false,
        }
    }

    /// Creates the window, binds the GPU, and runs app setup.
    ///
    /// Any failure here is terminal for the whole runtime.
    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.inner_size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).map_err(anyhow::Error::new)
            },
        }
        .try_build()?;

        entry.with_gpu(|gpu| {
            let rctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
            self.app.setup(&rctx)
        })?;

        self.entry = Some(entry);
        self.scheduler.start(Instant::now());
        Ok(())
    }

    /// Stops the scheduler, drops the window entry (releasing surface and
    /// device), and exits the loop.
    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.scheduler.stop();
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_entry(event_loop) {
            log::error!("initialization failed: {e:#}");
            self.fatal = Some(e);
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if let Some(tick) = self.scheduler.poll(Instant::now()) {
            self.pending_tick = Some(tick);
            if let Some(entry) = &self.entry {
                entry.with_window(|w| w.request_redraw());
            }
        }

        match self.scheduler.next_deadline() {
            Some(next) => event_loop.set_control_flow(ControlFlow::WaitUntil(next)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.request_exit(event_loop);
            }

            WindowEvent::RedrawRequested => {
                // A redraw without a due tick (the initial paint) renders
                // the current selection without advancing the counter.
                let tick = self.pending_tick.take().unwrap_or(Tick {
                    counter: self.scheduler.counter(),
                    now: Instant::now(),
                });

                let (app, entry) = (&mut self.app, &self.entry);
                let Some(entry) = entry else {
                    return;
                };

                let control = entry.with_gpu(|gpu| {
                    let mut ctx = FrameCtx { gpu, tick };
                    app.on_tick(&mut ctx)
                });

                if control == AppControl::Exit {
                    self.request_exit(event_loop);
                }
            }

            _ => {}
        }
    }
}
