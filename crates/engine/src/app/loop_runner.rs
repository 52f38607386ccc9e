use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::{ActionStates, EdgeLatch};
use super::metrics::MetricsAccumulator;
use super::rendering::OverlayData;
use super::scene::SceneHost;
use super::{
    DrawList, InputAction, InputSnapshot, MetricsHandle, Renderer, Scene, SceneCommand, Viewport,
};

pub const SLOW_FRAME_ENV_VAR: &str = "SIDESCROLLER_SLOW_FRAME_MS";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Logical canvas the scene draws into; scaled to the window on present.
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub max_render_fps: Option<u32>,
    pub show_perf_overlay: bool,
    pub assets_dir: PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Sidescroller".to_string(),
            window_width: 1080,
            window_height: 720,
            canvas_width: 720,
            canvas_height: 480,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            max_render_fps: None,
            show_perf_overlay: false,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    run_app_with_metrics(config, scene, MetricsHandle::default())
}

pub fn run_app_with_metrics(
    config: LoopConfig,
    scene: Box<dyn Scene>,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let mut scene_host = SceneHost::new(scene);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let canvas = Viewport {
        width: config.canvas_width.max(1),
        height: config.canvas_height.max(1),
    };
    let mut renderer = Renderer::new(Arc::clone(&window), &config.assets_dir, canvas)
        .map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let mut pacer = FramePacer::new(&config, Instant::now());
    let mut input_collector = InputCollector::default();
    scene_host.load();
    info!(
        entity_count = scene_host.entity_count(),
        assets_dir = %config.assets_dir.display(),
        "scene_loaded"
    );

    info!(
        fixed_dt_us = pacer.fixed_dt.as_micros() as u64,
        canvas_width = canvas.width,
        canvas_height = canvas.height,
        max_frame_delta_ms = pacer.max_frame_delta.as_millis() as u64,
        max_ticks_per_frame = pacer.max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        "loop_config"
    );

    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_applied_title: Option<String> = None;
    let mut overlay_visible = config.show_perf_overlay;
    let mut draw_list = DrawList::default();

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::Focused(false) => {
                    input_collector.release_all();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if input_collector.take_overlay_toggle_pressed() {
                        overlay_visible = !overlay_visible;
                        info!(overlay_visible, "overlay_toggled");
                    }

                    if slow_frame_delay > Duration::ZERO {
                        // Debug perturbation only; this is not the FPS cap.
                        thread::sleep(slow_frame_delay);
                    }

                    let now = Instant::now();
                    let (raw_frame_dt, step_plan) = pacer.begin_frame(now);
                    for _ in 0..step_plan.ticks_to_run {
                        let input_snapshot = input_collector.snapshot_for_tick();
                        match scene_host.update(pacer.fixed_dt, &input_snapshot) {
                            SceneCommand::None => {}
                            SceneCommand::HardReset => {
                                scene_host.hard_reset();
                                info!(entity_count = scene_host.entity_count(), "scene_reset");
                            }
                            SceneCommand::Quit => {
                                info!(reason = "scene_command", "shutdown_requested");
                                window_target.exit();
                            }
                        }
                        metrics_accumulator.record_tick();
                    }

                    if step_plan.dropped_backlog > Duration::ZERO {
                        metrics_accumulator.record_dropped_backlog(step_plan.dropped_backlog);
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame = pacer.max_ticks_per_frame,
                            "sim_clamp_triggered"
                        );
                    }

                    // The only sleep that enforces the render cap.
                    let cap_sleep = pacer.cap_sleep(Instant::now());
                    if cap_sleep > Duration::ZERO {
                        thread::sleep(cap_sleep);
                    }

                    draw_list.clear();
                    scene_host.render(&mut draw_list);
                    let overlay = overlay_visible.then(|| OverlayData {
                        metrics: metrics_handle.snapshot(),
                        render_fps_cap: effective_render_cap,
                        entity_count: scene_host.entity_count(),
                    });
                    if let Err(error) = renderer.render(&draw_list, overlay.as_ref()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    pacer.mark_presented(Instant::now());

                    let next_title = scene_host.debug_title();
                    if next_title != last_applied_title {
                        match &next_title {
                            Some(title) => window.set_title(title),
                            None => window.set_title(&config.window_title),
                        }
                        last_applied_title = next_title;
                    }
                    metrics_accumulator.record_frame(raw_frame_dt);

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        metrics_handle.publish(snapshot);
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            dropped_backlog_ms = snapshot.dropped_backlog_ms,
                            entity_count = scene_host.entity_count(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                scene_host.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    action_states: ActionStates,
    confirm: EdgeLatch,
    mute_toggle: EdgeLatch,
    overlay_toggle: EdgeLatch,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.handle_physical_key(key_event.physical_key, is_pressed);
    }

    fn handle_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        match code {
            KeyCode::ArrowLeft => self.action_states.set(InputAction::MoveLeft, is_pressed),
            KeyCode::ArrowRight => self.action_states.set(InputAction::MoveRight, is_pressed),
            KeyCode::ArrowUp => self.action_states.set(InputAction::MoveUp, is_pressed),
            KeyCode::ArrowDown => self.action_states.set(InputAction::MoveDown, is_pressed),
            KeyCode::Space => self.action_states.set(InputAction::Jump, is_pressed),
            KeyCode::KeyD => self.action_states.set(InputAction::Action, is_pressed),
            KeyCode::Enter | KeyCode::NumpadEnter => self.confirm.handle(is_pressed),
            KeyCode::KeyM => self.mute_toggle.handle(is_pressed),
            KeyCode::F3 => self.overlay_toggle.handle(is_pressed),
            KeyCode::Escape => {
                self.action_states.set(InputAction::Quit, is_pressed);
                if is_pressed {
                    self.mark_quit_requested();
                }
            }
            _ => {}
        }
    }

    fn release_all(&mut self) {
        self.action_states.clear();
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        InputSnapshot::new(
            self.quit_requested,
            self.action_states,
            self.confirm.take(),
            self.mute_toggle.take(),
        )
    }

    fn take_overlay_toggle_pressed(&mut self) -> bool {
        self.overlay_toggle.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StepPlan {
    ticks_to_run: u32,
    dropped_backlog: Duration,
}

/// Fixed-step bookkeeping for one window: turns wall-clock frame deltas into
/// whole simulation ticks and decides how long to sleep for the render cap.
#[derive(Debug)]
struct FramePacer {
    fixed_dt: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    render_frame_target: Option<Duration>,
    accumulator: Duration,
    last_frame: Instant,
    last_present: Instant,
}

impl FramePacer {
    fn new(config: &LoopConfig, now: Instant) -> Self {
        let target_tps = config.target_tps.max(1);
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / target_tps as f64),
            max_frame_delta: normalize_non_zero_duration(
                config.max_frame_delta,
                Duration::from_millis(250),
            ),
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            render_frame_target: target_frame_duration(normalize_render_fps_cap(
                config.max_render_fps,
            )),
            accumulator: Duration::ZERO,
            last_frame: now,
            last_present: now,
        }
    }

    /// Returns the raw frame delta and the ticks owed for it. A backlog that
    /// the tick cap cannot absorb is dropped rather than carried forward.
    fn begin_frame(&mut self, now: Instant) -> (Duration, StepPlan) {
        let raw_frame_dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        let clamped = raw_frame_dt.min(self.max_frame_delta);
        self.accumulator = self.accumulator.saturating_add(clamped);

        let mut ticks_to_run = 0u32;
        while self.accumulator >= self.fixed_dt && ticks_to_run < self.max_ticks_per_frame {
            self.accumulator -= self.fixed_dt;
            ticks_to_run += 1;
        }
        let dropped_backlog = if self.accumulator >= self.fixed_dt {
            std::mem::take(&mut self.accumulator)
        } else {
            Duration::ZERO
        };
        (
            raw_frame_dt,
            StepPlan {
                ticks_to_run,
                dropped_backlog,
            },
        )
    }

    fn cap_sleep(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_present);
        match self.render_frame_target {
            Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
            _ => Duration::ZERO,
        }
    }

    fn mark_presented(&mut self, now: Instant) {
        self.last_present = now;
    }
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    parse_slow_frame_override(env::var(SLOW_FRAME_ENV_VAR), config_slow_frame_ms)
}

fn parse_slow_frame_override(
    raw: Result<String, env::VarError>,
    config_slow_frame_ms: u64,
) -> Duration {
    match raw {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(
                    env_var = SLOW_FRAME_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-frame env var value; falling back to config"
                );
                Duration::from_millis(config_slow_frame_ms)
            }
        },
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}
