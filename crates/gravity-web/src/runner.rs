use gravity_engine::bridge::protocol::{FrameHeader, ProtocolLayout};
use gravity_engine::systems::render::build_circle_buffer;
use gravity_engine::{
    CircleBuffer, FixedTimestep, InputEvent, InputQueue, LabelSet, PointerButton, SimConfig,
    SimContext, Viewport,
};
#[cfg(feature = "vectors")]
use gravity_engine::VectorState;
use glam::Vec2;

/// Wires the simulation loop to the host page.
///
/// The wasm exports in `lib.rs` keep one of these in a `thread_local!`;
/// everything here is plain Rust so it can be driven from native tests.
pub struct SimRunner {
    ctx: SimContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: SimConfig,
    layout: ProtocolLayout,
    circles: CircleBuffer,
    labels: LabelSet,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    /// Flat copy of the whole frame in protocol layout.
    frame: Vec<f32>,
    frame_counter: u32,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let mut runner = Self {
            ctx: SimContext::new(&config),
            input: InputQueue::new(),
            timestep: FixedTimestep::new(config.tick_dt, config.max_ticks_per_frame),
            circles: CircleBuffer::with_capacity(config.max_circles),
            labels: LabelSet::new(),
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
            frame: Vec::with_capacity(layout.buffer_total_floats),
            frame_counter: 0,
            layout,
            config,
        };
        runner.build_frame();
        runner
    }

    /// Replace the configuration from JSON and restart the session.
    /// A malformed document is logged and the current session kept.
    pub fn load_config(&mut self, json: &str) {
        match SimConfig::from_json(json) {
            Ok(config) => {
                log::info!(
                    "config loaded: viewport {}x{}, dt {}",
                    config.viewport.width,
                    config.viewport.height,
                    config.tick_dt
                );
                *self = Self::new(config);
            }
            Err(e) => {
                log::error!("failed to parse config: {}", e);
            }
        }
    }

    fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    // ---- Input (pixel coordinates, origin top-left) ----

    pub fn pointer_down(&mut self, button: u32, px: f32, py: f32) {
        let Some(button) = PointerButton::from_code(button) else {
            log::debug!("ignoring pointer button {}", button);
            return;
        };
        let at = self.viewport().to_centered(px, py);
        self.input.push(InputEvent::PointerDown { button, x: at.x, y: at.y });
    }

    pub fn pointer_up(&mut self, button: u32, px: f32, py: f32) {
        let Some(button) = PointerButton::from_code(button) else {
            return;
        };
        let at = self.viewport().to_centered(px, py);
        self.input.push(InputEvent::PointerUp { button, x: at.x, y: at.y });
    }

    pub fn pointer_move(&mut self, px: f32, py: f32) {
        let at = self.viewport().to_centered(px, py);
        self.input.push(InputEvent::PointerMove { x: at.x, y: at.y });
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.input.push(InputEvent::KeyDown { key_code });
    }

    /// Spawn a particle from raw parameters at a pixel position, right away
    /// rather than at the next tick.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_custom(
        &mut self,
        px: f32,
        py: f32,
        mass: f32,
        radius: f32,
        randomize_color: bool,
        launch_x: f32,
        launch_y: f32,
    ) {
        let at = self.viewport().to_centered(px, py);
        self.ctx
            .spawn_custom(at, mass, radius, randomize_color, Vec2::new(launch_x, launch_y));
        self.build_frame();
    }

    /// Run one frame: apply queued input, run the ticks the elapsed time
    /// allows, then rebuild every render section.
    pub fn tick(&mut self, dt: f32) {
        if self.ctx.is_terminated() {
            self.input.clear();
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.ctx.apply_input(&self.input);
        self.input.clear();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.tick();
        }

        self.ctx.emit_frame_events();
        self.build_frame();
    }

    fn build_frame(&mut self) {
        build_circle_buffer(self.ctx.particles().iter(), &mut self.circles);
        self.labels.rebuild(
            self.ctx.particles(),
            self.ctx.spawn_table(),
            self.ctx.modes().show_velocity,
        );
        #[cfg(feature = "vectors")]
        self.vectors.rebuild_overlay(&self.ctx.drag_line());

        let header = FrameHeader {
            frame_counter: self.frame_counter,
            viewport: self.config.viewport,
            modes: self.ctx.modes(),
            terminated: self.ctx.is_terminated(),
            label_count: self.labels.len(),
            vector_vertex_count: self.vector_vertex_count() as usize,
        };
        self.layout.write_frame(
            &mut self.frame,
            &header,
            self.circles.instances(),
            &self.ctx.drag_line(),
            &self.ctx.events,
        );
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn is_terminated(&self) -> bool {
        self.ctx.is_terminated()
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn circles_ptr(&self) -> *const f32 {
        self.circles.instances_ptr()
    }

    pub fn circle_count(&self) -> u32 {
        self.circles.instance_count() as u32
    }

    pub fn drag_line(&self) -> [f32; 4] {
        self.ctx.drag_line().to_array()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn label_layout_ptr(&self) -> *const f32 {
        self.labels.layout_ptr()
    }

    pub fn label_count(&self) -> u32 {
        self.labels.len() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    #[cfg(not(feature = "vectors"))]
    pub fn vector_vertex_count(&self) -> u32 {
        0
    }

    pub fn viewport_width(&self) -> f32 {
        self.config.viewport.width
    }

    pub fn viewport_height(&self) -> f32 {
        self.config.viewport.height
    }

    // ---- Capacity accessors ----

    pub fn max_circles(&self) -> u32 {
        self.layout.max_circles as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

impl Default for SimRunner {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
