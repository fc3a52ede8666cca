use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::types::{event_kind, SimEvent};
use crate::core::particle::Particle;
use crate::core::physics::{self, GravityParams, StepReport};
use crate::core::spawn::{SpawnController, SpawnRequest, SpawnTable};
use crate::core::store::ParticleStore;
use crate::input::interaction::{DragLine, DragPhase, Interaction, KeyAction, KeyBindings, Modes};
use crate::input::queue::{InputEvent, InputQueue, PointerButton};

/// Store changes requested by input, applied in arrival order at the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Spawn(SpawnRequest),
    Clear,
}

/// Mutable simulation state for one session.
///
/// Input events update the interaction state immediately and queue spawn
/// and clear requests; `tick` applies queued requests in order and then
/// runs one force pass.
pub struct SimContext {
    pub store: ParticleStore,
    pub interaction: Interaction,
    pub events: Vec<SimEvent>,
    spawner: SpawnController,
    gravity: GravityParams,
    keys: KeyBindings,
    pending: Vec<Pending>,
    absorbed_frame: usize,
    absorbed_total: u64,
    ticks: u64,
    terminated: bool,
}

impl SimContext {
    pub fn new(config: &SimConfig) -> Self {
        let mut ctx = Self {
            store: ParticleStore::new(),
            interaction: Interaction::new(),
            events: Vec::new(),
            spawner: SpawnController::new(config.spawn.clone(), config.seed),
            gravity: config.gravity,
            keys: config.keys,
            pending: Vec::new(),
            absorbed_frame: 0,
            absorbed_total: 0,
            ticks: 0,
            terminated: false,
        };
        if config.seed_anchor {
            let anchor = ctx.spawner.anchor(Vec2::ZERO, config.seed_anchor_color);
            ctx.store.push(anchor);
        }
        log::info!(
            "simulation ready: {} particle(s), G = {}",
            ctx.store.len(),
            ctx.gravity.g
        );
        ctx
    }

    /// Apply one input event. Ignored once the session has terminated.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if self.terminated {
            return;
        }
        match *event {
            InputEvent::PointerDown { button, x, y } => {
                if button == PointerButton::Middle {
                    self.pending.push(Pending::Clear);
                }
                if let Some(request) = self.interaction.pointer_down(button, Vec2::new(x, y)) {
                    self.pending.push(Pending::Spawn(request));
                }
            }
            InputEvent::PointerUp { button, x, y } => {
                if let Some(request) = self.interaction.pointer_up(button, Vec2::new(x, y)) {
                    self.pending.push(Pending::Spawn(request));
                }
            }
            InputEvent::PointerMove { x, y } => {
                self.interaction.pointer_move(Vec2::new(x, y));
            }
            InputEvent::KeyDown { key_code } => {
                if let Some(KeyAction::Exit) = self.interaction.key_down(&self.keys, key_code) {
                    self.request_exit();
                }
            }
        }
    }

    /// Apply every event in the queue, in order.
    pub fn apply_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            self.handle_event(event);
        }
    }

    /// One simulation tick: queued spawns and clears in arrival order, a
    /// clear while the middle button is held, then the force pass.
    pub fn tick(&mut self) -> StepReport {
        if self.terminated {
            return StepReport::default();
        }

        for pending in std::mem::take(&mut self.pending) {
            match pending {
                Pending::Spawn(request) => self.spawn(&request),
                Pending::Clear => self.spawner.clear_all(&mut self.store),
            }
        }
        if self.interaction.buttons.is_held(PointerButton::Middle) {
            self.spawner.clear_all(&mut self.store);
        }

        let report = physics::step(&mut self.store, &self.gravity);
        self.absorbed_frame += report.absorbed;
        self.absorbed_total += report.absorbed as u64;
        self.ticks += 1;
        report
    }

    /// Append a particle now. Every spawn resets the drag line.
    pub fn spawn(&mut self, request: &SpawnRequest) {
        if self.terminated {
            return;
        }
        self.spawner.spawn(&mut self.store, request);
        self.interaction.drag.clear();
    }

    /// Append a particle from raw parameters now. Clears the drag line
    /// like every other spawn.
    pub fn spawn_custom(
        &mut self,
        pos: Vec2,
        mass: f32,
        radius: f32,
        randomize_color: bool,
        launch: Vec2,
    ) {
        if self.terminated {
            return;
        }
        self.spawner
            .spawn_custom(&mut self.store, pos, mass, radius, randomize_color, launch);
        self.interaction.drag.clear();
    }

    pub fn clear_all(&mut self) {
        self.spawner.clear_all(&mut self.store);
        self.pending.clear();
    }

    /// Clear the store and stop the session. The host sees an exit event
    /// carrying exit code 0.
    pub fn request_exit(&mut self) {
        if self.terminated {
            return;
        }
        self.clear_all();
        self.interaction.reset();
        self.terminated = true;
        self.events
            .push(SimEvent::new(event_kind::EXIT, 0.0, 0.0, 0.0));
        log::info!("exit requested after {} tick(s)", self.ticks);
    }

    /// Push the per-frame summary events.
    pub fn emit_frame_events(&mut self) {
        let anchors = self
            .store
            .iter()
            .filter(|p| p.is_anchor(self.gravity.anchor_mass))
            .count();
        self.events.push(SimEvent::new(
            event_kind::PARTICLE_COUNT,
            self.store.len() as f32,
            anchors as f32,
            0.0,
        ));
        if self.absorbed_frame > 0 {
            self.events.push(SimEvent::new(
                event_kind::ABSORBED,
                self.absorbed_frame as f32,
                self.absorbed_total as f32,
                0.0,
            ));
        }
        let modes = self.interaction.modes;
        let dragging = self.interaction.phase == DragPhase::Dragging;
        self.events.push(SimEvent::new(
            event_kind::MODES,
            flag(modes.drag_launch),
            flag(modes.show_velocity),
            flag(dragging),
        ));
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.absorbed_frame = 0;
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    pub fn modes(&self) -> Modes {
        self.interaction.modes
    }

    pub fn drag_line(&self) -> DragLine {
        self.interaction.drag
    }

    pub fn gravity(&self) -> &GravityParams {
        &self.gravity
    }

    pub fn spawn_table(&self) -> &SpawnTable {
        self.spawner.table()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn absorbed_total(&self) -> u64 {
        self.absorbed_total
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> SimContext {
        let config = SimConfig {
            seed_anchor: false,
            ..SimConfig::default()
        };
        SimContext::new(&config)
    }

    fn down(button: PointerButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { button, x, y }
    }

    fn up(button: PointerButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { button, x, y }
    }

    #[test]
    fn session_starts_with_yellow_anchor() {
        let ctx = SimContext::new(&SimConfig::default());
        assert_eq!(ctx.particles().len(), 1);
        let anchor = ctx.particles()[0];
        assert_eq!(anchor.pos, Vec2::ZERO);
        assert_eq!(anchor.mass, 10000.0);
        assert_eq!(anchor.radius, 10.0);
        assert_eq!(anchor.color, crate::core::particle::ParticleColor::YELLOW);
    }

    #[test]
    fn click_spawns_tiny_on_next_tick() {
        let mut ctx = empty();
        ctx.handle_event(&down(PointerButton::Left, 50.0, 50.0));
        assert!(ctx.particles().is_empty());

        ctx.tick();
        assert_eq!(ctx.particles().len(), 1);
        let p = ctx.particles()[0];
        assert_eq!(p.mass, 10.0);
        assert_eq!(p.radius, 3.0);
        assert_eq!(p.pos, Vec2::new(50.0, 50.0));
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn drag_release_launches_with_scaled_velocity() {
        let mut ctx = empty();
        ctx.handle_event(&InputEvent::KeyDown { key_code: 's' as u32 });
        ctx.handle_event(&down(PointerButton::Left, 0.0, 0.0));
        ctx.handle_event(&InputEvent::PointerMove { x: 30.0, y: 0.0 });
        assert_eq!(ctx.drag_line().to_array(), [0.0, 0.0, 30.0, 0.0]);
        ctx.handle_event(&up(PointerButton::Left, 30.0, 0.0));

        ctx.tick();
        let p = ctx.particles()[0];
        assert_eq!(p.mass, 100.0);
        assert_eq!(p.radius, 5.0);
        assert!((p.vel.x - (-0.1)).abs() < 1e-6);
        assert_eq!(p.vel.y, 0.0);
        // One tick of drift with nothing to attract it.
        assert!((p.pos.x - 29.9).abs() < 1e-4);
        assert_eq!(ctx.drag_line(), DragLine::ZERO);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut ctx = SimContext::new(&SimConfig::default());
        ctx.clear_all();
        assert!(ctx.particles().is_empty());
        ctx.clear_all();
        assert!(ctx.particles().is_empty());
    }

    #[test]
    fn middle_held_clears_each_tick() {
        let mut ctx = SimContext::new(&SimConfig::default());
        ctx.handle_event(&down(PointerButton::Middle, 0.0, 0.0));
        ctx.tick();
        assert!(ctx.particles().is_empty());

        ctx.spawn(&SpawnRequest::tiny(Vec2::new(10.0, 10.0)));
        ctx.tick();
        assert!(ctx.particles().is_empty());

        ctx.handle_event(&up(PointerButton::Middle, 0.0, 0.0));
        ctx.spawn(&SpawnRequest::tiny(Vec2::new(10.0, 10.0)));
        ctx.tick();
        assert_eq!(ctx.particles().len(), 1);
    }

    #[test]
    fn clear_then_click_in_one_batch_keeps_new_particle() {
        let mut ctx = SimContext::new(&SimConfig::default());
        let mut queue = InputQueue::new();
        queue.push(down(PointerButton::Middle, 0.0, 0.0));
        queue.push(up(PointerButton::Middle, 0.0, 0.0));
        queue.push(down(PointerButton::Left, 50.0, 50.0));
        ctx.apply_input(&queue);

        ctx.tick();
        assert_eq!(ctx.particles().len(), 1);
        assert_eq!(ctx.particles()[0].mass, 10.0);
    }

    #[test]
    fn click_then_clear_in_one_batch_drops_it() {
        let mut ctx = empty();
        ctx.handle_event(&down(PointerButton::Left, 50.0, 50.0));
        ctx.handle_event(&down(PointerButton::Middle, 0.0, 0.0));
        ctx.handle_event(&up(PointerButton::Middle, 0.0, 0.0));

        ctx.tick();
        assert!(ctx.particles().is_empty());
    }

    #[test]
    fn custom_spawn_lands_now_and_clears_drag_line() {
        let mut ctx = empty();
        ctx.handle_event(&InputEvent::KeyDown { key_code: 's' as u32 });
        ctx.handle_event(&down(PointerButton::Left, 0.0, 0.0));
        ctx.handle_event(&InputEvent::PointerMove { x: 30.0, y: 0.0 });
        assert_ne!(ctx.drag_line(), DragLine::ZERO);

        ctx.spawn_custom(Vec2::new(-40.0, 0.0), 10000.0, 10.0, false, Vec2::new(-30.0, 0.0));
        assert_eq!(ctx.particles().len(), 1);
        let p = ctx.particles()[0];
        assert_eq!(p.color, crate::core::particle::ParticleColor::RED);
        assert!((p.vel.x - (-0.1)).abs() < 1e-6);
        assert_eq!(ctx.drag_line(), DragLine::ZERO);
    }

    #[test]
    fn escape_clears_and_terminates() {
        let mut ctx = SimContext::new(&SimConfig::default());
        ctx.spawn(&SpawnRequest::tiny(Vec2::new(100.0, 0.0)));
        ctx.handle_event(&InputEvent::KeyDown { key_code: 27 });

        assert!(ctx.is_terminated());
        assert!(ctx.particles().is_empty());
        assert_eq!(ctx.events, vec![SimEvent::new(event_kind::EXIT, 0.0, 0.0, 0.0)]);

        ctx.handle_event(&down(PointerButton::Left, 5.0, 5.0));
        assert_eq!(ctx.tick(), StepReport::default());
        assert!(ctx.particles().is_empty());
    }

    #[test]
    fn anchor_never_moves_across_ticks() {
        let mut ctx = SimContext::new(&SimConfig::default());
        ctx.spawn(&SpawnRequest::tiny(Vec2::new(100.0, 0.0)));
        for _ in 0..50 {
            ctx.tick();
        }
        assert_eq!(ctx.particles()[0].pos, Vec2::ZERO);
        assert_eq!(ctx.particles()[0].vel, Vec2::ZERO);
        assert_eq!(ctx.tick_count(), 50);
    }

    #[test]
    fn tiny_falls_into_anchor_and_is_counted() {
        let mut ctx = SimContext::new(&SimConfig::default());
        ctx.spawn(&SpawnRequest::tiny(Vec2::new(5.0, 0.0)));
        let report = ctx.tick();
        assert_eq!(report.absorbed, 1);
        assert_eq!(ctx.particles().len(), 1);
        assert_eq!(ctx.absorbed_total(), 1);

        ctx.emit_frame_events();
        assert!(ctx
            .events
            .contains(&SimEvent::new(event_kind::ABSORBED, 1.0, 1.0, 0.0)));
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn frame_events_report_counts_and_modes() {
        let mut ctx = SimContext::new(&SimConfig::default());
        ctx.handle_event(&InputEvent::KeyDown { key_code: 'w' as u32 });
        ctx.emit_frame_events();
        assert_eq!(
            ctx.events,
            vec![
                SimEvent::new(event_kind::PARTICLE_COUNT, 1.0, 1.0, 0.0),
                SimEvent::new(event_kind::MODES, 0.0, 1.0, 0.0),
            ]
        );
    }

    #[test]
    fn apply_input_runs_events_in_order() {
        let mut ctx = empty();
        let mut queue = InputQueue::new();
        queue.push(down(PointerButton::Right, -20.0, 0.0));
        queue.push(down(PointerButton::Left, 20.0, 0.0));
        ctx.apply_input(&queue);
        ctx.tick();
        assert_eq!(ctx.particles().len(), 2);
        assert_eq!(ctx.particles()[0].mass, 10000.0);
        assert_eq!(ctx.particles()[1].mass, 10.0);
    }
}
