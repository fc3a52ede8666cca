/// Shared float buffer layout read by the host page.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Circles: max_circles × 8 floats]
/// [Drag line: 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::config::SimConfig;
use crate::api::types::SimEvent;
use crate::input::interaction::{DragLine, Modes};
use crate::input::viewport::Viewport;
use crate::renderer::instance::CircleInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_MAX_CIRCLES: usize = 1;
pub const HEADER_CIRCLE_COUNT: usize = 2;
pub const HEADER_MAX_EVENTS: usize = 3;
pub const HEADER_EVENT_COUNT: usize = 4;
pub const HEADER_VIEWPORT_WIDTH: usize = 5;
pub const HEADER_VIEWPORT_HEIGHT: usize = 6;
pub const HEADER_DRAG_LAUNCH: usize = 7;
pub const HEADER_SHOW_VELOCITY: usize = 8;
pub const HEADER_TERMINATED: usize = 9;
pub const HEADER_LABEL_COUNT: usize = 10;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;
/// Slots after this one are reserved and written as zero.
pub const HEADER_FIELDS: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per circle: x, y, radius, r, g, b, speed, pad.
pub const CIRCLE_FLOATS: usize = CircleInstance::FLOATS;

/// Floats in the drag line section: x1, y1, x2, y2.
pub const LINE_FLOATS: usize = 4;

/// Floats per event: kind, a, b, c.
pub const EVENT_FLOATS: usize = SimEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_circles: usize,
    pub max_events: usize,

    /// Size of circle data section in floats.
    pub circle_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where circle data begins.
    pub circle_data_offset: usize,
    /// Offset (in floats) of the drag line.
    pub line_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Per-frame scalars written into the header alongside the sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameHeader {
    pub frame_counter: u32,
    pub viewport: Viewport,
    pub modes: Modes,
    pub terminated: bool,
    pub label_count: usize,
    pub vector_vertex_count: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_circles: usize, max_events: usize) -> Self {
        let circle_data_floats = max_circles * CIRCLE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let circle_data_offset = HEADER_FLOATS;
        let line_data_offset = circle_data_offset + circle_data_floats;
        let event_data_offset = line_data_offset + LINE_FLOATS;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_circles,
            max_events,
            circle_data_floats,
            event_data_floats,
            circle_data_offset,
            line_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_circles, config.max_events)
    }

    /// Write one frame into `out`, resizing it to the full buffer length.
    /// Circles and events beyond capacity are dropped; the header counts
    /// reflect what was written.
    pub fn write_frame(
        &self,
        out: &mut Vec<f32>,
        header: &FrameHeader,
        circles: &[CircleInstance],
        line: &DragLine,
        events: &[SimEvent],
    ) {
        out.clear();
        out.resize(self.buffer_total_floats, 0.0);

        let circle_count = circles.len().min(self.max_circles);
        let event_count = events.len().min(self.max_events);

        let circle_floats: &[f32] = bytemuck::cast_slice(&circles[..circle_count]);
        out[self.circle_data_offset..self.circle_data_offset + circle_floats.len()]
            .copy_from_slice(circle_floats);

        out[self.line_data_offset..self.line_data_offset + LINE_FLOATS]
            .copy_from_slice(&line.to_array());

        let event_floats: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        out[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);

        out[HEADER_FRAME_COUNTER] = header.frame_counter as f32;
        out[HEADER_MAX_CIRCLES] = self.max_circles as f32;
        out[HEADER_CIRCLE_COUNT] = circle_count as f32;
        out[HEADER_MAX_EVENTS] = self.max_events as f32;
        out[HEADER_EVENT_COUNT] = event_count as f32;
        out[HEADER_VIEWPORT_WIDTH] = header.viewport.width;
        out[HEADER_VIEWPORT_HEIGHT] = header.viewport.height;
        out[HEADER_DRAG_LAUNCH] = bool_float(header.modes.drag_launch);
        out[HEADER_SHOW_VELOCITY] = bool_float(header.modes.show_velocity);
        out[HEADER_TERMINATED] = bool_float(header.terminated);
        out[HEADER_LABEL_COUNT] = header.label_count as f32;
        out[HEADER_VECTOR_VERTEX_COUNT] = header.vector_vertex_count as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}

fn bool_float(flag: bool) -> f32 {
    if flag {
        1.0
    } else {
        0.0
    }
}
