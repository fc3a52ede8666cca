//! Lyon-based vector overlay.
//!
//! Tessellates the legend panel and the launch preview line on the CPU into
//! a flat triangle-list vertex buffer the host draws over the circles.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::core::particle::ParticleColor;
use crate::input::interaction::DragLine;
use crate::systems::labels::{INFO_BOX_COLOR, INFO_BOX_MAX, INFO_BOX_MIN};

/// Per-vertex data for the overlay.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for vector drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
}

impl From<ParticleColor> for VectorColor {
    fn from(c: ParticleColor) -> Self {
        Self::rgb(c.r, c.g, c.b)
    }
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Launch preview line color.
pub const DRAG_LINE_COLOR: VectorColor = VectorColor::BLUE;
/// Launch preview line width in pixels.
pub const DRAG_LINE_WIDTH: f32 = 1.0;

struct FillVertexCtor {
    color: VectorColor,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Lyon tessellators and the output vertex buffer.
/// Cleared each frame and populated by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(256 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn as_floats(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Fill the axis-aligned rectangle spanning `min..max`.
    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: VectorColor) {
        if max.x <= min.x || max.y <= min.y {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(min.x, min.y));
        builder.line_to(point(max.x, min.y));
        builder.line_to(point(max.x, max.y));
        builder.line_to(point(min.x, max.y));
        builder.close();
        let path = builder.build();

        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("fill tessellation failed: {:?}", e),
        }
    }

    /// Stroke the segment `from..to`. A zero-length segment draws nothing.
    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: VectorColor) {
        if from == to || width <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.line_to(point(to.x, to.y));
        builder.end(false);
        let path = builder.build();

        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("stroke tessellation failed: {:?}", e),
        }
    }

    /// Rebuild the overlay for one frame: legend panel, then the launch line.
    pub fn rebuild_overlay(&mut self, line: &DragLine) {
        self.clear();
        self.fill_rect(INFO_BOX_MIN, INFO_BOX_MAX, INFO_BOX_COLOR.into());
        self.stroke_line(line.start, line.end, DRAG_LINE_WIDTH, DRAG_LINE_COLOR);
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
