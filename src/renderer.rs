use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use egui::{Color32, Context, Painter, Pos2, Rect, Shape, Stroke as PaintStroke, TextureHandle, TextureOptions, Vec2};
use log::debug;

use crate::raster::rasterize;
use crate::stroke::{StrokeId, StrokeRef};

pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 105, 179, 179);
pub const SELECTION_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 120, 204, 204);
pub const LASSO_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 135, 230, 230);

/// Extra width of the hover outline over the stroke it marks.
const HIGHLIGHT_EXTRA_WIDTH: f32 = 4.0;

/// Everything needed to draw one frame of the board.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    /// Strokes to draw, bottom to top.
    pub strokes: Vec<StrokeRef>,
    pub pan_offset: Vec2,
    /// Fill under the strokes; `None` leaves the surface see-through.
    pub background: Option<Color32>,
    /// Padded bounding box of the selection, world space.
    pub selection_box: Option<Rect>,
    pub lasso_path: Option<Vec<Pos2>>,
    pub highlighted: Option<StrokeId>,
}

impl RenderFrame {
    /// Identity of the rasterised content. Strokes are compared by allocation
    /// and point count, so a stroke growing in place still changes the key.
    fn raster_key(&self, size: [usize; 2]) -> u64 {
        let mut hasher = DefaultHasher::new();
        size.hash(&mut hasher);
        self.pan_offset.x.to_bits().hash(&mut hasher);
        self.pan_offset.y.to_bits().hash(&mut hasher);
        for stroke in &self.strokes {
            (Arc::as_ptr(stroke) as usize).hash(&mut hasher);
            stroke.points().len().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Overlay shapes (highlight, selection box, lasso) positioned for a
    /// canvas whose top-left corner is `origin`.
    pub fn overlay_shapes(&self, origin: Pos2) -> Vec<Shape> {
        let offset = origin.to_vec2() + self.pan_offset;
        let mut shapes = Vec::new();

        if let Some(stroke) = self
            .highlighted
            .and_then(|id| self.strokes.iter().find(|s| s.id() == id))
        {
            let points: Vec<Pos2> = stroke.points().iter().map(|p| *p + offset).collect();
            let outline = PaintStroke::new(stroke.width() + HIGHLIGHT_EXTRA_WIDTH, HIGHLIGHT_COLOR);
            match points.as_slice() {
                [only] => shapes.push(Shape::circle_filled(*only, outline.width / 2.0, HIGHLIGHT_COLOR)),
                _ => shapes.push(Shape::line(points, outline)),
            }
        }

        if let Some(rect) = self.selection_box {
            let rect = rect.translate(offset);
            let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom(), rect.left_top()];
            shapes.extend(Shape::dashed_line(&corners, PaintStroke::new(1.0, SELECTION_COLOR), 4.0, 4.0));
        }

        if let Some(path) = self.lasso_path.as_deref().filter(|path| !path.is_empty()) {
            let points: Vec<Pos2> = path.iter().map(|p| *p + offset).collect();
            shapes.extend(Shape::dashed_line(&points, PaintStroke::new(1.0, LASSO_COLOR), 6.0, 6.0));
        }

        shapes
    }
}

/// Paints [`RenderFrame`]s, keeping the rasterised strokes in a texture that is
/// only rebuilt when the strokes, pan or canvas size change.
pub struct Renderer {
    ctx: Context,
    texture: Option<TextureHandle>,
    raster_key: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("raster_key", &self.raster_key)
            .finish()
    }
}

impl Renderer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            texture: None,
            raster_key: None,
        }
    }

    /// Paint `frame` into `rect`: background, strokes, then overlays.
    pub fn render(&mut self, painter: &Painter, rect: Rect, frame: &RenderFrame) {
        if let Some(fill) = frame.background {
            painter.rect_filled(rect, 0.0, fill);
        }

        let size = [rect.width().ceil().max(0.0) as usize, rect.height().ceil().max(0.0) as usize];
        if size[0] > 0 && size[1] > 0 {
            let texture = self.texture_for(frame, size);
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            let image_rect = Rect::from_min_size(rect.min, Vec2::new(size[0] as f32, size[1] as f32));
            painter.image(texture.id(), image_rect, uv, Color32::WHITE);
        }

        painter.extend(frame.overlay_shapes(rect.min));
    }

    fn texture_for(&mut self, frame: &RenderFrame, size: [usize; 2]) -> &TextureHandle {
        let key = frame.raster_key(size);
        let stale = self.raster_key != Some(key);
        self.raster_key = Some(key);

        if let Some(texture) = &mut self.texture {
            if stale {
                texture.set(rasterize(&frame.strokes, size, frame.pan_offset), TextureOptions::LINEAR);
            }
        }

        let ctx = &self.ctx;
        self.texture.get_or_insert_with(|| {
            debug!("Creating board texture {}x{}", size[0], size[1]);
            ctx.load_texture("board", rasterize(&frame.strokes, size, frame.pan_offset), TextureOptions::LINEAR)
        })
    }
}
