//! CPU rasterisation of the stroke list into a single image.
//!
//! Strokes are composited in list order with round caps and joins. Pen
//! strokes paint source-over; brush-eraser strokes punch holes
//! (destination-out) into everything painted before them.

use egui::{Color32, ColorImage, Rect, Vec2, pos2};

use crate::geometry::{points_bounds, segment_squared_distance};
use crate::stroke::{Stroke, StrokeRef};

/// Premultiplied RGBA in `0..=1`.
type Pixel = [f32; 4];

/// Rasterise `strokes` into an image of `size` pixels.
///
/// Pixel `(x, y)` samples the world point `(x + 0.5, y + 0.5) - pan_offset`.
pub fn rasterize(strokes: &[StrokeRef], size: [usize; 2], pan_offset: Vec2) -> ColorImage {
    let [width, height] = size;
    let mut pixels: Vec<Pixel> = vec![[0.0; 4]; width * height];
    let mut coverage = Coverage::default();

    for stroke in strokes {
        composite_stroke(&mut pixels, &mut coverage, size, pan_offset, stroke);
    }

    ColorImage {
        size,
        pixels: pixels.into_iter().map(to_color32).collect(),
    }
}

/// Integer pixel box, half open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PixelBox {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl PixelBox {
    /// Pixels touched by `rect` (screen space), clipped to the image.
    fn clipped(rect: Rect, size: [usize; 2]) -> Self {
        Self {
            x0: (rect.min.x.floor().max(0.0) as usize).min(size[0]),
            y0: (rect.min.y.floor().max(0.0) as usize).min(size[1]),
            x1: (rect.max.x.ceil().max(0.0) as usize).min(size[0]),
            y1: (rect.max.y.ceil().max(0.0) as usize).min(size[1]),
        }
    }

    fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Scratch coverage of one stroke over its clipped screen box, reused between
/// strokes.
#[derive(Debug, Default)]
struct Coverage {
    area: PixelBox,
    values: Vec<f32>,
}

impl Coverage {
    fn reset(&mut self, area: PixelBox) {
        self.area = area;
        self.values.clear();
        self.values.resize(area.width() * area.height(), 0.0);
    }

    /// Keep the larger coverage, so joints between segments never paint twice.
    fn raise(&mut self, x: usize, y: usize, value: f32) {
        let index = (y - self.area.y0) * self.area.width() + (x - self.area.x0);
        let slot = &mut self.values[index];
        if value > *slot {
            *slot = value;
        }
    }

    fn get(&self, x: usize, y: usize) -> f32 {
        self.values[(y - self.area.y0) * self.area.width() + (x - self.area.x0)]
    }
}

fn composite_stroke(
    pixels: &mut [Pixel],
    coverage: &mut Coverage,
    size: [usize; 2],
    pan_offset: Vec2,
    stroke: &Stroke,
) {
    let Some(bounds) = points_bounds(stroke.points()) else {
        return;
    };
    let radius = stroke.width() / 2.0;
    // One extra pixel for the anti-aliased edge
    let reach = radius + 1.0;

    let area = PixelBox::clipped(bounds.translate(pan_offset).expand(reach), size);
    if area.is_empty() {
        return;
    }
    coverage.reset(area);

    // Each segment only visits the pixels of its own padded box
    let points = stroke.points();
    let segments = points.windows(2).map(|pair| (pair[0], pair[1]));
    let dot = (points.len() == 1).then(|| (points[0], points[0]));
    for (a, b) in segments.chain(dot) {
        let segment = Rect::from_two_pos(a, b).translate(pan_offset).expand(reach);
        let segment_area = PixelBox::clipped(segment, size);
        for y in segment_area.y0..segment_area.y1 {
            for x in segment_area.x0..segment_area.x1 {
                let world = pos2(x as f32 + 0.5, y as f32 + 0.5) - pan_offset;
                let distance = segment_squared_distance(world, a, b).sqrt();
                let value = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if value > 0.0 {
                    coverage.raise(x, y, value);
                }
            }
        }
    }

    let source = premultiplied(stroke.color());
    for y in area.y0..area.y1 {
        for x in area.x0..area.x1 {
            let amount = coverage.get(x, y);
            if amount <= 0.0 {
                continue;
            }

            let dst = &mut pixels[y * size[0] + x];
            if stroke.is_eraser() {
                for channel in dst.iter_mut() {
                    *channel *= 1.0 - amount;
                }
            } else {
                let src = source.map(|c| c * amount);
                let keep = 1.0 - src[3];
                for (d, s) in dst.iter_mut().zip(src) {
                    *d = s + *d * keep;
                }
            }
        }
    }
}

fn premultiplied(color: Color32) -> Pixel {
    let [r, g, b, a] = color.to_array();
    [r, g, b, a].map(|c| c as f32 / 255.0)
}

fn to_color32(pixel: Pixel) -> Color32 {
    let [r, g, b, a] = pixel.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgba_premultiplied(r, g, b, a)
}
