use cairo::{Context, Format, ImageSurface};
use indexmap::IndexMap;
use pango::FontDescription;
use tracing::trace;

use crate::core::{ScenePoint, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::layout::Container;
use crate::render::{
    CanvasHandle, Color, Drawable, DrawableId, LineStrokeStyle, SceneNode, SceneRenderer,
    TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub shapes_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can paint their retained scene
/// into an external Cairo context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo scene backend.
///
/// Keeps its nodes in insertion order and repaints them all on every frame,
/// lowest layer first. Scene space is y-up; the surface is y-down, so every
/// y coordinate is flipped against the surface height.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    viewport: Viewport,
    nodes: IndexMap<DrawableId, SceneNode>,
    removed: Vec<DrawableId>,
    next_id: u64,
    next_canvas: u64,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        let viewport = Viewport::new(width, height);
        let surface = create_surface(viewport)?;
        Ok(Self {
            surface,
            viewport,
            nodes: IndexMap::new(),
            removed: Vec::new(),
            next_id: 0,
            next_canvas: 0,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn flip(&self, y: f64) -> f64 {
        f64::from(self.viewport.height) - y
    }

    fn paint_scene(&mut self, context: &Context) -> ChartResult<()> {
        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut ordered: Vec<&SceneNode> = self.nodes.values().collect();
        ordered.sort_by_key(|node| node.layer);

        let mut stats = CairoRenderStats::default();
        for node in ordered {
            self.paint_drawable(context, &node.drawable, &mut stats)?;
        }
        trace!(
            lines = stats.lines_drawn,
            shapes = stats.shapes_drawn,
            texts = stats.texts_drawn,
            "cairo frame"
        );
        self.last_stats = stats;
        Ok(())
    }

    fn paint_drawable(
        &self,
        context: &Context,
        drawable: &Drawable,
        stats: &mut CairoRenderStats,
    ) -> ChartResult<()> {
        match drawable {
            Drawable::Line(line) => {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                match line.stroke_style {
                    LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
                    LineStrokeStyle::Dashed { dash, gap } => context.set_dash(&[dash, gap], 0.0),
                }
                context.move_to(line.x1, self.flip(line.y1));
                context.line_to(line.x2, self.flip(line.y2));
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                context.set_dash(&[], 0.0);
                stats.lines_drawn += 1;
            }
            Drawable::Polyline(polyline) => {
                apply_color(context, polyline.color);
                context.set_line_width(polyline.stroke_width);
                self.append_path(context, &polyline.points);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
                stats.lines_drawn += 1;
            }
            Drawable::Rect(rect) => {
                apply_color(context, rect.fill_color);
                context.rectangle(rect.x, self.flip(rect.y + rect.height), rect.width, rect.height);
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                stats.shapes_drawn += 1;
            }
            Drawable::Polygon(polygon) => {
                apply_color(context, polygon.fill_color);
                self.append_path(context, &polygon.points);
                context.close_path();
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill polygon", err))?;
                stats.shapes_drawn += 1;
            }
            Drawable::Circle(circle) => {
                apply_color(context, circle.fill_color);
                context.new_sub_path();
                context.arc(
                    circle.center.x,
                    self.flip(circle.center.y),
                    circle.radius,
                    0.0,
                    std::f64::consts::TAU,
                );
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill circle", err))?;
                stats.shapes_drawn += 1;
            }
            Drawable::RingSector(sector) => {
                // Counter-clockwise in scene space is clockwise on the surface.
                let (start, end) = if sector.theta_length >= 0.0 {
                    (sector.theta_start, sector.theta_start + sector.theta_length)
                } else {
                    (sector.theta_start + sector.theta_length, sector.theta_start)
                };
                let cx = sector.center.x;
                let cy = self.flip(sector.center.y);
                apply_color(context, sector.fill_color);
                context.new_sub_path();
                context.arc_negative(cx, cy, sector.outer_radius, -start, -end);
                if sector.inner_radius > 0.0 {
                    context.arc(cx, cy, sector.inner_radius, -end, -start);
                } else {
                    context.line_to(cx, cy);
                }
                context.close_path();
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill ring sector", err))?;
                stats.shapes_drawn += 1;
            }
            Drawable::Text(text) => {
                let layout = pangocairo::functions::create_layout(context);
                let font_description =
                    FontDescription::from_string(&format!("Sans {}", text.font_size_px));
                layout.set_font_description(Some(&font_description));
                layout.set_text(&text.text);

                let (text_width, text_height) = layout.pixel_size();
                let x = match text.h_align {
                    TextHAlign::Left => text.x,
                    TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                    TextHAlign::Right => text.x - f64::from(text_width),
                };
                apply_color(context, text.color);
                context.move_to(x, self.flip(text.y) - f64::from(text_height) / 2.0);
                pangocairo::functions::show_layout(context, &layout);
                stats.texts_drawn += 1;
            }
        }
        Ok(())
    }

    fn append_path(&self, context: &Context, points: &[ScenePoint]) {
        context.new_path();
        for (index, point) in points.iter().enumerate() {
            if index == 0 {
                context.move_to(point.x, self.flip(point.y));
            } else {
                context.line_to(point.x, self.flip(point.y));
            }
        }
    }
}

impl SceneRenderer for CairoRenderer {
    fn attach(&mut self, container: &Container) -> ChartResult<CanvasHandle> {
        let size = container.resolved_size();
        self.set_viewport_size(size.width, size.height)?;
        self.next_canvas += 1;
        Ok(CanvasHandle {
            id: self.next_canvas,
            size,
        })
    }

    fn add(&mut self, node: SceneNode) -> ChartResult<DrawableId> {
        node.drawable.validate()?;
        self.next_id += 1;
        let id = DrawableId(self.next_id);
        self.nodes.insert(id, node);
        Ok(id)
    }

    fn remove(&mut self, id: DrawableId) -> bool {
        if self.nodes.shift_remove(&id).is_some() {
            self.removed.push(id);
            true
        } else {
            false
        }
    }

    fn dispose(&mut self, id: DrawableId) {
        self.removed.retain(|removed| *removed != id);
    }

    fn set_viewport_size(&mut self, width: u32, height: u32) -> ChartResult<()> {
        let viewport = Viewport::new(width, height);
        if viewport == self.viewport {
            return Ok(());
        }
        self.surface = create_surface(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    fn render_frame(&mut self) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.paint_scene(&context)
    }

    fn detach(&mut self) {
        self.nodes.clear();
        self.removed.clear();
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(&mut self, context: &Context) -> ChartResult<()> {
        self.paint_scene(context)
    }
}

fn create_surface(viewport: Viewport) -> ChartResult<ImageSurface> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let width = i32::try_from(viewport.width)
        .map_err(|_| ChartError::InvalidData("cairo surface width overflows i32".to_owned()))?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| ChartError::InvalidData("cairo surface height overflows i32".to_owned()))?;
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
