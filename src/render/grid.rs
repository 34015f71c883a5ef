use kurbo::{Point, Rect};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    color::{gradient::GradientTable, space::Srgb},
    config::RenderConfig,
    foundation::error::{SchotterError, SchotterResult},
    render::{
        geometry::{GridGeometry, linear_row_fraction, row_fraction},
        surface::DrawSurface,
    },
};

/// Everything needed to draw one cell. Transient; consumed by a single draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPlan {
    /// Row index, 0-based.
    pub row: u32,
    /// Column index, 0-based.
    pub col: u32,
    /// Top-left of the padded square before horizontal jitter.
    pub top_left: Point,
    /// Side of the padded square.
    pub size: f64,
    /// Rotation pivot.
    pub center: Point,
    /// Rotation about `center`, in degrees.
    pub rotation_degrees: f64,
    /// Horizontal jitter added to `top_left.x`.
    pub horizontal_offset: f64,
    /// Outline and fill colour.
    pub color: Srgb,
    /// Fill opacity. The outline is always opaque.
    pub fill_alpha: f64,
}

impl CellPlan {
    /// The jittered square in pre-rotation coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(
            (self.top_left.x + self.horizontal_offset, self.top_left.y),
            (self.size, self.size),
        )
    }
}

/// Draws the rows x columns grid of rotated, jittered, gradient-coloured squares.
///
/// Owns its random source so a fixed seed gives a fixed image. Each cell consumes two draws,
/// rotation first and offset second, in row-major order.
pub struct GridRenderer<'a, R = StdRng> {
    config: &'a RenderConfig,
    table: &'a GradientTable,
    geometry: GridGeometry,
    rng: R,
}

impl<'a> GridRenderer<'a, StdRng> {
    /// Renderer with a `StdRng` seeded from `seed`.
    pub fn new(
        config: &'a RenderConfig,
        table: &'a GradientTable,
        seed: u64,
    ) -> SchotterResult<Self> {
        Self::with_rng(config, table, StdRng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> GridRenderer<'a, R> {
    /// Renderer drawing from an arbitrary random source.
    pub fn with_rng(
        config: &'a RenderConfig,
        table: &'a GradientTable,
        rng: R,
    ) -> SchotterResult<Self> {
        config.validate()?;
        let geometry = GridGeometry::new(config)?;
        Ok(Self {
            config,
            table,
            geometry,
            rng,
        })
    }

    /// Derived grid layout.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Compute cell `(row, col)`, consuming two random draws.
    pub fn plan_cell(&mut self, row: u32, col: u32) -> CellPlan {
        let cfg = self.config;
        let g = &self.geometry;
        let cell_size = f64::from(g.cell_size);

        let progress = row_fraction(row, g.rows, cfg.use_exponential_row_scale);

        let max_rot = cfg.max_rotation_degrees;
        let rotation_degrees =
            progress * (self.rng.gen_range(0.0..1.0) * max_rot * 2.0 - max_rot);
        let horizontal_offset = cfg.max_offset_fraction
            * progress
            * (self.rng.gen_range(0.0..1.0) * cell_size * 2.0 - cell_size);

        // Colour always follows the linear fraction, even when geometry is exponential.
        let color = self.table.interpolate(linear_row_fraction(row, g.rows));

        let (x, y) = g.inner_origin(row, col);
        let (cx, cy) = g.pivot(row, col);
        CellPlan {
            row,
            col,
            top_left: Point::new(x, y),
            size: f64::from(g.inner_size()),
            center: Point::new(cx, cy),
            rotation_degrees,
            horizontal_offset,
            color,
            fill_alpha: cfg.fill_alpha,
        }
    }

    /// Plan every cell, rows outer and columns inner.
    pub fn plan(&mut self) -> Vec<CellPlan> {
        let (rows, cols) = (self.geometry.rows, self.geometry.columns);
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(self.plan_cell(row, col));
            }
        }
        cells
    }

    /// Paint the background and every cell onto `surface`.
    #[tracing::instrument(
        skip_all,
        fields(columns = self.geometry.columns, rows = self.geometry.rows)
    )]
    pub fn render<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) -> SchotterResult<()> {
        if surface.width() != self.config.canvas_width
            || surface.height() != self.config.canvas_height
        {
            return Err(SchotterError::validation(format!(
                "surface is {}x{} but the config asks for {}x{}",
                surface.width(),
                surface.height(),
                self.config.canvas_width,
                self.config.canvas_height
            )));
        }

        tracing::debug!(
            cell_size = self.geometry.cell_size,
            offset_x = self.geometry.offset_x,
            exponential = self.config.use_exponential_row_scale,
            "grid layout"
        );

        surface.fill_background(self.config.background.color());

        let stroke_width = self.config.stroke_width;
        for row in 0..self.geometry.rows {
            for col in 0..self.geometry.columns {
                let cell = self.plan_cell(row, col);
                draw_cell(surface, &cell, stroke_width);
            }
        }
        Ok(())
    }
}

/// Stroke then fill one cell inside its own transform checkpoint.
pub fn draw_cell<S: DrawSurface + ?Sized>(surface: &mut S, cell: &CellPlan, stroke_width: f64) {
    let mut s = surface.checkpoint();
    s.rotate_about(cell.rotation_degrees, cell.center.x, cell.center.y);

    let rect = cell.rect();
    s.set_color(cell.color, 1.0);
    s.set_line_width(stroke_width);
    s.draw_rectangle(rect);
    s.stroke();

    s.set_color(cell.color, cell.fill_alpha);
    s.draw_rectangle(rect);
    s.fill();
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
