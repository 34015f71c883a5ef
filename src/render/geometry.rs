use crate::{
    config::RenderConfig,
    foundation::error::{SchotterError, SchotterResult},
};

/// Pixel layout of the grid derived from a [`RenderConfig`].
///
/// The grid keeps a one-cell border on the left, right and top, and two cells at the bottom
/// (one border, one for the signature line). It is centred horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    /// Logical columns.
    pub columns: u32,
    /// Logical rows.
    pub rows: u32,
    /// Side of one grid cell in whole pixels.
    pub cell_size: u32,
    /// Left shift that centres the bordered grid on the canvas.
    pub offset_x: u32,
    /// Inset on each side of a cell.
    pub padding: u32,
}

impl GridGeometry {
    /// Derive the layout. Fails when the canvas cannot fit a non-empty padded cell.
    pub fn new(cfg: &RenderConfig) -> SchotterResult<Self> {
        if cfg.columns == 0 || cfg.rows == 0 {
            return Err(SchotterError::validation("columns and rows must be > 0"));
        }

        let h_size = u64::from(cfg.canvas_width) / (u64::from(cfg.columns) + 2);
        let v_size = u64::from(cfg.canvas_height) / (u64::from(cfg.rows) + 3);
        let cell_size = h_size.min(v_size);
        if cell_size == 0 {
            return Err(SchotterError::validation(format!(
                "canvas {}x{} is too small for a {}x{} grid",
                cfg.canvas_width, cfg.canvas_height, cfg.columns, cfg.rows
            )));
        }
        if 2 * u64::from(cfg.padding) >= cell_size {
            return Err(SchotterError::validation(format!(
                "padding {} leaves no room inside a {cell_size}px cell",
                cfg.padding
            )));
        }

        let content_width = (u64::from(cfg.columns) + 2) * cell_size;
        let offset_x = (u64::from(cfg.canvas_width) - content_width) / 2;

        // Both values are bounded by the canvas width, which is a u32.
        Ok(Self {
            columns: cfg.columns,
            rows: cfg.rows,
            cell_size: cell_size as u32,
            offset_x: offset_x as u32,
            padding: cfg.padding,
        })
    }

    /// Top-left pixel of cell `(row, col)` before padding.
    pub fn cell_origin(&self, row: u32, col: u32) -> (f64, f64) {
        let cs = f64::from(self.cell_size);
        (
            (f64::from(col) + 1.0) * cs + f64::from(self.offset_x),
            (f64::from(row) + 1.0) * cs,
        )
    }

    /// Side of the padded square drawn inside a cell.
    pub fn inner_size(&self) -> u32 {
        self.cell_size - 2 * self.padding
    }

    /// Top-left of the padded square.
    pub fn inner_origin(&self, row: u32, col: u32) -> (f64, f64) {
        let (x, y) = self.cell_origin(row, col);
        let p = f64::from(self.padding);
        (x + p, y + p)
    }

    /// Rotation pivot of cell `(row, col)`.
    ///
    /// Half of the padded side (whole pixels) measured from the unpadded cell origin.
    pub fn pivot(&self, row: u32, col: u32) -> (f64, f64) {
        let (x, y) = self.cell_origin(row, col);
        let half = f64::from(self.inner_size() / 2);
        (x + half, y + half)
    }

    /// Baseline anchor for a right-aligned caption of the given extent.
    ///
    /// The caption ends at the right edge of the grid proper (borders excluded) and sits half a
    /// cell into the bottom margin.
    pub fn caption_origin(
        &self,
        canvas_width: u32,
        text_width: f64,
        text_height: f64,
    ) -> (f64, f64) {
        let grid_width = u64::from(self.columns) * u64::from(self.cell_size);
        let offset = (u64::from(canvas_width).saturating_sub(grid_width) / 2) as f64;
        let x = grid_width as f64 + offset - text_width;
        let y = (f64::from(self.rows) + 2.5) * f64::from(self.cell_size) - text_height;
        (x, y)
    }
}

/// Normalized progression of `row` through `rows`.
///
/// Linear mode is `row / rows`. Exponential mode is `1 - ln(rows - row) / ln(rows)`, which is
/// 0 on the first row and 1 on the last. A `+inf` result (at `row == rows`, and for anything
/// with `rows - row <= 0`) clamps to `1.0`; the `0/0` case of a single-row grid yields `0.0`.
pub fn row_fraction(row: u32, rows: u32, exponential: bool) -> f64 {
    if !exponential {
        return linear_row_fraction(row, rows);
    }

    let remaining = f64::from(rows) - f64::from(row);
    let f = 1.0 - remaining.ln() / f64::from(rows).ln();
    if f == f64::INFINITY || (f.is_nan() && remaining <= 0.0) {
        1.0
    } else if f.is_nan() {
        0.0
    } else {
        f
    }
}

/// `row / rows`; used for colour lookup regardless of the geometry mode.
pub fn linear_row_fraction(row: u32, rows: u32) -> f64 {
    f64::from(row) / f64::from(rows)
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
