//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! The 3D field is drawn as two projections next to each other:
//!
//! - **front**: what the camera sees, columns run along the camera's right
//!   axis and rows are layers (floor at the bottom); settled blocks are
//!   shaded by distance from the camera
//! - **top**: the field seen from above, far side at the top, each column
//!   showing its stack height
//!
//! Both use the same [`ControlFrame`] the simulation uses, so "move right"
//! always moves the piece right on screen.
//!
//! This module is pure (no I/O). It can be unit-tested.

use glam::{IVec3, Vec3};

use crate::core::{shape, ControlFrame, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Extent;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Mapping between field cells and the camera-aligned screen axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    right: IVec3,
    forward: IVec3,
    lateral_min: i32,
    lateral_len: i32,
    depth_min: i32,
    depth_len: i32,
}

impl Projection {
    pub fn new(frame: &ControlFrame, extent: Extent) -> Self {
        let (lateral_min, lateral_len) = axis_span(frame.right, extent);
        let (depth_min, depth_len) = axis_span(frame.forward, extent);
        Self {
            right: frame.right,
            forward: frame.forward,
            lateral_min,
            lateral_len,
            depth_min,
            depth_len,
        }
    }

    /// Number of screen columns across the field
    pub fn lateral_len(&self) -> i32 {
        self.lateral_len
    }

    /// Number of cells from the near side to the far side
    pub fn depth_len(&self) -> i32 {
        self.depth_len
    }

    /// Screen column of a cell, 0 = leftmost as seen by the camera
    pub fn lateral(&self, cell: IVec3) -> i32 {
        cell.dot(self.right) - self.lateral_min
    }

    /// Distance from the camera side, 0 = nearest
    pub fn depth(&self, cell: IVec3) -> i32 {
        cell.dot(self.forward) - self.depth_min
    }

    /// Inverse of [`Projection::lateral`] / [`Projection::depth`]
    pub fn cell(&self, lateral: i32, depth: i32, y: i32) -> IVec3 {
        self.right * (lateral + self.lateral_min)
            + self.forward * (depth + self.depth_min)
            + IVec3::Y * y
    }
}

/// Range of `dot(cell, axis)` over the field for a horizontal cardinal axis
fn axis_span(axis: IVec3, extent: Extent) -> (i32, i32) {
    let n = if axis.x != 0 {
        extent.width as i32
    } else {
        extent.depth as i32
    };
    let min = if axis.x + axis.z < 0 { 1 - n } else { 0 };
    (min, n)
}

/// Compass letter for a horizontal direction (-Z is north)
fn compass(dir: IVec3) -> &'static str {
    match (dir.x, dir.z) {
        (0, -1) => "N",
        (1, 0) => "E",
        (0, 1) => "S",
        (-1, 0) => "W",
        _ => "?",
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(24, 24, 34);
const PANEL_W: u16 = 22;
const DEPTH_GLYPHS: [char; 4] = ['█', '▓', '▒', '░'];

/// A terminal renderer for the 3D field.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    help: Vec<String>,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            help: Vec::new(),
        }
    }

    /// Lines listed under CONTROLS in the side panel.
    pub fn with_help(mut self, help: Vec<String>) -> Self {
        self.help = help;
        self
    }

    /// Render into an existing framebuffer (resized to the viewport).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        view_forward: Vec3,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::fg(Rgb::new(200, 200, 200)).on(BG).cell(' '));

        let frame = ControlFrame::from_view(view_forward);
        let proj = Projection::new(&frame, snap.extent);
        let span = snap.extent.width.max(snap.extent.depth);

        let front_w = span * self.cell_w + 2;
        let front_h = snap.extent.height * self.cell_h + 2;
        let top_w = span * self.cell_w + 2;
        let total_w = front_w + 2 + top_w + 2 + PANEL_W;

        let x0 = viewport.width.saturating_sub(total_w) / 2;
        let y0 = viewport.height.saturating_sub(front_h) / 2;
        let top_x = x0 + front_w + 2;
        let panel_x = top_x + top_w + 2;

        self.draw_front(fb, snap, &proj, x0, y0, front_w, front_h);
        self.draw_top(fb, snap, &proj, top_x, y0, top_w);
        self.draw_side_panel(fb, snap, &frame, panel_x, y0, viewport);

        if snap.paused {
            draw_overlay_text(fb, x0, y0, front_w, front_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, view_forward: Vec3, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, view_forward, viewport, &mut fb);
        fb
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_front(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        proj: &Projection,
        x0: u16,
        y0: u16,
        w: u16,
        h: u16,
    ) {
        draw_border(fb, x0, y0, w, h, " FRONT ");
        let inner_w = w - 2;
        let inner_h = h - 2;
        fb.fill_rect(x0 + 1, y0 + 1, inner_w, inner_h, ' ', CellStyle::default().on(WELL_BG));

        let height = snap.extent.height as i32;
        for y in 0..height {
            for l in 0..proj.lateral_len() {
                let nearest = (0..proj.depth_len()).find(|&d| snap.is_occupied(proj.cell(l, d, y)));
                let (ch, style) = match nearest {
                    Some(d) => {
                        let shade = 220 - 40 * d.min(3) as u16;
                        let style = CellStyle::fg(Rgb::new(shade as u8, shade as u8, shade as u8))
                            .on(WELL_BG);
                        (DEPTH_GLYPHS[d.min(3) as usize], style)
                    }
                    None => ('·', CellStyle::fg(Rgb::new(70, 70, 85)).on(WELL_BG).dim()),
                };
                self.fill_cell(fb, x0, y0, l, height - 1 - y, ch, style);
            }
        }

        let color = Rgb::from_hex(shape(snap.active.shape_index).color);
        let style = CellStyle::fg(color).on(WELL_BG).bold();
        for cell in snap.active.cells {
            if cell.y >= 0 && cell.y < height {
                self.fill_cell(fb, x0, y0, proj.lateral(cell), height - 1 - cell.y, '█', style);
            }
        }
    }

    fn draw_top(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        proj: &Projection,
        x0: u16,
        y0: u16,
        w: u16,
    ) {
        let h = proj.depth_len() as u16 * self.cell_h + 2;
        draw_border(fb, x0, y0, w, h, " TOP ");
        fb.fill_rect(x0 + 1, y0 + 1, w - 2, h - 2, ' ', CellStyle::default().on(WELL_BG));

        let height = snap.extent.height as i32;
        let far = proj.depth_len() - 1;
        for d in 0..proj.depth_len() {
            for l in 0..proj.lateral_len() {
                let column = proj.cell(l, d, 0);
                let stack = (0..height)
                    .rev()
                    .find(|&y| snap.is_occupied(column + IVec3::Y * y))
                    .map(|y| y + 1)
                    .unwrap_or(0);
                let ch = match stack {
                    0 => '·',
                    1..=9 => char::from(b'0' + stack as u8),
                    _ => '+',
                };
                let style = CellStyle::fg(Rgb::new(170, 170, 190)).on(WELL_BG);
                self.fill_cell(fb, x0, y0, l, far - d, ch, style);
            }
        }

        let color = Rgb::from_hex(shape(snap.active.shape_index).color);
        let style = CellStyle::fg(color).on(WELL_BG).bold();
        for cell in snap.active.cells {
            self.fill_cell(fb, x0, y0, proj.lateral(cell), far - proj.depth(cell), '█', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        col: i32,
        row: i32,
        ch: char,
        style: CellStyle,
    ) {
        if col < 0 || row < 0 {
            return;
        }
        let px = x0 + 1 + col as u16 * self.cell_w;
        let py = y0 + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        frame: &ControlFrame,
        x: u16,
        y0: u16,
        viewport: Viewport,
    ) {
        if x >= viewport.width || viewport.width - x < 12 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = y0;
        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x + 8, y, snap.score, value);
        y += 1;
        fb.put_str(x, y, "LAYERS", label);
        fb.put_u32(x + 8, y, snap.rows_cleared, value);
        y += 1;
        fb.put_str(x, y, "PIECES", label);
        fb.put_u32(x + 8, y, snap.pieces_placed, value);
        y += 1;

        // Speed in tenths of a cell per second.
        let tenths = (snap.velocity.abs() * 10.0).round() as u32;
        fb.put_str(x, y, "SPEED", label);
        let cx = fb.put_u32(x + 8, y, tenths / 10, value);
        let cx = fb.put_str(cx, y, ".", value);
        fb.put_u32(cx, y, tenths % 10, value);
        y += 2;

        let def = shape(snap.active.shape_index);
        fb.put_str(x, y, "PIECE", label);
        fb.put_str(x + 8, y, def.name, CellStyle::fg(Rgb::from_hex(def.color)));
        y += 1;
        fb.put_str(x, y, "FACING", label);
        fb.put_str(x + 8, y, compass(frame.forward), value);
        y += 2;

        if !self.help.is_empty() {
            fb.put_str(x, y, "CONTROLS", label);
            y += 1;
            let dim = value.dim();
            for line in &self.help {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(x, y, line, dim);
                y += 1;
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, title: &str) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::fg(Rgb::new(200, 200, 200));

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
    if (title.chars().count() as u16) + 2 < w {
        fb.put_str(x + 1, y, title, style.bold());
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
    let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
    fb.put_str(tx, y.saturating_add(h / 2), text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{view_forward_from_yaw, ActiveSnapshot};
    use std::f32::consts::FRAC_PI_2;

    const LOOK: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    fn snapshot() -> GameSnapshot {
        let extent = Extent::new(4, 12, 4);
        GameSnapshot {
            extent,
            occupancy: vec![false; extent.volume()],
            active: ActiveSnapshot {
                shape_index: 3,
                position: IVec3::new(2, 14, 2),
                cells: [
                    IVec3::new(2, 12, 2),
                    IVec3::new(2, 13, 2),
                    IVec3::new(2, 14, 2),
                    IVec3::new(2, 15, 2),
                ],
            },
            velocity: -1.0,
            ..GameSnapshot::default()
        }
    }

    fn text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn projection_round_trips_for_every_facing() {
        let extent = Extent::new(3, 5, 2);
        for step in 0..4 {
            let frame = ControlFrame::from_view(view_forward_from_yaw(step as f32 * FRAC_PI_2));
            let proj = Projection::new(&frame, extent);
            for z in 0..2 {
                for x in 0..3 {
                    let cell = IVec3::new(x, 1, z);
                    let (l, d) = (proj.lateral(cell), proj.depth(cell));
                    assert!((0..proj.lateral_len()).contains(&l));
                    assert!((0..proj.depth_len()).contains(&d));
                    assert_eq!(proj.cell(l, d, 1), cell);
                }
            }
        }
    }

    #[test]
    fn right_action_moves_right_on_screen() {
        let frame = ControlFrame::from_view(LOOK);
        let proj = Projection::new(&frame, Extent::default());
        let cell = IVec3::new(1, 0, 1);
        assert_eq!(proj.lateral(cell + frame.right), proj.lateral(cell) + 1);
        assert_eq!(proj.depth(cell + frame.forward), proj.depth(cell) + 1);
    }

    #[test]
    fn render_shows_panel_and_pause_overlay() {
        let mut snap = snapshot();
        snap.score = 42;
        snap.paused = true;
        let fb = GameView::default().render(&snap, LOOK, Viewport::new(80, 24));
        let t = text(&fb);
        assert!(t.contains("SCORE   42"), "{t}");
        assert!(t.contains("PAUSED"));
        assert!(t.contains("FACING  N"));
        assert!(t.contains("SPEED   1.0"));
    }

    #[test]
    fn settled_cells_shade_by_depth() {
        let mut snap = snapshot();
        let frame = ControlFrame::from_view(LOOK);
        let proj = Projection::new(&frame, snap.extent);
        // One block at the near side, one behind it in the far row.
        let near = proj.cell(0, 0, 0);
        let far = proj.cell(1, 3, 0);
        for cell in [near, far] {
            let i = (cell.x + cell.z * 48) as usize;
            snap.occupancy[i] = true;
        }

        let fb = GameView::default().render(&snap, LOOK, Viewport::new(80, 24));
        let t = text(&fb);
        assert!(t.contains('█'));
        assert!(t.contains('░'));
    }

    #[test]
    fn active_piece_above_field_is_only_on_top_map() {
        let snap = snapshot();
        let fb = GameView::default().render(&snap, LOOK, Viewport::new(80, 24));
        let color = Rgb::from_hex(shape(3).color);
        let colored = fb.cells().iter().filter(|c| c.style.fg == color).count();
        // Top map: one cell, two columns wide. Panel: the piece name.
        assert_eq!(colored, 2 + shape(3).name.chars().count());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = snapshot();
        let fb = GameView::default().render(&snap, LOOK, Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
