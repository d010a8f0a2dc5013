//! Board rendering for the Abalone GUI

use crate::board::{Board, Coord, Player, CELLS};
use egui::{Color32, Painter, Pos2, Sense, Stroke, Vec2};

use super::theme::*;

const SQRT3_2: f32 = 0.866_025_4;

/// A click on a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardClick {
    pub coord: Coord,
    /// Shift held: extend the selection instead of replacing it
    pub extend: bool,
}

/// What the board should highlight this frame
pub struct BoardOverlay<'a> {
    pub selection: &'a [Coord],
    pub destinations: &'a [Coord],
    pub last_move: &'a [Coord],
    pub interactive: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Distance between neighbouring cell centres
    cell_size: f32,
    /// Screen position of E5
    center: Pos2,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 50.0,
            center: Pos2::ZERO,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked cell if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<BoardClick> {
        let available = ui.available_size();
        let side = available.x.min(available.y) - 10.0;

        // 9 cells across the middle row, 8 row gaps vertically
        self.cell_size = ((side - 2.0 * BOARD_MARGIN) / 9.0).max(10.0);

        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::click());
        self.center = response.rect.center();

        self.draw_frame(&painter);
        self.draw_labels(&painter);

        for coord in CELLS {
            self.draw_hole(&painter, coord);
        }
        for &coord in overlay.destinations {
            let radius = self.cell_size * HOLE_RADIUS_RATIO;
            painter.circle_filled(self.board_to_screen(coord), radius, destination_fill());
        }
        for (coord, owner) in board.occupied() {
            self.draw_marble(&painter, coord, owner);
        }
        for &coord in overlay.last_move {
            painter.circle_filled(self.board_to_screen(coord), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        for &coord in overlay.selection {
            let radius = self.cell_size * MARBLE_RADIUS_RATIO + 2.0;
            painter.circle_stroke(
                self.board_to_screen(coord),
                radius,
                Stroke::new(SELECTION_RING_WIDTH, SELECTION_RING),
            );
        }

        if !overlay.interactive {
            return None;
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p));
        if let Some(coord) = hovered {
            let radius = self.cell_size * HOLE_RADIUS_RATIO;
            painter.circle_filled(self.board_to_screen(coord), radius, hover_fill());
        }

        if response.clicked() {
            let extend = ui.input(|i| i.modifiers.shift);
            return hovered.map(|coord| BoardClick { coord, extend });
        }
        None
    }

    /// Hexagonal frame around the playing area
    fn draw_frame(&self, painter: &Painter) {
        let r = self.cell_size * 5.0;
        let corners: Vec<Pos2> = (0..6)
            .map(|i| {
                let angle = std::f32::consts::FRAC_PI_3 * i as f32;
                self.center + Vec2::new(r * angle.cos(), r * angle.sin())
            })
            .collect();
        painter.add(egui::Shape::convex_polygon(
            corners,
            BOARD_BG,
            Stroke::new(4.0, BOARD_BORDER),
        ));
    }

    /// Row letters on the left edge, column numbers along the bottom-right
    fn draw_labels(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        for row in 1..=9i8 {
            let first = CELLS.iter().find(|c| c.row == row);
            if let Some(&first) = first {
                let pos = self.board_to_screen(first) - Vec2::new(self.cell_size * 0.75, 0.0);
                let letter = (b'A' + (row - 1) as u8) as char;
                painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), LABEL);
            }
        }
        for col in 1..=9i8 {
            let last = CELLS.iter().filter(|c| c.col == col).min_by_key(|c| c.row);
            if let Some(&bottom) = last {
                let pos = self.board_to_screen(bottom) + Vec2::new(self.cell_size * 0.35, self.cell_size * 0.6);
                painter.text(pos, egui::Align2::CENTER_CENTER, col.to_string(), font.clone(), LABEL);
            }
        }
    }

    fn draw_hole(&self, painter: &Painter, coord: Coord) {
        let center = self.board_to_screen(coord);
        let radius = self.cell_size * HOLE_RADIUS_RATIO;
        painter.circle_filled(center, radius, HOLE);
        painter.circle_stroke(center, radius, Stroke::new(1.0, HOLE_RIM));
    }

    /// Draw a single marble with visual polish
    fn draw_marble(&self, painter: &Painter, coord: Coord, owner: Player) {
        let center = self.board_to_screen(coord);
        let radius = self.cell_size * MARBLE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match owner {
            Player::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_MARBLE);
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_MARBLE_HIGHLIGHT);
            }
            Player::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_MARBLE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_MARBLE_SHADOW));
            }
        }
    }

    /// Nearest cell within half a cell of `screen_pos`
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Coord> {
        CELLS
            .iter()
            .copied()
            .map(|c| (c, self.board_to_screen(c).distance(screen_pos)))
            .filter(|&(_, d)| d <= self.cell_size * 0.5)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c)
    }

    /// Centre of a cell on screen. Row 1 is at the bottom.
    pub fn board_to_screen(&self, coord: Coord) -> Pos2 {
        let x = coord.col as f32 - coord.row as f32 * 0.5 - 2.5;
        let y = (5 - coord.row) as f32 * SQRT3_2;
        self.center + Vec2::new(x, y) * self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BoardView {
        BoardView {
            cell_size: 40.0,
            center: Pos2::new(300.0, 300.0),
        }
    }

    #[test]
    fn test_center_cell_maps_to_center() {
        let v = view();
        assert_eq!(v.board_to_screen(Coord::new(5, 5)), Pos2::new(300.0, 300.0));
    }

    #[test]
    fn test_neighbors_are_one_cell_apart() {
        let v = view();
        let centre = Coord::new(5, 5);
        for dir in crate::board::Direction::ALL {
            let d = v.board_to_screen(centre).distance(v.board_to_screen(centre.offset(dir)));
            assert!((d - 40.0).abs() < 0.01, "{dir}: {d}");
        }
    }

    #[test]
    fn test_hit_test_round_trip() {
        let v = view();
        for coord in CELLS {
            let p = v.board_to_screen(coord) + Vec2::new(5.0, -5.0);
            assert_eq!(v.screen_to_board(p), Some(coord));
        }
        assert_eq!(v.screen_to_board(Pos2::new(0.0, 0.0)), None);
    }
}
