//! Theme constants for the Abalone GUI

use egui::Color32;

// Board colors - warm wood tones
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135); // Burlywood
pub const BOARD_BORDER: Color32 = Color32::from_rgb(139, 90, 43); // Saddle brown
pub const HOLE: Color32 = Color32::from_rgb(196, 156, 108);
pub const HOLE_RIM: Color32 = Color32::from_rgb(160, 120, 75);
pub const LABEL: Color32 = Color32::from_rgb(60, 40, 20);

// Marble colors
pub const BLACK_MARBLE: Color32 = Color32::from_rgb(25, 25, 30);
pub const BLACK_MARBLE_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const WHITE_MARBLE: Color32 = Color32::from_rgb(250, 250, 252);
pub const WHITE_MARBLE_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const SELECTION_RING: Color32 = Color32::from_rgb(255, 200, 40);
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);

pub fn destination_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 200, 120, 120)
}

pub fn hover_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(80, 80, 80, 60)
}

// Panel text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 36.0;
pub const MARBLE_RADIUS_RATIO: f32 = 0.44;
pub const HOLE_RADIUS_RATIO: f32 = 0.40;
pub const SELECTION_RING_WIDTH: f32 = 3.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
