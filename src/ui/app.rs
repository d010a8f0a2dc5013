//! Main application for the Abalone GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel, Vec2};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::GameState;
use super::theme::*;
use crate::board::{Layout, Player, PIECES_PER_SIDE};
use crate::config::{GameConfig, MatchType};
use crate::session::{Outcome, WinReason, WIN_SCORE};

/// Main Abalone application
pub struct AbaloneApp {
    state: GameState,
    board_view: BoardView,
    /// Settings applied on the next "New Game"
    draft: GameConfig,
}

impl AbaloneApp {
    /// Create a new app with the given configuration
    pub fn new(_cc: &eframe::CreationContext<'_>, config: GameConfig) -> Self {
        Self {
            draft: config.clone(),
            state: GameState::new(config),
            board_view: BoardView::default(),
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (N)").clicked() {
                        self.state.restart_with(self.draft.clone());
                        ui.close_menu();
                    }
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                    let pause = if self.state.is_paused() { "Resume (P)" } else { "Pause (P)" };
                    if ui.button(pause).clicked() {
                        self.state.toggle_pause();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Settings", |ui| {
                    ui.label(RichText::new("Layout").color(TEXT_MUTED));
                    for layout in Layout::BUILT_IN {
                        ui.radio_value(&mut self.draft.layout, layout, layout.name());
                    }
                    ui.separator();
                    ui.label(RichText::new("Match").color(TEXT_MUTED));
                    for match_type in MatchType::ALL {
                        ui.radio_value(&mut self.draft.match_type, match_type, match_type.name());
                    }
                    ui.separator();
                    ui.label(RichText::new("Host colour").color(TEXT_MUTED));
                    for player in Player::BOTH {
                        ui.radio_value(&mut self.draft.host_color, player, player.name());
                    }
                    ui.separator();
                    ui.add(egui::Slider::new(&mut self.draft.clock_black_secs, 5..=300).text("Black clock (s)"));
                    ui.add(egui::Slider::new(&mut self.draft.clock_white_secs, 5..=300).text("White clock (s)"));
                    ui.add(egui::Slider::new(&mut self.draft.moves_per_team, 0..=200).text("Moves per side"));
                    ui.label(RichText::new("Applied on the next new game").size(10.0).color(TEXT_MUTED));
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let config = self.state.session.config();
                    ui.label(format!("{} - {}", config.match_type.name(), config.layout));
                });
            });
        });
    }

    /// Render the side panel with game info
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(260.0)
            .max_width(300.0)
            .frame(Frame::new().fill(egui::Color32::from_rgb(25, 27, 31)))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_clock_card(ui);
                ui.add_space(10.0);

                self.render_score_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if let Some(outcome) = self.state.session.outcome() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, outcome);
                }

                if let Some(msg) = self.state.message.clone() {
                    ui.add_space(10.0);
                    self.render_message_card(ui, &msg);
                }

                ui.add_space(10.0);
                self.render_move_log(ui);
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(egui::Color32::from_rgb(35, 38, 43))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("●○").size(20.0).color(egui::Color32::from_rgb(180, 180, 185)));
            ui.add_space(4.0);
            ui.label(RichText::new("ABALONE").size(22.0).strong().color(TEXT_PRIMARY));
        });
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let is_black = self.state.session.current() == Player::Black;
            let (marble_char, color_name, accent) = if is_black {
                ("●", "BLACK", egui::Color32::from_rgb(70, 70, 75))
            } else {
                ("○", "WHITE", egui::Color32::from_rgb(220, 220, 225))
            };

            ui.horizontal(|ui| {
                let marble_color = if is_black { TEXT_PRIMARY } else { egui::Color32::from_rgb(30, 30, 35) };
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    marble_char,
                    egui::FontId::proportional(28.0),
                    marble_color,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(color_name).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.is_game_over() {
                        ("Game over", TEXT_SECONDARY)
                    } else if self.state.is_human_turn() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("Waiting for AI", TIMER_WARNING)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_clock_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("CLOCK").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let remaining = self.state.clock_remaining().as_secs_f32();
            let total = self.state.session.turn_clock().as_secs_f32().max(1.0);
            let color = if remaining / total > 0.5 {
                TIMER_NORMAL
            } else if remaining > 5.0 {
                TIMER_WARNING
            } else {
                TIMER_CRITICAL
            };
            ui.label(RichText::new(format!("{:.1}s", remaining)).size(26.0).strong().color(color));
            if self.state.is_paused() {
                ui.label(RichText::new("PAUSED").size(11.0).strong().color(TIMER_WARNING));
            }

            let timer = &self.state.move_timer;
            if let Some(last) = timer.last_move_duration {
                ui.label(RichText::new(format!("Last human move: {:.1}s", last.as_secs_f32())).size(10.0).color(TEXT_SECONDARY));
            }
            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                ui.label(RichText::new(format!("AI: {:.2}s", elapsed.as_secs_f32())).size(11.0).color(TEXT_SECONDARY));
            } else if let (Some(wall), Some(reply)) = (timer.ai_thinking_time, &self.state.last_reply) {
                ui.label(
                    RichText::new(format!("Last AI: {:.2}s (search {}ms)", wall.as_secs_f32(), reply.time_ms))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_score_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);
            for player in Player::BOTH {
                self.render_score_row(ui, player);
                ui.add_space(6.0);
            }
        });
    }

    /// One row: captures as marble icons, then moves and time
    fn render_score_row(&self, ui: &mut egui::Ui, player: Player) {
        let stats = self.state.session.stats(player);
        let on_board = self.state.session.board().count(player);
        let (symbol, filled_color, empty_color) = match player {
            Player::Black => ("●", egui::Color32::from_rgb(200, 200, 205), egui::Color32::from_rgb(60, 62, 66)),
            Player::White => ("○", egui::Color32::from_rgb(200, 200, 205), egui::Color32::from_rgb(60, 62, 66)),
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(player.name()).size(12.0).strong().color(TEXT_PRIMARY));
            for i in 0..WIN_SCORE {
                let color = if i < stats.score {
                    if stats.score + 1 >= WIN_SCORE { TIMER_WARNING } else { filled_color }
                } else {
                    empty_color
                };
                ui.label(RichText::new(symbol).size(16.0).color(color));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format!("{}/{}", stats.score, WIN_SCORE)).size(13.0).color(TEXT_SECONDARY));
            });
        });

        let limit = match self.state.session.config().move_limit() {
            Some(limit) => format!("{}/{}", stats.moves_made, limit),
            None => stats.moves_made.to_string(),
        };
        ui.label(
            RichText::new(format!(
                "moves {}  time {:.1}s  marbles {}/{}",
                limit,
                stats.time_spent.as_secs_f32(),
                on_board,
                PIECES_PER_SIDE
            ))
            .size(10.0)
            .color(TEXT_MUTED),
        );
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(egui::Color32::from_rgb(50, 53, 58))
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                btn_frame.show(ui, |ui| {
                    let label = egui::Label::new(RichText::new("↩ Undo").size(12.0).color(TEXT_PRIMARY));
                    if ui.add(label.sense(egui::Sense::click())).clicked() {
                        self.state.undo();
                    }
                });

                ui.add_space(4.0);

                btn_frame.show(ui, |ui| {
                    let text = if self.state.is_paused() { "▶ Resume" } else { "⏸ Pause" };
                    let label = egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY));
                    if ui.add(label.sense(egui::Sense::click())).clicked() {
                        self.state.toggle_pause();
                    }
                });

                ui.add_space(4.0);

                btn_frame.show(ui, |ui| {
                    let label = egui::Label::new(RichText::new("⟳ Restart").size(12.0).color(TEXT_PRIMARY));
                    if ui.add(label.sense(egui::Sense::click())).clicked() {
                        self.state.reset();
                    }
                });
            });

            ui.add_space(8.0);
            let moves = self.state.session.history().len();
            ui.label(RichText::new(format!("Move #{}", moves + 1)).size(11.0).color(TEXT_SECONDARY));
            if let Some(desc) = &self.state.last_description {
                ui.label(RichText::new(desc).size(10.0).color(TEXT_MUTED));
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: Outcome) {
        let (headline, detail) = match outcome {
            Outcome::Win { winner, reason } => (
                format!("{} WINS!", winner.name().to_uppercase()),
                match reason {
                    WinReason::Captures => format!("by {} captures", WIN_SCORE),
                    WinReason::MoveLimit => "on score at the move limit".to_string(),
                },
            ),
            Outcome::Draw => ("DRAW".to_string(), "equal score at the move limit".to_string()),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            let label = egui::Label::new(RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY));
                            if ui.add(label.sense(egui::Sense::click())).clicked() {
                                self.state.reset();
                            }
                        });
                });
            });
    }

    fn render_message_card(&self, ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(14.0));
                    ui.add_space(4.0);
                    ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                });
            });
    }

    fn render_move_log(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("MOVES").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
                for record in self.state.session.move_log() {
                    ui.label(RichText::new(record.to_string()).size(11.0).monospace().color(TEXT_SECONDARY));
                }
            });
        });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let destinations = self.state.session.highlighted();
            let overlay = BoardOverlay {
                selection: self.state.session.selection(),
                destinations: &destinations,
                last_move: &self.state.last_move,
                interactive: self.state.is_human_turn() && !self.state.is_game_over() && !self.state.is_paused(),
            };
            let clicked = self.board_view.show(ui, self.state.session.board(), &overlay);

            if let Some(click) = clicked {
                self.state.handle_click(click);
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // U - Undo
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            // P - Pause or resume the clock
            if i.key_pressed(egui::Key::P) {
                self.state.toggle_pause();
            }

            // N - New game with the current settings
            if i.key_pressed(egui::Key::N) {
                self.state.restart_with(self.draft.clone());
            }

            // Esc - Drop the selection
            if i.key_pressed(egui::Key::Escape) {
                self.state.session.clear_selection();
            }
        });
    }
}

impl eframe::App for AbaloneApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();
        self.state.start_ai_thinking();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Clocks tick every frame
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
