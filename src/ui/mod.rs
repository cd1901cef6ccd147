pub mod graphs;
pub mod scoreboard;
pub mod toolbar;

use racer::evolution::Evolution;
use racer::stats::EvolutionStats;

/// Panel visibility and run controls owned by the window loop.
pub struct UiState {
    pub show_scoreboard: bool,
    pub show_graphs: bool,
    pub paused: bool,
    pub ticks_per_frame: u32,
    pub reset_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_scoreboard: true,
            show_graphs: false,
            paused: false,
            ticks_per_frame: 1,
            reset_requested: false,
        }
    }
}

/// Draw all egui UI panels.
pub fn draw_ui(evolution: &mut Evolution, ui_state: &mut UiState, stats: &EvolutionStats) {
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, evolution, ui_state);

        if ui_state.show_scoreboard {
            scoreboard::draw_scoreboard(ctx, evolution);
        }

        if ui_state.show_graphs {
            graphs::draw_graphs(ctx, stats);
        }
    });

    egui_macroquad::draw();
}
