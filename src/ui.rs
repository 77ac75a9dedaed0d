//! egui control panel and stats plots.
//!
//! External UI glue over the engine's control surface: all simulation
//! state changes go through engine methods, and everything displayed here
//! comes from `stats()` snapshots.

use std::collections::VecDeque;
use std::sync::Arc;

use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};

use crate::simulation::engine::{Engine, EngineState};
use crate::simulation::organism_type::{OrganismType, same_type};
use crate::simulation::scheduler::Scheduler;

const MAX_HISTORY_POINTS: usize = 500;

/// UI-side state: plot histories, pending slider values, status line.
pub struct UIState {
    /// Population history as (elapsed, count) points.
    pub population_history: VecDeque<(f64, f64)>,
    /// Average-age history as (elapsed, age) points.
    pub avg_age_history: VecDeque<(f64, f64)>,
    last_update_time: f32,
    update_interval: f32,
    /// Pending speed slider value, applied on release.
    pub speed_slider: f32,
    /// Pending population-cap slider value.
    pub max_population_slider: usize,
    /// Last rejected control input, shown in the panel.
    pub status_message: Option<String>,
    /// `true` while the pointer is over an egui area; placement clicks are
    /// suppressed then.
    pub pointer_over_ui: bool,
}

impl UIState {
    /// Creates UI state mirroring the engine's current settings.
    pub fn new(engine: &Engine) -> Self {
        Self {
            population_history: VecDeque::new(),
            avg_age_history: VecDeque::new(),
            last_update_time: 0.0,
            update_interval: 0.5,
            speed_slider: engine.speed(),
            max_population_slider: engine.max_population(),
            status_message: None,
            pointer_over_ui: false,
        }
    }

    /// Samples stats into the plot histories every `update_interval`
    /// seconds of simulated time.
    pub fn update_history(&mut self, engine: &Engine) {
        let stats = engine.stats();
        if stats.elapsed_time - self.last_update_time < self.update_interval {
            return;
        }
        self.last_update_time = stats.elapsed_time;

        self.population_history
            .push_back((stats.elapsed_time as f64, stats.population as f64));
        self.avg_age_history
            .push_back((stats.elapsed_time as f64, stats.average_age as f64));

        while self.population_history.len() > MAX_HISTORY_POINTS {
            self.population_history.pop_front();
        }
        while self.avg_age_history.len() > MAX_HISTORY_POINTS {
            self.avg_age_history.pop_front();
        }
    }
}

/// Draws the control panel and applies control inputs to the engine.
pub fn draw_ui(
    state: &mut UIState,
    engine: &mut Engine,
    types: &[Arc<OrganismType>],
    scheduler: &mut Scheduler,
) {
    egui_macroquad::ui(|egui_ctx| {
        egui::SidePanel::right("control_panel")
            .default_width(280.0)
            .resizable(true)
            .show(egui_ctx, |ui| {
                ui.heading("Simulation");
                ui.separator();

                draw_controls(ui, state, engine, scheduler);
                ui.separator();
                draw_settings(ui, state, engine, types);
                ui.separator();
                draw_stats(ui, state, engine);

                if let Some(message) = &state.status_message {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, message);
                }
            });

        state.pointer_over_ui = egui_ctx.is_pointer_over_area();
    });
}

fn draw_controls(
    ui: &mut egui::Ui,
    state: &mut UIState,
    engine: &mut Engine,
    scheduler: &mut Scheduler,
) {
    ui.horizontal(|ui| {
        match engine.state() {
            EngineState::Placement | EngineState::Paused => {
                if ui.button("▶ Start").clicked() {
                    engine.start();
                    scheduler.resume();
                    state.status_message = None;
                }
            }
            EngineState::Running => {
                if ui.button("⏸ Pause").clicked() {
                    engine.pause();
                    // No further ticks may fire after a pause.
                    scheduler.stop();
                }
            }
            EngineState::Faulted => {
                ui.colored_label(egui::Color32::RED, "faulted - reset required");
            }
        }

        if ui.button("Reset").clicked() {
            engine.reset();
            scheduler.stop();
            state.population_history.clear();
            state.avg_age_history.clear();
            state.last_update_time = 0.0;
            state.status_message = None;
        }

        if ui.button("Clear").clicked() {
            engine.clear();
        }
    });
}

fn draw_settings(
    ui: &mut egui::Ui,
    state: &mut UIState,
    engine: &mut Engine,
    types: &[Arc<OrganismType>],
) {
    ui.label("Speed");
    if ui
        .add(egui::Slider::new(&mut state.speed_slider, 1.0..=10.0))
        .changed()
    {
        if let Err(err) = engine.set_speed(state.speed_slider) {
            state.status_message = Some(err.to_string());
            state.speed_slider = engine.speed();
        }
    }

    ui.label("Max population");
    if ui
        .add(egui::Slider::new(&mut state.max_population_slider, 1..=5000))
        .changed()
    {
        if let Err(err) = engine.set_max_population(state.max_population_slider) {
            state.status_message = Some(err.to_string());
            state.max_population_slider = engine.max_population();
        }
    }

    ui.label("Organism type");
    for kind in types {
        let selected = same_type(engine.current_type(), kind);
        if ui.selectable_label(selected, kind.name.as_str()).clicked() && !selected {
            if let Err(err) = engine.set_organism_type(Arc::clone(kind)) {
                state.status_message = Some(err.to_string());
            }
        }
    }
    ui.small(engine.current_type().description.as_str());
}

fn draw_stats(ui: &mut egui::Ui, state: &UIState, engine: &Engine) {
    let stats = engine.stats();

    ui.label(format!("Population: {}", stats.population));
    ui.label(format!("Generation: {}", stats.generation));
    ui.label(format!(
        "Births: {} ({:.1}/s)",
        stats.total_births, stats.births_per_sec
    ));
    ui.label(format!(
        "Deaths: {} ({:.1}/s)",
        stats.total_deaths, stats.deaths_per_sec
    ));
    ui.label(format!(
        "Age: avg {:.1} / oldest {:.1}",
        stats.average_age, stats.oldest_age
    ));
    ui.label(format!("Elapsed: {:.1}", stats.elapsed_time));
    ui.label(format!(
        "Pool: {} free / {} allocated",
        engine.pool().available(),
        engine.pool().allocations()
    ));

    if !state.population_history.is_empty() {
        ui.label("Population over time");
        let points: PlotPoints = state
            .population_history
            .iter()
            .map(|&(t, v)| [t, v])
            .collect();
        Plot::new("population_plot")
            .height(110.0)
            .show(ui, |plot_ui| plot_ui.line(Line::new(points)));
    }

    if !state.avg_age_history.is_empty() {
        ui.label("Average age over time");
        let points: PlotPoints = state.avg_age_history.iter().map(|&(t, v)| [t, v]).collect();
        Plot::new("avg_age_plot")
            .height(110.0)
            .show(ui, |plot_ui| plot_ui.line(Line::new(points)));
    }
}
