//! macroquad entry point: frame loop, placement input, and UI glue.

use macroquad::prelude::*;
use tracing::{error, info};

use petri::simulation::engine::{Engine, EngineState};
use petri::simulation::organism_type::OrganismType;
use petri::simulation::params::{Bounds, Params};
use petri::simulation::scheduler::Scheduler;
use petri::{graphics, ui};

const PARAMS_FILE: &str = "petri.json";

#[macroquad::main("Petri - Organism Population Simulation")]
async fn main() {
    init_tracing();

    let params = match Params::load_from_file(PARAMS_FILE) {
        Ok(params) => {
            info!(path = PARAMS_FILE, "loaded parameters");
            params
        }
        Err(err) => {
            info!(%err, "using default parameters");
            Params::default()
        }
    };

    let types = OrganismType::presets();
    let Some(initial_type) = types.first().cloned() else {
        error!("no organism type presets available");
        return;
    };

    let bounds = Bounds {
        width: screen_width(),
        height: screen_height(),
    };

    let mut engine = match Engine::new(bounds, initial_type, params) {
        Ok(engine) => engine,
        Err(err) => {
            // Fatal resource/configuration error: nothing to simulate.
            error!(%err, "engine construction failed");
            return;
        }
    };

    let mut scheduler = Scheduler::default();
    let mut ui_state = ui::UIState::new(&engine);

    loop {
        let placing = engine.state() == EngineState::Placement;

        if placing
            && !ui_state.pointer_over_ui
            && is_mouse_button_pressed(MouseButton::Left)
        {
            let (x, y) = mouse_position();
            engine.place_organism(x, y);
        }

        if let Some(dt) = scheduler.frame(get_frame_time()) {
            if let Err(err) = engine.update(dt) {
                error!(%err, "halting scheduler after tick fault");
                scheduler.stop();
            }
        }

        let preview = (placing && !ui_state.pointer_over_ui).then(mouse_position);
        graphics::draw_frame(&engine, preview);

        ui_state.update_history(&engine);
        ui::draw_ui(&mut ui_state, &mut engine, &types, &mut scheduler);
        egui_macroquad::draw();

        next_frame().await;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
