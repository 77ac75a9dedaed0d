//! Rendering of the population, background grid, and placement overlays.
//!
//! Organisms are batched by species identity: the fill color is resolved
//! once per type bucket instead of once per organism, turning O(n) state
//! switches into O(types). Per-organism work inside a bucket is just the
//! age-fade alpha and one circle.

use std::sync::Arc;

use macroquad::prelude::*;

use crate::simulation::engine::{Engine, EngineState};
use crate::simulation::organism::Organism;
use crate::simulation::organism_type::{OrganismType, same_type};
use crate::simulation::params::Bounds;

const BACKGROUND: Color = Color::new(0.06, 0.08, 0.10, 1.0);
const GRID_COLOR: Color = Color::new(0.16, 0.19, 0.22, 1.0);
const GRID_SPACING: f32 = 40.0;
const OVERLAY_TEXT: &str = "Click to place organisms, then press Start";

/// One draw batch: all organisms sharing a species record.
struct TypeBatch<'a> {
    kind: &'a Arc<OrganismType>,
    rgb: (u8, u8, u8),
    members: Vec<&'a Organism>,
}

/// Draws one complete frame for the engine's current state.
///
/// `preview` is the cursor position for the translucent placement preview;
/// it is only drawn in placement mode and never committed to the store.
pub fn draw_frame(engine: &Engine, preview: Option<(f32, f32)>) {
    clear_background(BACKGROUND);

    let bounds = engine.bounds();
    let placing = engine.state() == EngineState::Placement;

    if placing && engine.organisms_ref().is_empty() {
        draw_placement_overlay(bounds);
    } else {
        draw_grid(bounds);
        draw_population(engine);
    }

    if placing {
        if let Some((x, y)) = preview {
            draw_placement_preview(x, y, engine.current_type());
        }
    }
}

/// Draws the static background grid.
pub fn draw_grid(bounds: Bounds) {
    let mut x = GRID_SPACING;
    while x < bounds.width {
        draw_line(x, 0.0, x, bounds.height, 1.0, GRID_COLOR);
        x += GRID_SPACING;
    }
    let mut y = GRID_SPACING;
    while y < bounds.height {
        draw_line(0.0, y, bounds.width, y, 1.0, GRID_COLOR);
        y += GRID_SPACING;
    }
}

/// Draws all organisms, batched by species identity.
pub fn draw_population(engine: &Engine) {
    let min_opacity = engine.params().min_opacity;

    for batch in batch_by_type(engine.organisms_ref()) {
        let (r, g, b) = batch.rgb;
        let max_age = batch.kind.max_age;
        let radius = batch.kind.size;

        for organism in batch.members {
            let alpha = age_fade(organism.age, max_age, min_opacity);
            draw_circle(
                organism.x,
                organism.y,
                radius,
                Color::from_rgba(r, g, b, (alpha * 255.0) as u8),
            );
        }
    }
}

/// Instructional overlay shown in placement mode on an empty canvas.
pub fn draw_placement_overlay(bounds: Bounds) {
    let font_size = 30.0;
    let text_size = measure_text(OVERLAY_TEXT, None, font_size as u16, 1.0);
    draw_text(
        OVERLAY_TEXT,
        bounds.width / 2.0 - text_size.width / 2.0,
        bounds.height / 2.0 - text_size.height / 2.0,
        font_size,
        LIGHTGRAY,
    );
}

/// Translucent preview circle at the cursor during placement.
pub fn draw_placement_preview(x: f32, y: f32, kind: &Arc<OrganismType>) {
    let (r, g, b) = resolve_rgb(kind);
    draw_circle(x, y, kind.size, Color::from_rgba(r, g, b, 110));
}

/// Opacity for the age fade, clamped so very old organisms stay visible.
fn age_fade(age: f32, max_age: f32, min_opacity: f32) -> f32 {
    let fraction = (age / max_age.max(f32::EPSILON)).clamp(0.0, 1.0);
    (1.0 - fraction * (1.0 - min_opacity)).clamp(min_opacity, 1.0)
}

/// Groups organisms into per-type buckets by record identity.
///
/// The type set is small (a handful of species), so a linear bucket scan
/// beats hashing here.
fn batch_by_type(organisms: &[Organism]) -> Vec<TypeBatch<'_>> {
    let mut batches: Vec<TypeBatch<'_>> = Vec::new();
    for organism in organisms {
        match batches
            .iter_mut()
            .find(|batch| same_type(batch.kind, &organism.kind))
        {
            Some(batch) => batch.members.push(organism),
            None => batches.push(TypeBatch {
                kind: &organism.kind,
                rgb: resolve_rgb(&organism.kind),
                members: vec![organism],
            }),
        }
    }
    batches
}

fn resolve_rgb(kind: &Arc<OrganismType>) -> (u8, u8, u8) {
    // Types are validated before they reach the engine; white is the
    // graceful fallback if one somehow was not.
    kind.rgb().unwrap_or((255, 255, 255))
}
