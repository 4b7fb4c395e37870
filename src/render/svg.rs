//! SVG output for spheroid outlines and whole scenes

use glam::Vec2;
use std::fmt::Write;

use crate::sim::{CurvePoint, GamePhase, GameState};

pub const PLANET_COLOR: &str = "#ff4040";
pub const CORE_COLOR: &str = "#ffb020";
pub const ORE_COLOR: &str = "#f4d03f";
pub const DEBRIS_COLOR: &str = "#b07050";
pub const PLAYER_COLOR: &str = "#08f";
pub const PLAYER_LENGTH: f32 = 50.0;
pub const PLAYER_WIDTH: f32 = 20.0;

fn push_point(d: &mut String, p: Vec2) {
    let _ = write!(d, "{},{}", p.x.round() as i32, p.y.round() as i32);
}

/// SVG path data for a closed smooth outline.
///
/// One cubic segment per sector: leave anchor `i` along its outgoing handle,
/// arrive at anchor `i + 1` along its incoming handle.
pub fn spheroid_path(points: &[CurvePoint]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut d = String::with_capacity(points.len() * 32);
    d.push('M');
    push_point(&mut d, first.anchor);
    for (i, p) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        d.push('C');
        push_point(&mut d, p.control_out);
        d.push(' ');
        push_point(&mut d, next.control_in);
        d.push(' ');
        push_point(&mut d, next.anchor);
    }
    d.push('Z');
    d
}

fn phase_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Playing => "Mining",
        GamePhase::PlanetCleared => "Planet cleared - press Enter",
        GamePhase::GameOver => "Game over - press Enter",
    }
}

/// Full SVG document for the current state, centered on the planet.
///
/// `view_size` is the side of the square viewBox in world units.
pub fn scene_svg(state: &GameState, view_size: f32) -> String {
    let smoothing = state.config.mining.smoothing;
    let half = view_size / 2.0;
    let mut svg = String::with_capacity(8 * 1024);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        -half, -half, view_size, view_size
    );
    let _ = write!(
        svg,
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#000"/>"##,
        -half, -half, view_size, view_size
    );

    let _ = write!(
        svg,
        r#"<g transform="rotate({})">"#,
        state.planet_rotation().to_degrees()
    );
    let _ = write!(
        svg,
        r#"<path d="{}" fill="{}"/>"#,
        spheroid_path(&state.planet.curve_points(smoothing)),
        PLANET_COLOR
    );
    let _ = write!(
        svg,
        r#"<path d="{}" fill="{}"/>"#,
        spheroid_path(&state.core.curve_points(smoothing)),
        CORE_COLOR
    );
    for deposit in state.ore.iter() {
        let p = deposit.position();
        let _ = write!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            p.x.round() as i32,
            p.y.round() as i32,
            deposit.radius.round() as i32,
            ORE_COLOR
        );
    }
    for d in &state.debris {
        let p = crate::polar_to_cartesian(d.height, d.angle);
        let _ = write!(
            svg,
            r#"<circle cx="{}" cy="{}" r="6" fill="{}" fill-opacity="{:.2}"/>"#,
            p.x.round() as i32,
            p.y.round() as i32,
            DEBRIS_COLOR,
            d.ttl.clamp(0.0, 1.0)
        );
    }
    let _ = write!(
        svg,
        r#"<g transform="rotate({}) translate({})"><rect x="{}" y="{}" width="{}" height="{}" fill="{}"/></g>"#,
        state.player_angle().to_degrees(),
        state.config.player_altitude,
        -PLAYER_LENGTH / 2.0,
        -PLAYER_WIDTH / 2.0,
        PLAYER_LENGTH,
        PLAYER_WIDTH,
        PLAYER_COLOR
    );
    svg.push_str("</g>");

    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" fill="white" font-size="{}">Cash {} | Planet {} | Difficulty {:.2} | {}</text>"#,
        -half + view_size * 0.02,
        -half + view_size * 0.05,
        view_size * 0.03,
        state.cash,
        state.level,
        state.difficulty,
        phase_label(state.phase)
    );
    svg.push_str("</svg>");
    svg
}
