//! # Landform Passes
//!
//! The four height-shaping passes of the pipeline, in run order:
//!
//! 1. Base elevation: domain-warped fbm, contrast curve, quantized
//! 2. Mountain stamping: radial bumps plus ridged shoulders
//! 3. River carving: a wandering channel with one lake bulge
//! 4. Cliff carving: a sunken rectangle with one ramp column
//!
//! Each pass takes the board by `&mut` and leaves every height within
//! `0..=max_height`.

use std::f64::consts::PI;

use tracing::debug;

use crate::board::{BlockType, HexBoard};
use crate::noise::NoiseField;
use crate::rng::Rng;

/// Share of `max_height` the base pass may reach.
const BASE_HEIGHT_SHARE: f64 = 0.4;

/// Frequency applied to centred coordinates before ridged shoulder sampling.
const RIDGE_FREQUENCY: f64 = 0.06;

/// Ridge values above this add height.
const RIDGE_THRESHOLD: f64 = 0.7;

/// Layers per unit of ridge excess.
const RIDGE_GAIN: f64 = 12.0;

/// Layers every carved river tile loses on top of its width falloff.
const RIVER_BASE_DROP: u32 = 4;

/// Layers removed from the cliff rectangle.
const CLIFF_DROP: u32 = 6;

/// Pass 1: noise-driven base elevation for every in-board tile.
pub(crate) fn raise_base_elevation(board: &mut HexBoard, noise: &NoiseField, noise_scale: f64) {
    let radius = f64::from(board.board_radius());
    let max_height = f64::from(board.max_height());
    let tiles: Vec<_> = board.tiles().collect();

    for tile in tiles {
        // Normalize to [-1, 1]^2
        let nx = (f64::from(tile.q) - radius) / radius;
        let ny = (f64::from(tile.r) - radius) / radius;

        // Two independent low-frequency warps
        let warp_x = 0.4 * noise.fbm(nx * 0.6 + 31.1, ny * 0.6 - 17.3, 3, 2.2, 0.55);
        let warp_y = 0.4 * noise.fbm(nx * 0.6 - 12.7, ny * 0.6 + 24.5, 3, 2.2, 0.55);
        let wx = nx + warp_x;
        let wy = ny + warp_y;

        let signal = noise.fbm(wx * noise_scale * 10.0, wy * noise_scale * 10.0, 4, 2.0, 0.55);
        let unit = ((signal + 1.0) * 0.5).clamp(0.0, 1.0);
        let curved = (unit * 0.9).powf(1.2);
        let height = (curved * max_height * BASE_HEIGHT_SHARE).round();

        board.set_height(tile.q, tile.r, height.clamp(0.0, max_height) as u32);
    }
}

/// Pass 2: stamps up to `count` mountains at random in-board centers.
///
/// Center draws stop after `max_attempts`; returns how many were placed.
pub(crate) fn stamp_mountains(
    board: &mut HexBoard,
    rng: &mut Rng,
    noise: &NoiseField,
    count: u32,
    max_attempts: u32,
) -> u32 {
    let last = board.width() as i64 - 1;
    let mut centres = Vec::with_capacity(count as usize);
    let mut attempts = 0;
    while centres.len() < count as usize && attempts < max_attempts {
        let q = rng.irange(0, last) as i32;
        let r = rng.irange(0, last) as i32;
        if board.is_inside(q, r) {
            centres.push((q, r));
        }
        attempts += 1;
    }

    let max_height = board.max_height();
    let radius = f64::from(board.board_radius());
    let tiles: Vec<_> = board.tiles().collect();

    for &(cq, cr) in &centres {
        let peak = rng.irange(
            (f64::from(max_height) * 0.6).floor() as i64,
            i64::from(max_height),
        ) as f64;
        let spread = rng.irange((radius * 0.2).floor() as i64, (radius * 0.3).floor() as i64) as f64;

        // Radial bump
        if spread > 0.0 {
            for tile in &tiles {
                let dx = f64::from(tile.q - cq);
                let dy = f64::from(tile.r - cr);
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < spread {
                    let t = 1.0 - dist / spread;
                    let bump = (peak * t.powf(1.2)).round() as u32;
                    raise(board, tile.q, tile.r, bump);
                }
            }
        }

        // Jagged shoulders
        for tile in &tiles {
            let nx = f64::from(tile.q - cq) * RIDGE_FREQUENCY;
            let ny = f64::from(tile.r - cr) * RIDGE_FREQUENCY;
            let ridge = noise.ridged(nx, ny, 3, 2.1, 0.55);
            let edge = (ridge - RIDGE_THRESHOLD).max(0.0) * RIDGE_GAIN;
            if edge > 0.0 {
                raise(board, tile.q, tile.r, edge.round() as u32);
            }
        }
    }

    debug!(requested = count, placed = centres.len(), attempts, "mountains stamped");
    centres.len() as u32
}

/// Pass 3: carves the river and returns its center column for every row.
///
/// The returned path is authoritative for later biome siding, even in rows
/// where the channel falls outside the hexagon.
pub(crate) fn carve_river(board: &mut HexBoard, rng: &mut Rng, noise: &NoiseField) -> Vec<i32> {
    let radius = f64::from(board.board_radius());
    let depth = board.depth();

    // Coarse wander
    let phase1 = rng.range(0.0, PI * 2.0);
    let freq1 = rng.range(0.08, 0.15);
    let amp1 = rng.range(radius * 0.3, radius * 0.5);

    // Fine wander
    let phase2 = rng.range(0.0, PI * 2.0);
    let freq2 = rng.range(0.2, 0.4);
    let amp2 = rng.range(radius * 0.1, radius * 0.2);

    let lake_start = rng.irange(
        (depth as f64 * 0.4).floor() as i64,
        (depth as f64 * 0.6).floor() as i64,
    ) as i32;
    let lake_length = rng.irange(8, 15) as i32;

    let mut path = Vec::with_capacity(depth);
    let mut carved = 0usize;

    for r in 0..depth as i32 {
        let row = f64::from(r);
        let main_wander = amp1 * (row * freq1 + phase1).sin();
        let fine_wander = amp2 * (row * freq2 + phase2).sin();
        let cx = (radius + main_wander + fine_wander).floor() as i32;
        path.push(cx);

        let width_noise = (noise.sample(row * 0.1, 10.5) + 1.0) * 0.5;
        let mut half_width = (2.0 + width_noise * 3.0).floor() as i32;

        if r >= lake_start && r < lake_start + lake_length {
            let t = f64::from(r - lake_start) / f64::from(lake_length);
            half_width += ((t * PI).sin() * 7.0).floor() as i32;
        }

        for dq in -half_width..=half_width {
            let q = cx + dq;
            let Some(height) = board.height(q, r) else {
                continue;
            };
            let drop = RIVER_BASE_DROP + (half_width - dq.abs() + 1) as u32;
            board.set_height(q, r, height.saturating_sub(drop));
            board.set_block(q, r, BlockType::Water);
            carved += 1;
        }
    }

    debug!(rows = depth, carved, lake_start, lake_length, "river carved");
    path
}

/// Pass 4: sinks a fixed rectangle and builds the ramp column beside it.
pub(crate) fn carve_cliff_with_ramp(board: &mut HexBoard) {
    let radius = f64::from(board.board_radius());
    let q0 = (radius * 0.2).floor() as i32;
    let q1 = (radius * 0.5).floor() as i32;
    let r0 = (radius * 0.1).floor() as i32;
    let r1 = (radius * 0.5).floor() as i32;

    for r in r0..=r1 {
        for q in q0..=q1 {
            if let Some(height) = board.height(q, r) {
                board.set_height(q, r, height.saturating_sub(CLIFF_DROP));
            }
        }
    }

    let ramp_q = q1 + 1;
    let span = f64::from((r1 - r0).max(1));
    for r in r0..=r1 {
        if let Some(height) = board.height(ramp_q, r) {
            let t = f64::from(r - r0) / span;
            let step = (t * f64::from(CLIFF_DROP)).round() as u32;
            board.set_height(ramp_q, r, height + step);
        }
    }

    debug!(q0, q1, r0, r1, ramp_q, "cliff carved");
}

/// Adds layers to a tile, saturating at `max_height`.
#[inline]
fn raise(board: &mut HexBoard, q: i32, r: i32, layers: u32) {
    if let Some(height) = board.height(q, r) {
        board.set_height(q, r, height.saturating_add(layers));
    }
}
