use wasm_bindgen::prelude::*;

use crate::brush::{Brush, BrushShape, MAX_BRUSH_RADIUS};
use crate::core::Point;
use crate::domain::config::EditorConfig;
use crate::systems::config::{ClickOutcome, ConfigTool, DrawCommand};
use crate::systems::release::{ReleaseOutcome, ReleaseTool};
use crate::systems::stack::{StackOutcome, StackTool};
use crate::systems::BrushTool;

use super::Sandbox;

/// Words per command in the `overlay()` buffer
pub const OVERLAY_STRIDE: usize = 6;

const OVERLAY_LINE: i32 = 0;
const OVERLAY_RECT: i32 = 1;
const OVERLAY_XOR_POINT: i32 = 2;

#[wasm_bindgen]
pub struct Editor {
    sandbox: Sandbox,
    brush: Brush,
    stack: StackTool,
    config: ConfigTool,
    release: ReleaseTool,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor over an empty sandbox with the default brush
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        let defaults = EditorConfig::default();
        Self::assemble(Sandbox::new(width, height), &defaults)
    }

    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: String) -> Result<Editor, JsValue> {
        let config = EditorConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let sandbox = Sandbox::from_config(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::assemble(sandbox, &config))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.sandbox.width }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.sandbox.height }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.sandbox.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.sandbox.frame() }

    pub fn load_content_bundle(&mut self, json: String) -> Result<(), JsValue> {
        self.sandbox
            .load_content_bundle_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.config.on_cancel();
        Ok(())
    }

    pub fn get_content_manifest_json(&self) -> String {
        self.sandbox.content().manifest_json()
    }

    /// Add a particle at position. Returns its handle, or -1 when the cell is taken.
    pub fn add_particle(&mut self, x: i32, y: i32, element: u8) -> i32 {
        self.sandbox
            .add_particle(x, y, element)
            .map_or(-1, |handle| handle as i32)
    }

    pub fn remove_particle(&mut self, x: i32, y: i32) -> bool {
        self.sandbox.remove_particle_at(x, y)
    }

    pub fn clear(&mut self) {
        self.config.on_cancel();
        self.sandbox.clear();
    }

    /// Particle fields at a handle: [element, x, y, life, tmp, tmp2], empty when dead
    pub fn particle(&self, handle: u32) -> Vec<f32> {
        use crate::world::ParticleWorld;
        match self.sandbox.live_particle(handle as usize) {
            Some(p) => vec![
                p.element as f32,
                p.x,
                p.y,
                p.life as f32,
                p.tmp as f32,
                p.tmp2 as f32,
            ],
            None => Vec::new(),
        }
    }

    /// 0 = circle, 1 = square. Radii clamp to the grid extent.
    pub fn set_brush(&mut self, shape: u8, radius_x: i32, radius_y: i32) {
        let shape = if shape == 1 { BrushShape::Square } else { BrushShape::Circle };
        let limit = self.sandbox.width.max(self.sandbox.height).min(MAX_BRUSH_RADIUS as u32) as i32;
        self.brush = Brush::new(shape, radius_x.clamp(0, limit), radius_y.clamp(0, limit));
    }

    pub fn set_stack_edit_depth(&mut self, depth: u32) {
        self.config.set_stack_edit_depth(depth as usize);
    }

    // === STACK TOOL ===

    /// Returns the size of the new stack, or how many particles left the shared cell
    /// when unstacking
    pub fn stack_point(&mut self, x: i32, y: i32) -> u32 {
        let outcome = self
            .stack
            .apply_at_point(&mut self.sandbox, &self.brush, Point::new(x, y));
        self.finish_stack(outcome)
    }

    pub fn stack_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, dragging: bool) -> u32 {
        let outcome = self.stack.apply_along_line(
            &mut self.sandbox,
            &self.brush,
            Point::new(x1, y1),
            Point::new(x2, y2),
            dragging,
        );
        self.finish_stack(outcome)
    }

    pub fn stack_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> u32 {
        let outcome = self.stack.apply_over_rectangle(
            &mut self.sandbox,
            &self.brush,
            Point::new(x1, y1),
            Point::new(x2, y2),
        );
        self.finish_stack(outcome)
    }

    // === CONFIG TOOL ===

    /// Per-frame update. Returns false when the active session was dropped.
    pub fn config_frame(&mut self, x: i32, y: i32) -> bool {
        self.config.on_frame_update(&self.sandbox, Point::new(x, y))
    }

    /// 0 idle, 1 started, 2 advanced, 3 finished, 4 mode menu requested, 5 dropped
    pub fn config_click(&mut self, x: i32, y: i32) -> u8 {
        match self.config.on_click(&mut self.sandbox, Point::new(x, y)) {
            ClickOutcome::Idle => 0,
            ClickOutcome::Started { .. } => 1,
            ClickOutcome::Advanced { .. } => 2,
            ClickOutcome::Finished { .. } => 3,
            ClickOutcome::OpenModeMenu(_) => 4,
            ClickOutcome::Corrupted => 5,
        }
    }

    pub fn config_cancel(&mut self) {
        self.config.on_cancel();
    }

    #[wasm_bindgen(getter)]
    pub fn is_configuring(&self) -> bool {
        self.config.is_configuring()
    }

    /// Particle the property panel should show: the session anchor while configuring,
    /// the hovered configurable particle otherwise. -1 when there is none.
    pub fn config_target(&self) -> i32 {
        self.config
            .target()
            .map_or(-1, |entry| entry.handle as i32)
    }

    /// Handle the pending mode menu was opened for, or -1
    pub fn pending_menu_handle(&self) -> i32 {
        self.config
            .pending_menu()
            .map_or(-1, |request| request.handle as i32)
    }

    pub fn pending_menu_modes(&self) -> Vec<String> {
        self.config
            .pending_menu()
            .map(|request| request.mode_names().iter().map(|m| m.to_string()).collect())
            .unwrap_or_default()
    }

    pub fn select_mode(&mut self, handle: u32, mode: u32) -> bool {
        self.config
            .on_mode_selected(&mut self.sandbox, handle as usize, mode as usize)
    }

    /// Flattened overlay commands, `OVERLAY_STRIDE` words each:
    /// line [0, x1, y1, x2, y2, rgba], rect [1, x, y, w, h, rgba], xor point [2, x, y, 0, 0, 0]
    pub fn overlay(&self) -> Vec<i32> {
        let mut commands: Vec<DrawCommand> = Vec::new();
        self.config.draw_overlay(&mut commands);
        encode_overlay(&commands)
    }

    // === RELEASE TOOL ===

    /// 0 cancelled a session, 1 cleared, 2 blocked
    pub fn release_click(&mut self, x: i32, y: i32) -> u8 {
        let outcome = self.release.click(
            &mut self.config,
            &mut self.sandbox,
            &self.brush,
            Point::new(x, y),
        );
        release_code(outcome)
    }

    pub fn release_drag(&mut self, x: i32, y: i32) -> u8 {
        let outcome = self
            .release
            .drag(&self.config, &mut self.sandbox, &self.brush, Point::new(x, y));
        release_code(outcome)
    }

    pub fn release_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, dragging: bool) -> u8 {
        let outcome = self.release.line(
            &self.config,
            &mut self.sandbox,
            &self.brush,
            Point::new(x1, y1),
            Point::new(x2, y2),
            dragging,
        );
        release_code(outcome)
    }

    pub fn release_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> u8 {
        let outcome = self.release.rect(
            &self.config,
            &mut self.sandbox,
            &self.brush,
            Point::new(x1, y1),
            Point::new(x2, y2),
        );
        release_code(outcome)
    }

    /// Drain user-facing advisories
    pub fn take_notices(&mut self) -> Vec<String> {
        self.sandbox.take_notices()
    }

    /// Stand-in for the simulation step: rebuild occupancy from positions
    pub fn end_frame(&mut self) {
        self.sandbox.reconcile();
    }
}

impl Editor {
    fn assemble(sandbox: Sandbox, config: &EditorConfig) -> Self {
        let mut tool = ConfigTool::new();
        tool.set_stack_edit_depth(config.stack_edit_depth);
        Self {
            sandbox,
            brush: config.brush.build(),
            stack: StackTool::new(),
            config: tool,
            release: ReleaseTool::new(),
        }
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn sandbox_mut(&mut self) -> &mut Sandbox {
        &mut self.sandbox
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn config_tool(&self) -> &ConfigTool {
        &self.config
    }

    fn finish_stack(&mut self, outcome: StackOutcome) -> u32 {
        // The stack path moves records but not occupancy entries
        self.sandbox.reconcile();
        match outcome {
            StackOutcome::Nothing => 0,
            StackOutcome::Stacked { order, .. } => order.len() as u32,
            StackOutcome::Unstacked { cell, placed, .. } => {
                placed.iter().filter(|(_, at)| *at != cell).count() as u32
            }
        }
    }

}

fn release_code(outcome: ReleaseOutcome) -> u8 {
    match outcome {
        ReleaseOutcome::Cancelled => 0,
        ReleaseOutcome::Cleared(_) => 1,
        ReleaseOutcome::Blocked => 2,
    }
}

fn encode_overlay(commands: &[DrawCommand]) -> Vec<i32> {
    let mut out = Vec::with_capacity(commands.len() * OVERLAY_STRIDE);
    for command in commands {
        match *command {
            DrawCommand::Line { from, to, color } => {
                out.extend_from_slice(&[OVERLAY_LINE, from.x, from.y, to.x, to.y, color.to_u32() as i32]);
            }
            DrawCommand::Rect { origin, width, height, color } => {
                out.extend_from_slice(&[OVERLAY_RECT, origin.x, origin.y, width, height, color.to_u32() as i32]);
            }
            DrawCommand::XorPoint { at } => {
                out.extend_from_slice(&[OVERLAY_XOR_POINT, at.x, at.y, 0, 0, 0]);
            }
        }
    }
    out
}
