//! Config overlay - guide lines and boxes for the current config state
//!
//! Read-only: builds primitives in device (= cell) coordinates and hands them to a sink.

use crate::core::{Direction, Point};
use crate::sample::{StackEntry, StackSample, CONDUCTOR_FLAG, FILTER_FLAG};

use super::state::{ConfigKind, ConfigState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed 0xRRGGBBAA
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }
}

/// Already-fixed segments
pub const GUIDE_COLOR: Rgba = Rgba::new(255, 200, 200, 220);
/// Segment being dragged
pub const ACTIVE_COLOR: Rgba = Rgba::new(255, 0, 0, 200);
pub const RADIUS_BOX_COLOR: Rgba = Rgba::new(200, 200, 200, 220);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Line { from: Point, to: Point, color: Rgba },
    Rect { origin: Point, width: i32, height: i32, color: Rgba },
    /// Inverting single-pixel crosshair
    XorPoint { at: Point },
}

pub trait OverlaySink {
    fn line(&mut self, from: Point, to: Point, color: Rgba);
    fn rect(&mut self, origin: Point, width: i32, height: i32, color: Rgba);
    fn xor_point(&mut self, at: Point);
}

impl OverlaySink for Vec<DrawCommand> {
    fn line(&mut self, from: Point, to: Point, color: Rgba) {
        self.push(DrawCommand::Line { from, to, color });
    }

    fn rect(&mut self, origin: Point, width: i32, height: i32, color: Rgba) {
        self.push(DrawCommand::Rect { origin, width, height, color });
    }

    fn xor_point(&mut self, at: Point) {
        self.push(DrawCommand::XorPoint { at });
    }
}

/// Up to three collinear segments from `origin` along `dir`: a fixed inner segment of
/// `first_len`, the active segment of `mid_len`, and a trailing mirror of the inner one.
fn triple_line(
    sink: &mut dyn OverlaySink,
    origin: Point,
    dir: Direction,
    first_len: i32,
    mid_len: i32,
    draw_first: bool,
    draw_third: bool,
) {
    let mid1 = dir.walk(origin, first_len);
    let mid2 = dir.walk(mid1, mid_len);
    if draw_first && first_len > 0 {
        sink.line(dir.walk(origin, 1), mid1, GUIDE_COLOR);
    }
    if mid_len > 0 {
        sink.line(dir.walk(mid1, 1), mid2, ACTIVE_COLOR);
    }
    if draw_third && first_len > 0 {
        sink.line(dir.walk(mid2, 1), dir.walk(mid2, first_len), GUIDE_COLOR);
    }
}

fn radius_box(sink: &mut dyn OverlaySink, center: Point, radius: i32) {
    let side = radius.saturating_mul(2).saturating_add(1);
    sink.rect(
        Point::new(center.x.saturating_sub(radius), center.y.saturating_sub(radius)),
        side,
        side,
        RADIUS_BOX_COLOR,
    );
}

/// Emit the overlay for `state`. In `Ready`, `hover` (the configurable particle under
/// the cursor) gets a preview of its current settings.
pub fn draw_config_overlay(
    sink: &mut dyn OverlaySink,
    state: &ConfigState,
    cursor: Point,
    hover: Option<&StackEntry>,
    sample: &StackSample,
) {
    match state {
        ConfigState::Ready => {
            sink.xor_point(cursor);
            if let Some(entry) = hover {
                draw_preview(sink, entry, sample);
            }
        }
        ConfigState::RayInner { session, inner, .. } => {
            let len = inner.get(&session.snapshot);
            triple_line(sink, session.snapshot.cell(), session.dir, 0, len, false, false);
        }
        ConfigState::RayOuter {
            session,
            inner,
            outer,
        } => {
            let mirror = matches!(
                ConfigKind::for_element(session.snapshot.element),
                Some(ConfigKind::Ray { mirror_outer: true, .. })
            );
            triple_line(
                sink,
                session.snapshot.cell(),
                session.dir,
                inner.get(&session.snapshot),
                outer.get(&session.snapshot),
                true,
                mirror,
            );
        }
        ConfigState::Radius { session, param } => {
            radius_box(sink, session.snapshot.cell(), param.get(&session.snapshot));
        }
        ConfigState::CopyElement { session, .. } => {
            let anchor = session.snapshot.cell();
            sink.line(anchor, anchor, ACTIVE_COLOR);
            sink.xor_point(cursor);
        }
    }
}

fn draw_preview(sink: &mut dyn OverlaySink, entry: &StackEntry, sample: &StackSample) {
    let part = &entry.particle;
    match ConfigKind::for_element(part.element) {
        Some(ConfigKind::Radius { param }) => radius_box(sink, part.cell(), param.get(part)),
        Some(ConfigKind::Ray {
            inner,
            outer,
            mirror_outer,
            filter_source,
        }) => {
            for dir in Direction::all() {
                // A ray fires away from whatever powers it
                let flags = sample.adjacent_flags(Direction::new(-dir.dx, -dir.dy));
                let powered = flags & CONDUCTOR_FLAG != 0;
                let filtered = filter_source && flags & FILTER_FLAG != 0;
                if !powered && !filtered {
                    continue;
                }
                triple_line(
                    sink,
                    part.cell(),
                    dir,
                    inner.get(part),
                    outer.get(part),
                    true,
                    mirror_outer,
                );
            }
        }
        _ => {}
    }
}
