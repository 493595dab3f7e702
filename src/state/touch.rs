// Touch gesture recognition: raw touch points -> pinch / double-tap / pan events.
// All three recognizers run on the same touch stream so a pinch can pan at the same time.

use crate::state::zoom::GestureEvent;

/// Movement (px) before a single touch counts as a drag instead of a tap.
pub const PAN_SLOP_PX: f64 = 4.0;
/// Longest press that still counts as a tap.
pub const TAP_MAX_MS: f64 = 250.0;
/// Second tap must land within this window after the first.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
pub const DOUBLE_TAP_SLOP_PX: f64 = 24.0;
/// Pinches starting with fingers closer than this are ignored (noisy ratio).
const MIN_PINCH_DIST: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

#[derive(Clone, Copy, Debug)]
struct Press {
    x: f64,
    y: f64,
    at_ms: f64,
    moved: bool,
}

#[derive(Clone, Copy, Debug)]
struct PanTrack {
    anchor_x: f64,
    anchor_y: f64,
    last_dx: f64,
    last_dy: f64,
    active: bool,
}

/// Turns raw touch input into [`GestureEvent`]s for a zoom engine.
pub trait GestureSource {
    /// A finger went down; `touches` holds every finger currently on the surface.
    fn touch_start(&mut self, touches: &[TouchPoint], now_ms: f64);
    fn touch_move(&mut self, touches: &[TouchPoint], emit: &mut dyn FnMut(GestureEvent));
    /// A finger lifted; `remaining` holds the fingers still down.
    fn touch_end(&mut self, remaining: &[TouchPoint], now_ms: f64, emit: &mut dyn FnMut(GestureEvent));
    /// The platform aborted the touch sequence.
    fn cancel(&mut self, emit: &mut dyn FnMut(GestureEvent));
}

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pinch_start_dist: Option<f64>,
    pan: Option<PanTrack>,
    press: Option<Press>,
    last_tap: Option<(f64, f64, f64)>,
}

fn reference_point(touches: &[TouchPoint]) -> Option<(f64, f64)> {
    match touches {
        [] => None,
        [t] => Some((t.x, t.y)),
        [a, b, ..] => Some(((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)),
    }
}

fn distance(a: &TouchPoint, b: &TouchPoint) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

impl TouchState {
    pub fn is_pinching(&self) -> bool {
        self.pinch_start_dist.is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some_and(|p| p.active)
    }

    fn register_tap(&mut self, x: f64, y: f64, now_ms: f64, emit: &mut dyn FnMut(GestureEvent)) {
        match self.last_tap.take() {
            Some((tx, ty, at))
                if now_ms - at <= DOUBLE_TAP_WINDOW_MS
                    && (x - tx).hypot(y - ty) <= DOUBLE_TAP_SLOP_PX =>
            {
                emit(GestureEvent::DoubleTap);
            }
            _ => self.last_tap = Some((x, y, now_ms)),
        }
    }

    // Finger count changed: keep the drag continuous from the new reference point.
    fn reanchor(&mut self, touches: &[TouchPoint]) {
        let Some((x, y)) = reference_point(touches) else {
            return;
        };
        let pan = self.pan.get_or_insert(PanTrack {
            anchor_x: x,
            anchor_y: y,
            last_dx: 0.0,
            last_dy: 0.0,
            active: false,
        });
        pan.anchor_x = x - pan.last_dx;
        pan.anchor_y = y - pan.last_dy;
    }
}

impl GestureSource for TouchState {
    fn touch_start(&mut self, touches: &[TouchPoint], now_ms: f64) {
        match touches {
            [] => {}
            [t] => {
                self.press = Some(Press {
                    x: t.x,
                    y: t.y,
                    at_ms: now_ms,
                    moved: false,
                });
                self.pan = Some(PanTrack {
                    anchor_x: t.x,
                    anchor_y: t.y,
                    last_dx: 0.0,
                    last_dy: 0.0,
                    active: false,
                });
            }
            [a, b, ..] => {
                self.press = None;
                self.last_tap = None;
                let dist = distance(a, b);
                self.pinch_start_dist = (dist >= MIN_PINCH_DIST).then_some(dist);
                self.reanchor(touches);
            }
        }
    }

    fn touch_move(&mut self, touches: &[TouchPoint], emit: &mut dyn FnMut(GestureEvent)) {
        if let ([a, b, ..], Some(start)) = (touches, self.pinch_start_dist) {
            emit(GestureEvent::PinchUpdate {
                scale: distance(a, b) / start,
            });
        }
        let Some((x, y)) = reference_point(touches) else {
            return;
        };
        let pinching = self.is_pinching();
        let Some(pan) = self.pan.as_mut() else {
            return;
        };
        let dx = x - pan.anchor_x;
        let dy = y - pan.anchor_y;
        let beyond_slop = dx.hypot(dy) > PAN_SLOP_PX;
        if beyond_slop {
            if let Some(p) = self.press.as_mut() {
                p.moved = true;
            }
        }
        if !pan.active && (beyond_slop || pinching) {
            pan.active = true;
            emit(GestureEvent::PanStart);
        }
        pan.last_dx = dx;
        pan.last_dy = dy;
        if pan.active {
            emit(GestureEvent::PanUpdate { dx, dy });
        }
    }

    fn touch_end(&mut self, remaining: &[TouchPoint], now_ms: f64, emit: &mut dyn FnMut(GestureEvent)) {
        if remaining.len() < 2 && self.pinch_start_dist.take().is_some() {
            emit(GestureEvent::PinchEnd);
        }
        if !remaining.is_empty() {
            self.reanchor(remaining);
            return;
        }
        if self.pan.take().is_some_and(|p| p.active) {
            emit(GestureEvent::PanEnd);
        }
        if let Some(press) = self.press.take() {
            if !press.moved && now_ms - press.at_ms <= TAP_MAX_MS {
                self.register_tap(press.x, press.y, now_ms, emit);
            }
        }
    }

    fn cancel(&mut self, emit: &mut dyn FnMut(GestureEvent)) {
        if self.pinch_start_dist.take().is_some() {
            emit(GestureEvent::PinchEnd);
        }
        if self.pan.take().is_some_and(|p| p.active) {
            emit(GestureEvent::PanEnd);
        }
        self.press = None;
        self.last_tap = None;
    }
}
