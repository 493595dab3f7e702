//! Zoom/pan transform engine for one full-screen image.
//!
//! Two states: idle (`scale == MIN_SCALE`) and zoomed. Pinch sets the scale
//! directly, double-tap toggles between idle and [`DOUBLE_TAP_SCALE`], and pan
//! drags the image only while zoomed. Translation is clamped into the bounds for
//! the current scale after every update so the image edge never enters the frame.

use crate::model::AspectRatio;
use crate::state::tween::Tween;

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 3.0;
pub const DOUBLE_TAP_SCALE: f64 = 2.5;

/// Recognized gesture input, as delivered by a gesture source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Scale factor relative to the start of the pinch.
    PinchUpdate { scale: f64 },
    PinchEnd,
    DoubleTap,
    PanStart,
    /// Total drag delta since `PanStart`.
    PanUpdate { dx: f64, dy: f64 },
    PanEnd,
}

/// What the host should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Report `is_zoomed` to the host (`onZoomChange`).
    Zoom(bool),
}

/// Rendered image box. The image spans the viewport width; height follows the ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageBox {
    pub viewport_width: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageBox {
    pub fn new(viewport_width: f64, ratio: AspectRatio) -> Self {
        let viewport_width = if viewport_width.is_finite() { viewport_width.max(0.0) } else { 0.0 };
        Self {
            viewport_width,
            width: viewport_width,
            height: ratio.height_for(viewport_width),
        }
    }

    /// Largest allowed `|translate|` on each axis at `scale`.
    pub fn max_offset(&self, scale: f64) -> (f64, f64) {
        let x = (self.width * scale - self.viewport_width) / 2.0;
        let y = (self.height * scale - self.height) / 2.0;
        (x.max(0.0), y.max(0.0))
    }
}

pub fn clamp_offset(value: f64, max: f64) -> f64 {
    value.min(max).max(-max)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: MIN_SCALE,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_SCALE
    }
}

#[derive(Clone, Debug)]
pub struct ZoomEngine {
    image: ImageBox,
    current: Transform,
    pan_origin: Option<(f64, f64)>,
    scale_tween: Option<Tween>,
    translate_tween: Option<(Tween, Tween)>,
}

impl ZoomEngine {
    pub fn new(image: ImageBox) -> Self {
        Self {
            image,
            current: Transform::IDENTITY,
            pan_origin: None,
            scale_tween: None,
            translate_tween: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.current
    }

    pub fn scale(&self) -> f64 {
        self.current.scale
    }

    pub fn is_zoomed(&self) -> bool {
        self.current.is_zoomed()
    }

    pub fn image(&self) -> ImageBox {
        self.image
    }

    pub fn is_animating(&self) -> bool {
        self.scale_tween.is_some() || self.translate_tween.is_some()
    }

    /// Pan only engages while zoomed and not settling back to idle.
    pub fn pan_enabled(&self) -> bool {
        let settled = self.scale_tween.map_or(self.current.scale, |t| t.to);
        self.is_zoomed() && settled > MIN_SCALE
    }

    /// Returns to idle without animating.
    pub fn reset(&mut self) {
        self.current = Transform::IDENTITY;
        self.pan_origin = None;
        self.scale_tween = None;
        self.translate_tween = None;
    }

    /// Layout changed (rotation, resize); keep the transform inside the new bounds.
    pub fn set_image(&mut self, image: ImageBox) {
        self.image = image;
        self.clamp_translation();
    }

    pub fn max_offset(&self) -> (f64, f64) {
        self.image.max_offset(self.current.scale)
    }

    pub fn handle(&mut self, event: GestureEvent, now_ms: f64) -> Effect {
        match event {
            GestureEvent::PinchUpdate { scale } => self.pinch_update(scale),
            GestureEvent::PinchEnd => {
                self.pinch_end(now_ms);
                Effect::None
            }
            GestureEvent::DoubleTap => self.double_tap(now_ms),
            GestureEvent::PanStart => {
                self.pan_start();
                Effect::None
            }
            GestureEvent::PanUpdate { dx, dy } => {
                self.pan_update(dx, dy);
                Effect::None
            }
            GestureEvent::PanEnd => {
                self.pan_end();
                Effect::None
            }
        }
    }

    fn pinch_update(&mut self, factor: f64) -> Effect {
        if !factor.is_finite() || factor <= 0.0 {
            return Effect::None;
        }
        self.scale_tween = None;
        self.current.scale = factor.clamp(MIN_SCALE, MAX_SCALE);
        self.clamp_translation();
        Effect::Zoom(self.is_zoomed())
    }

    fn pinch_end(&mut self, now_ms: f64) {
        if self.current.scale <= MIN_SCALE {
            self.animate_translation_home(now_ms);
        }
    }

    fn double_tap(&mut self, now_ms: f64) -> Effect {
        let target = if self.is_zoomed() { MIN_SCALE } else { DOUBLE_TAP_SCALE };
        log::debug!("double tap: scale {:.2} -> {target}", self.current.scale);
        self.scale_tween = Some(Tween::new(self.current.scale, target, now_ms));
        if target <= MIN_SCALE {
            self.pan_origin = None;
            self.animate_translation_home(now_ms);
        }
        Effect::Zoom(target > MIN_SCALE)
    }

    fn pan_start(&mut self) {
        if !self.pan_enabled() {
            self.pan_origin = None;
            return;
        }
        self.translate_tween = None;
        self.pan_origin = Some((self.current.translate_x, self.current.translate_y));
    }

    fn pan_update(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() || !self.pan_enabled() {
            return;
        }
        // Zoom may start mid-drag (pinch and pan run together); anchor the drag here.
        let (ox, oy) = *self
            .pan_origin
            .get_or_insert((self.current.translate_x - dx, self.current.translate_y - dy));
        self.translate_tween = None;
        let (max_x, max_y) = self.max_offset();
        self.current.translate_x = clamp_offset(ox + dx, max_x);
        self.current.translate_y = clamp_offset(oy + dy, max_y);
    }

    fn pan_end(&mut self) {
        self.pan_origin = None;
        self.clamp_translation();
    }

    /// Advances running tweens to `now_ms`. Returns `true` while any are still running.
    pub fn step(&mut self, now_ms: f64) -> bool {
        if let Some(t) = self.scale_tween {
            self.current.scale = t.value_at(now_ms).clamp(MIN_SCALE, MAX_SCALE);
            if t.finished(now_ms) {
                self.scale_tween = None;
            }
        }
        if let Some((tx, ty)) = self.translate_tween {
            self.current.translate_x = tx.value_at(now_ms);
            self.current.translate_y = ty.value_at(now_ms);
            if tx.finished(now_ms) && ty.finished(now_ms) {
                self.translate_tween = None;
            }
        }
        self.clamp_translation();
        self.is_animating()
    }

    fn animate_translation_home(&mut self, now_ms: f64) {
        let Transform {
            translate_x,
            translate_y,
            ..
        } = self.current;
        self.translate_tween = Some((
            Tween::new(translate_x, 0.0, now_ms),
            Tween::new(translate_y, 0.0, now_ms),
        ));
    }

    fn clamp_translation(&mut self) {
        let (max_x, max_y) = self.max_offset();
        self.current.translate_x = clamp_offset(self.current.translate_x, max_x);
        self.current.translate_y = clamp_offset(self.current.translate_y, max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ZoomEngine {
        ZoomEngine::new(ImageBox::new(430.0, AspectRatio(430.0 / 224.0)))
    }

    fn settle(e: &mut ZoomEngine, from: f64) -> f64 {
        let end = from + 1_000.0;
        assert!(!e.step(end));
        end
    }

    fn assert_bounded(e: &ZoomEngine) {
        let t = e.transform();
        let (mx, my) = e.max_offset();
        assert!(t.translate_x.abs() <= mx + 1e-9, "x {} > {}", t.translate_x, mx);
        assert!(t.translate_y.abs() <= my + 1e-9, "y {} > {}", t.translate_y, my);
        assert!((MIN_SCALE..=MAX_SCALE).contains(&t.scale));
        assert_eq!(t.is_zoomed(), t.scale > MIN_SCALE);
    }

    #[test]
    fn bounds_follow_scale() {
        let b = ImageBox::new(400.0, AspectRatio(2.0));
        assert_eq!(b.max_offset(1.0), (0.0, 0.0));
        assert_eq!(b.max_offset(2.0), (200.0, 100.0));
        assert_eq!(clamp_offset(250.0, 200.0), 200.0);
        assert_eq!(clamp_offset(-250.0, 200.0), -200.0);
        assert_eq!(clamp_offset(5.0, 0.0), 0.0);
    }

    #[test]
    fn pinch_scale_is_clamped() {
        let mut e = engine();
        assert_eq!(e.handle(GestureEvent::PinchUpdate { scale: 0.2 }, 0.0), Effect::Zoom(false));
        assert_eq!(e.scale(), 1.0);
        assert_eq!(e.handle(GestureEvent::PinchUpdate { scale: 10.0 }, 0.0), Effect::Zoom(true));
        assert_eq!(e.scale(), 3.0);
        e.handle(GestureEvent::PinchUpdate { scale: 2.0 }, 0.0);
        assert_eq!(e.scale(), 2.0);
    }

    #[test]
    fn non_finite_pinch_is_ignored() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 2.0 }, 0.0);
        for bad in [f64::NAN, f64::INFINITY, -1.0, 0.0] {
            assert_eq!(e.handle(GestureEvent::PinchUpdate { scale: bad }, 0.0), Effect::None);
            assert_eq!(e.scale(), 2.0);
        }
    }

    #[test]
    fn shrinking_pinch_pulls_translation_in() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 3.0 }, 0.0);
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 10_000.0, dy: -10_000.0 }, 0.0);
        let (mx, my) = e.max_offset();
        assert_eq!(e.transform().translate_x, mx);
        assert_eq!(e.transform().translate_y, -my);
        e.handle(GestureEvent::PinchUpdate { scale: 1.5 }, 0.0);
        assert_bounded(&e);
        assert_eq!(e.transform().translate_x, e.max_offset().0);
    }

    #[test]
    fn pinch_end_at_min_scale_animates_home() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 2.0 }, 0.0);
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 50.0, dy: 20.0 }, 0.0);
        assert_eq!(e.transform().translate_x, 50.0);
        e.handle(GestureEvent::PinchUpdate { scale: 0.5 }, 10.0);
        e.handle(GestureEvent::PinchEnd, 10.0);
        assert!(e.is_animating());
        settle(&mut e, 10.0);
        assert_eq!(e.transform(), Transform::IDENTITY);
    }

    #[test]
    fn pinch_end_above_min_keeps_scale() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 1.8 }, 0.0);
        e.handle(GestureEvent::PinchEnd, 0.0);
        assert!(!e.is_animating());
        assert_eq!(e.scale(), 1.8);
    }

    #[test]
    fn double_tap_toggles() {
        let mut e = engine();
        assert_eq!(e.handle(GestureEvent::DoubleTap, 0.0), Effect::Zoom(true));
        let t = settle(&mut e, 0.0);
        assert_eq!(e.scale(), DOUBLE_TAP_SCALE);
        assert!(e.is_zoomed());

        e.handle(GestureEvent::PanStart, t);
        e.handle(GestureEvent::PanUpdate { dx: -80.0, dy: 30.0 }, t);
        e.handle(GestureEvent::PanEnd, t);
        assert_ne!(e.transform().translate_x, 0.0);

        assert_eq!(e.handle(GestureEvent::DoubleTap, t), Effect::Zoom(false));
        settle(&mut e, t);
        assert_eq!(e.transform(), Transform::IDENTITY);
        assert!(!e.is_zoomed());
    }

    #[test]
    fn pan_is_inert_when_idle() {
        let mut e = engine();
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 40.0, dy: 40.0 }, 0.0);
        e.handle(GestureEvent::PanEnd, 0.0);
        assert_eq!(e.transform(), Transform::IDENTITY);
    }

    #[test]
    fn pan_is_relative_to_drag_origin() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 3.0 }, 0.0);
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 20.0, dy: 10.0 }, 0.0);
        e.handle(GestureEvent::PanEnd, 0.0);
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 5.0, dy: -4.0 }, 0.0);
        assert_eq!(e.transform().translate_x, 25.0);
        assert_eq!(e.transform().translate_y, 6.0);
    }

    #[test]
    fn pan_started_before_zoom_anchors_without_jump() {
        let mut e = engine();
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PinchUpdate { scale: 2.0 }, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 30.0, dy: 0.0 }, 0.0);
        assert_eq!(e.transform().translate_x, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 40.0, dy: 0.0 }, 0.0);
        assert_eq!(e.transform().translate_x, 10.0);
        assert_eq!(e.transform().translate_y, 0.0);
    }

    #[test]
    fn pan_disengages_while_settling_to_idle() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 2.0 }, 0.0);
        e.handle(GestureEvent::DoubleTap, 0.0);
        assert!(e.is_zoomed());
        assert!(!e.pan_enabled());
    }

    #[test]
    fn new_animation_supersedes_running_one() {
        let mut e = engine();
        e.handle(GestureEvent::DoubleTap, 0.0);
        e.step(100.0);
        let mid = e.scale();
        assert!(mid > 1.0 && mid < DOUBLE_TAP_SCALE);
        e.handle(GestureEvent::DoubleTap, 100.0);
        settle(&mut e, 100.0);
        assert_eq!(e.scale(), MIN_SCALE);
    }

    #[test]
    fn pinch_cancels_scale_animation() {
        let mut e = engine();
        e.handle(GestureEvent::DoubleTap, 0.0);
        e.handle(GestureEvent::PinchUpdate { scale: 1.4 }, 50.0);
        e.step(400.0);
        assert_eq!(e.scale(), 1.4);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 2.2 }, 0.0);
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 30.0, dy: 0.0 }, 0.0);
        e.reset();
        assert_eq!(e.transform(), Transform::IDENTITY);
        assert!(!e.is_animating());
    }

    #[test]
    fn narrower_viewport_reclamps() {
        let mut e = engine();
        e.handle(GestureEvent::PinchUpdate { scale: 3.0 }, 0.0);
        e.handle(GestureEvent::PanStart, 0.0);
        e.handle(GestureEvent::PanUpdate { dx: 400.0, dy: 0.0 }, 0.0);
        e.set_image(ImageBox::new(200.0, AspectRatio(2.0)));
        assert_eq!(e.transform().translate_x, 200.0);
        assert_bounded(&e);
    }

    #[test]
    fn translation_stays_bounded_under_mixed_input() {
        let mut e = engine();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };
        let mut now = 0.0;
        for _ in 0..2_000 {
            let r = next();
            let v = (r >> 16) as f64 / (1u64 << 48) as f64;
            let event = match r % 7 {
                0 => GestureEvent::PinchUpdate { scale: v * 4.0 },
                1 => GestureEvent::PinchEnd,
                2 => GestureEvent::DoubleTap,
                3 => GestureEvent::PanStart,
                4 | 5 => GestureEvent::PanUpdate {
                    dx: (v - 0.5) * 2_000.0,
                    dy: (0.5 - v) * 900.0,
                },
                _ => GestureEvent::PanEnd,
            };
            e.handle(event, now);
            assert_bounded(&e);
            now += 16.0;
            e.step(now);
            assert_bounded(&e);
        }
    }
}
