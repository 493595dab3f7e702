//! Loop-carousel index arithmetic.
//!
//! A finite list of `n > 1` items is laid out physically as `[last, ..items, first]`.
//! Slot `0` and slot `n + 1` are pads that look identical to the real last/first
//! item; when a scroll settles on one of them the strip is snapped instantly to the
//! real slot so the loop appears seamless.

use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    pub fn step(self) -> i64 {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// Physical scroll request for the render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCommand {
    pub offset: f64,
    pub animated: bool,
}

/// Builds the padded physical sequence. Identity for lists of zero or one item.
pub fn padded<T: Clone>(items: &[T]) -> Vec<T> {
    match (items.first(), items.last()) {
        (Some(first), Some(last)) if items.len() > 1 => {
            let mut out = Vec::with_capacity(items.len() + 2);
            out.push(last.clone());
            out.extend_from_slice(items);
            out.push(first.clone());
            out
        }
        _ => items.to_vec(),
    }
}

/// Text of the `current / total` counter badge.
pub fn counter_label(index: usize, len: usize) -> String {
    format!("{} / {}", index + 1, len)
}

/// One flag per real item; `true` marks the active dot or number.
pub fn dot_states(index: usize, len: usize) -> Vec<bool> {
    (0..len).map(|i| i == index).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoopCarousel {
    len: usize,
    /// Distance between slot origins (slide width + spacing).
    stride: f64,
    index: usize,
}

impl LoopCarousel {
    pub fn new(len: usize, stride: f64) -> Self {
        Self {
            len,
            stride: sanitize_stride(stride),
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Padding and wrap logic only apply with at least two items.
    pub fn is_looping(&self) -> bool {
        self.len > 1
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn stride(&self) -> f64 {
        self.stride
    }

    /// Number of physical slots in the strip.
    pub fn slot_count(&self) -> usize {
        if self.is_looping() { self.len + 2 } else { self.len }
    }

    pub fn offset_for_slot(&self, slot: usize) -> f64 {
        slot as f64 * self.stride
    }

    /// Physical slot showing the current logical index.
    pub fn current_slot(&self) -> usize {
        if self.is_looping() { self.index + 1 } else { 0 }
    }

    /// The real item a physical slot displays (pads mirror the opposite end).
    pub fn real_index_of_slot(&self, slot: usize) -> usize {
        if !self.is_looping() {
            return 0;
        }
        (slot + self.len - 1) % self.len
    }

    /// Resets to the first real item and skips past the leading pad.
    pub fn initialize(&mut self) -> Option<ScrollCommand> {
        self.index = 0;
        self.is_looping().then(|| self.instant(1))
    }

    /// Moves one item in `direction`, wrapping around both ends.
    /// The logical index is updated before the scroll animation runs.
    pub fn advance(&mut self, direction: Direction) -> Option<ScrollCommand> {
        if !self.is_looping() {
            return None;
        }
        let n = self.len as i64;
        self.index = (self.index as i64 + direction.step()).rem_euclid(n) as usize;
        Some(ScrollCommand {
            offset: self.offset_for_slot(self.index + 1),
            animated: true,
        })
    }

    /// Autoplay step.
    pub fn tick(&mut self) -> Option<ScrollCommand> {
        self.advance(Direction::Next)
    }

    /// Resolves the resting logical index once a drag or animated scroll ends.
    /// Landing on (or past) a pad yields an instant re-snap onto the real slot.
    pub fn on_settle(&mut self, offset: f64) -> Option<ScrollCommand> {
        if !self.is_looping() || !offset.is_finite() || self.stride <= 0.0 {
            return None;
        }
        let slot = (offset / self.stride).round() as i64 - 1;
        if slot < 0 {
            self.index = self.len - 1;
            log::debug!("settled on leading pad, snapping to item {}", self.index);
            Some(self.instant(self.len))
        } else if slot >= self.len as i64 {
            self.index = 0;
            log::debug!("settled on trailing pad, snapping to item 0");
            Some(self.instant(1))
        } else {
            self.index = slot as usize;
            None
        }
    }

    /// Sets the logical index without animation (used when the viewer closes).
    pub fn jump_to(&mut self, index: usize) -> Option<ScrollCommand> {
        if self.is_empty() {
            return None;
        }
        self.index = index % self.len;
        self.is_looping().then(|| self.instant(self.index + 1))
    }

    /// Applies a new slot stride after a layout change and keeps the current slot in view.
    pub fn set_stride(&mut self, stride: f64) -> Option<ScrollCommand> {
        self.stride = sanitize_stride(stride);
        self.is_looping().then(|| self.instant(self.current_slot()))
    }

    pub fn autoplay_active(&self, enabled: bool) -> bool {
        enabled && self.is_looping()
    }

    fn instant(&self, slot: usize) -> ScrollCommand {
        ScrollCommand {
            offset: self.offset_for_slot(slot),
            animated: false,
        }
    }
}

fn sanitize_stride(stride: f64) -> f64 {
    if stride.is_finite() && stride > 0.0 { stride } else { 0.0 }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum CarouselAction {
    /// New item list or first mount.
    Reset { len: usize, stride: f64 },
    Advance(Direction),
    Tick,
    Settle { offset: f64 },
    JumpTo(usize),
    Resize { stride: f64 },
}

/// Controller plus the last scroll request for the render surface.
/// `command_seq` changes whenever a new command is issued so effects can key on it.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    pub carousel: LoopCarousel,
    pub command: Option<ScrollCommand>,
    pub command_seq: u64,
}

impl CarouselState {
    pub fn new(len: usize, stride: f64) -> Self {
        let mut carousel = LoopCarousel::new(len, stride);
        let command = carousel.initialize();
        Self {
            carousel,
            command,
            command_seq: u64::from(command.is_some()),
        }
    }

    pub fn index(&self) -> usize {
        self.carousel.index()
    }
}

impl Reducible for CarouselState {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use CarouselAction::*;
        let mut new = (*self).clone();
        let command = match action {
            Reset { len, stride } => {
                new.carousel = LoopCarousel::new(len, stride);
                new.carousel.initialize()
            }
            Advance(dir) => new.carousel.advance(dir),
            Tick => new.carousel.tick(),
            Settle { offset } => new.carousel.on_settle(offset),
            JumpTo(index) => new.carousel.jump_to(index),
            Resize { stride } => new.carousel.set_stride(stride),
        };
        if command.is_none() && new.carousel == self.carousel {
            return self;
        }
        if command.is_some() {
            new.command = command;
            new.command_seq = new.command_seq.wrapping_add(1);
        }
        Rc::new(new)
    }
}
