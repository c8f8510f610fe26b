//! Quadrature encoder state shared with interrupt handlers.
//!
//! The two channel handlers are the only writers. Each one runs its whole
//! read-modify-write inside a single critical section, and readers take a
//! full [`EncoderState`] copy inside one critical section as well, so a
//! reader never sees a position from one edge paired with timestamps from
//! another.
//!
//! Handlers do not log, allocate or block.

use core::cell::Cell;
use core::fmt;

use critical_section::Mutex;
use dcmotor_hal::Level;

/// Direction of the last decoded channel-A transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Position counting up
    #[default]
    Forward,
    /// Position counting down
    Reverse,
}

impl Direction {
    /// `+1` for forward, `-1` for reverse.
    #[inline]
    pub const fn step(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// Apply this direction's sign to a non-negative magnitude.
    #[inline]
    pub fn apply(self, magnitude: f32) -> f32 {
        match self {
            Direction::Forward => magnitude,
            Direction::Reverse => -magnitude,
        }
    }
}

/// Decode a channel-A edge from the levels sampled in the handler.
///
/// | A    | B    | step |
/// |------|------|------|
/// | high | low  | +1   |
/// | high | high | -1   |
/// | low  | low  | -1   |
/// | low  | high | +1   |
#[inline]
pub const fn decode_channel_a(a: Level, b: Level) -> Direction {
    match (a, b) {
        (Level::High, Level::Low) | (Level::Low, Level::High) => Direction::Forward,
        (Level::High, Level::High) | (Level::Low, Level::Low) => Direction::Reverse,
    }
}

/// Everything the handlers write, copied out as one unit.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderState {
    /// Signed count, wrapping on overflow
    pub position: i32,
    /// Direction of the last channel-A edge
    pub direction: Direction,
    /// Time of the most recent edge on either channel
    pub last_transition_us: u64,
    /// Time of the edge before that
    pub previous_transition_us: u64,
    /// Edges handled on either channel since construction, wrapping
    pub transitions: u32,
}

impl EncoderState {
    /// State at rest: position zero, both timestamps at `now_us`.
    pub const fn new(now_us: u64) -> Self {
        Self {
            position: 0,
            direction: Direction::Forward,
            last_transition_us: now_us,
            previous_transition_us: now_us,
            transitions: 0,
        }
    }

    /// Interval between the two most recent edges.
    ///
    /// `None` when the timestamps are equal or out of order.
    #[inline]
    pub fn transition_interval_us(&self) -> Option<u64> {
        self.last_transition_us
            .checked_sub(self.previous_transition_us)
            .filter(|dt| *dt > 0)
    }

    #[inline]
    fn stamp(&mut self, now_us: u64) {
        self.previous_transition_us = self.last_transition_us;
        self.last_transition_us = now_us;
        self.transitions = self.transitions.wrapping_add(1);
    }
}

/// Interrupt-driven quadrature encoder.
///
/// All methods take `&self`; the encoder can live in a `static` and be
/// reached from interrupt handlers.
///
/// # Example
///
/// ```
/// use dcmotor_control::encoder::{Direction, QuadratureEncoder};
/// use dcmotor_hal::Level;
///
/// let encoder = QuadratureEncoder::new(0);
/// encoder.on_channel_a(Level::High, Level::Low, 100);
/// encoder.on_channel_a(Level::Low, Level::High, 200);
///
/// let state = encoder.snapshot();
/// assert_eq!(state.position, 2);
/// assert_eq!(state.direction, Direction::Forward);
/// assert_eq!(state.transition_interval_us(), Some(100));
/// ```
pub struct QuadratureEncoder {
    state: Mutex<Cell<EncoderState>>,
}

impl QuadratureEncoder {
    /// Encoder at rest with both timestamps at `now_us`.
    pub const fn new(now_us: u64) -> Self {
        Self {
            state: Mutex::new(Cell::new(EncoderState::new(now_us))),
        }
    }

    /// Channel-A edge handler.
    ///
    /// `a` and `b` are the channel levels sampled on entry.
    #[inline]
    pub fn on_channel_a(&self, a: Level, b: Level, now_us: u64) {
        let direction = decode_channel_a(a, b);
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.position = state.position.wrapping_add(direction.step());
            state.direction = direction;
            state.stamp(now_us);
            cell.set(state);
        });
    }

    /// Channel-B edge handler. Timing only.
    ///
    /// Channel B alone cannot tell direction without remembering channel
    /// A's phase, so position and direction are left untouched.
    #[inline]
    pub fn on_channel_b(&self, now_us: u64) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.stamp(now_us);
            cell.set(state);
        });
    }

    /// Copy of the whole state, taken in one critical section.
    #[inline]
    pub fn snapshot(&self) -> EncoderState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> i32 {
        self.snapshot().position
    }

    /// Back to rest: position zero, forward, both timestamps at `now_us`.
    pub fn reset(&self, now_us: u64) {
        critical_section::with(|cs| self.state.borrow(cs).set(EncoderState::new(now_us)));
    }
}

impl fmt::Debug for QuadratureEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadratureEncoder")
            .field("state", &self.snapshot())
            .finish()
    }
}
