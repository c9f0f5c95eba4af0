//! Tick scheduling - fixed step accumulation and subscription

use crate::types::EntityId;
use tracing::warn;

/// Slack allowed when draining, so float drift never drops a whole step
const STEP_EPSILON: f64 = 1e-5;

/// Most steps one drain may run; time beyond this is dropped
pub const MAX_CATCH_UP_STEPS: usize = 1000;

/// Splits frame time into tick steps
///
/// Without an interval every frame is one tick of the frame's delta. With an
/// interval, elapsed time accumulates and is drained in whole steps, so a slow
/// frame runs several catch-up ticks instead of one oversized one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickAccumulator {
    interval: Option<f32>,
    pending: f32,
}

impl TickAccumulator {
    pub fn every_frame() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if `interval` is not positive.
    pub fn fixed(interval: f32) -> Self {
        assert!(interval > 0.0, "Tick interval must be greater than zero");
        TickAccumulator {
            interval: Some(interval),
            pending: 0.0,
        }
    }

    pub fn interval(&self) -> Option<f32> {
        self.interval
    }

    /// Time accumulated towards the next step
    pub fn pending(&self) -> f32 {
        self.pending
    }

    /// Add `delta_time` and return the step deltas to tick with
    ///
    /// Non-positive and non-finite deltas produce no ticks. At most
    /// [`MAX_CATCH_UP_STEPS`] steps are returned; a longer stall drops the
    /// excess time and leaves less than one step pending.
    pub fn drain(&mut self, delta_time: f32) -> Vec<f32> {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return Vec::new();
        }

        let Some(step) = self.interval else {
            return vec![delta_time];
        };

        let step_len = f64::from(step);
        let pending = f64::from(self.pending) + f64::from(delta_time);
        let due = ((pending + STEP_EPSILON) / step_len).floor();
        let count = due.min(MAX_CATCH_UP_STEPS as f64) as usize;

        self.pending = if due > MAX_CATCH_UP_STEPS as f64 {
            warn!(dropped_steps = due - MAX_CATCH_UP_STEPS as f64, "tick catch-up capped");
            (pending % step_len) as f32
        } else {
            (pending - due * step_len).max(0.0) as f32
        };
        vec![step; count]
    }
}

/// Source of periodic update callbacks
///
/// Subscribed entities are updated every frame; unsubscribing is how an
/// entity stops ticking.
pub trait TickDriver {
    /// Returns false when already subscribed
    fn subscribe(&mut self, entity: EntityId) -> bool;

    /// Returns false when not subscribed
    fn unsubscribe(&mut self, entity: &EntityId) -> bool;

    fn is_subscribed(&self, entity: &EntityId) -> bool;
}

/// Ordered tick subscriptions, one per entity
#[derive(Debug, Clone, Default)]
pub struct TickSystem {
    subscribers: Vec<EntityId>,
}

impl TickSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribers in subscription order
    pub fn subscribers(&self) -> &[EntityId] {
        &self.subscribers
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl TickDriver for TickSystem {
    fn subscribe(&mut self, entity: EntityId) -> bool {
        if self.is_subscribed(&entity) {
            return false;
        }
        self.subscribers.push(entity);
        true
    }

    fn unsubscribe(&mut self, entity: &EntityId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|id| id != entity);
        self.subscribers.len() != before
    }

    fn is_subscribed(&self, entity: &EntityId) -> bool {
        self.subscribers.contains(entity)
    }
}
