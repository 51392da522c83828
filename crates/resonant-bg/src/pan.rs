//! Pan animation and the route direction table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Fraction of the remaining distance covered per tick
pub const DEFAULT_PAN_SPEED: f32 = 0.04;

/// How a navigation turns a table direction into a pan target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanMode {
    /// Target is the table direction itself
    #[default]
    Absolute,
    /// Target is the current pan plus the table direction
    Additive,
}

/// Smoothed 2D pan: `current` chases `target` exponentially
#[derive(Clone, Debug, PartialEq)]
pub struct PanState {
    current: Vec2,
    target: Vec2,
    speed: f32,
}

impl PanState {
    pub fn new(speed: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            speed,
        }
    }

    #[inline]
    pub fn current(&self) -> Vec2 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Pick a new target from a table direction
    pub fn retarget(&mut self, direction: Vec2, mode: PanMode) {
        self.target = match mode {
            PanMode::Absolute => direction,
            PanMode::Additive => self.current + direction,
        };
    }

    /// One tick of `current += (target - current) * speed`
    pub fn advance(&mut self) -> Vec2 {
        self.current = self.current.approach(self.target, self.speed);
        self.current
    }
}

impl Default for PanState {
    fn default() -> Self {
        Self::new(DEFAULT_PAN_SPEED)
    }
}

/// Route identifier to pan direction
///
/// Read-only once the renderer is built. Unknown routes map to zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDirectionTable(BTreeMap<String, Vec2>);

impl PageDirectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, route: impl Into<String>, direction: Vec2) -> Self {
        self.0.insert(route.into(), direction);
        self
    }

    /// Direction for `route`, or zero if the route is not mapped
    pub fn direction(&self, route: &str) -> Vec2 {
        self.get(route).unwrap_or(Vec2::ZERO)
    }

    pub fn get(&self, route: &str) -> Option<Vec2> {
        self.0.get(route).copied()
    }

    pub fn contains(&self, route: &str) -> bool {
        self.0.contains_key(route)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.0.iter().map(|(route, dir)| (route.as_str(), *dir))
    }
}

impl<S: Into<String>> FromIterator<(S, Vec2)> for PageDirectionTable {
    fn from_iter<I: IntoIterator<Item = (S, Vec2)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(r, d)| (r.into(), d)).collect())
    }
}
