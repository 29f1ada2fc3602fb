//! Terminal voltages and operating-region classification.

use std::fmt::Display;

use array_map::{ArrayMap, Indexable};
use serde::{Deserialize, Serialize};

/// The four terminals of a MOSFET.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[repr(u8)]
#[derive(Indexable)]
pub enum Terminal {
    Gate,
    Drain,
    Source,
    Bulk,
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Gate => write!(f, "gate"),
            Self::Drain => write!(f, "drain"),
            Self::Source => write!(f, "source"),
            Self::Bulk => write!(f, "bulk"),
        }
    }
}

/// An association of a value with type `T` to each of the four [`Terminal`]s.
///
/// When `T` is `f64`, these are absolute terminal voltages referenced to a
/// common ground.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Terminals<T> {
    inner: ArrayMap<Terminal, T, 4>,
}

impl<T> Terminals<T> {
    /// Creates a new [`Terminals`] with the provided values for each terminal.
    pub const fn new(gate: T, drain: T, source: T, bulk: T) -> Self {
        // The ordering of array elements must match the variant order of [`Terminal`].
        Self {
            inner: ArrayMap::new([gate, drain, source, bulk]),
        }
    }
}

impl<T> Terminals<T>
where
    T: Copy,
{
    pub const fn uniform(value: T) -> Self {
        Self {
            inner: ArrayMap::new([value; 4]),
        }
    }
}

impl<T> std::ops::Index<Terminal> for Terminals<T> {
    type Output = T;
    fn index(&self, index: Terminal) -> &Self::Output {
        &self.inner[index]
    }
}

impl<T> std::ops::IndexMut<Terminal> for Terminals<T> {
    fn index_mut(&mut self, index: Terminal) -> &mut Self::Output {
        &mut self.inner[index]
    }
}

impl Terminals<f64> {
    #[inline]
    pub fn vg(&self) -> f64 {
        self[Terminal::Gate]
    }
    #[inline]
    pub fn vd(&self) -> f64 {
        self[Terminal::Drain]
    }
    #[inline]
    pub fn vs(&self) -> f64 {
        self[Terminal::Source]
    }
    #[inline]
    pub fn vb(&self) -> f64 {
        self[Terminal::Bulk]
    }

    /// Returns a copy with `terminal` set to `voltage`, leaving the others unchanged.
    pub fn with(mut self, terminal: Terminal, voltage: f64) -> Self {
        self[terminal] = voltage;
        self
    }

    /// Converts absolute terminal voltages to source-referenced voltages.
    pub fn bias(&self) -> BiasPoint {
        let vs = self.vs();
        BiasPoint {
            vgs: self.vg() - vs,
            vds: self.vd() - vs,
            vbs: self.vb() - vs,
        }
    }
}

/// Source-referenced terminal voltages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasPoint {
    pub vgs: f64,
    pub vds: f64,
    pub vbs: f64,
}

/// The operating region of the square-law model.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// `Vgs <= Vth`; no channel.
    Cutoff,
    /// `Vds <= Vgs - Vth`.
    Triode,
    /// `Vds > Vgs - Vth`; the channel is pinched off.
    Saturation,
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Cutoff => write!(f, "cutoff"),
            Self::Triode => write!(f, "triode"),
            Self::Saturation => write!(f, "saturation"),
        }
    }
}
