//! Small-signal capacitances by numerical differentiation of the partitioned gate charge.
//!
//! The charge function is continuous but has kinks at the cutoff/triode and
//! triode/saturation boundaries. Within `h` of a boundary the central
//! difference straddles the kink and the reported capacitance is an average
//! of the one-sided slopes. Smaller steps narrow that window at the cost of
//! more cancellation error.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::log::trace;
use crate::model::{gate_charges, GateCharges};
use crate::params::DeviceParams;
use crate::terminals::{Terminal, Terminals};

/// Default finite-difference step, in volts.
pub const DEFAULT_STEP: f64 = 1e-6;

/// Small-signal gate capacitances, in farads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Capacitances {
    pub cgs: f64,
    pub cgd: f64,
    pub cgb: f64,
    /// Always `cgs + cgd + cgb`.
    pub cgg: f64,
}

impl Capacitances {
    pub fn new(cgs: f64, cgd: f64, cgb: f64) -> Self {
        Self {
            cgs,
            cgd,
            cgb,
            cgg: cgs + cgd + cgb,
        }
    }

    /// Named entries, in the order `Cgs`, `Cgd`, `Cgb`, `Cgg`.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("Cgs", self.cgs),
            ("Cgd", self.cgd),
            ("Cgb", self.cgb),
            ("Cgg", self.cgg),
        ]
    }
}

/// Second-order central difference `(f(x + h) - f(x - h)) / 2h`.
pub fn central_difference(f: impl Fn(f64) -> f64, x0: f64, h: f64) -> f64 {
    (f(x0 + h) - f(x0 - h)) / (2.0 * h)
}

pub(crate) fn check_step(h: f64) -> Result<()> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidStep(h))
    }
}

/// Derivative of one charge component with respect to one terminal voltage,
/// holding the other three terminals fixed.
fn charge_derivative(
    terminals: &Terminals<f64>,
    terminal: Terminal,
    component: fn(&GateCharges) -> f64,
    params: &DeviceParams,
    h: f64,
) -> f64 {
    central_difference(
        |v| component(&gate_charges(&terminals.with(terminal, v), params)),
        terminals[terminal],
        h,
    )
}

pub(crate) fn capacitances(
    terminals: &Terminals<f64>,
    params: &DeviceParams,
    h: f64,
) -> Result<Capacitances> {
    check_step(h)?;
    let cgs = -charge_derivative(terminals, Terminal::Gate, |q| q.qgs, params, h);
    let cgd = -charge_derivative(terminals, Terminal::Drain, |q| q.qgd, params, h);
    let cgb = -charge_derivative(terminals, Terminal::Bulk, |q| q.qgb, params, h);
    let caps = Capacitances::new(cgs, cgd, cgb);
    trace!(
        "capacitances at vg={} vd={} vs={} vb={} (h={}): {:?}",
        terminals.vg(),
        terminals.vd(),
        terminals.vs(),
        terminals.vb(),
        h,
        caps
    );
    Ok(caps)
}

/// Small-signal capacitances at the given terminal voltages.
///
/// `Cgs = -dQgs/dVg`, `Cgd = -dQgd/dVd`, `Cgb = -dQgb/dVb`, and `Cgg` is their sum.
/// `h` is the step in volts; see [`DEFAULT_STEP`]. Fails if `h` is not finite and positive.
pub fn small_signal_caps(
    vg: f64,
    vd: f64,
    vs: f64,
    vb: f64,
    params: &DeviceParams,
    h: f64,
) -> Result<Capacitances> {
    capacitances(&Terminals::new(vg, vd, vs, vb), params, h)
}
