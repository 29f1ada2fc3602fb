use serde::{Deserialize, Serialize};

use crate::caps::{capacitances, Capacitances};
use crate::error::Result;
use crate::log::{info, Log};
use crate::model::{Channel, GateCharges};
use crate::params::DeviceParams;
use crate::terminals::{BiasPoint, Region, Terminals};

/// Every model quantity evaluated at a single set of terminal voltages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub vg: f64,
    pub vd: f64,
    pub vs: f64,
    pub vb: f64,
    pub bias: BiasPoint,
    pub vth: f64,
    pub region: Region,
    /// Drain current, in amperes.
    pub id: f64,
    /// Total gate charge, in coulombs.
    pub qg: f64,
    pub charges: GateCharges,
    pub caps: Capacitances,
}

impl OperatingPoint {
    /// Evaluates the model at `terminals`, differentiating charges with step `h`.
    pub fn evaluate(terminals: &Terminals<f64>, params: &DeviceParams, h: f64) -> Result<Self> {
        let channel = Channel::new(terminals, params);
        let qg = channel.gate_charge(params);
        Ok(Self {
            vg: terminals.vg(),
            vd: terminals.vd(),
            vs: terminals.vs(),
            vb: terminals.vb(),
            bias: channel.bias,
            vth: channel.vth,
            region: channel.region,
            id: channel.drain_current(params),
            qg,
            charges: GateCharges::partition(qg, params),
            caps: capacitances(terminals, params, h)?,
        })
    }

    #[inline]
    pub fn terminals(&self) -> Terminals<f64> {
        Terminals::new(self.vg, self.vd, self.vs, self.vb)
    }
}

impl Log for OperatingPoint {
    fn log(&self) {
        info!(
            "operating point vgs={:.4} vds={:.4} vbs={:.4}: {} (vth={:.4})",
            self.bias.vgs, self.bias.vds, self.bias.vbs, self.region, self.vth
        );
        info!("Id = {:.6e} A, Qg = {:.6e} C", self.id, self.qg);
        info!(
            "Qgs = {:.6e} C, Qgd = {:.6e} C, Qgb = {:.6e} C",
            self.charges.qgs, self.charges.qgd, self.charges.qgb
        );
        for (name, value) in self.caps.entries() {
            info!("{} = {:.6e} F", name, value);
        }
    }
}
