//! Square-law drain current and first-order inversion charge.
//!
//! Terminal voltages are absolute and share a common ground reference. The
//! current and charge expressions use the same region split, so both are
//! continuous at pinch-off (`Vds = Vgs - Vth`).

use serde::{Deserialize, Serialize};

use crate::params::DeviceParams;
use crate::terminals::{BiasPoint, Region, Terminals};

/// Threshold voltage at bulk-source bias `vbs`.
///
/// With a nonzero body-effect coefficient the radicand `2 * phi_f - vbs` is
/// clamped at zero, so forward body bias past `2 * phi_f` saturates instead
/// of failing.
pub fn threshold(vbs: f64, params: &DeviceParams) -> f64 {
    let gamma = params.gamma();
    if gamma == 0.0 {
        return params.vth0();
    }
    let two_phi_f = 2.0 * params.phi_f();
    params.vth0() + gamma * ((two_phi_f - vbs).max(0.0).sqrt() - two_phi_f.sqrt())
}

/// The source-referenced bias, threshold, and region at one set of terminal voltages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub bias: BiasPoint,
    pub vth: f64,
    pub region: Region,
}

impl Channel {
    pub fn new(terminals: &Terminals<f64>, params: &DeviceParams) -> Self {
        let bias = terminals.bias();
        let vth = threshold(bias.vbs, params);
        let region = if bias.vgs <= vth {
            Region::Cutoff
        } else if bias.vds <= bias.vgs - vth {
            Region::Triode
        } else {
            Region::Saturation
        };
        Self { bias, vth, region }
    }

    /// Gate overdrive `Vgs - Vth`. Not meaningful in cutoff.
    #[inline]
    pub fn vov(&self) -> f64 {
        self.bias.vgs - self.vth
    }

    pub fn drain_current(&self, params: &DeviceParams) -> f64 {
        let vov = self.vov();
        let vds = self.bias.vds;
        match self.region {
            Region::Cutoff => 0.0,
            // Written as a difference of squares so it equals the saturation
            // value exactly at `vds == vov`.
            Region::Triode => {
                let pinch = vov - vds;
                0.5 * params.gain() * (vov * vov - pinch * pinch)
            }
            Region::Saturation => 0.5 * params.gain() * (vov * vov),
        }
    }

    pub fn gate_charge(&self, params: &DeviceParams) -> f64 {
        if self.region == Region::Cutoff {
            return 0.0;
        }
        let vov = self.vov();
        // Charge integration stops at the pinch-off point.
        let vds_eff = self.bias.vds.min(vov);
        let qinv_per_area = params.cox() * (vov - 0.5 * vds_eff);
        -qinv_per_area * params.w() * params.l()
    }
}

/// The gate charge split among the source, drain, and bulk terminals, in coulombs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GateCharges {
    pub qgs: f64,
    pub qgd: f64,
    /// Always zero; this model assigns no charge to the bulk.
    pub qgb: f64,
}

impl GateCharges {
    /// Splits `qg` using the fixed source-side fraction of `params`.
    ///
    /// The split does not depend on bias. A bias-dependent partition would
    /// replace this function.
    pub fn partition(qg: f64, params: &DeviceParams) -> Self {
        let beta = params.beta_partition();
        Self {
            qgs: beta * qg,
            qgd: (1.0 - beta) * qg,
            qgb: 0.0,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.qgs + self.qgd + self.qgb
    }

    #[inline]
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.qgs, self.qgd, self.qgb)
    }
}

/// Operating region at the given terminal voltages.
pub fn region(vg: f64, vd: f64, vs: f64, vb: f64, params: &DeviceParams) -> Region {
    Channel::new(&Terminals::new(vg, vd, vs, vb), params).region
}

/// Drain current in amperes.
///
/// Zero in cutoff; no subthreshold conduction is modeled.
pub fn drain_current(vg: f64, vd: f64, vs: f64, vb: f64, params: &DeviceParams) -> f64 {
    Channel::new(&Terminals::new(vg, vd, vs, vb), params).drain_current(params)
}

/// Total inversion charge under the gate, in coulombs.
///
/// Electron inversion charge is reported as a negative value.
pub fn total_gate_charge(vg: f64, vd: f64, vs: f64, vb: f64, params: &DeviceParams) -> f64 {
    Channel::new(&Terminals::new(vg, vd, vs, vb), params).gate_charge(params)
}

/// Gate charge split as `(Qgs, Qgd, Qgb)`.
pub fn partition_gate_charge(
    vg: f64,
    vd: f64,
    vs: f64,
    vb: f64,
    params: &DeviceParams,
) -> (f64, f64, f64) {
    gate_charges(&Terminals::new(vg, vd, vs, vb), params).as_tuple()
}

pub(crate) fn gate_charges(terminals: &Terminals<f64>, params: &DeviceParams) -> GateCharges {
    let qg = Channel::new(terminals, params).gate_charge(params);
    GateCharges::partition(qg, params)
}

#[cfg(test)]
mod tests {
    use float_eq::float_eq;

    use super::*;

    #[test]
    fn test_threshold_without_body_effect() {
        let params = DeviceParams::default();
        assert_eq!(threshold(0.0, &params), 0.5);
        assert_eq!(threshold(-3.0, &params), 0.5);
        assert_eq!(threshold(5.0, &params), 0.5);
    }

    #[test]
    fn test_threshold_with_body_effect() {
        let params = DeviceParams::builder().gamma(0.4).build().unwrap();
        let expected = 0.5 + 0.4 * (1.6f64.sqrt() - 0.6f64.sqrt());
        assert!(float_eq!(threshold(-1.0, &params), expected, r2nd <= 1e-12));
        assert!(float_eq!(threshold(0.0, &params), 0.5, abs <= 1e-15));
        assert!(threshold(-1.0, &params) > 0.5);
    }

    #[test]
    fn test_threshold_clamps_forward_bias() {
        let params = DeviceParams::builder().gamma(0.4).build().unwrap();
        let floor = 0.5 - 0.4 * 0.6f64.sqrt();
        assert!(float_eq!(threshold(1.0, &params), floor, r2nd <= 1e-12));
        assert!(float_eq!(threshold(10.0, &params), floor, r2nd <= 1e-12));
        assert!(threshold(1.0, &params).is_finite());
    }

    #[test]
    fn test_regions() {
        let params = DeviceParams::default();
        assert_eq!(region(0.4, 1.0, 0.0, 0.0, &params), Region::Cutoff);
        assert_eq!(region(0.5, 1.0, 0.0, 0.0, &params), Region::Cutoff);
        assert_eq!(region(1.2, 0.3, 0.0, 0.0, &params), Region::Triode);
        assert_eq!(region(1.2, 1.2, 0.0, 0.0, &params), Region::Saturation);
    }

    #[test]
    fn test_saturation_current() {
        let params = DeviceParams::default();
        let id = drain_current(1.2, 1.2, 0.0, 0.0, &params);
        assert!(float_eq!(id, 0.028175, r2nd <= 1e-9));
    }

    #[test]
    fn test_current_exactly_continuous_at_pinch_off() {
        let params = DeviceParams::default();
        let vd = 1.2 - params.vth0();
        assert_eq!(region(1.2, vd, 0.0, 0.0, &params), Region::Triode);
        let at_pinch_off = drain_current(1.2, vd, 0.0, 0.0, &params);
        assert_eq!(at_pinch_off, drain_current(1.2, 1.2, 0.0, 0.0, &params));
        assert!(drain_current(1.2, vd - 1e-12, 0.0, 0.0, &params) <= at_pinch_off);
    }

    #[test]
    fn test_zero_vds_gives_zero_current() {
        let params = DeviceParams::default();
        assert_eq!(drain_current(1.2, 0.0, 0.0, 0.0, &params), 0.0);
    }

    #[test]
    fn test_triode_current() {
        let params = DeviceParams::default();
        let id = drain_current(1.2, 0.2, 0.0, 0.0, &params);
        let expected = 0.05 * 0.023 * 100.0 * (0.7 * 0.2 - 0.5 * 0.2 * 0.2);
        assert!(float_eq!(id, expected, r2nd <= 1e-9));
    }

    #[test]
    fn test_gate_charge() {
        let params = DeviceParams::default();
        let c = params.gate_capacitance();
        let triode = total_gate_charge(1.2, 0.2, 0.0, 0.0, &params);
        assert!(float_eq!(triode, -c * (0.7 - 0.1), r2nd <= 1e-9));
        let sat = total_gate_charge(1.2, 1.2, 0.0, 0.0, &params);
        assert!(float_eq!(sat, -c * 0.35, r2nd <= 1e-9));
        assert_eq!(total_gate_charge(0.3, 1.2, 0.0, 0.0, &params), 0.0);
    }

    #[test]
    fn test_partition_is_exact_for_symmetric_split() {
        let params = DeviceParams::default();
        let (qgs, qgd, qgb) = partition_gate_charge(1.2, 0.6, 0.0, 0.0, &params);
        assert_eq!(qgs, qgd);
        assert_eq!(qgb, 0.0);
        let qg = total_gate_charge(1.2, 0.6, 0.0, 0.0, &params);
        assert!(float_eq!(qgs + qgd + qgb, qg, r2nd <= 1e-12));
    }

    #[test]
    fn test_asymmetric_partition() {
        let params = DeviceParams::builder().beta_partition(0.6).build().unwrap();
        let charges = gate_charges(&Terminals::new(1.5, 1.0, 0.0, 0.0), &params);
        let qg = total_gate_charge(1.5, 1.0, 0.0, 0.0, &params);
        assert!(float_eq!(charges.qgs, 0.6 * qg, r2nd <= 1e-12));
        assert!(float_eq!(charges.qgd, 0.4 * qg, r2nd <= 1e-12));
        assert!(float_eq!(charges.total(), qg, r2nd <= 1e-12));
    }
}
