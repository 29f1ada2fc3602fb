//! Drain-voltage sweeps at a fixed gate, source, and bulk bias.

use std::fmt::Display;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use splines::{Interpolation, Key, Spline};

use crate::error::{ModelError, Result};
use crate::log::debug;
use crate::model::Channel;
use crate::params::DeviceParams;
use crate::terminals::Terminals;

#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(pattern = "owned", default, build_fn(validate = "Self::validate", error = "ModelError"))]
pub struct DrainSweep {
    vg: f64,
    vs: f64,
    vb: f64,
    /// First drain voltage, in volts.
    vd_start: f64,
    /// Last drain voltage, in volts. Included in the sweep.
    vd_stop: f64,
    /// Number of evenly spaced drain voltages.
    points: usize,
}

impl Default for DrainSweep {
    fn default() -> Self {
        Self {
            vg: 1.2,
            vs: 0.0,
            vb: 0.0,
            vd_start: 0.0,
            vd_stop: 1.2,
            points: 13,
        }
    }
}

impl DrainSweepBuilder {
    pub fn validate(&self) -> Result<()> {
        if let Some(points) = self.points {
            if points < 2 {
                return Err(ModelError::InvalidSweep(format!(
                    "a sweep needs at least 2 points, got {points}"
                )));
            }
        }
        for (name, value) in [
            ("vg", self.vg),
            ("vs", self.vs),
            ("vb", self.vb),
            ("vd_start", self.vd_start),
            ("vd_stop", self.vd_stop),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ModelError::InvalidSweep(format!(
                        "`{name}` must be finite, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl DrainSweep {
    #[inline]
    pub fn builder() -> DrainSweepBuilder {
        DrainSweepBuilder::default()
    }

    #[inline]
    pub fn points(&self) -> usize {
        self.points
    }

    /// The swept drain voltages, endpoints included.
    pub fn drain_voltages(&self) -> impl Iterator<Item = f64> + '_ {
        let step = (self.vd_stop - self.vd_start) / (self.points - 1) as f64;
        (0..self.points).map(move |i| {
            if i + 1 == self.points {
                self.vd_stop
            } else {
                self.vd_start + step * i as f64
            }
        })
    }
}

/// One sample of an [`IvCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvPoint {
    /// Drain-source voltage, in volts.
    pub vds: f64,
    /// Drain current, in amperes.
    pub id: f64,
}

/// Drain current versus drain-source voltage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IvCurve {
    points: Vec<IvPoint>,
}

impl IvCurve {
    pub fn points(&self) -> &[IvPoint] {
        &self.points
    }

    /// Linearly interpolates the drain current at `vds`.
    ///
    /// Returns [`None`] outside the swept range or for NaN. Each call builds a
    /// spline over all points, so callers sampling many values should collect
    /// them from [`IvCurve::points`] instead.
    pub fn sample(&self, vds: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        let (lo, hi) = if first.vds <= last.vds {
            (first, last)
        } else {
            (last, first)
        };
        if !(lo.vds..=hi.vds).contains(&vds) {
            return None;
        }
        if vds == hi.vds {
            return Some(hi.id);
        }
        Spline::from_vec(
            self.points
                .iter()
                .map(|p| Key::new(p.vds, p.id, Interpolation::Linear))
                .collect(),
        )
        .sample(vds)
    }
}

impl Display for IvCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vds (V)\tId (A)")?;
        for p in self.points.iter() {
            writeln!(f, "{:.3}\t{:.6e}", p.vds, p.id)?;
        }
        Ok(())
    }
}

/// Evaluates the drain current at every drain voltage of `sweep`.
pub fn sweep_drain(params: &DeviceParams, sweep: &DrainSweep) -> IvCurve {
    debug!(
        "sweeping vd from {} to {} ({} points) at vg={} vs={} vb={}",
        sweep.vd_start, sweep.vd_stop, sweep.points, sweep.vg, sweep.vs, sweep.vb
    );
    let points = sweep
        .drain_voltages()
        .map(|vd| {
            let terminals = Terminals::new(sweep.vg, vd, sweep.vs, sweep.vb);
            let channel = Channel::new(&terminals, params);
            IvPoint {
                vds: channel.bias.vds,
                id: channel.drain_current(params),
            }
        })
        .collect();
    IvCurve { points }
}

#[cfg(test)]
mod tests {
    use float_eq::float_eq;

    use super::*;

    #[test]
    fn test_default_sweep_voltages() {
        let sweep = DrainSweep::default();
        let vds: Vec<f64> = sweep.drain_voltages().collect();
        assert_eq!(vds.len(), 13);
        assert_eq!(vds[0], 0.0);
        assert_eq!(vds[12], 1.2);
        assert!(float_eq!(vds[6], 0.6, abs <= 1e-12));
    }

    #[test]
    fn test_rejects_degenerate_sweep() {
        assert!(matches!(
            DrainSweep::builder().points(1).build(),
            Err(ModelError::InvalidSweep(_))
        ));
        assert!(DrainSweep::builder().vd_stop(f64::NAN).build().is_err());
        assert!(DrainSweep::builder().points(2).build().is_ok());
    }

    #[test]
    fn test_sweep_curve() {
        let params = DeviceParams::default();
        let curve = sweep_drain(&params, &DrainSweep::default());
        let points = curve.points();
        assert_eq!(points[0].id, 0.0);
        assert!(float_eq!(points[12].id, 0.028175, r2nd <= 1e-9));
        for pair in points.windows(2) {
            assert!(
                pair[1].id >= pair[0].id,
                "Id decreased from vds={} to vds={}",
                pair[0].vds,
                pair[1].vds
            );
        }
        // vds = 0.7 V sits exactly at pinch-off and matches saturation.
        assert_eq!(points[7].id, points[8].id);
    }

    #[test]
    fn test_sample_interpolates() {
        let params = DeviceParams::default();
        let curve = sweep_drain(&params, &DrainSweep::default());
        let a = curve.points()[1];
        let b = curve.points()[2];
        let mid = curve.sample(0.5 * (a.vds + b.vds)).unwrap();
        assert!(float_eq!(mid, 0.5 * (a.id + b.id), r2nd <= 1e-9));
        assert_eq!(curve.sample(1.2), Some(curve.points()[12].id));
        assert_eq!(curve.sample(-0.1), None);
        assert_eq!(curve.sample(1.3), None);
        assert_eq!(curve.sample(f64::NAN), None);
    }

    #[test]
    fn test_table_format() {
        let params = DeviceParams::default();
        let sweep = DrainSweep::builder()
            .vd_stop(1.0)
            .points(2)
            .build()
            .unwrap();
        let table = sweep_drain(&params, &sweep).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Vds (V)\tId (A)");
        assert_eq!(lines[1], "0.000\t0.000000e0");
        assert!(lines[2].starts_with("1.000\t2.81"));
    }
}
