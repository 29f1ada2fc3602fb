//! A square-law MOSFET model with gate charge partitioning.
//!
//! Computes drain current under the gradual channel approximation, total
//! inversion charge, a fixed-fraction split of that charge between the source
//! and drain, and small-signal capacitances obtained by numerically
//! differentiating the split charges. All quantities are in SI units.
//!
//! ```
//! use submos::{drain_current, small_signal_caps, DeviceParams, DEFAULT_STEP};
//!
//! let params = DeviceParams::default();
//! let id = drain_current(1.2, 1.2, 0.0, 0.0, &params);
//! assert!((id - 0.028175).abs() < 1e-9);
//!
//! let caps = small_signal_caps(1.2, 0.6, 0.0, 0.0, &params, DEFAULT_STEP).unwrap();
//! assert_eq!(caps.cgg, caps.cgs + caps.cgd + caps.cgb);
//! ```

pub mod caps;
pub mod error;
pub mod model;
pub mod op;
pub mod params;
pub mod sweep;
pub mod terminals;

pub(crate) mod log;

pub use caps::{central_difference, small_signal_caps, Capacitances, DEFAULT_STEP};
pub use error::{ModelError, Result};
pub use crate::log::Log;
pub use model::{
    drain_current, partition_gate_charge, region, threshold, total_gate_charge, GateCharges,
};
pub use op::OperatingPoint;
pub use params::{DeviceParams, DeviceParamsBuilder};
pub use sweep::{sweep_drain, DrainSweep, DrainSweepBuilder, IvCurve, IvPoint};
pub use terminals::{BiasPoint, Region, Terminal, Terminals};
