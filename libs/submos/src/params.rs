//! Device parameters shared by every model evaluation.

use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::log::warn;

/// The fixed set of constants describing a single MOSFET.
///
/// All quantities are in SI units. Instances are validated on construction
/// and never mutated afterwards; use [`DeviceParams::to_builder`] to derive a
/// modified copy.
#[derive(Debug, Copy, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    pattern = "owned",
    default,
    derive(Debug, Deserialize),
    build_fn(validate = "Self::validate", error = "ModelError")
)]
#[builder_struct_attr(serde(deny_unknown_fields))]
#[serde(try_from = "DeviceParamsBuilder")]
pub struct DeviceParams {
    /// Channel width, in meters.
    w: f64,
    /// Channel length, in meters.
    l: f64,
    /// Carrier mobility, in m²/(V·s).
    mu: f64,
    /// Oxide capacitance per unit area, in F/m².
    cox: f64,
    /// Threshold voltage at zero bulk-source bias, in volts.
    vth0: f64,
    /// Body-effect coefficient. Zero disables the body effect.
    gamma: f64,
    /// Surface potential, in volts.
    phi_f: f64,
    /// Fraction of the total gate charge attributed to the source side.
    ///
    /// The remainder is attributed to the drain.
    beta_partition: f64,
}

impl Default for DeviceParams {
    fn default() -> Self {
        Self {
            w: 1e-4,
            l: 1e-6,
            mu: 0.05,
            cox: 2.3e-2,
            vth0: 0.5,
            gamma: 0.0,
            phi_f: 0.3,
            beta_partition: 0.5,
        }
    }
}

fn check(name: &'static str, value: Option<f64>, valid: bool, reason: &'static str) -> Result<()> {
    match value {
        Some(value) if !valid => {
            warn!("rejecting device parameter `{}` = {}: {}", name, value, reason);
            Err(ModelError::InvalidParameter {
                name,
                value,
                reason,
            })
        }
        _ => Ok(()),
    }
}

fn positive(name: &'static str, value: Option<f64>) -> Result<()> {
    let valid = value.map(|v| v.is_finite() && v > 0.0).unwrap_or(true);
    check(name, value, valid, "must be finite and positive")
}

fn finite(name: &'static str, value: Option<f64>) -> Result<()> {
    let valid = value.map(f64::is_finite).unwrap_or(true);
    check(name, value, valid, "must be finite")
}

impl DeviceParamsBuilder {
    pub fn validate(&self) -> Result<()> {
        positive("w", self.w)?;
        positive("l", self.l)?;
        positive("mu", self.mu)?;
        positive("cox", self.cox)?;
        finite("vth0", self.vth0)?;
        finite("gamma", self.gamma)?;

        let phi_f = self.phi_f;
        check(
            "phi_f",
            phi_f,
            phi_f.map(|v| v.is_finite() && v >= 0.0).unwrap_or(true),
            "must be finite and non-negative",
        )?;

        let beta = self.beta_partition;
        check(
            "beta_partition",
            beta,
            beta.map(|v| (0.0..=1.0).contains(&v)).unwrap_or(true),
            "must lie in [0, 1]",
        )?;
        Ok(())
    }
}

impl TryFrom<DeviceParamsBuilder> for DeviceParams {
    type Error = ModelError;

    fn try_from(value: DeviceParamsBuilder) -> Result<Self> {
        value.build()
    }
}

impl DeviceParams {
    #[inline]
    pub fn builder() -> DeviceParamsBuilder {
        DeviceParamsBuilder::default()
    }

    /// Returns a builder pre-populated with this device's parameters.
    pub fn to_builder(&self) -> DeviceParamsBuilder {
        Self::builder()
            .w(self.w)
            .l(self.l)
            .mu(self.mu)
            .cox(self.cox)
            .vth0(self.vth0)
            .gamma(self.gamma)
            .phi_f(self.phi_f)
            .beta_partition(self.beta_partition)
    }

    /// Parses parameters from a TOML table.
    ///
    /// Missing keys take their default values and unknown keys are rejected.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let builder: DeviceParamsBuilder = toml::from_str(s)?;
        builder.build()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }
    #[inline]
    pub fn l(&self) -> f64 {
        self.l
    }
    #[inline]
    pub fn mu(&self) -> f64 {
        self.mu
    }
    #[inline]
    pub fn cox(&self) -> f64 {
        self.cox
    }
    #[inline]
    pub fn vth0(&self) -> f64 {
        self.vth0
    }
    #[inline]
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
    #[inline]
    pub fn phi_f(&self) -> f64 {
        self.phi_f
    }
    #[inline]
    pub fn beta_partition(&self) -> f64 {
        self.beta_partition
    }

    /// The square-law gain factor `mu * Cox * W / L`, in A/V².
    #[inline]
    pub fn gain(&self) -> f64 {
        self.mu * self.cox * (self.w / self.l)
    }

    /// Total gate oxide capacitance `Cox * W * L`, in farads.
    #[inline]
    pub fn gate_capacitance(&self) -> f64 {
        self.cox * self.w * self.l
    }
}
