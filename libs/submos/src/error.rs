use derive_builder::UninitializedFieldError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("invalid finite-difference step: {0} (must be finite and positive)")]
    InvalidStep(f64),
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
    #[error("uninitialized field: {0}")]
    UninitializedField(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("error parsing TOML: {0}")]
    TomlParsing(#[from] toml::de::Error),
    #[error("error writing TOML: {0}")]
    TomlWriting(#[from] toml::ser::Error),
}

impl From<UninitializedFieldError> for ModelError {
    fn from(value: UninitializedFieldError) -> Self {
        Self::UninitializedField(value.field_name())
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
