use fc_core::CoreError;
use fc_model::{FuelCategory, FuelType};
use thiserror::Error;

pub type ComputeResult<T> = Result<T, ComputeError>;

#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("Parameter set incomplete: missing {what}")]
    IncompleteParameters { what: &'static str },

    #[error("No carbon-intensity limit published for {category:?} in {period}")]
    UnknownPeriod { category: FuelCategory, period: u32 },

    #[error("Unknown fuel pathway code: {code}")]
    UnknownPathway { code: String },

    #[error("Pathway {code} does not certify {fuel:?}")]
    PathwayMismatch { code: String, fuel: FuelType },

    #[error("Fuel carbon intensity equals the limit; quantity and units are independent")]
    DegenerateFactor,

    #[error(transparent)]
    Numeric(#[from] CoreError),
}
