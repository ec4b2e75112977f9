use std::io;
use std::result;

use thiserror::Error;

use crate::axis::{AxisType, DependenceType, Spacing};

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IO(#[from] io::Error),

    #[error("axis '{axis}': {spacing:?} spacing requires explicit values or a reader")]
    MissingValues { axis: String, spacing: Spacing },

    #[error(
        "axis '{axis}': expected {expected} values for {spacing:?} spacing \
         over {ncoords} coordinates, got {got}"
    )]
    BadShape {
        axis: String,
        spacing: Spacing,
        ncoords: usize,
        expected: usize,
        got: usize,
    },

    #[error("axis '{axis}': {dependence:?} dependence inconsistent with dependsOn {depends_on:?}")]
    BadDependence {
        axis: String,
        dependence: DependenceType,
        depends_on: Vec<String>,
    },

    #[error("axis '{axis}': {axis_type:?} axis requires a time helper")]
    MissingTimeHelper { axis: String, axis_type: AxisType },

    #[error("axis '{axis}': time helper supplied for non-time {axis_type:?} axis")]
    UnexpectedTimeHelper { axis: String, axis_type: AxisType },

    #[error("axis '{0}' is not a time axis")]
    NotTimeAxis(String),

    #[error("axis '{0}': explicit coordinate values are not available")]
    NoValues(String),

    #[error("axis '{axis}': cannot make an index range over {ncoords} coordinates")]
    InvalidRange { axis: String, ncoords: usize },

    #[error("axis '{axis}': index {index} is out of bounds for {ncoords} coordinates")]
    OutOfBounds {
        axis: String,
        index: usize,
        ncoords: usize,
    },

    #[error("axis '{axis}': subset [{min}, {max}] does not intersect [{start}, {end}]")]
    EmptySubset {
        axis: String,
        min: f64,
        max: f64,
        start: f64,
        end: f64,
    },

    #[error("axis '{axis}' is not a dependent axis governed by '{governing}'")]
    NotDependent { axis: String, governing: String },

    #[error("axis '{0}': numeric range subset requires a one-dimensional axis")]
    NotOneDimensional(String),

    #[error("axis '{axis}': stride {stride} is not valid for {spacing:?} spacing")]
    BadStride {
        axis: String,
        stride: usize,
        spacing: Spacing,
    },
}

pub type Result<T> = result::Result<T, Error>;
