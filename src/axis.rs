use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use log::error;
use ndarray::{Array1, Array2};
use parking_lot::Mutex;

use crate::{
    attrs::{Attribute, AttributeContainer},
    coords::{layout, RegularCoords},
    errors::{Error, Result},
    range::{IndexRange, SubsetWindow},
    reader::CoordAxisReader,
    time::TimeHelper,
};

/// How an axis's coordinate values and cell edges are stored or derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spacing {
    /// Regularly spaced points derived from (start, resolution, ncoords); no values are stored
    /// and cell edges fall halfway between coordinates.
    Regular,
    /// Irregularly spaced points, one stored value per coordinate; cell edges fall halfway
    /// between consecutive points.
    IrregularPoint,
    /// Contiguous intervals; `ncoords + 1` stored values are the shared edges, and each
    /// coordinate is the midpoint of its interval.
    ContiguousInterval,
    /// Discontiguous intervals; `2 * ncoords` stored values laid out as (low, high) pairs.
    /// Intervals need not be contiguous or ordered.
    DiscontiguousInterval,
}

/// Whether an axis has its own dimension, is a function of another axis, is scalar, or is
/// two-dimensional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependenceType {
    /// Has its own dimension, e.g. x(x).
    Independent,
    /// Auxiliary coordinate, a function of another axis, e.g. reftime(time).
    Dependent,
    /// Zero-dimensional, e.g. a single reference time.
    Scalar,
    /// A function of two other axes, e.g. time(reftime, time).
    TwoD,
}

/// The physical role an axis plays in its coordinate system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisType {
    Time,
    RunTime,
    TimeOffset,
    Ensemble,
    GeoX,
    GeoY,
    GeoZ,
    Lat,
    Lon,
    Height,
    Pressure,
}

impl AxisType {
    /// Time-like axes carry a calendar-conversion helper.
    pub fn is_time(self) -> bool {
        matches!(self, Self::Time | Self::RunTime | Self::TimeOffset)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::GeoZ | Self::Height | Self::Pressure)
    }
}

/// Declared storage type of the coordinate values. Values are handled as `f64` internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    I32,
    I64,
    F32,
    F64,
}

/// State of the lazily populated explicit value slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// Regular spacing: no explicit array exists by design.
    NotNeeded,
    /// Not yet loaded; the deferred reader will run on the next access.
    Unloaded,
    Loaded,
    /// The most recent load attempt failed; the next access retries the reader.
    Failed(String),
}

#[derive(Clone)]
enum ValueSlot {
    Unloaded,
    Loaded(Arc<Array1<f64>>),
    Failed(String),
}

/// Number of stored values for `ncoords` coordinates under each spacing kind. For regular
/// spacing nothing needs to be stored; an eagerly supplied array, if any, is one per coordinate.
fn stored_len(spacing: Spacing, ncoords: usize) -> usize {
    match spacing {
        Spacing::Regular | Spacing::IrregularPoint => layout::point_len(ncoords),
        Spacing::ContiguousInterval => layout::contiguous_len(ncoords),
        Spacing::DiscontiguousInterval => layout::discontiguous_len(ncoords),
    }
}

/// The coordinate-system container an axis belongs to, seen from the axis's side.
///
/// Wiring the container is out of scope here; this is the hook surface only.
pub trait CoordSysContainer {
    fn find_axis(&self, name: &str) -> Option<&CoordinateAxis>;
}

/// One labeled dimension of coordinate values in a gridded dataset.
///
/// Immutable once built, except for the lazily populated explicit value slot, which is guarded
/// by a per-instance mutex. Construction goes through [`CoordinateAxisBuilder`], which enforces
/// the consistency rules between spacing, values, dependence, and axis type, and never performs
/// I/O: when no eager value array is supplied, reading is deferred to a [`CoordAxisReader`].
///
pub struct CoordinateAxis {
    pub(crate) name: String,
    pub(crate) units: String,
    pub(crate) description: String,
    pub(crate) data_type: DataType,
    pub(crate) axis_type: AxisType,
    pub(crate) attributes: AttributeContainer,
    pub(crate) dependence_type: DependenceType,
    pub(crate) depends_on: Vec<String>,
    pub(crate) ncoords: usize,
    pub(crate) spacing: Spacing,
    pub(crate) start_value: f64,
    pub(crate) end_value: f64,
    pub(crate) resolution: f64,
    values: Mutex<ValueSlot>,
    pub(crate) reader: Option<Arc<dyn CoordAxisReader>>,
    pub(crate) time: Option<Arc<dyn TimeHelper>>,
    pub(crate) is_subset: bool,
    pub(crate) subset_window: Option<SubsetWindow>,
}

impl CoordinateAxis {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    pub fn attributes(&self) -> &AttributeContainer {
        &self.attributes
    }

    pub fn dependence_type(&self) -> DependenceType {
        self.dependence_type
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn ncoords(&self) -> usize {
        self.ncoords
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn is_subset(&self) -> bool {
        self.is_subset
    }

    /// The index window this subset occupies in the axis it was derived from, if any.
    pub fn subset_window(&self) -> Option<SubsetWindow> {
        self.subset_window
    }

    pub fn is_regular(&self) -> bool {
        self.spacing == Spacing::Regular
    }

    pub fn is_interval(&self) -> bool {
        matches!(
            self.spacing,
            Spacing::ContiguousInterval | Spacing::DiscontiguousInterval
        )
    }

    pub fn is_scalar(&self) -> bool {
        self.dependence_type == DependenceType::Scalar
    }

    /// Whether explicit values are resident, without triggering a load.
    pub fn has_data(&self) -> bool {
        matches!(&*self.values.lock(), ValueSlot::Loaded(_))
    }

    /// State of the explicit value slot, without triggering a load.
    pub fn load_state(&self) -> LoadState {
        if self.is_regular() {
            return LoadState::NotNeeded;
        }

        match &*self.values.lock() {
            ValueSlot::Unloaded => LoadState::Unloaded,
            ValueSlot::Loaded(_) => LoadState::Loaded,
            ValueSlot::Failed(reason) => LoadState::Failed(reason.clone()),
        }
    }

    /// The explicit coordinate values, loading them through the deferred reader if necessary.
    ///
    /// Returns `None` for regular spacing: callers derive those coordinates analytically and no
    /// array is ever materialized. Otherwise the first caller triggers the reader while holding
    /// this instance's slot lock, so concurrent first callers serialize behind a single read and
    /// every caller sees the same cached array. A failed read is logged, recorded in the slot,
    /// and degrades this call to `None`; the next call retries the reader. Use [`load_state`]
    /// to tell "no array by design" apart from "load failed".
    ///
    /// [`load_state`]: CoordinateAxis::load_state
    pub fn values(&self) -> Option<Arc<Array1<f64>>> {
        if self.is_regular() {
            return None;
        }

        let mut slot = self.values.lock();
        if let ValueSlot::Loaded(values) = &*slot {
            return Some(Arc::clone(values));
        }

        let reader = self.reader.as_ref()?;
        match reader.read_values(self) {
            Ok(values) => {
                let expected = stored_len(self.spacing, self.ncoords);
                if values.len() != expected {
                    let reason = format!(
                        "reader returned {} values, expected {} for {:?} spacing",
                        values.len(),
                        expected,
                        self.spacing
                    );
                    error!("axis '{}': {}", self.name, reason);
                    *slot = ValueSlot::Failed(reason);
                    return None;
                }

                let values = Arc::new(values);
                *slot = ValueSlot::Loaded(Arc::clone(&values));
                Some(values)
            }
            Err(err) => {
                error!(
                    "axis '{}': failed to read coordinate values: {}",
                    self.name, err
                );
                *slot = ValueSlot::Failed(err.to_string());
                None
            }
        }
    }

    fn required_values(&self) -> Result<Arc<Array1<f64>>> {
        self.values()
            .ok_or_else(|| Error::NoValues(self.name.clone()))
    }

    pub(crate) fn regular_coords(&self) -> RegularCoords<f64> {
        RegularCoords::new(self.start_value, self.resolution, self.ncoords)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.ncoords {
            return Err(Error::OutOfBounds {
                axis: self.name.clone(),
                index,
                ncoords: self.ncoords,
            });
        }

        Ok(())
    }

    /// Coordinate `index`: the point itself for point spacings, the interval midpoint for
    /// interval spacings.
    pub fn coord(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        match self.spacing {
            Spacing::Regular => Ok(self.regular_coords().get(index)),
            Spacing::IrregularPoint => Ok(self.required_values()?[index]),
            Spacing::ContiguousInterval => {
                let values = self.required_values()?;
                let (low, high) = layout::contiguous_interval(values.view(), index);
                Ok((low + high) / 2.0)
            }
            Spacing::DiscontiguousInterval => {
                let values = self.required_values()?;
                let (low, high) = layout::discontiguous_interval(values.view(), index);
                Ok((low + high) / 2.0)
            }
        }
    }

    /// The (low, high) cell edges of coordinate `index`.
    pub fn interval(&self, index: usize) -> Result<(f64, f64)> {
        self.check_index(index)?;
        match self.spacing {
            Spacing::Regular => {
                let coords = self.regular_coords();
                Ok((coords.edge(index), coords.edge(index + 1)))
            }
            Spacing::IrregularPoint => {
                let values = self.required_values()?;
                Ok(layout::point_interval(values.view(), index))
            }
            Spacing::ContiguousInterval => {
                let values = self.required_values()?;
                Ok(layout::contiguous_interval(values.view(), index))
            }
            Spacing::DiscontiguousInterval => {
                let values = self.required_values()?;
                Ok(layout::discontiguous_interval(values.view(), index))
            }
        }
    }

    /// Materialize the coordinates as a 1-D array, one entry per coordinate for every spacing
    /// kind.
    pub fn coords(&self) -> Result<Array1<f64>> {
        match self.spacing {
            Spacing::Regular => Ok(self.regular_coords().materialize()),
            Spacing::IrregularPoint => Ok((*self.required_values()?).clone()),
            Spacing::ContiguousInterval => {
                let values = self.required_values()?;
                Ok(layout::contiguous_midpoints(values.view(), self.ncoords))
            }
            Spacing::DiscontiguousInterval => {
                let values = self.required_values()?;
                Ok(layout::discontiguous_midpoints(values.view(), self.ncoords))
            }
        }
    }

    /// Materialize the cell bounds as an `[ncoords, 2]` array of (low, high) edges.
    pub fn bounds(&self) -> Result<Array2<f64>> {
        match self.spacing {
            Spacing::Regular => {
                let coords = self.regular_coords();
                Ok(layout::bounds(self.ncoords, |i| {
                    (coords.edge(i), coords.edge(i + 1))
                }))
            }
            Spacing::IrregularPoint => {
                let values = self.required_values()?;
                Ok(layout::bounds(self.ncoords, |i| {
                    layout::point_interval(values.view(), i)
                }))
            }
            Spacing::ContiguousInterval => {
                let values = self.required_values()?;
                Ok(layout::bounds(self.ncoords, |i| {
                    layout::contiguous_interval(values.view(), i)
                }))
            }
            Spacing::DiscontiguousInterval => {
                let values = self.required_values()?;
                Ok(layout::bounds(self.ncoords, |i| {
                    layout::discontiguous_interval(values.view(), i)
                }))
            }
        }
    }

    /// Array shape of this axis: `[]` for scalar, `[ncoords]` otherwise.
    pub fn shape(&self) -> Vec<usize> {
        if self.is_scalar() {
            vec![]
        } else {
            vec![self.ncoords]
        }
    }

    /// The inclusive index range callers use to slice storage along this axis. Empty for scalar
    /// axes; a non-scalar axis with no coordinates has no representable range.
    pub fn range(&self) -> Result<IndexRange> {
        if self.is_scalar() {
            return Ok(IndexRange::empty(self.name.clone()));
        }

        IndexRange::new(self.name.clone(), self.ncoords)
    }

    /// Called once after this axis has been attached to its coordinate system container.
    /// The base behavior does nothing.
    pub fn attach(&self, _dataset: &dyn CoordSysContainer) {}

    fn helper(&self) -> Result<&Arc<dyn TimeHelper>> {
        self.time
            .as_ref()
            .ok_or_else(|| Error::NotTimeAxis(self.name.clone()))
    }

    /// Numeric offset, in this axis's units, for a calendar date. Time-like axes only.
    pub fn convert(&self, date: DateTime<Utc>) -> Result<f64> {
        Ok(self.helper()?.offset_from_date(date))
    }

    /// Calendar date for a numeric offset in this axis's units. Time-like axes only.
    pub fn make_date(&self, offset: f64) -> Result<DateTime<Utc>> {
        Ok(self.helper()?.date_from_offset(offset))
    }

    /// Calendar dates covered by this axis's start and end values. Time-like axes only.
    pub fn date_range(&self) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        Ok(self.helper()?.date_range(self.start_value, self.end_value))
    }

    /// Offset from one date to another, in this axis's units. Time-like axes only.
    pub fn offset_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<f64> {
        Ok(self.helper()?.offset_between(from, to))
    }
}

impl Clone for CoordinateAxis {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            units: self.units.clone(),
            description: self.description.clone(),
            data_type: self.data_type,
            axis_type: self.axis_type,
            attributes: self.attributes.clone(),
            dependence_type: self.dependence_type,
            depends_on: self.depends_on.clone(),
            ncoords: self.ncoords,
            spacing: self.spacing,
            start_value: self.start_value,
            end_value: self.end_value,
            resolution: self.resolution,
            values: Mutex::new(self.values.lock().clone()),
            reader: self.reader.clone(),
            time: self.time.clone(),
            is_subset: self.is_subset,
            subset_window: self.subset_window,
        }
    }
}

impl fmt::Display for CoordinateAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "CoordAxis '{}' axisType={:?} dataType={:?} units='{}'",
            self.name, self.axis_type, self.data_type, self.units
        )?;
        write!(
            f,
            "  npts: {} [{}, {}] spacing={:?}",
            self.ncoords, self.start_value, self.end_value, self.spacing
        )?;
        if self.resolution != 0.0 {
            write!(f, " resolution={}", self.resolution)?;
        }
        write!(f, " {:?}", self.dependence_type)?;
        if !self.depends_on.is_empty() {
            write!(f, " : {}", self.depends_on.join(" "))?;
        }
        writeln!(f)?;

        // Report resident values only; formatting never triggers a load.
        if let ValueSlot::Loaded(values) = &*self.values.lock() {
            match self.spacing {
                Spacing::Regular => {}
                Spacing::IrregularPoint | Spacing::ContiguousInterval => {
                    write!(f, "  values ({})=", values.len())?;
                    for value in values.iter() {
                        write!(f, " {}", value)?;
                    }
                    writeln!(f)?;
                }
                Spacing::DiscontiguousInterval => {
                    write!(f, "  intervals ({})=", self.ncoords)?;
                    for i in 0..self.ncoords {
                        write!(f, " ({}, {})", values[2 * i], values[2 * i + 1])?;
                    }
                    writeln!(f)?;
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`CoordinateAxis`].
///
/// Construction fails fast on inconsistent inputs: a non-regular axis with neither values nor a
/// reader, a value array whose length does not match the spacing layout, a dependsOn list
/// inconsistent with the dependence type, or a time helper missing from (or supplied to) the
/// wrong kind of axis.
///
pub struct CoordinateAxisBuilder {
    name: String,
    units: String,
    description: String,
    data_type: DataType,
    axis_type: AxisType,
    attributes: AttributeContainer,
    dependence_type: DependenceType,
    depends_on: Vec<String>,
    ncoords: usize,
    spacing: Spacing,
    start_value: f64,
    end_value: f64,
    resolution: f64,
    values: Option<Array1<f64>>,
    reader: Option<Arc<dyn CoordAxisReader>>,
    time: Option<Arc<dyn TimeHelper>>,
    is_subset: bool,
    subset_window: Option<SubsetWindow>,
}

impl CoordinateAxisBuilder {
    pub fn new<S: Into<String>>(name: S, axis_type: AxisType, spacing: Spacing) -> Self {
        Self {
            name: name.into(),
            units: String::new(),
            description: String::new(),
            data_type: DataType::F64,
            axis_type,
            attributes: AttributeContainer::new(),
            dependence_type: DependenceType::Independent,
            depends_on: vec![],
            ncoords: 0,
            spacing,
            start_value: 0.0,
            end_value: 0.0,
            resolution: 0.0,
            values: None,
            reader: None,
            time: None,
            is_subset: false,
            subset_window: None,
        }
    }

    pub fn units<S: Into<String>>(mut self, units: S) -> Self {
        self.units = units.into();
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn attributes(mut self, attributes: AttributeContainer) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn dependence(mut self, dependence_type: DependenceType, depends_on: Vec<String>) -> Self {
        self.dependence_type = dependence_type;
        self.depends_on = depends_on;
        self
    }

    pub fn ncoords(mut self, ncoords: usize) -> Self {
        self.ncoords = ncoords;
        self
    }

    pub fn start(mut self, start_value: f64) -> Self {
        self.start_value = start_value;
        self
    }

    pub fn end(mut self, end_value: f64) -> Self {
        self.end_value = end_value;
        self
    }

    pub fn resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn values(mut self, values: Array1<f64>) -> Self {
        self.values = Some(values);
        self
    }

    pub fn reader(mut self, reader: Arc<dyn CoordAxisReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn time_helper(mut self, time: Arc<dyn TimeHelper>) -> Self {
        self.time = Some(time);
        self
    }

    pub(crate) fn subset_of(mut self, window: SubsetWindow) -> Self {
        self.is_subset = true;
        self.subset_window = Some(window);
        self
    }

    pub fn build(self) -> Result<CoordinateAxis> {
        let needs_depends_on = matches!(
            self.dependence_type,
            DependenceType::Dependent | DependenceType::TwoD
        );
        if needs_depends_on == self.depends_on.is_empty() {
            return Err(Error::BadDependence {
                axis: self.name,
                dependence: self.dependence_type,
                depends_on: self.depends_on,
            });
        }

        if self.axis_type.is_time() && self.time.is_none() {
            return Err(Error::MissingTimeHelper {
                axis: self.name,
                axis_type: self.axis_type,
            });
        }
        if !self.axis_type.is_time() && self.time.is_some() {
            return Err(Error::UnexpectedTimeHelper {
                axis: self.name,
                axis_type: self.axis_type,
            });
        }

        if let Some(values) = &self.values {
            let expected = stored_len(self.spacing, self.ncoords);
            if values.len() != expected {
                return Err(Error::BadShape {
                    axis: self.name,
                    spacing: self.spacing,
                    ncoords: self.ncoords,
                    expected,
                    got: values.len(),
                });
            }
        } else if self.spacing != Spacing::Regular && self.reader.is_none() {
            return Err(Error::MissingValues {
                axis: self.name,
                spacing: self.spacing,
            });
        }

        // Explicit values win over caller-supplied start/end.
        let (start_value, end_value) = match &self.values {
            Some(values) if !values.is_empty() => (values[0], values[values.len() - 1]),
            _ => (self.start_value, self.end_value),
        };

        let resolution = if self.resolution == 0.0 && self.ncoords > 1 {
            (end_value - start_value) / (self.ncoords as f64 - 1.0)
        } else {
            self.resolution
        };

        let slot = match self.values {
            Some(values) => ValueSlot::Loaded(Arc::new(values)),
            None => ValueSlot::Unloaded,
        };

        Ok(CoordinateAxis {
            name: self.name,
            units: self.units,
            description: self.description,
            data_type: self.data_type,
            axis_type: self.axis_type,
            attributes: self.attributes,
            dependence_type: self.dependence_type,
            depends_on: self.depends_on,
            ncoords: self.ncoords,
            spacing: self.spacing,
            start_value,
            end_value,
            resolution,
            values: Mutex::new(slot),
            reader: self.reader,
            time: self.time,
            is_subset: self.is_subset,
            subset_window: self.subset_window,
        })
    }
}
