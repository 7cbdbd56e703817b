use crate::config::ExtractionConfig;
use crate::error::ExtractionFailure;
use crate::models::ExtractionResult;
use crate::utils::constants::{
    ADD_OFFSET_ATTR, FILL_VALUE_ATTR, MISSING_VALUE_ATTR, SCALE_FACTOR_ATTR,
};
use crate::utils::coordinates::{flat_index, is_valid_coordinate, nearest_index, AxisLookupError};
use netcdf::AttributeValue;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Looks up one value per (file, coordinate) pair.
///
/// Implementations never fail past their own boundary: every problem is
/// reported as an [`ExtractionFailure`].
pub trait GridSampler {
    fn sample(&self, path: &Path, lon: f64, lat: f64) -> ExtractionResult;
}

impl<F> GridSampler for F
where
    F: Fn(&Path, f64, f64) -> ExtractionResult,
{
    fn sample(&self, path: &Path, lon: f64, lat: f64) -> ExtractionResult {
        self(path, lon, lat)
    }
}

/// Nearest-gridpoint lookup in a NetCDF rainfall grid.
#[derive(Debug, Clone)]
pub struct NetcdfExtractor {
    variable: String,
    lon_name: String,
    lat_name: String,
    /// Files already reported for a leftover non-spatial dimension.
    leftover_warned: RefCell<HashSet<PathBuf>>,
}

/// Which coordinate a dimension of the rainfall variable stands for.
enum Axis {
    Lon,
    Lat,
    Other,
}

impl NetcdfExtractor {
    pub fn new(variable: &str, lon_name: &str, lat_name: &str) -> Self {
        Self {
            variable: variable.to_string(),
            lon_name: lon_name.to_string(),
            lat_name: lat_name.to_string(),
            leftover_warned: RefCell::new(HashSet::new()),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.variable, &config.lon_name, &config.lat_name)
    }

    /// True the first time a file is seen with a leftover dimension.
    fn first_leftover_in(&self, path: &Path) -> bool {
        self.leftover_warned.borrow_mut().insert(path.to_path_buf())
    }

    fn axis_of(&self, dimension: &str) -> Axis {
        if dimension == self.lon_name {
            Axis::Lon
        } else if dimension == self.lat_name {
            Axis::Lat
        } else {
            Axis::Other
        }
    }

    /// Resolve a spatial dimension to the index nearest `target`.
    fn coordinate_index(
        &self,
        file: &netcdf::File,
        path: &Path,
        dimension: &str,
        target: f64,
        (lon, lat): (f64, f64),
    ) -> ExtractionResult<usize> {
        let coordinate = file
            .variable(dimension)
            .ok_or_else(|| ExtractionFailure::MissingCoordinate {
                path: path.to_path_buf(),
                name: dimension.to_string(),
            })?;

        let axis = coordinate
            .get_values::<f64, _>(..)
            .map_err(|e| ExtractionFailure::Read {
                path: path.to_path_buf(),
                message: format!("reading coordinate '{}': {}", dimension, e),
            })?;

        nearest_index(&axis, target).map_err(|e| match e {
            AxisLookupError::Empty => ExtractionFailure::EmptySelection {
                path: path.to_path_buf(),
                lon,
                lat,
                dimension: dimension.to_string(),
            },
            AxisLookupError::OutOfBounds => ExtractionFailure::OutOfBounds {
                path: path.to_path_buf(),
                lon,
                lat,
            },
        })
    }

    fn extract(&self, path: &Path, lon: f64, lat: f64) -> ExtractionResult {
        if !is_valid_coordinate(lon, lat) {
            return Err(ExtractionFailure::InvalidCoordinate {
                path: path.to_path_buf(),
                lon,
                lat,
            });
        }

        let file = netcdf::open(path).map_err(|source| ExtractionFailure::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let variable = file
            .variable(&self.variable)
            .ok_or_else(|| ExtractionFailure::MissingVariable {
                path: path.to_path_buf(),
                variable: self.variable.clone(),
            })?;

        let mut indices = Vec::new();
        let mut shape = Vec::new();
        let mut seen_lon = false;
        let mut seen_lat = false;

        for dimension in variable.dimensions() {
            let name = dimension.name();
            let len = dimension.len();
            shape.push(len);

            if len == 0 {
                return Err(ExtractionFailure::EmptySelection {
                    path: path.to_path_buf(),
                    lon,
                    lat,
                    dimension: name,
                });
            }

            let index = match self.axis_of(&name) {
                Axis::Lon => {
                    seen_lon = true;
                    self.coordinate_index(&file, path, &name, lon, (lon, lat))?
                }
                Axis::Lat => {
                    seen_lat = true;
                    self.coordinate_index(&file, path, &name, lat, (lon, lat))?
                }
                Axis::Other => {
                    if len > 1 {
                        if self.first_leftover_in(path) {
                            warn!(
                                "{} keeps dimension '{}' of length {} after spatial selection; using its first element",
                                path.display(),
                                name,
                                len
                            );
                        } else {
                            debug!(
                                "Using first element of '{}' in {} for ({}, {})",
                                name,
                                path.display(),
                                lon,
                                lat
                            );
                        }
                    }
                    0
                }
            };
            indices.push(index);
        }

        for (seen, name) in [(seen_lon, &self.lon_name), (seen_lat, &self.lat_name)] {
            if !seen {
                return Err(ExtractionFailure::MissingCoordinate {
                    path: path.to_path_buf(),
                    name: name.clone(),
                });
            }
        }

        if flat_index(&indices, &shape).is_none() {
            return Err(ExtractionFailure::Read {
                path: path.to_path_buf(),
                message: format!("index {:?} outside shape {:?}", indices, shape),
            });
        }

        // Only the selected element is read from disk
        let raw = variable
            .get_value::<f64, _>(indices.as_slice())
            .map_err(|e| ExtractionFailure::Read {
                path: path.to_path_buf(),
                message: format!("reading '{}' at {:?}: {}", self.variable, indices, e),
            })?;

        let decoding = CfDecoding::from_variable(&variable);
        match decoding.decode(raw) {
            Some(value) => {
                debug!(
                    "{} at ({}, {}) in {} = {}",
                    self.variable,
                    lon,
                    lat,
                    path.display(),
                    value
                );
                Ok(value)
            }
            None => Err(ExtractionFailure::NoData {
                path: path.to_path_buf(),
                lon,
                lat,
            }),
        }
    }
}

impl GridSampler for NetcdfExtractor {
    fn sample(&self, path: &Path, lon: f64, lat: f64) -> ExtractionResult {
        // The file handle lives only inside `extract`
        self.extract(path, lon, lat)
    }
}

/// CF-convention packing and masking attributes of a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CfDecoding {
    pub fill_value: Option<f64>,
    pub missing_value: Option<f64>,
    pub scale_factor: f64,
    pub add_offset: f64,
}

impl Default for CfDecoding {
    fn default() -> Self {
        Self {
            fill_value: None,
            missing_value: None,
            scale_factor: 1.0,
            add_offset: 0.0,
        }
    }
}

impl CfDecoding {
    pub fn from_variable(variable: &netcdf::Variable) -> Self {
        Self {
            fill_value: numeric_attribute(variable, FILL_VALUE_ATTR),
            missing_value: numeric_attribute(variable, MISSING_VALUE_ATTR),
            scale_factor: numeric_attribute(variable, SCALE_FACTOR_ATTR).unwrap_or(1.0),
            add_offset: numeric_attribute(variable, ADD_OFFSET_ATTR).unwrap_or(0.0),
        }
    }

    /// Unpack a raw stored value; masked or NaN values give `None`.
    pub fn decode(&self, raw: f64) -> Option<f64> {
        if raw.is_nan() || Some(raw) == self.fill_value || Some(raw) == self.missing_value {
            return None;
        }

        let value = raw * self.scale_factor + self.add_offset;
        value.is_finite().then_some(value)
    }
}

fn numeric_attribute(variable: &netcdf::Variable, name: &str) -> Option<f64> {
    let value = match variable.attribute_value(name)? {
        Ok(value) => value,
        Err(e) => {
            debug!("Ignoring unreadable attribute '{}': {}", name, e);
            return None;
        }
    };

    match value {
        AttributeValue::Uchar(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Ushort(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Uint(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Ulonglong(v) => Some(v as f64),
        AttributeValue::Longlong(v) => Some(v as f64),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Uchars(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Schars(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Ushorts(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Shorts(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Uints(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Ints(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Ulonglongs(v) => v.first().map(|&x| x as f64),
        AttributeValue::Longlongs(v) => v.first().map(|&x| x as f64),
        AttributeValue::Floats(v) => v.first().map(|&x| f64::from(x)),
        AttributeValue::Doubles(v) => v.first().copied(),
        other => {
            debug!("Attribute '{}' is not numeric: {:?}", name, other);
            None
        }
    }
}
