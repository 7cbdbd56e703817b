#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

pub const LONS: [f64; 3] = [9.5, 10.0, 10.5];
pub const LATS: [f64; 3] = [4.5, 5.0, 5.5];

/// 3×3 grid (lat, lon) whose centre cell, nearest to (10.0, 5.0), holds 3.2.
pub const RAIN: [f64; 9] = [0.0, 1.5, 0.25, 7.0, 3.2, 12.0, 0.5, 0.0, 2.75];

pub fn write_coordinates(
    file: &mut netcdf::FileMut,
    lons: &[f64],
    lats: &[f64],
) -> Result<(), netcdf::Error> {
    file.add_dimension("lat", lats.len())?;
    file.add_dimension("lon", lons.len())?;

    let mut lat = file.add_variable::<f64>("lat", &["lat"])?;
    lat.put_values(lats, ..)?;
    let mut lon = file.add_variable::<f64>("lon", &["lon"])?;
    lon.put_values(lons, ..)?;
    Ok(())
}

/// Grid with an `rfe(lat, lon)` variable.
pub fn write_rain_grid(path: &Path, values: &[f64]) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    write_coordinates(&mut file, &LONS, &LATS)?;

    let mut rfe = file.add_variable::<f64>("rfe", &["lat", "lon"])?;
    rfe.set_fill_value(-9999.0)?;
    rfe.put_values(values, ..)?;
    Ok(())
}

/// Grid with coordinates but only a `precip` variable.
pub fn write_grid_without_rain(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    write_coordinates(&mut file, &LONS, &LATS)?;

    let mut precip = file.add_variable::<f64>("precip", &["lat", "lon"])?;
    precip.put_values(&RAIN, ..)?;
    Ok(())
}

/// Grid with `rfe(time, lat, lon)` holding two time steps.
pub fn write_grid_with_time(path: &Path, first: &[f64], second: &[f64]) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    file.add_dimension("time", 2)?;
    write_coordinates(&mut file, &LONS, &LATS)?;

    let mut time = file.add_variable::<f64>("time", &["time"])?;
    time.put_values(&[0.0, 1.0], ..)?;

    let values: Vec<f64> = first.iter().chain(second).copied().collect();
    let mut rfe = file.add_variable::<f64>("rfe", &["time", "lat", "lon"])?;
    rfe.put_values(&values, ..)?;
    Ok(())
}

/// 1×1 grid with its single cell centred at (10.025, 5.025).
pub fn write_single_cell_grid(path: &Path, value: f64) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    write_coordinates(&mut file, &[10.025], &[5.025])?;

    let mut rfe = file.add_variable::<f64>("rfe", &["lat", "lon"])?;
    rfe.put_values(&[value], ..)?;
    Ok(())
}

/// Grid storing `rfe` as packed `short` with CF masking attributes:
/// `scale_factor = 0.25`, `add_offset = 1.0`, `missing_value = -1`,
/// `_FillValue = -32768`.
pub fn write_packed_grid(path: &Path, packed: &[i16]) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;
    write_coordinates(&mut file, &LONS, &LATS)?;

    let mut rfe = file.add_variable::<i16>("rfe", &["lat", "lon"])?;
    rfe.set_fill_value(-32768i16)?;
    rfe.put_attribute("scale_factor", 0.25f32)?;
    rfe.put_attribute("add_offset", 1.0f64)?;
    rfe.put_attribute("missing_value", -1i16)?;
    rfe.put_values(packed, ..)?;
    Ok(())
}

pub fn write_stations(path: &Path, rows: &[(&str, f64, f64)]) -> std::io::Result<()> {
    let mut contents = String::from("station,lon,lat\n");
    for (name, lon, lat) in rows {
        contents.push_str(&format!("{},{},{}\n", name, lon, lat));
    }
    std::fs::write(path, contents)
}

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with warnings and above recorded, returning its result and the log text.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
