use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the station list: `station,lon,lat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Station {
    #[serde(rename = "station")]
    #[validate(length(min = 1))]
    pub name: String,

    // Grids on a 0..360 longitude convention are accepted as well
    #[serde(rename = "lon")]
    #[validate(range(min = -180.0, max = 360.0))]
    pub longitude: f64,

    #[serde(rename = "lat")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

impl Station {
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64) -> Self {
        Self {
            name: name.into(),
            longitude,
            latitude,
        }
    }
}
