use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;

const NAME_PROPERTY: &str = "NAME";

/// A named region of the geographic boundary set.
///
/// The geometry is kept as raw GeoJSON since only the rendering layer
/// interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub name: String,
    pub geometry: Value,
}

/// The geographic boundary set, keyed by region name.
///
/// Region names share the value domain of [`Record::location`](crate::record::Record::location).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundaries {
    regions: Vec<Boundary>,
}

impl Boundaries {
    pub fn from_path(path: &Path) -> Result<Boundaries> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a GeoJSON `FeatureCollection`.
    ///
    /// Features without a string `NAME` property cannot be matched against
    /// any record, so they are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Boundaries> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;
        let mut regions = Vec::with_capacity(collection.features.len());

        for (idx, feature) in collection.features.into_iter().enumerate() {
            match feature.properties.get(NAME_PROPERTY) {
                Some(Value::String(name)) => regions.push(Boundary {
                    name: name.clone(),
                    geometry: feature.geometry,
                }),
                _ => warn!(feature = idx, "skipping a boundary feature without a name"),
            }
        }

        Ok(Self { regions })
    }

    pub fn get(&self, name: &str) -> Option<&Boundary> {
        self.regions.iter().find(|region| region.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Map<String, Value>,
    #[serde(default)]
    geometry: Value,
}
