//! Reference data store: country facts loaded once from the country-json
//! sources and cross-indexed both ways.
//!
//! ## Indices
//!
//! - [`CountryIndex`] maps country → [`CountryRecord`] and major region → member countries.
//! - [`ItemIndex`] maps (category, item) → every country sharing that item,
//!   e.g. "Spanish" → Spain, Peru.
//!
//! Both are built by [`ReferenceData::from_records`] and are read-only afterwards.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::trivia_engine::{
    error::DataLoadError,
    models::{Category, Region, TopicSelection},
};

/// Countries with known data problems; never loaded.
pub const EXCLUDED_COUNTRIES: &[&str] = &[
    "Antarctica",
    "Bouvet Island",
    "British Indian Ocean Territory",
    "Congo",
    "Congo, The Democratic Republic of the",
    "England",
    "French Southern territories",
    "Heard Island and McDonald Islands",
    "Holy See (Vatican City State)",
    "Hong Kong",
    "North Macedonia",
    "Northern Ireland",
    "Scotland",
    "South Georgia and the South Sandwich Islands",
    "Solomon Islands",
    "Palestine",
    "South Sudan",
    "The Democratic Republic of Congo",
    "United States Minor Outlying Islands",
    "Wales",
];

// ---------------------------------------------------------------------------
// Raw sources
// ---------------------------------------------------------------------------

/// One of the four country-json files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Location,
    Capital,
    Languages,
    Dishes,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Location, Source::Capital, Source::Languages, Source::Dishes];

    pub fn file_name(self) -> &'static str {
        match self {
            Source::Location  => "country-by-region-in-world.json",
            Source::Capital   => "country-by-capital-city.json",
            Source::Languages => "country-by-languages.json",
            Source::Dishes    => "country-by-national-dish.json",
        }
    }

    /// Field holding the fact in each record.
    pub fn fact_key(self) -> &'static str {
        match self {
            Source::Location  => "location",
            Source::Capital   => "city",
            Source::Languages => "languages",
            Source::Dishes    => "dish",
        }
    }

    /// Quiz category fed by this source. `Location` only feeds region grouping.
    pub fn category(self) -> Option<Category> {
        match self {
            Source::Location  => None,
            Source::Capital   => Some(Category::Capital),
            Source::Languages => Some(Category::Languages),
            Source::Dishes    => Some(Category::Dishes),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawFact {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    country: String,
    #[serde(flatten)]
    facts: HashMap<String, Option<RawFact>>,
}

/// A normalised source row: `items` is `None` when the source has no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub country: String,
    pub items: Option<Vec<String>>,
}

impl SourceRecord {
    pub fn new(country: impl Into<String>, items: Option<Vec<&str>>) -> Self {
        SourceRecord {
            country: country.into(),
            items: items.map(|v| v.into_iter().map(str::to_string).collect()),
        }
    }
}

/// Dish names arrive as one comma-separated string.
fn split_list(items: &str) -> Vec<String> {
    items
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalise(source: Source, fact: Option<RawFact>) -> Option<Vec<String>> {
    let items = match fact? {
        RawFact::One(s) if source == Source::Dishes => split_list(&s),
        RawFact::One(s) => vec![s],
        RawFact::Many(v) => v,
    };
    if items.iter().all(|s| s.is_empty()) {
        None
    } else {
        Some(items)
    }
}

/// Read and normalise one source file from `dir`.
pub fn read_source(dir: &Path, source: Source) -> Result<Vec<SourceRecord>, DataLoadError> {
    let path = dir.join(source.file_name());
    let text = fs::read_to_string(&path).map_err(|e| DataLoadError::Io {
        path: path.clone(),
        source: e,
    })?;
    let raw: Vec<RawRecord> = serde_json::from_str(&text).map_err(|e| DataLoadError::Json {
        path: path.clone(),
        source: e,
    })?;

    raw.into_iter()
        .map(|mut record| {
            let fact = record
                .facts
                .remove(source.fact_key())
                .ok_or_else(|| DataLoadError::MissingField {
                    path: path.clone(),
                    country: record.country.clone(),
                    key: source.fact_key(),
                })?;
            Ok(SourceRecord {
                items: normalise(source, fact),
                country: record.country,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Indices
// ---------------------------------------------------------------------------

/// Everything known about one country. `None` means no data, never "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryRecord {
    pub name: String,
    pub minor_region: Option<String>,
    pub major_region: Option<Region>,
    pub capital: Option<String>,
    pub languages: Option<Vec<String>>,
    pub dishes: Option<Vec<String>>,
}

impl CountryRecord {
    pub fn items(&self, category: Category) -> Option<&[String]> {
        match category {
            Category::Capital   => self.capital.as_ref().map(std::slice::from_ref),
            Category::Languages => self.languages.as_deref(),
            Category::Dishes    => self.dishes.as_deref(),
        }
    }

    /// Merge new items for `source`, returning the ones actually added.
    fn merge(&mut self, source: Source, items: Vec<String>) -> Vec<String> {
        match source {
            Source::Location => {
                if self.minor_region.is_none() {
                    self.minor_region = items.into_iter().next();
                }
                Vec::new()
            }
            Source::Capital => {
                if self.capital.is_some() {
                    return Vec::new();
                }
                self.capital = items.into_iter().next();
                self.capital.iter().cloned().collect()
            }
            Source::Languages | Source::Dishes => {
                let list = match source {
                    Source::Languages => self.languages.get_or_insert_with(Vec::new),
                    _                 => self.dishes.get_or_insert_with(Vec::new),
                };
                let mut added = Vec::new();
                for item in items {
                    if !list.contains(&item) {
                        list.push(item.clone());
                        added.push(item);
                    }
                }
                added
            }
        }
    }
}

/// Forward index: country → facts, plus major-region membership.
#[derive(Debug, Clone, Default)]
pub struct CountryIndex {
    records: BTreeMap<String, CountryRecord>,
    regions: BTreeMap<Region, Vec<String>>,
}

impl CountryIndex {
    pub fn get(&self, country: &str) -> Option<&CountryRecord> {
        self.records.get(country)
    }

    pub fn items(&self, country: &str, category: Category) -> Option<&[String]> {
        self.records.get(country)?.items(category)
    }

    /// Member countries of a region; empty when the region has none.
    pub fn members(&self, region: Region) -> &[String] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.values()
    }

    fn set_major_regions(&mut self) {
        self.regions.clear();
        for region in Region::ALL {
            self.regions.insert(region, Vec::new());
        }
        for record in self.records.values_mut() {
            let Some(minor) = record.minor_region.as_deref() else {
                continue;
            };
            if let Some(list) = self.regions.get_mut(&Region::World) {
                list.push(record.name.clone());
            }
            match Region::for_minor_region(minor) {
                Some(major) => {
                    record.major_region = Some(major);
                    if let Some(list) = self.regions.get_mut(&major) {
                        list.push(record.name.clone());
                    }
                }
                None => warn!("{} has unknown minor region {minor:?}", record.name),
            }
        }
    }
}

/// Inverse index: (category, item) → countries sharing that item.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    by_category: BTreeMap<Category, BTreeMap<String, Vec<String>>>,
}

impl ItemIndex {
    pub fn countries_with(&self, category: Category, item: &str) -> &[String] {
        self.by_category
            .get(&category)
            .and_then(|items| items.get(item))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct items known for a category.
    pub fn item_count(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, BTreeMap::len)
    }

    fn insert(&mut self, category: Category, item: String, country: &str) {
        let countries = self
            .by_category
            .entry(category)
            .or_default()
            .entry(item)
            .or_default();
        if !countries.iter().any(|c| c == country) {
            countries.push(country.to_string());
        }
    }
}

/// Record counts for troubleshooting a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStats {
    pub countries: usize,
    pub with_data: BTreeMap<Category, usize>,
    pub distinct_items: BTreeMap<Category, usize>,
    pub region_members: BTreeMap<Region, usize>,
}

/// Both indices, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub countries: CountryIndex,
    pub items: ItemIndex,
}

impl ReferenceData {
    /// Load all four sources from `dir`.
    pub fn load(dir: &Path) -> Result<Self, DataLoadError> {
        let mut sources = Vec::with_capacity(Source::ALL.len());
        for source in Source::ALL {
            let records = read_source(dir, source)?;
            debug!("{}: {} records", source.file_name(), records.len());
            sources.push((source, records));
        }
        let data = Self::from_records(sources);
        info!(
            "loaded {} countries from {}",
            data.countries.len(),
            dir.display()
        );
        Ok(data)
    }

    /// Build both indices from already-parsed source rows.
    pub fn from_records<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (Source, Vec<SourceRecord>)>,
    {
        let mut data = ReferenceData::default();
        for (source, records) in sources {
            for SourceRecord { country, items } in records {
                let Some(items) = items else { continue };
                if EXCLUDED_COUNTRIES.contains(&country.as_str()) {
                    debug!("skipping excluded country {country}");
                    continue;
                }
                let record = data
                    .countries
                    .records
                    .entry(country.clone())
                    .or_insert_with(|| CountryRecord {
                        name: country.clone(),
                        ..CountryRecord::default()
                    });
                let added = record.merge(source, items);
                if let Some(category) = source.category() {
                    for item in added {
                        data.items.insert(category, item, &country);
                    }
                }
            }
        }
        data.countries.set_major_regions();
        data
    }

    /// Countries in `region` that have data for `category`.
    pub fn eligible_count(&self, region: Region, category: Category) -> usize {
        self.countries
            .members(region)
            .iter()
            .filter(|c| self.countries.items(c, category).is_some())
            .count()
    }

    /// True when every category of `topic` has at least `needed` eligible countries.
    pub fn supports(&self, region: Region, topic: TopicSelection, needed: usize) -> bool {
        topic
            .categories()
            .iter()
            .all(|&category| self.eligible_count(region, category) >= needed)
    }

    pub fn stats(&self) -> DataStats {
        DataStats {
            countries: self.countries.len(),
            with_data: Category::ALL
                .into_iter()
                .map(|c| (c, self.countries.iter().filter(|r| r.items(c).is_some()).count()))
                .collect(),
            distinct_items: Category::ALL
                .into_iter()
                .map(|c| (c, self.items.item_count(c)))
                .collect(),
            region_members: Region::ALL
                .into_iter()
                .map(|r| (r, self.countries.members(r).len()))
                .collect(),
        }
    }
}
