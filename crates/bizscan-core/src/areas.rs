//! Static catalog of collection areas (Florida counties grouped by region).

use serde::{Deserialize, Serialize};

/// State name appended to a county's display name to form a listing location.
pub const STATE_NAME: &str = "Florida";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    SouthFlorida,
    CentralFlorida,
    NorthFlorida,
}

impl Region {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::SouthFlorida => "south_florida",
            Region::CentralFlorida => "central_florida",
            Region::NorthFlorida => "north_florida",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One collection unit. Immutable reference data from [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AreaDescriptor {
    /// URL slug, e.g. `"miami-dade"`.
    pub id: &'static str,
    pub display_name: &'static str,
    pub population: u32,
    pub region: Region,
}

impl AreaDescriptor {
    /// Human-readable location stamped on every listing from this area.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}, {STATE_NAME}", self.display_name)
    }
}

const fn area(
    id: &'static str,
    display_name: &'static str,
    population: u32,
    region: Region,
) -> AreaDescriptor {
    AreaDescriptor {
        id,
        display_name,
        population,
        region,
    }
}

/// Every supported area, grouped by region in catalog order.
pub const CATALOG: &[AreaDescriptor] = &[
    area("miami-dade", "Miami-Dade County", 2_716_940, Region::SouthFlorida),
    area("broward", "Broward County", 1_944_375, Region::SouthFlorida),
    area("palm-beach", "Palm Beach County", 1_496_770, Region::SouthFlorida),
    area("collier", "Collier County", 384_902, Region::SouthFlorida),
    area("lee", "Lee County", 760_822, Region::SouthFlorida),
    area("monroe", "Monroe County", 82_874, Region::SouthFlorida),
    area("hillsborough", "Hillsborough County", 1_459_762, Region::CentralFlorida),
    area("orange", "Orange County", 1_429_908, Region::CentralFlorida),
    area("pinellas", "Pinellas County", 959_107, Region::CentralFlorida),
    area("polk", "Polk County", 725_046, Region::CentralFlorida),
    area("brevard", "Brevard County", 606_612, Region::CentralFlorida),
    area("volusia", "Volusia County", 553_543, Region::CentralFlorida),
    area("seminole", "Seminole County", 471_826, Region::CentralFlorida),
    area("osceola", "Osceola County", 388_656, Region::CentralFlorida),
    area("pasco", "Pasco County", 561_891, Region::CentralFlorida),
    area("manatee", "Manatee County", 403_253, Region::CentralFlorida),
    area("sarasota", "Sarasota County", 434_006, Region::CentralFlorida),
    area("duval", "Duval County", 995_567, Region::NorthFlorida),
    area("leon", "Leon County", 293_582, Region::NorthFlorida),
    area("st-johns", "St. Johns County", 273_425, Region::NorthFlorida),
];

#[must_use]
pub fn all_areas() -> &'static [AreaDescriptor] {
    CATALOG
}

#[must_use]
pub fn find_area(id: &str) -> Option<&'static AreaDescriptor> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Result of mapping configured area ids onto the catalog.
#[derive(Debug, Default)]
pub struct AreaResolution {
    /// Known areas, in the order they were requested.
    pub areas: Vec<&'static AreaDescriptor>,
    /// Requested ids with no catalog entry.
    pub unknown: Vec<String>,
}

/// Resolves `ids` against the catalog. Unknown ids are collected rather than
/// treated as errors so the caller can warn and carry on.
#[must_use]
pub fn resolve_areas<S: AsRef<str>>(ids: &[S]) -> AreaResolution {
    let mut resolution = AreaResolution::default();
    for id in ids {
        let id = id.as_ref();
        match find_area(id) {
            Some(area) => resolution.areas.push(area),
            None => resolution.unknown.push(id.to_owned()),
        }
    }
    resolution
}

/// The `n` most populous areas, largest first.
#[must_use]
pub fn most_populous(n: usize) -> Vec<&'static AreaDescriptor> {
    let mut areas: Vec<&'static AreaDescriptor> = CATALOG.iter().collect();
    areas.sort_by(|a, b| b.population.cmp(&a.population));
    areas.truncate(n);
    areas
}
