//! Fixed fuel and sector catalogs.
//!
//! The category set never changes within a session, so every per-category table in the crate is a
//! fixed-size array indexed by the enum discriminant ([`FuelMap`], [`SectorMap`]) instead of a
//! string-keyed map.

use std::ops::{Index, IndexMut};

/// Energy source categories as they appear in the input records.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Fuel {
    #[serde(rename = "elec")]
    Electricity,
    #[serde(rename = "heat")]
    Heat,
    #[serde(rename = "solar")]
    Solar,
    #[serde(rename = "nuclear")]
    Nuclear,
    #[serde(rename = "hydro")]
    Hydro,
    #[serde(rename = "wind")]
    Wind,
    #[serde(rename = "geo")]
    Geothermal,
    #[serde(rename = "gas")]
    Gas,
    #[serde(rename = "coal")]
    Coal,
    #[serde(rename = "bio")]
    Biomass,
    #[serde(rename = "petro")]
    Petroleum,
    /// Generation losses attached to electricity deliveries.
    #[serde(rename = "waste")]
    Waste,
}

impl Fuel {
    pub const COUNT: usize = 12;

    pub const ALL: [Fuel; Fuel::COUNT] = [
        Fuel::Electricity,
        Fuel::Heat,
        Fuel::Solar,
        Fuel::Nuclear,
        Fuel::Hydro,
        Fuel::Wind,
        Fuel::Geothermal,
        Fuel::Gas,
        Fuel::Coal,
        Fuel::Biomass,
        Fuel::Petroleum,
        Fuel::Waste,
    ];

    /// Fuels drawn from the shared left column, top to bottom.
    pub const PRIMARY: [Fuel; 9] = [
        Fuel::Solar,
        Fuel::Nuclear,
        Fuel::Hydro,
        Fuel::Wind,
        Fuel::Geothermal,
        Fuel::Gas,
        Fuel::Coal,
        Fuel::Biomass,
        Fuel::Petroleum,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Short key used in the JSON input.
    pub fn key(self) -> &'static str {
        match self {
            Self::Electricity => "elec",
            Self::Heat => "heat",
            Self::Solar => "solar",
            Self::Nuclear => "nuclear",
            Self::Hydro => "hydro",
            Self::Wind => "wind",
            Self::Geothermal => "geo",
            Self::Gas => "gas",
            Self::Coal => "coal",
            Self::Biomass => "bio",
            Self::Petroleum => "petro",
            Self::Waste => "waste",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Electricity => "Electricity",
            Self::Heat => "Heat",
            Self::Solar => "Solar",
            Self::Nuclear => "Nuclear",
            Self::Hydro => "Hydro",
            Self::Wind => "Wind",
            Self::Geothermal => "Geothermal",
            Self::Gas => "Gas",
            Self::Coal => "Coal",
            Self::Biomass => "Biomass",
            Self::Petroleum => "Petroleum",
            Self::Waste => "Waste heat",
        }
    }

    /// Electricity and heat start at their hub boxes rather than the left column.
    pub fn is_hub(self) -> bool {
        matches!(self, Self::Electricity | Self::Heat)
    }

    /// The sector slot a hub fuel is generated into.
    pub fn hub_sector(self) -> Option<Sector> {
        match self {
            Self::Electricity => Some(Sector::Electricity),
            Self::Heat => Some(Sector::Heat),
            _ => None,
        }
    }
}

/// Consumption targets. Electricity and heat double as hub boxes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Sector {
    #[serde(rename = "elec")]
    Electricity,
    #[serde(rename = "heat")]
    Heat,
    #[serde(rename = "res")]
    Residential,
    #[serde(rename = "ag")]
    Agricultural,
    #[serde(rename = "indus")]
    Industrial,
    #[serde(rename = "trans")]
    Transportation,
}

impl Sector {
    pub const COUNT: usize = 6;

    pub const ALL: [Sector; Sector::COUNT] = [
        Sector::Electricity,
        Sector::Heat,
        Sector::Residential,
        Sector::Agricultural,
        Sector::Industrial,
        Sector::Transportation,
    ];

    /// End-use sectors in their fixed top-to-bottom stacking order.
    pub const END_USE: [Sector; 4] = [
        Sector::Residential,
        Sector::Agricultural,
        Sector::Industrial,
        Sector::Transportation,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Electricity => "elec",
            Self::Heat => "heat",
            Self::Residential => "res",
            Self::Agricultural => "ag",
            Self::Industrial => "indus",
            Self::Transportation => "trans",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Electricity => "Electricity",
            Self::Heat => "Heat",
            Self::Residential => "Residential",
            Self::Agricultural => "Agricultural",
            Self::Industrial => "Industrial",
            Self::Transportation => "Transportation",
        }
    }

    pub fn is_hub(self) -> bool {
        matches!(self, Self::Electricity | Self::Heat)
    }

    pub fn is_end_use(self) -> bool {
        !self.is_hub()
    }

    /// Position in the end-use stacking order, `None` for hubs.
    pub fn stack_rank(self) -> Option<usize> {
        Self::END_USE.iter().position(|s| *s == self)
    }
}

/// Active category set for one session.
///
/// Heat is the only optional category. It is switched on when the first record carries a `heat`
/// fuel and then has to be present everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Catalog {
    pub heat: bool,
}

impl Catalog {
    pub fn new(heat: bool) -> Self {
        Self { heat }
    }

    pub fn has_fuel(self, fuel: Fuel) -> bool {
        fuel != Fuel::Heat || self.heat
    }

    pub fn has_sector(self, sector: Sector) -> bool {
        sector != Sector::Heat || self.heat
    }

    /// Fuels that own flows, in processing order (hubs first, then the left column).
    pub fn flow_fuels(self) -> Vec<Fuel> {
        let mut out = vec![Fuel::Electricity];
        if self.heat {
            out.push(Fuel::Heat);
        }
        out.extend(Fuel::PRIMARY);
        out
    }

    /// Every fuel block an input record must carry, including `waste`.
    pub fn input_fuels(self) -> Vec<Fuel> {
        Fuel::ALL
            .into_iter()
            .filter(|f| self.has_fuel(*f))
            .collect()
    }

    pub fn sectors(self) -> Vec<Sector> {
        Sector::ALL
            .into_iter()
            .filter(|s| self.has_sector(*s))
            .collect()
    }
}

/// Fixed-size map keyed by [`Fuel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuelMap<T>([T; Fuel::COUNT]);

impl<T: Copy + Default> Default for FuelMap<T> {
    fn default() -> Self {
        Self([T::default(); Fuel::COUNT])
    }
}

impl<T> FuelMap<T> {
    pub fn from_fn(mut f: impl FnMut(Fuel) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Fuel::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Fuel, &T)> {
        Fuel::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Fuel> for FuelMap<T> {
    type Output = T;

    fn index(&self, fuel: Fuel) -> &T {
        &self.0[fuel.index()]
    }
}

impl<T> IndexMut<Fuel> for FuelMap<T> {
    fn index_mut(&mut self, fuel: Fuel) -> &mut T {
        &mut self.0[fuel.index()]
    }
}

impl<T: serde::Serialize> serde::Serialize for FuelMap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap as _;
        let mut map = serializer.serialize_map(Some(Fuel::COUNT))?;
        for (fuel, value) in self.iter() {
            map.serialize_entry(fuel.key(), value)?;
        }
        map.end()
    }
}

/// Fixed-size map keyed by [`Sector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorMap<T>([T; Sector::COUNT]);

impl<T: Copy + Default> Default for SectorMap<T> {
    fn default() -> Self {
        Self([T::default(); Sector::COUNT])
    }
}

impl<T> SectorMap<T> {
    pub fn from_fn(mut f: impl FnMut(Sector) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Sector::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Sector, &T)> {
        Sector::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Sector> for SectorMap<T> {
    type Output = T;

    fn index(&self, sector: Sector) -> &T {
        &self.0[sector.index()]
    }
}

impl<T> IndexMut<Sector> for SectorMap<T> {
    fn index_mut(&mut self, sector: Sector) -> &mut T {
        &mut self.0[sector.index()]
    }
}

impl<T: serde::Serialize> serde::Serialize for SectorMap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap as _;
        let mut map = serializer.serialize_map(Some(Sector::COUNT))?;
        for (sector, value) in self.iter() {
            map.serialize_entry(sector.key(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/catalog.rs"]
mod tests;
