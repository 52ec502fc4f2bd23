use crate::{
    config::{
        catalog::{Catalog, Fuel, FuelMap, Sector, SectorMap},
        constants::{BOX_GAP, ELEC_BOX, HEAT_BOX, LEFT_GAP, SCALE, TOP_Y},
    },
    data::{record::EnergyRecord, store::DataStore},
};

/// Per-year aggregates derived from one [`EnergyRecord`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct YearTotals {
    pub year: i32,
    /// End-use sectors: primary fuels plus electricity and its waste heat; heat deliveries are
    /// kept apart in `heat_by_sector`. Hubs: everything flowing into the hub box.
    pub sectors: SectorMap<f64>,
    /// Heat delivered to each end-use sector.
    pub heat_by_sector: SectorMap<f64>,
    /// Left-column fuels: end-use deliveries only. Hub fuels: deliveries to every sector.
    pub fuels: FuelMap<f64>,
    /// Height (in energy units) of the band a fuel leaves its source with, generation
    /// inputs included.
    pub supply: FuelMap<f64>,
    /// Top y of each left-column fuel band.
    pub fuel_tops: FuelMap<f64>,
    /// Cumulative left-column height, gaps included. Bands are stacked by `supply`, not by
    /// the end-use `fuels` total, so generation inputs fit under each label.
    pub fuel_height: f64,
    pub waste: f64,
    pub waste_by_sector: SectorMap<f64>,
    /// Electricity delivered to end-use sectors.
    pub electricity_consumption: f64,
    /// Sum of the left-column fuel totals; hubs are excluded so generation is not counted twice.
    pub primary: f64,
    pub per_capita: Option<f64>,
}

impl YearTotals {
    /// Energy drawn into a sector box: the sector total plus any heat it receives.
    pub fn box_load(&self, sector: Sector) -> f64 {
        self.sectors[sector] + self.heat_by_sector[sector]
    }
}

/// Dataset-wide aggregates.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Totals {
    pub years: Vec<YearTotals>,
    /// Largest total every sector reaches over the whole dataset.
    pub box_maxima: SectorMap<f64>,
    /// Top y of each sector box; hubs use their fixed anchors.
    pub box_tops: SectorMap<f64>,
}

impl Totals {
    #[tracing::instrument(skip(store), fields(years = store.len()))]
    pub fn aggregate(store: &DataStore) -> Self {
        let catalog = store.catalog();
        let years: Vec<YearTotals> = store
            .records()
            .iter()
            .map(|r| aggregate_year(r, catalog))
            .collect();
        let box_maxima = box_maxima(&years);
        let box_tops = box_tops(&box_maxima);
        tracing::debug!(
            residential = box_tops[Sector::Residential],
            transportation = box_tops[Sector::Transportation],
            "stacked sector boxes"
        );
        Self {
            years,
            box_maxima,
            box_tops,
        }
    }

    pub fn for_index(&self, index: usize) -> Option<&YearTotals> {
        self.years.get(index)
    }
}

fn aggregate_year(record: &EnergyRecord, catalog: Catalog) -> YearTotals {
    let sectors_active = catalog.sectors();
    let mut sectors = SectorMap::<f64>::default();
    let mut fuels = FuelMap::<f64>::default();
    let mut supply = FuelMap::<f64>::default();
    let mut waste_by_sector = SectorMap::<f64>::default();
    let mut heat_by_sector = SectorMap::<f64>::default();

    // Hub deliveries land in each sector exactly once, independent of fuel ordering.
    for &hub in catalog.flow_fuels().iter().filter(|f| f.is_hub()) {
        for &sector in &sectors_active {
            if hub.hub_sector() == Some(sector) {
                continue;
            }
            let v = record.value(hub, sector);
            let lost = if hub == Fuel::Electricity {
                record.value(Fuel::Waste, sector)
            } else {
                0.0
            };
            if hub == Fuel::Heat && sector.is_end_use() {
                heat_by_sector[sector] += v;
            } else {
                sectors[sector] += v + lost;
            }
            fuels[hub] += v;
            supply[hub] += v + lost;
            waste_by_sector[sector] += lost;
        }
        if let Some(own) = hub.hub_sector() {
            fuels[hub] += record.value(hub, own);
        }
    }

    for fuel in Fuel::PRIMARY {
        for &sector in &sectors_active {
            let v = record.value(fuel, sector);
            sectors[sector] += v;
            supply[fuel] += v;
            if sector.is_end_use() {
                fuels[fuel] += v;
            }
        }
    }

    let waste: f64 = waste_by_sector.iter().map(|(_, v)| *v).sum();
    fuels[Fuel::Waste] = waste;

    let electricity_consumption = Sector::END_USE
        .iter()
        .map(|s| record.value(Fuel::Electricity, *s))
        .sum();

    let mut fuel_tops = FuelMap::<f64>::default();
    let mut fuel_height = TOP_Y;
    for fuel in Fuel::PRIMARY {
        fuel_tops[fuel] = fuel_height;
        fuel_height += supply[fuel] * SCALE + LEFT_GAP;
    }

    let primary: f64 = Fuel::PRIMARY.iter().map(|f| fuels[*f]).sum();
    let per_capita = record.population.map(|p| primary / p);

    YearTotals {
        year: record.year,
        sectors,
        heat_by_sector,
        fuels,
        supply,
        fuel_tops,
        fuel_height,
        waste,
        waste_by_sector,
        electricity_consumption,
        primary,
        per_capita,
    }
}

fn box_maxima(years: &[YearTotals]) -> SectorMap<f64> {
    let mut out = SectorMap::<f64>::default();
    for t in years {
        for sector in Sector::ALL {
            out[sector] = out[sector].max(t.box_load(sector));
        }
    }
    out
}

fn box_tops(maxima: &SectorMap<f64>) -> SectorMap<f64> {
    let mut tops = SectorMap::<f64>::default();
    tops[Sector::Electricity] = ELEC_BOX.y;
    tops[Sector::Heat] = HEAT_BOX.y;

    let mut y = TOP_Y;
    for sector in Sector::END_USE {
        tops[sector] = y;
        y += maxima[sector] * SCALE + BOX_GAP;
    }
    tops
}

#[cfg(test)]
#[path = "../../tests/unit/layout/totals.rs"]
mod tests;
