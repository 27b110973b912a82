use std::{collections::HashMap, f64::consts::FRAC_PI_2, sync::Arc, time::Instant};

mod models;
pub use models::*;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    proximity::Proximity,
    shared::{
        self,
        geo::{
            Coordinate, Distance, EARTH_RADIUS, GRID_CELL_SIZE, LATITUDE_DISTANCE,
            LONGITUDE_DISTANCE,
        },
    },
};

type IdToIndex = HashMap<Arc<str>, u32>;
type CellToIndexes = HashMap<(i32, i32), Box<[u32]>>;

/// Read-only, in-memory set of facilities as fetched from a store.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    pub facilities: Box<[Facility]>,

    facility_lookup: IdToIndex,
    grid: CellToIndexes,
}

impl Repository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Indexes the given facilities.
    /// When an id shows up more than once the last record wins.
    pub fn with_facilities<I>(mut self, facilities: I) -> Self
    where
        I: IntoIterator<Item = Facility>,
    {
        debug!("Indexing facilities...");
        let now = Instant::now();
        let mut facility_lookup: IdToIndex = HashMap::new();
        let mut values: Vec<Facility> = Vec::new();
        facilities.into_iter().for_each(|facility| {
            if let Some(&index) = facility_lookup.get(&facility.id) {
                warn!("Duplicate facility id {}, keeping the latest", facility.id);
                values[index as usize] = Facility { index, ..facility };
            } else {
                let index = values.len() as u32;
                facility_lookup.insert(facility.id.clone(), index);
                values.push(Facility { index, ..facility });
            }
        });
        self.facilities = values.into();
        self.facility_lookup = facility_lookup;
        self.generate_grid();
        debug!(
            "Indexed {} facilities in {:?}",
            self.facilities.len(),
            now.elapsed()
        );
        self
    }

    // Facilities without a coordinate stay out of the grid, they can't be near anything.
    fn generate_grid(&mut self) {
        let mut grid: HashMap<(i32, i32), Vec<u32>> = HashMap::new();
        self.facilities
            .iter()
            .filter_map(|facility| Some((facility.index, facility.coordinate?)))
            .for_each(|(index, coordinate)| {
                grid.entry(coordinate.to_grid()).or_default().push(index);
            });
        self.grid = grid
            .into_iter()
            .map(|(cell, indexes)| (cell, indexes.into()))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Get a facility with the given id.
    /// If no facility is found with the given id None is returned.
    pub fn facility_by_id(&self, id: &str) -> Option<&Facility> {
        let index = self.facility_lookup.get(id)?;
        Some(&self.facilities[*index as usize])
    }

    /// Does a fuzzy search on all the facilities, comparing their name to the needle.
    pub fn search_by_name<'a>(&'a self, needle: &str) -> Vec<&'a Facility> {
        shared::search(needle, &self.facilities)
    }

    /// Facilities within `distance` of the coordinate, closest first.
    pub fn facilities_by_coordinate(
        &self,
        coordinate: &Coordinate,
        distance: Distance,
    ) -> Vec<(&Facility, Distance)> {
        let mut found: Vec<_> = match self.grid_window(coordinate, distance) {
            Some(cells) => cells
                .into_par_iter()
                .filter_map(|cell| self.grid.get(&cell))
                .flat_map_iter(|indexes| indexes.iter())
                .map(|index| &self.facilities[*index as usize])
                .filter_map(|facility| within(facility, coordinate, distance))
                .collect(),
            None => self
                .facilities
                .par_iter()
                .filter_map(|facility| within(facility, coordinate, distance))
                .collect(),
        };
        found.par_sort_by(|(a, a_dist), (b, b_dist)| {
            a_dist
                .partial_cmp(b_dist)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        found
    }

    /// Every cell a search circle can touch.
    /// None when the circle wraps the date line or a pole, or when scanning all
    /// facilities is cheaper than walking the cells.
    fn grid_window(&self, coordinate: &Coordinate, distance: Distance) -> Option<Vec<(i32, i32)>> {
        let angle = distance.as_kilometers() / EARTH_RADIUS.as_kilometers();
        let latitude = f64::to_radians(coordinate.latitude);
        if angle >= FRAC_PI_2 - latitude.abs() {
            return None;
        }
        let lat_span = angle.to_degrees();
        let lon_span = f64::asin(f64::sin(angle) / f64::cos(latitude)).to_degrees();
        if coordinate.longitude.abs() + lon_span >= 180.0 {
            return None;
        }

        // One spare cell on each side absorbs the flat grid projection error.
        let x_reach = cells_for(lon_span, LONGITUDE_DISTANCE) + 1;
        let y_reach = cells_for(lat_span, LATITUDE_DISTANCE) + 1;
        let cells = (2 * x_reach + 1).saturating_mul(2 * y_reach + 1);
        if cells > self.grid.len() as i64 {
            return None;
        }

        let (origin_x, origin_y) = coordinate.to_grid();
        let (origin_x, origin_y) = (origin_x as i64, origin_y as i64);
        Some(
            (-x_reach..=x_reach)
                .flat_map(|x| {
                    (-y_reach..=y_reach)
                        .map(move |y| ((origin_x + x) as i32, (origin_y + y) as i32))
                })
                .collect(),
        )
    }

    /// All facilities ranked by distance from the observer, closest first.
    /// Facilities that can't be placed come last, in store order.
    /// Without an observer nothing can be placed and the store order is kept.
    pub fn nearest(
        &self,
        observer: Option<Coordinate>,
        limit: usize,
    ) -> Vec<(&Facility, Proximity)> {
        let mut ranked: Vec<_> = self
            .facilities
            .par_iter()
            .map(|facility| (facility, facility.proximity(observer)))
            .collect();
        ranked.par_sort_by(|(a, a_prox), (b, b_prox)| {
            match (a_prox.distance(), b_prox.distance()) {
                (Some(a_dist), Some(b_dist)) => a_dist
                    .partial_cmp(&b_dist)
                    .unwrap_or(std::cmp::Ordering::Equal),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then(a.index.cmp(&b.index))
        });
        ranked.truncate(limit);
        ranked
    }
}

fn cells_for(degrees: f64, degree_length: Distance) -> i64 {
    (degrees * degree_length.as_meters() / GRID_CELL_SIZE.as_meters()).ceil() as i64
}

fn within<'a>(
    facility: &'a Facility,
    coordinate: &Coordinate,
    distance: Distance,
) -> Option<(&'a Facility, Distance)> {
    let between = facility.coordinate?.distance(coordinate);
    (between <= distance).then_some((facility, between))
}
