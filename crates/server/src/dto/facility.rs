use serde::Serialize;
use sikembang::{
    proximity::{Presenter, Proximity},
    repository::Facility,
    shared::Coordinate,
};

/// What a map marker or list card shows.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityDto {
    pub id: String,
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub status: String,
    pub status_color: String,
    pub distance: String,
    pub distance_km: Option<f64>,
    pub eta: String,
    pub today: String,
    pub rating: String,
    pub reviews: u32,
}

impl FacilityDto {
    pub fn from(facility: &Facility, proximity: &Proximity, presenter: &Presenter) -> Self {
        Self {
            id: facility.id.to_string(),
            name: facility.name.to_string(),
            coordinate: facility.coordinate,
            status: presenter.status_label(facility.status).to_string(),
            status_color: presenter.status_color(facility.status).to_string(),
            distance: presenter.distance(proximity),
            distance_km: proximity.distance().map(|distance| distance.as_kilometers()),
            eta: presenter.eta(proximity),
            today: presenter.hours(facility.hours.today()).to_string(),
            rating: facility.rating.formatted(),
            reviews: facility.rating.reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayHoursDto {
    pub day: String,
    pub hours: String,
    pub closed: bool,
}

/// Everything the detail screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityDetailDto {
    #[serde(flatten)]
    pub summary: FacilityDto,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub responsible_person: String,
    pub notes: String,
    pub recent_activity: String,
    pub amenities: Vec<String>,
    pub hours: Vec<DayHoursDto>,
    pub navigation_uri: Option<String>,
    pub preview_uri: Option<String>,
}

impl FacilityDetailDto {
    pub fn from(facility: &Facility, proximity: &Proximity, presenter: &Presenter) -> Self {
        let hours = facility
            .hours
            .week()
            .map(|(day, hours)| DayHoursDto {
                day: presenter.day(day).to_string(),
                hours: presenter.hours(hours).to_string(),
                closed: hours.is_closed(),
            })
            .collect();
        Self {
            summary: FacilityDto::from(facility, proximity, presenter),
            address: facility.address.full(),
            phone: facility.contact.phone.to_string(),
            email: facility.contact.email.to_string(),
            responsible_person: facility.responsible_person.to_string(),
            notes: facility.notes.to_string(),
            recent_activity: facility.recent_activity.to_string(),
            amenities: facility.amenities.iter().map(|tag| tag.to_string()).collect(),
            hours,
            navigation_uri: facility.navigation_uri(),
            preview_uri: facility.preview_uri(),
        }
    }
}
