use diesel::prelude::*;

use crate::data::schema::shelters;
use crate::data::source::{ColumnMapping, Field, RawRow};
use crate::geocode::Coordinates;

/// Raw accessibility value meaning the shelter has no accessible entrance.
pub const INACCESSIBLE_MARKER: &str = "Відсутній";

/// A shelter ready to be persisted. Coordinates are not optional: a row only
/// becomes a `ShelterRecord` once its address has been resolved.
#[derive(Debug, Clone, PartialEq, Insertable, Queryable, Selectable)]
#[diesel(table_name = shelters)]
pub struct ShelterRecord {
    pub district: String,
    pub address: String,
    pub shelter_type: Option<String>,
    pub place: Option<String>,
    pub building_type: Option<String>,
    pub owner: Option<String>,
    pub ownership: Option<String>,
    pub phone: Option<String>,
    pub accessibility: bool,
    pub hours: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// A normalized row still waiting for its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelterDraft {
    pub district: String,
    pub address: String,
    pub shelter_type: Option<String>,
    pub place: Option<String>,
    pub building_type: Option<String>,
    pub owner: Option<String>,
    pub ownership: Option<String>,
    pub phone: Option<String>,
    pub accessibility: bool,
    pub hours: Option<String>,
}

impl ShelterDraft {
    /// Normalizes a raw row. Fails with the first required field that is
    /// missing (district or address).
    pub fn from_row(row: &RawRow, mapping: &ColumnMapping) -> Result<ShelterDraft, Field> {
        let text = |field| mapping.get(row, field).map(str::to_owned);

        Ok(ShelterDraft {
            district: text(Field::District).ok_or(Field::District)?,
            address: text(Field::Address).ok_or(Field::Address)?,
            shelter_type: text(Field::ShelterType),
            place: text(Field::Place),
            building_type: text(Field::BuildingType),
            owner: text(Field::Owner),
            ownership: text(Field::Ownership),
            phone: text(Field::Phone),
            accessibility: is_accessible(mapping.get(row, Field::Accessibility)),
            hours: text(Field::Hours),
        })
    }

    /// Address text sent to the geocoder, qualified with the city name.
    pub fn lookup_address(&self, city: &str) -> String {
        format!("{}, {}", self.address, city)
    }

    pub fn locate(self, coordinates: Coordinates) -> ShelterRecord {
        ShelterRecord {
            district: self.district,
            address: self.address,
            shelter_type: self.shelter_type,
            place: self.place,
            building_type: self.building_type,
            owner: self.owner,
            ownership: self.ownership,
            phone: self.phone,
            accessibility: self.accessibility,
            hours: self.hours,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }
}

/// Exact comparison: no trimming, no case folding. Missing values count as
/// accessible.
pub fn is_accessible(raw: Option<&str>) -> bool {
    raw != Some(INACCESSIBLE_MARKER)
}
