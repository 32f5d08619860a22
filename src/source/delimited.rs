//! CSV retailer list with a header row.
//!
//! Headers are matched case-insensitively against the column names used by
//! the store exports. Rows whose field count differs from the header are
//! skipped.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::retailer::{clean_contacts, non_empty, Retailer};
use crate::source::{LoadError, ParsedRetailers};

const ID_COLUMNS: &[&str] = &["sap code", "sapcode", "sap_code", "id"];
const NAME_COLUMNS: &[&str] = &["retailer name", "name", "store name"];
const AREA_COLUMNS: &[&str] = &["location", "area"];
const ADDRESS_COLUMNS: &[&str] = &["address"];
const CITY_COLUMNS: &[&str] = &["city"];
const CONTACT_COLUMNS: &[&str] = &["contact number", "contact", "phone"];
const CONTACT2_COLUMNS: &[&str] = &["contact2", "contact 2"];
const CONTACT3_COLUMNS: &[&str] = &["contact3", "contact 3"];
const MAP_COLUMNS: &[&str] = &["google map link", "maps", "maplink", "map_link"];
const LAT_COLUMNS: &[&str] = &["latitude", "lat"];
const LNG_COLUMNS: &[&str] = &["longitude", "lng", "lon"];

struct Columns {
    id: Option<usize>,
    name: Option<usize>,
    area: usize,
    city: Option<usize>,
    contacts: [Option<usize>; 3],
    map_link: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |aliases: &[&str]| {
            headers.iter().position(|header| {
                let header = header.trim().to_lowercase();
                aliases.iter().any(|alias| *alias == header)
            })
        };

        let name = find(NAME_COLUMNS);
        let area = find(AREA_COLUMNS).or_else(|| find(ADDRESS_COLUMNS));
        let Some(area) = area else {
            return Err(LoadError::MissingColumn { column: "area" });
        };

        Ok(Self {
            id: find(ID_COLUMNS),
            name,
            area,
            city: find(CITY_COLUMNS),
            contacts: [
                find(CONTACT_COLUMNS),
                find(CONTACT2_COLUMNS),
                find(CONTACT3_COLUMNS),
            ],
            map_link: find(MAP_COLUMNS),
            latitude: find(LAT_COLUMNS),
            longitude: find(LNG_COLUMNS),
        })
    }

    fn build(&self, record: &StringRecord) -> Option<Retailer> {
        let field = |index: Option<usize>| index.and_then(|i| record.get(i)).unwrap_or("");
        let area = field(Some(self.area)).to_string();
        // Exports without a name column show the location as the heading.
        let name = match self.name {
            Some(index) => non_empty(field(Some(index)).to_string())?,
            None => non_empty(area.clone())?,
        };

        Some(Retailer {
            sap_code: non_empty(field(self.id).to_string()),
            name,
            area,
            city: non_empty(field(self.city).to_string()),
            contacts: clean_contacts(self.contacts.iter().map(|index| field(*index))),
            map_link: non_empty(field(self.map_link).to_string()),
            latitude: field(self.latitude).parse().ok(),
            longitude: field(self.longitude).parse().ok(),
        })
    }
}

/// Parses CSV text into retailers, dropping malformed rows.
pub fn parse_csv(text: &str) -> Result<ParsedRetailers, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut retailers = Vec::new();
    let mut dropped = 0;
    for result in reader.records() {
        let Ok(record) = result else {
            dropped += 1;
            continue;
        };
        if record.len() != headers.len() {
            dropped += 1;
            continue;
        }
        match columns.build(&record) {
            Some(retailer) => retailers.push(retailer),
            None => dropped += 1,
        }
    }

    Ok(ParsedRetailers { retailers, dropped })
}
