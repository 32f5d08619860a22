//! JSON retailer list: an array of objects, one per retailer.

use serde::Deserialize;
use serde_json::Value;

use crate::retailer::{clean_contacts, non_empty, Retailer};
use crate::source::{LoadError, ParsedRetailers};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRetailer {
    #[serde(default, alias = "sap_code", alias = "id")]
    sap_code: Option<Scalar>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "location")]
    area: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default, alias = "map_link", alias = "maps")]
    map_link: Option<String>,
    #[serde(default)]
    contact: Option<Scalar>,
    #[serde(default)]
    contact2: Option<Scalar>,
    #[serde(default)]
    contact3: Option<Scalar>,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lng")]
    longitude: Option<f64>,
}

/// Exported spreadsheets put numbers where strings are expected.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

impl RawRetailer {
    fn into_retailer(self) -> Option<Retailer> {
        let name = non_empty(self.name?)?;
        let contacts: Vec<String> = [self.contact, self.contact2, self.contact3]
            .into_iter()
            .flatten()
            .map(Scalar::into_string)
            .collect();

        Some(Retailer {
            sap_code: self.sap_code.map(Scalar::into_string).and_then(non_empty),
            name,
            area: self.area.map(|a| a.trim().to_string()).unwrap_or_default(),
            city: self.city.and_then(non_empty),
            contacts: clean_contacts(contacts.iter().map(String::as_str)),
            map_link: self.map_link.and_then(non_empty),
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

/// Parses a JSON array of retailer objects.
///
/// The document must be an array; individual entries that are not objects,
/// have the wrong field types, or lack a name are dropped and counted.
pub fn parse_json(text: &str) -> Result<ParsedRetailers, LoadError> {
    let values: Vec<Value> = serde_json::from_str(text)?;
    let total = values.len();

    let retailers: Vec<Retailer> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value::<RawRetailer>(value).ok())
        .filter_map(RawRetailer::into_retailer)
        .collect();

    let dropped = total - retailers.len();
    Ok(ParsedRetailers { retailers, dropped })
}
