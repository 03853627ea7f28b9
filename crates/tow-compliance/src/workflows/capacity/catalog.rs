use serde::{de::Error as _, Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::weigh::VehicleCapacityProfile;

/// One parsed catalog line, with the make and model as written in the file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CatalogRow {
    pub(crate) make: String,
    pub(crate) model: String,
    pub(crate) profile: VehicleCapacityProfile,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CapacityRow>() {
        let row = record?;
        rows.push(CatalogRow {
            profile: row.profile(),
            make: row.make,
            model: row.model,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CapacityRow {
    #[serde(rename = "Make")]
    make: String,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Front Axle", default, deserialize_with = "blank_as_none")]
    front_axle: Option<f64>,
    #[serde(rename = "Rear Axle", default, deserialize_with = "blank_as_none")]
    rear_axle: Option<f64>,
    #[serde(rename = "GVM", default, deserialize_with = "blank_as_none")]
    gvm: Option<f64>,
    #[serde(rename = "GCM", default, deserialize_with = "blank_as_none")]
    gcm: Option<f64>,
    #[serde(rename = "BTC", default, deserialize_with = "blank_as_none")]
    btc: Option<f64>,
    #[serde(rename = "TBM", default, deserialize_with = "blank_as_none")]
    tbm: Option<f64>,
}

impl CapacityRow {
    fn profile(&self) -> VehicleCapacityProfile {
        VehicleCapacityProfile {
            front_axle_rating: self.front_axle,
            rear_axle_rating: self.rear_axle,
            gvm_rating: self.gvm,
            gcm_rating: self.gcm,
            braked_towing_capacity: self.btc,
            tow_ball_mass_rating: self.tbm,
        }
    }
}

// Spreadsheet exports write thousands separators ("3,500") when the cell is quoted.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let digits: String = trimmed.chars().filter(|ch| *ch != ',').collect();
    digits
        .parse::<f64>()
        .map(Some)
        .map_err(|_| D::Error::custom(format!("'{trimmed}' is not a mass in kilograms")))
}
