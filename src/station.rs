//! Station filter and projector.
//!
//! Decides whether a feed row is a station or top-level stop worth keeping
//! and projects it into the output [`Station`] record.

use serde::Serialize;

use crate::feed::StopRow;

/// GTFS `location_type` for a station that groups child stops.
pub const LOCATION_TYPE_STATION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StationType {
    Station,
    Stop,
}

/// One catalog entry. `code` and `platform` are omitted from the JSON
/// entirely when the feed had no value for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: StationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

/// Why a row did not make it into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `stop_name` missing or blank.
    Unnamed,
    /// A platform or entrance that belongs to a parent station.
    ChildStop,
    /// Coordinates outside the bounding box.
    OutOfBounds,
}

/// Missing or unparseable values count as `0` (a plain stop).
pub fn parse_location_type(value: Option<&str>) -> i32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Missing or unparseable coordinates (including `NaN`) count as `0.0`.
/// Infinite values are kept so the bounding box rejects them.
pub fn parse_coordinate(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Applies the keep/drop predicate to a raw row.
pub fn is_candidate(row: &StopRow) -> Result<(), Rejection> {
    let location_type = parse_location_type(row.location_type.as_deref());
    let is_main_station = location_type == LOCATION_TYPE_STATION;
    let is_main_stop = row.parent_station.as_deref().is_none_or(str::is_empty);
    let has_valid_name = non_empty(row.stop_name.as_deref()).is_some();

    if !(is_main_station || is_main_stop) {
        return Err(Rejection::ChildStop);
    }
    if !has_valid_name {
        return Err(Rejection::Unnamed);
    }
    Ok(())
}

impl Station {
    /// Builds the record for a row that passed [`is_candidate`]. `accepted`
    /// is the number of stations already stored and seeds the synthetic id
    /// when the row has no `stop_id`.
    pub fn project(row: &StopRow, accepted: usize) -> Self {
        let id = match row.stop_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("station_{accepted}"),
        };

        let location_type = parse_location_type(row.location_type.as_deref());
        let kind = if location_type == LOCATION_TYPE_STATION {
            StationType::Station
        } else {
            StationType::Stop
        };

        Station {
            id,
            name: row.stop_name.as_deref().unwrap_or_default().trim().to_string(),
            lat: parse_coordinate(row.stop_lat.as_deref()),
            lon: parse_coordinate(row.stop_lon.as_deref()),
            kind,
            code: non_empty(row.stop_code.as_deref()).map(str::to_string),
            platform: non_empty(row.platform_code.as_deref()).map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> StopRow {
        StopRow {
            stop_id: Some("8503000".to_string()),
            stop_name: Some(name.to_string()),
            stop_lat: Some("47.3782".to_string()),
            stop_lon: Some("8.5402".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_location_type_defaults_to_stop() {
        assert_eq!(parse_location_type(None), 0);
        assert_eq!(parse_location_type(Some("")), 0);
        assert_eq!(parse_location_type(Some("abc")), 0);
        assert_eq!(parse_location_type(Some("1")), 1);
        assert_eq!(parse_location_type(Some("2")), 2);
    }

    #[test]
    fn test_coordinates_default_to_zero() {
        assert_eq!(parse_coordinate(None), 0.0);
        assert_eq!(parse_coordinate(Some("n/a")), 0.0);
        assert_eq!(parse_coordinate(Some("NaN")), 0.0);
        assert_eq!(parse_coordinate(Some("inf")), f64::INFINITY);
        assert_eq!(parse_coordinate(Some("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(parse_coordinate(Some(" 46.5 ")), 46.5);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert_eq!(is_candidate(&row("   ")), Err(Rejection::Unnamed));

        let mut unnamed = row("x");
        unnamed.stop_name = None;
        unnamed.location_type = Some("1".to_string());
        assert_eq!(is_candidate(&unnamed), Err(Rejection::Unnamed));
    }

    #[test]
    fn test_station_with_parent_is_accepted() {
        let mut r = row("Olten");
        r.location_type = Some("1".to_string());
        r.parent_station = Some("Parent".to_string());

        assert_eq!(is_candidate(&r), Ok(()));
    }

    #[test]
    fn test_unparented_stop_is_accepted() {
        let mut r = row("Wil SG");
        r.location_type = Some("0".to_string());
        r.parent_station = Some(String::new());

        assert_eq!(is_candidate(&r), Ok(()));
    }

    #[test]
    fn test_child_stop_is_rejected() {
        let mut r = row("Luzern, Gleis 3");
        r.parent_station = Some("8505000".to_string());
        assert_eq!(is_candidate(&r), Err(Rejection::ChildStop));

        r.location_type = Some("2".to_string());
        assert_eq!(is_candidate(&r), Err(Rejection::ChildStop));
    }

    #[test]
    fn test_project_trims_name_and_types_station() {
        let mut r = row("  Zürich HB ");
        r.location_type = Some("1".to_string());

        let station = Station::project(&r, 7);
        assert_eq!(station.id, "8503000");
        assert_eq!(station.name, "Zürich HB");
        assert_eq!(station.kind, StationType::Station);
        assert_eq!(station.lat, 47.3782);
    }

    #[test]
    fn test_project_synthesizes_id() {
        let mut r = row("Adliswil");
        r.stop_id = Some(String::new());
        assert_eq!(Station::project(&r, 1).id, "station_1");

        r.stop_id = None;
        assert_eq!(Station::project(&r, 0).id, "station_0");
    }

    #[test]
    fn test_optional_fields_are_omitted_when_empty() {
        let mut r = row("Bern");
        r.stop_code = Some(String::new());
        r.platform_code = Some("  ".to_string());

        let json = serde_json::to_value(Station::project(&r, 0)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("code"));
        assert!(!obj.contains_key("platform"));
        assert_eq!(obj["type"], "stop");
    }

    #[test]
    fn test_optional_fields_are_kept_when_present() {
        let mut r = row("Bern");
        r.stop_code = Some("BN".to_string());
        r.platform_code = Some("7".to_string());

        let json = serde_json::to_value(Station::project(&r, 0)).unwrap();
        assert_eq!(json["code"], "BN");
        assert_eq!(json["platform"], "7");
    }
}
