//! GeoJSON map features for incident reports.
//!
//! Formatting is kept apart from storage: callers build an [`IncidentPoint`]
//! (directly or from a stored [`IncidentReport`]) and hand it to
//! [`make_feature_object`].

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use crate::db::models::IncidentReport;


pub const MARKER_COLOR: &str = "#FF0000";
pub const MARKER_SIZE: &str = "small";
pub const MARKER_SYMBOL: &str = "marker";

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%I:%M %p";


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("incident has no time of day")]
    MissingTime,

    #[error("incident has no {0}")]
    MissingCoordinate(&'static str),
}


/// Display texts that have no column on `dm_details`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureText {
    pub title: String,
    pub description: String,
    pub address: String,
}

/// Everything a map feature is made from.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentPoint {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub longitude: Option<BigDecimal>,
    pub latitude: Option<BigDecimal>,
    pub title: String,
    pub description: String,
    pub address: String,
}

impl IncidentPoint {
    /// Takes time and coordinates from a stored report, and the date from its
    /// `datetime` column, the only DATE on `dm_details`.
    pub fn from_report(report: &IncidentReport, text: FeatureText) -> Self {
        IncidentPoint {
            date: report.datetime,
            time: report.time,
            longitude: report.y_cord.clone(),
            latitude: report.x_cord.clone(),
            title: text.title,
            description: text.description,
            address: text.address,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]`, as decimal text.
    pub coordinates: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Properties {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub address: String,
    #[serde(rename = "marker-color")]
    pub marker_color: &'static str,
    #[serde(rename = "marker-size")]
    pub marker_size: &'static str,
    #[serde(rename = "marker-symbol")]
    pub marker_symbol: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}


pub fn make_feature_object(point: &IncidentPoint) -> Result<Feature, FeatureError> {
    let time = point.time.ok_or(FeatureError::MissingTime)?;
    let longitude = point.longitude.as_ref()
        .ok_or(FeatureError::MissingCoordinate("longitude"))?;
    let latitude = point.latitude.as_ref()
        .ok_or(FeatureError::MissingCoordinate("latitude"))?;

    Ok(Feature {
        kind: "Feature",
        geometry: Geometry {
            kind: "Point",
            coordinates: [longitude.to_string(), latitude.to_string()],
        },
        properties: Properties {
            title: point.title.clone(),
            description: point.description.clone(),
            date: point.date.format(DATE_FORMAT).to_string(),
            time: time.format(TIME_FORMAT).to_string(),
            address: point.address.clone(),
            marker_color: MARKER_COLOR,
            marker_size: MARKER_SIZE,
            marker_symbol: MARKER_SYMBOL,
        },
    })
}

/// Fails on the first point that can not be drawn.
pub fn make_feature_collection<'a, I>(points: I) -> Result<FeatureCollection, FeatureError> where
    I: IntoIterator<Item = &'a IncidentPoint> {

    let features = points.into_iter()
        .map(make_feature_object)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        kind: "FeatureCollection",
        features,
    })
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    fn decimal(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn point() -> IncidentPoint {
        IncidentPoint {
            date: NaiveDate::from_ymd_opt(2017, 3, 4).unwrap(),
            time: Some(NaiveTime::from_hms_opt(21, 5, 0).unwrap()),
            longitude: Some(decimal("-122.419415")),
            latitude: Some(decimal("37.774929")),
            title: "Harassment".into(),
            description: "Followed from the station".into(),
            address: "16th St Mission BART".into(),
        }
    }

    #[test]
    fn formats_complete_point() {
        let feature = make_feature_object(&point()).unwrap();

        assert_eq!(serde_json::to_value(&feature).unwrap(), json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": ["-122.419415", "37.774929"],
            },
            "properties": {
                "title": "Harassment",
                "description": "Followed from the station",
                "date": "03/04/2017",
                "time": "09:05 PM",
                "address": "16th St Mission BART",
                "marker-color": "#FF0000",
                "marker-size": "small",
                "marker-symbol": "marker",
            },
        }));
    }

    #[test]
    fn coordinates_keep_decimal_digits() {
        let mut p = point();
        p.longitude = Some(decimal("-122.41941512345678901234"));
        p.latitude = Some(decimal("37.1"));

        let feature = make_feature_object(&p).unwrap();
        assert_eq!(feature.geometry.coordinates, [
            "-122.41941512345678901234".to_string(),
            "37.1".to_string(),
        ]);
    }

    #[test]
    fn morning_times_use_am() {
        let mut p = point();
        p.time = Some(NaiveTime::from_hms_opt(0, 30, 59).unwrap());
        assert_eq!(make_feature_object(&p).unwrap().properties.time, "12:30 AM");

        p.time = Some(NaiveTime::from_hms_opt(11, 59, 0).unwrap());
        assert_eq!(make_feature_object(&p).unwrap().properties.time, "11:59 AM");

        p.time = Some(NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(make_feature_object(&p).unwrap().properties.time, "12:00 PM");
    }

    #[test]
    fn markers_are_constant() {
        let mut p = point();
        p.title = "Theft".into();
        p.date = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();

        for feature in &[make_feature_object(&point()).unwrap(), make_feature_object(&p).unwrap()] {
            assert_eq!(feature.properties.marker_color, "#FF0000");
            assert_eq!(feature.properties.marker_size, "small");
            assert_eq!(feature.properties.marker_symbol, "marker");
        }
    }

    #[test]
    fn missing_time_fails() {
        let mut p = point();
        p.time = None;
        assert_eq!(make_feature_object(&p), Err(FeatureError::MissingTime));
    }

    #[test]
    fn missing_coordinates_fail() {
        let mut p = point();
        p.longitude = None;
        assert_eq!(make_feature_object(&p), Err(FeatureError::MissingCoordinate("longitude")));

        let mut p = point();
        p.latitude = None;
        assert_eq!(make_feature_object(&p), Err(FeatureError::MissingCoordinate("latitude")));
    }

    #[test]
    fn point_from_report_swaps_cords_into_lon_lat() {
        let report = IncidentReport {
            incident_id: 1,
            user_id: 7,
            location: "Mission St".into(),
            x_cord: Some(decimal("37.7650")),
            y_cord: Some(decimal("-122.4194")),
            day_of_week: None,
            datetime: NaiveDate::from_ymd_opt(2017, 3, 10).unwrap(),
            month: None,
            time: Some(NaiveTime::from_hms_opt(8, 15, 0).unwrap()),
            hour: None,
            category: None,
            raw_text: "raw".into(),
            data_source: None,
            to_safety: "yes".into(),
        };
        let text = FeatureText {
            title: "Harassment".into(),
            description: "raw".into(),
            address: "Mission St".into(),
        };

        let feature = make_feature_object(&IncidentPoint::from_report(&report, text)).unwrap();
        assert_eq!(feature.geometry.coordinates, ["-122.4194".to_string(), "37.7650".to_string()]);
        assert_eq!(feature.properties.date, "03/10/2017");
        assert_eq!(feature.properties.time, "08:15 AM");
    }

    #[test]
    fn collection_stops_on_bad_point() {
        let good = point();
        let mut bad = point();
        bad.time = None;

        let collection = make_feature_collection(vec![&good, &good]).unwrap();
        assert_eq!(collection.kind, "FeatureCollection");
        assert_eq!(collection.features.len(), 2);

        assert_eq!(make_feature_collection(vec![&good, &bad]), Err(FeatureError::MissingTime));
    }
}
