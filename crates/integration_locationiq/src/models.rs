//! Geocoding result models and LocationIQ response parsing

use serde::{Deserialize, Serialize};

use crate::error::GeocodingFault;

/// Bounding box of a match, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern latitude
    pub south: f64,
    /// Northern latitude
    pub north: f64,
    /// Western longitude
    pub west: f64,
    /// Eastern longitude
    pub east: f64,
}

/// A single candidate returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GeocodeMatch {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Human-readable label, e.g. "221B Baker Street, London"
    pub display_name: String,
    /// Provider place identifier
    pub place_id: Option<String>,
    /// OpenStreetMap element type ("node", "way", "relation")
    pub osm_type: Option<String>,
    /// OpenStreetMap element id
    pub osm_id: Option<String>,
    /// Place class, e.g. "building" or "amenity"
    pub class: Option<String>,
    /// Place type within the class, e.g. "hospital"
    pub place_type: Option<String>,
    /// Provider relevance score
    pub importance: Option<f64>,
    /// Bounding box, when the provider supplies one
    pub bounding_box: Option<BoundingBox>,
    /// Data licence notice
    pub licence: Option<String>,
}

/// Ordered, possibly empty result of a lookup
///
/// Order follows the provider's relevance ranking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Matches in provider order
    pub matches: Vec<GeocodeMatch>,
}

impl LookupResult {
    /// An empty result
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            matches: Vec::new(),
        }
    }

    /// Number of matches
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// True when there are no matches
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The provider's top-ranked match
    #[must_use]
    pub fn best(&self) -> Option<&GeocodeMatch> {
        self.matches.first()
    }

    /// Iterate over matches in provider order
    pub fn iter(&self) -> std::slice::Iter<'_, GeocodeMatch> {
        self.matches.iter()
    }
}

impl IntoIterator for LookupResult {
    type Item = GeocodeMatch;
    type IntoIter = std::vec::IntoIter<GeocodeMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'a> IntoIterator for &'a LookupResult {
    type Item = &'a GeocodeMatch;
    type IntoIter = std::slice::Iter<'a, GeocodeMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// LocationIQ API response structures
mod api {
    use serde::Deserialize;

    /// Numbers LocationIQ sometimes sends as strings and sometimes as JSON numbers
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    impl Scalar {
        pub fn into_string(self) -> String {
            match self {
                Self::Text(s) => s,
                Self::Number(n) => n.to_string(),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct Place {
        pub lat: Scalar,
        pub lon: Scalar,
        pub display_name: String,
        #[serde(default)]
        pub place_id: Option<Scalar>,
        #[serde(default)]
        pub licence: Option<String>,
        #[serde(default)]
        pub osm_type: Option<String>,
        #[serde(default)]
        pub osm_id: Option<Scalar>,
        #[serde(default)]
        pub boundingbox: Option<Vec<Scalar>>,
        #[serde(default)]
        pub class: Option<String>,
        #[serde(default, rename = "type")]
        pub place_type: Option<String>,
        #[serde(default)]
        pub importance: Option<f64>,
    }
}

fn parse_degrees(value: api::Scalar, field: &str) -> Result<f64, GeocodingFault> {
    let text = value.into_string();
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodingFault::Parse(format!("invalid {field}: '{text}'")))
}

fn parse_bounding_box(values: Vec<api::Scalar>) -> Result<BoundingBox, GeocodingFault> {
    let [south, north, west, east]: [api::Scalar; 4] = values.try_into().map_err(
        |v: Vec<api::Scalar>| {
            GeocodingFault::Parse(format!("boundingbox must have 4 entries, got {}", v.len()))
        },
    )?;

    Ok(BoundingBox {
        south: parse_degrees(south, "boundingbox")?,
        north: parse_degrees(north, "boundingbox")?,
        west: parse_degrees(west, "boundingbox")?,
        east: parse_degrees(east, "boundingbox")?,
    })
}

fn match_from_place(place: api::Place) -> Result<GeocodeMatch, GeocodingFault> {
    Ok(GeocodeMatch {
        latitude: parse_degrees(place.lat, "lat")?,
        longitude: parse_degrees(place.lon, "lon")?,
        display_name: place.display_name,
        place_id: place.place_id.map(api::Scalar::into_string),
        osm_type: place.osm_type,
        osm_id: place.osm_id.map(api::Scalar::into_string),
        class: place.class,
        place_type: place.place_type,
        importance: place.importance,
        bounding_box: place.boundingbox.map(parse_bounding_box).transpose()?,
        licence: place.licence,
    })
}

/// Parse a 200 response body into a [`LookupResult`]
///
/// # Errors
///
/// Returns [`GeocodingFault::Parse`] if the body is not a JSON array of
/// places or any place carries an unparsable coordinate.
pub fn parse_lookup_body(body: &str) -> Result<LookupResult, GeocodingFault> {
    let places: Vec<api::Place> =
        serde_json::from_str(body).map_err(|e| GeocodingFault::Parse(e.to_string()))?;

    let matches = places
        .into_iter()
        .map(match_from_place)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LookupResult { matches })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = r#"[
        {
            "place_id": "331522268",
            "licence": "https://locationiq.com/attribution",
            "osm_type": "node",
            "osm_id": "3916613190",
            "boundingbox": ["51.5237", "51.5238", "-0.1586", "-0.1585"],
            "lat": "51.5237629",
            "lon": "-0.1585502",
            "display_name": "Sherlock Holmes Museum, 221b, Baker Street, London",
            "class": "tourism",
            "type": "museum",
            "importance": 0.61
        },
        {
            "lat": "51.52",
            "lon": "-0.15",
            "display_name": "Baker Street, London"
        }
    ]"#;

    #[test]
    fn test_parse_minimal_match() {
        let body = r#"[{"lat":"51.52","lon":"-0.15","display_name":"221B Baker Street, London"}]"#;
        let result = parse_lookup_body(body).unwrap();

        assert_eq!(result.len(), 1);
        let m = result.best().unwrap();
        assert_eq!(m.display_name, "221B Baker Street, London");
        assert!((m.latitude - 51.52).abs() < f64::EPSILON);
        assert!((m.longitude + 0.15).abs() < f64::EPSILON);
        assert!(m.bounding_box.is_none());
    }

    #[test]
    fn test_parse_full_metadata_in_order() {
        let result = parse_lookup_body(FULL_BODY).unwrap();
        assert_eq!(result.len(), 2);

        let first = &result.matches[0];
        assert_eq!(first.place_id.as_deref(), Some("331522268"));
        assert_eq!(first.class.as_deref(), Some("tourism"));
        assert_eq!(first.place_type.as_deref(), Some("museum"));
        assert!(first.importance.is_some_and(|v| (v - 0.61).abs() < 1e-9));
        let bbox = first.bounding_box.unwrap();
        assert!(bbox.south < bbox.north);
        assert!(bbox.west < bbox.east);

        assert_eq!(result.matches[1].display_name, "Baker Street, London");
    }

    #[test]
    fn test_parse_numeric_coordinates() {
        let body = r#"[{"lat":52.52,"lon":13.405,"display_name":"Berlin","place_id":12345}]"#;
        let result = parse_lookup_body(body).unwrap();
        assert_eq!(result.matches[0].place_id.as_deref(), Some("12345"));
        assert!((result.matches[0].longitude - 13.405).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_empty_array() {
        let result = parse_lookup_body("[]").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_error_object_is_parse_fault() {
        let err = parse_lookup_body(r#"{"error":"Unable to geocode"}"#).unwrap_err();
        assert!(matches!(err, GeocodingFault::Parse(_)));
    }

    #[test]
    fn test_plain_text_is_parse_fault() {
        assert!(parse_lookup_body("Service unavailable").is_err());
    }

    #[test]
    fn test_invalid_latitude_is_parse_fault() {
        let body = r#"[{"lat":"north","lon":"-0.15","display_name":"x"}]"#;
        let err = parse_lookup_body(body).unwrap_err();
        assert!(err.to_string().contains("lat"));
    }

    #[test]
    fn test_short_bounding_box_is_parse_fault() {
        let body = r#"[{"lat":"1","lon":"2","display_name":"x","boundingbox":["1","2"]}]"#;
        let err = parse_lookup_body(body).unwrap_err();
        assert!(err.to_string().contains("boundingbox"));
    }

    #[test]
    fn test_missing_display_name_is_parse_fault() {
        let body = r#"[{"lat":"1","lon":"2"}]"#;
        assert!(parse_lookup_body(body).is_err());
    }

    #[test]
    fn test_lookup_result_iteration() {
        let result = parse_lookup_body(FULL_BODY).unwrap();
        let labels: Vec<&str> = result.iter().map(|m| m.display_name.as_str()).collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].starts_with("Sherlock"));

        let owned: Vec<GeocodeMatch> = result.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }
}
