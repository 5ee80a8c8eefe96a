use serde::{Deserialize, Serialize};

/// Current conditions for one location, as decoded from the weather API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Weather {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Current {
    /// Temperature in degrees Celsius
    #[serde(rename = "temp_c")]
    pub temperature_c: f64,
    /// Relative humidity, percent
    pub humidity: u32,
    /// Wind speed in km/h
    pub wind_kph: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Condition {
    pub text: String,
}

impl Weather {
    /// Display name of the place, e.g. "London, City of London, United Kingdom"
    pub fn place(&self) -> String {
        format!(
            "{}, {}, {}",
            self.location.name, self.location.region, self.location.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_weatherapi_shape() {
        let body = r#"{
            "location": {"name": "London", "region": "City of London, Greater London", "country": "United Kingdom", "lat": 51.52},
            "current": {"temp_c": 15.0, "humidity": 70, "wind_kph": 10.1, "condition": {"text": "Cloudy", "code": 1006}}
        }"#;

        let weather: Weather = serde_json::from_str(body).unwrap();
        assert_eq!(weather.location.name, "London");
        assert_eq!(weather.current.temperature_c, 15.0);
        assert_eq!(weather.current.humidity, 70);
        assert_eq!(weather.current.wind_kph, 10.1);
        assert_eq!(weather.current.condition.text, "Cloudy");
    }

    #[test]
    fn test_decode_rejects_missing_current() {
        let body = r#"{"location": {"name": "London", "region": "", "country": "UK"}}"#;
        assert!(serde_json::from_str::<Weather>(body).is_err());
    }
}
