use serde::{Deserialize, Serialize};

mod user_state;

pub use user_state::UserState;

/// A movie candidate returned by the recommendation provider
///
/// Wire names follow the provider's JSON schema (camelCase). Identity is the
/// `id` field; records are never mutated once received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    /// Short synopsis written for one partner explaining the pick to the other
    #[serde(rename = "conversationalSynopsis")]
    pub synopsis: String,
    pub poster_url: String,
    /// Rotten Tomatoes style score, e.g. "93%"
    #[serde(rename = "rottenTomatoesScore")]
    pub score: String,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(rename = "streamingPlatforms")]
    pub platforms: Vec<StreamingInfo>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    /// e.g. "1h 45m"
    pub runtime: String,
}

/// Where (and how) a candidate can be streamed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamingInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AvailabilityKind,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    Subscription,
    Free,
    #[serde(rename = "rent/buy", alias = "rent", alias = "buy")]
    RentBuy,
}

/// One of the two people sharing the device pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserSlot {
    A,
    B,
}

/// Release-recency window for candidate fetches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YearRange {
    #[serde(rename = "1w")]
    LastWeek,
    #[serde(rename = "1m")]
    LastMonth,
    #[serde(rename = "3m")]
    LastThreeMonths,
    #[serde(rename = "6m")]
    LastSixMonths,
    #[serde(rename = "1y")]
    LastYear,
    #[serde(rename = "2y")]
    LastTwoYears,
    #[serde(rename = "10y")]
    LastTenYears,
}

impl YearRange {
    /// Human phrasing used when asking the provider for candidates
    pub fn phrase(&self) -> &'static str {
        match self {
            YearRange::LastWeek => "released in the last week",
            YearRange::LastMonth => "released in the last month",
            YearRange::LastThreeMonths => "released in the last 3 months",
            YearRange::LastSixMonths => "released in the last 6 months",
            YearRange::LastYear => "released in the last year",
            YearRange::LastTwoYears => "released in the last 2 years",
            YearRange::LastTenYears => "released in the last 10 years",
        }
    }
}

/// Runtime ceiling for candidate fetches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaxRuntime {
    Any,
    #[serde(rename = "Under 90 mins")]
    Under90,
    #[serde(rename = "Under 2 hours")]
    Under2Hours,
    #[serde(rename = "Over 2 hours")]
    Over2Hours,
}

impl MaxRuntime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaxRuntime::Any => "Any",
            MaxRuntime::Under90 => "Under 90 mins",
            MaxRuntime::Under2Hours => "Under 2 hours",
            MaxRuntime::Over2Hours => "Over 2 hours",
        }
    }
}

/// Which of the three views the client is rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewTab {
    #[default]
    Discover,
    Watchlist,
    Matches,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_deserialization_from_provider_json() {
        let json = r#"{
            "id": "heat-1995",
            "title": "Heat",
            "year": 1995,
            "conversationalSynopsis": "De Niro and Pacino finally share a scene.",
            "posterUrl": "https://posters.example/heat.jpg",
            "rottenTomatoesScore": "88%",
            "trailerUrl": "https://trailers.example/heat",
            "streamingPlatforms": [
                { "name": "Netflix", "type": "subscription" },
                { "name": "Apple TV+", "type": "rent" }
            ],
            "genres": ["Crime", "Thriller"],
            "cast": ["Al Pacino", "Robert De Niro", "Val Kilmer"],
            "runtime": "2h 50m"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, "heat-1995");
        assert_eq!(movie.year, 1995);
        assert_eq!(movie.score, "88%");
        assert_eq!(movie.platforms.len(), 2);
        assert_eq!(movie.platforms[0].kind, AvailabilityKind::Subscription);
        // "rent" and "buy" collapse into rent/buy
        assert_eq!(movie.platforms[1].kind, AvailabilityKind::RentBuy);
    }

    #[test]
    fn test_movie_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "m1",
            "title": "Untitled",
            "year": 2024,
            "conversationalSynopsis": "It exists.",
            "posterUrl": "",
            "rottenTomatoesScore": "50%",
            "streamingPlatforms": [],
            "cast": [],
            "runtime": "1h 30m"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.trailer_url, None);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_year_range_wire_values() {
        let json = serde_json::to_string(&YearRange::LastYear).unwrap();
        assert_eq!(json, r#""1y""#);

        let parsed: YearRange = serde_json::from_str(r#""10y""#).unwrap();
        assert_eq!(parsed, YearRange::LastTenYears);
    }

    #[test]
    fn test_max_runtime_wire_values() {
        let json = serde_json::to_string(&MaxRuntime::Under90).unwrap();
        assert_eq!(json, r#""Under 90 mins""#);

        let parsed: MaxRuntime = serde_json::from_str(r#""Over 2 hours""#).unwrap();
        assert_eq!(parsed, MaxRuntime::Over2Hours);
    }

    #[test]
    fn test_user_slot_wire_values() {
        assert_eq!(serde_json::to_string(&UserSlot::A).unwrap(), r#""a""#);
        let parsed: UserSlot = serde_json::from_str(r#""b""#).unwrap();
        assert_eq!(parsed, UserSlot::B);
    }
}
