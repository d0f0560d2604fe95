//! Immutable domain vocabulary consulted by the feature extractor.
//!
//! The lexicon is built once at startup and shared read-only across every
//! extractor instance; nothing here mutates after construction.

use std::collections::{HashMap, HashSet};

static TRAFFIC_KEYWORDS: &[&str] = &[
    // driving-related terms
    "driving",
    "driver",
    "learner",
    "instructor",
    "lesson",
    "test",
    "license",
    "practical",
    "theory",
    "parking",
    "reverse",
    "parallel",
    "vertical",
    // road conditions
    "traffic",
    "jam",
    "road",
    "route",
    "highway",
    "expressway",
    // vehicle types
    "car",
    "bike",
    "motorcycle",
    "scooter",
    "pmd",
];

static LOCATIONS: &[&str] = &[
    // major expressways
    "pie",
    "cte",
    "sle",
    "bke",
    "tpe",
    "ecp",
    "aye",
    "kje",
    "mce",
    // areas
    "woodlands",
    "jurong",
    "tampines",
    "changi",
    "yishun",
    "amk",
    "ang mo kio",
    "bedok",
    "clementi",
    "punggol",
    "sengkang",
];

static DRIVING_SCHOOLS: &[&str] = &["cdc", "bbdc", "ssdc", "comfortdelgro", "private", "school"];

static CAR_BRANDS: &[&str] = &[
    // japanese brands
    "toyota",
    "honda",
    "nissan",
    "mazda",
    "subaru",
    "mitsubishi",
    "lexus",
    "infiniti",
    // european brands
    "mercedes",
    "bmw",
    "audi",
    "volkswagen",
    "volvo",
    "porsche",
    "ferrari",
    "lamborghini",
    "maserati",
    "bentley",
    "rolls royce",
    "mini",
    "land rover",
    "jaguar",
    // korean brands
    "hyundai",
    "kia",
    // american brands
    "ford",
    "chevrolet",
    "tesla",
    // common model keywords
    "civic",
    "camry",
    "corolla",
    "altis",
    "vios",
    "accord",
    "cx5",
    "3series",
    "cclass",
    "eclass",
    "a4",
    "golf",
];

static PHRASES: &[&str] = &[
    "driving school",
    "private instructor",
    "test slot",
    "practical lesson",
    "theory test",
    "driving test",
    "traffic light",
    "parking lot",
    "driving license",
    "road test",
    "circuit training",
    "driving centre",
];

static POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "smooth",
    "helpful",
    "easy",
    "recommend",
    "worth",
    "convenient",
    "perfect",
    "pass",
    "success",
    "patient",
    "professional",
    "friendly",
    "clear",
    "efficient",
];

static NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "horrible",
    "difficult",
    "hard",
    "expensive",
    "waste",
    "rude",
    "unprofessional",
    "fail",
    "confusing",
    "slow",
    "late",
    "cancel",
    "postpone",
    "poor",
    "stuck",
    "impossible",
];

// Road-condition words weighted double when a post touches the traffic
// lexicon; blended on top of the base lists.
static TRAFFIC_POSITIVE_WORDS: &[&str] =
    &["smooth", "clear", "moving", "flowing", "quick", "empty"];

static TRAFFIC_NEGATIVE_WORDS: &[&str] = &[
    "jam",
    "congested",
    "gridlock",
    "standstill",
    "accident",
    "breakdown",
    "roadblock",
    "crawl",
    "closure",
    "diversion",
];

static TIMEFRAME_KEYWORDS: &[&str] = &[
    "morning",
    "afternoon",
    "evening",
    "night",
    "midnight",
    "dawn",
    "dusk",
    "weekend",
    "weekday",
    "peak hour",
    "rush hour",
    "off peak",
    "today",
    "tomorrow",
    "yesterday",
];

static LOCATION_COORDS: &[(&str, f64, f64)] = &[
    ("pie", 1.3408, 103.7800),
    ("cte", 1.3400, 103.8435),
    ("sle", 1.3976, 103.8150),
    ("bke", 1.3824, 103.7720),
    ("tpe", 1.3830, 103.9300),
    ("ecp", 1.3000, 103.8970),
    ("aye", 1.3030, 103.7400),
    ("kje", 1.3840, 103.7220),
    ("mce", 1.2770, 103.8640),
    ("woodlands", 1.4382, 103.7890),
    ("jurong", 1.3329, 103.7436),
    ("tampines", 1.3496, 103.9568),
    ("changi", 1.3450, 103.9832),
    ("yishun", 1.4304, 103.8354),
    ("amk", 1.3691, 103.8454),
    ("ang mo kio", 1.3691, 103.8454),
    ("bedok", 1.3236, 103.9273),
    ("clementi", 1.3162, 103.7649),
    ("punggol", 1.3984, 103.9072),
    ("sengkang", 1.3868, 103.8914),
];

/// Immutable sets and lookup tables of domain vocabulary.
#[derive(Debug, Clone)]
pub struct Lexicon {
    traffic_keywords: HashSet<&'static str>,
    driving_schools: HashSet<&'static str>,
    coordinates: HashMap<&'static str, (f64, f64)>,
}

impl Lexicon {
    /// Build the built-in Singapore traffic vocabulary.
    pub fn builtin() -> Self {
        Self {
            traffic_keywords: TRAFFIC_KEYWORDS.iter().copied().collect(),
            driving_schools: DRIVING_SCHOOLS.iter().copied().collect(),
            coordinates: LOCATION_COORDS
                .iter()
                .map(|(name, lat, lon)| (*name, (*lat, *lon)))
                .collect(),
        }
    }

    /// Exact-token membership test against the traffic keyword set.
    pub fn is_traffic_keyword(&self, token: &str) -> bool {
        self.traffic_keywords.contains(token)
    }

    /// Exact-token membership test against the driving-school set.
    pub fn is_driving_school(&self, token: &str) -> bool {
        self.driving_schools.contains(token)
    }

    /// True when any traffic keyword appears as a token of `normalized`.
    pub fn mentions_traffic(&self, normalized: &str) -> bool {
        normalized
            .split_whitespace()
            .any(|token| token.len() > 2 && self.traffic_keywords.contains(token))
    }

    /// Known location names, substring-matched against normalized text.
    pub fn locations(&self) -> &'static [&'static str] {
        LOCATIONS
    }

    /// Known car brand and model names, substring-matched.
    pub fn car_brands(&self) -> &'static [&'static str] {
        CAR_BRANDS
    }

    /// Multi-word phrases, substring-matched.
    pub fn phrases(&self) -> &'static [&'static str] {
        PHRASES
    }

    /// Base positive sentiment word list.
    pub fn positive_words(&self) -> &'static [&'static str] {
        POSITIVE_WORDS
    }

    /// Base negative sentiment word list.
    pub fn negative_words(&self) -> &'static [&'static str] {
        NEGATIVE_WORDS
    }

    /// Traffic-specific positive words (double-weighted when blended).
    pub fn traffic_positive_words(&self) -> &'static [&'static str] {
        TRAFFIC_POSITIVE_WORDS
    }

    /// Traffic-specific negative words (double-weighted when blended).
    pub fn traffic_negative_words(&self) -> &'static [&'static str] {
        TRAFFIC_NEGATIVE_WORDS
    }

    /// Timeframe keywords, substring-matched.
    pub fn timeframe_keywords(&self) -> &'static [&'static str] {
        TIMEFRAME_KEYWORDS
    }

    /// Map coordinates for a known location name.
    pub fn coordinates(&self, location: &str) -> Option<(f64, f64)> {
        self.coordinates.get(location).copied()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_vocabulary_round_trips() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_traffic_keyword("jam"));
        assert!(!lexicon.is_traffic_keyword("coffee"));
        assert!(lexicon.is_driving_school("bbdc"));
        assert!(lexicon.car_brands().contains(&"toyota"));
    }

    #[test]
    fn mentions_traffic_requires_full_tokens() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.mentions_traffic("stuck in a jam today"));
        // "carpark" must not satisfy the "car" keyword
        assert!(!lexicon.mentions_traffic("carpark was full"));
    }

    #[test]
    fn every_location_has_coordinates() {
        let lexicon = Lexicon::builtin();
        for location in lexicon.locations() {
            assert!(
                lexicon.coordinates(location).is_some(),
                "missing coordinates for {location}"
            );
        }
    }
}
