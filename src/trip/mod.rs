//! Trip attributes collected on the Predict view
//! Bounds checking happens here so the encoder only ever sees complete, in-range records

pub mod errors;

pub use errors::{TripError, TripResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_STAY_DAYS: f64 = 0.5;
pub const MAX_STAY_DAYS: f64 = 60.0;
pub const MIN_DAILY_SPENDING_USD: f64 = 1.0;

pub const DEFAULT_STAY_DAYS: f64 = 7.0;
pub const DEFAULT_DAILY_SPENDING_USD: f64 = 150.0;

pub const STAY_LABEL: &str = "Length of Stay (Days)";
pub const DAILY_LABEL: &str = "Daily Spending (USD)";
pub const PURPOSE_LABEL: &str = "Purpose of Visit";
pub const HOTEL_LABEL: &str = "Hotel Class";

/// Primary reason for the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurposeOfVisit {
    Conference,
    /// Visiting friends and relatives
    #[serde(rename = "VFR")]
    Vfr,
    Leisure,
    Business,
}

impl PurposeOfVisit {
    /// Options in the order the form presents them
    pub const ALL: [PurposeOfVisit; 4] = [
        PurposeOfVisit::Conference,
        PurposeOfVisit::Vfr,
        PurposeOfVisit::Leisure,
        PurposeOfVisit::Business,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PurposeOfVisit::Conference => "Conference",
            PurposeOfVisit::Vfr => "VFR",
            PurposeOfVisit::Leisure => "Leisure",
            PurposeOfVisit::Business => "Business",
        }
    }
}

impl fmt::Display for PurposeOfVisit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PurposeOfVisit {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PurposeOfVisit::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TripError::UnknownCategory {
                field: PURPOSE_LABEL,
                value: wanted.to_string(),
                allowed: join_labels(PurposeOfVisit::ALL.iter().map(|p| p.label())),
            })
    }
}

/// Accommodation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotelClass {
    Luxury,
    Standard,
    Budget,
}

impl HotelClass {
    pub const ALL: [HotelClass; 3] = [HotelClass::Luxury, HotelClass::Standard, HotelClass::Budget];

    pub fn label(&self) -> &'static str {
        match self {
            HotelClass::Luxury => "Luxury",
            HotelClass::Standard => "Standard",
            HotelClass::Budget => "Budget",
        }
    }
}

impl fmt::Display for HotelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HotelClass {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HotelClass::ALL
            .into_iter()
            .find(|h| h.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TripError::UnknownCategory {
                field: HOTEL_LABEL,
                value: wanted.to_string(),
                allowed: join_labels(HotelClass::ALL.iter().map(|h| h.label())),
            })
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// A complete, validated trip record
///
/// Constructed only through [`TripAttributes::new`] (or [`TripForm::parse`]),
/// so holding one means every field is present and within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripAttributes {
    length_of_stay_days: f64,
    daily_spending_usd: f64,
    purpose_of_visit: PurposeOfVisit,
    hotel_class: HotelClass,
}

impl TripAttributes {
    /// Validate numeric bounds and build the record
    pub fn new(
        length_of_stay_days: f64,
        daily_spending_usd: f64,
        purpose_of_visit: PurposeOfVisit,
        hotel_class: HotelClass,
    ) -> TripResult<Self> {
        // NaN fails both comparisons, so it is rejected here too
        if !(MIN_STAY_DAYS..=MAX_STAY_DAYS).contains(&length_of_stay_days) {
            return Err(TripError::OutOfRange {
                field: STAY_LABEL,
                value: length_of_stay_days,
                min: MIN_STAY_DAYS,
                max: MAX_STAY_DAYS,
            });
        }

        if !daily_spending_usd.is_finite() || daily_spending_usd < MIN_DAILY_SPENDING_USD {
            return Err(TripError::BelowMinimum {
                field: DAILY_LABEL,
                value: daily_spending_usd,
                min: MIN_DAILY_SPENDING_USD,
            });
        }

        Ok(Self {
            length_of_stay_days,
            daily_spending_usd,
            purpose_of_visit,
            hotel_class,
        })
    }

    pub fn length_of_stay_days(&self) -> f64 {
        self.length_of_stay_days
    }

    pub fn daily_spending_usd(&self) -> f64 {
        self.daily_spending_usd
    }

    pub fn purpose_of_visit(&self) -> PurposeOfVisit {
        self.purpose_of_visit
    }

    pub fn hotel_class(&self) -> HotelClass {
        self.hotel_class
    }
}

/// Raw Predict form submission, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripForm {
    #[serde(default)]
    pub stay_days: Option<String>,
    #[serde(default)]
    pub daily_spending: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub hotel_class: Option<String>,
}

impl TripForm {
    pub fn new(stay_days: &str, daily_spending: &str, purpose: &str, hotel_class: &str) -> Self {
        Self {
            stay_days: Some(stay_days.to_string()),
            daily_spending: Some(daily_spending.to_string()),
            purpose: Some(purpose.to_string()),
            hotel_class: Some(hotel_class.to_string()),
        }
    }

    /// Parse every field, then validate bounds
    ///
    /// Fields are checked in form order; the first violation wins.
    pub fn parse(&self) -> TripResult<TripAttributes> {
        let stay = parse_number(STAY_LABEL, self.stay_days.as_deref())?;
        let daily = parse_number(DAILY_LABEL, self.daily_spending.as_deref())?;
        let purpose: PurposeOfVisit = required(PURPOSE_LABEL, self.purpose.as_deref())?.parse()?;
        let hotel: HotelClass = required(HOTEL_LABEL, self.hotel_class.as_deref())?.parse()?;

        TripAttributes::new(stay, daily, purpose, hotel)
    }
}

fn required<'a>(field: &'static str, raw: Option<&'a str>) -> TripResult<&'a str> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TripError::Missing { field }),
    }
}

fn parse_number(field: &'static str, raw: Option<&str>) -> TripResult<f64> {
    let value = required(field, raw)?;
    value.parse::<f64>().map_err(|_| TripError::NotANumber {
        field,
        raw: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_trip() {
        let trip = TripAttributes::new(7.0, 150.0, PurposeOfVisit::Leisure, HotelClass::Standard)
            .expect("valid trip");
        assert_eq!(trip.length_of_stay_days(), 7.0);
        assert_eq!(trip.daily_spending_usd(), 150.0);
        assert_eq!(trip.purpose_of_visit(), PurposeOfVisit::Leisure);
        assert_eq!(trip.hotel_class(), HotelClass::Standard);
    }

    #[test]
    fn test_stay_bounds_are_inclusive() {
        assert!(TripAttributes::new(0.5, 1.0, PurposeOfVisit::Vfr, HotelClass::Budget).is_ok());
        assert!(TripAttributes::new(60.0, 1.0, PurposeOfVisit::Vfr, HotelClass::Budget).is_ok());
    }

    #[test]
    fn test_stay_below_minimum_rejected() {
        let err = TripAttributes::new(0.4, 150.0, PurposeOfVisit::Leisure, HotelClass::Standard)
            .unwrap_err();
        assert_eq!(err.field(), STAY_LABEL);
        assert_eq!(
            err.to_string(),
            "Length of Stay (Days) must be between 0.5 and 60.0 (got 0.4)"
        );
    }

    #[test]
    fn test_stay_above_maximum_rejected() {
        let err = TripAttributes::new(60.1, 150.0, PurposeOfVisit::Leisure, HotelClass::Standard)
            .unwrap_err();
        assert!(matches!(err, TripError::OutOfRange { .. }));
    }

    #[test]
    fn test_daily_spending_minimum() {
        let err = TripAttributes::new(3.0, 0.99, PurposeOfVisit::Business, HotelClass::Luxury)
            .unwrap_err();
        assert_eq!(err.field(), DAILY_LABEL);
        assert!(err.to_string().contains("at least 1.0"));
    }

    #[test]
    fn test_nan_rejected() {
        let business = |stay, daily| {
            TripAttributes::new(stay, daily, PurposeOfVisit::Business, HotelClass::Luxury)
        };
        assert!(business(f64::NAN, 10.0).is_err());
        assert!(business(2.0, f64::NAN).is_err());
        assert!(business(2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("vfr".parse::<PurposeOfVisit>().unwrap(), PurposeOfVisit::Vfr);
        assert_eq!(" Luxury ".parse::<HotelClass>().unwrap(), HotelClass::Luxury);

        let err = "Safari".parse::<PurposeOfVisit>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Purpose of Visit must be one of Conference, VFR, Leisure, Business (got 'Safari')"
        );
    }

    #[test]
    fn test_form_parse() {
        let form = TripForm::new("7.0", "150", "Leisure", "Standard");
        let trip = form.parse().unwrap();
        assert_eq!(trip.length_of_stay_days(), 7.0);
        assert_eq!(trip.hotel_class(), HotelClass::Standard);
    }

    #[test]
    fn test_form_missing_field() {
        let form = TripForm {
            stay_days: Some("7".to_string()),
            daily_spending: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(form.parse().unwrap_err(), TripError::Missing { field: DAILY_LABEL });
    }

    #[test]
    fn test_form_not_a_number() {
        let form = TripForm::new("a week", "150", "Leisure", "Standard");
        assert!(matches!(
            form.parse().unwrap_err(),
            TripError::NotANumber { field: STAY_LABEL, .. }
        ));
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&PurposeOfVisit::Vfr).unwrap();
        assert_eq!(json, "\"VFR\"");
    }
}
