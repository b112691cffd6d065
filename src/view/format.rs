use crate::trip::TripAttributes;

/// `$1,234.56` style currency text
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// One-line recap shown under a fresh prediction
pub fn recap(trip: &TripAttributes) -> String {
    format!(
        "A {:.1} days stay for {} at a {} hotel.",
        trip.length_of_stay_days(),
        trip.purpose_of_visit(),
        trip.hotel_class()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{HotelClass, PurposeOfVisit};

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1757.5), "$1,757.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(150.0), "$150.00");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(-42.5), "-$42.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_recap() {
        let trip =
            TripAttributes::new(7.0, 150.0, PurposeOfVisit::Leisure, HotelClass::Standard).unwrap();
        assert_eq!(recap(&trip), "A 7.0 days stay for Leisure at a Standard hotel.");
    }
}
