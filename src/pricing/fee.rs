use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// Currency units charged per kg of parcel weight
pub const WEIGHT_RATE_PER_KG: f64 = 10.0;
/// Currency units charged per km travelled
pub const DISTANCE_RATE_PER_KM: f64 = 2.0;
/// Floor applied to every delivery fee
pub const MINIMUM_FEE: f64 = 50.0;

/// Parcel weight in kg as entered by the sender.
///
/// Accepts either a number or free text. Text is read like a browser's
/// `parseFloat`: leading whitespace is skipped and the longest numeric prefix
/// is used, so `"2.5kg"` is 2.5. Anything that does not yield a finite number
/// is treated as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "NumberInput", into = "f64")]
pub struct Weight(f64);

impl Weight {
    pub fn kg(self) -> f64 {
        self.0
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Weight(value)
        } else {
            Weight(0.0)
        }
    }
}

impl From<&str> for Weight {
    fn from(value: &str) -> Self {
        parse_leading_float(value).map(Weight::from).unwrap_or_default()
    }
}

impl From<&String> for Weight {
    fn from(value: &String) -> Self {
        Weight::from(value.as_str())
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

/// Numeric form field exactly as submitted, before lenient parsing.
/// `null`, booleans and other JSON shapes land in `Other` and read as 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl NumberInput {
    /// True for whitespace-only text or a value that is not a number or text
    pub fn is_blank(&self) -> bool {
        match self {
            NumberInput::Number(_) => false,
            NumberInput::Text(s) => s.trim().is_empty(),
            NumberInput::Other(_) => true,
        }
    }

    /// Read the input like `parseFloat`; anything non-finite is 0
    pub fn value(&self) -> f64 {
        let value = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(s) => parse_leading_float(s).unwrap_or_default(),
            NumberInput::Other(_) => 0.0,
        };
        if value.is_finite() { value } else { 0.0 }
    }
}

impl From<NumberInput> for Weight {
    fn from(input: NumberInput) -> Self {
        Weight::from(input.value())
    }
}

/// Parse the longest decimal prefix of `input`, if there is one
fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone "." only counts when digits precede it
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent is consumed only when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Cost breakdown shown alongside a delivery fee
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub weight_cost: f64,
    pub distance_cost: f64,
    pub total: f64,
    /// Set only when the total sits exactly on the floor and the raw cost was below it
    pub is_minimum: bool,
}

/// Delivery fee for a parcel of `weight` carried `distance_km`
pub fn calculate_fee(weight: impl Into<Weight>, distance_km: u32) -> f64 {
    price_breakdown(weight, distance_km).total
}

/// Itemized delivery fee
pub fn price_breakdown(weight: impl Into<Weight>, distance_km: u32) -> PriceBreakdown {
    let weight_cost = weight.into().kg() * WEIGHT_RATE_PER_KG;
    let distance_cost = f64::from(distance_km) * DISTANCE_RATE_PER_KM;
    let raw = weight_cost + distance_cost;
    let total = raw.max(MINIMUM_FEE);

    PriceBreakdown {
        weight_cost,
        distance_cost,
        total,
        is_minimum: total == MINIMUM_FEE && raw < MINIMUM_FEE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_applies_to_empty_parcel() {
        assert_eq!(calculate_fee("0", 0), 50.0);
        assert_eq!(calculate_fee("", 0), 50.0);
        assert_eq!(calculate_fee(1.0, 10), 50.0);
    }

    #[test]
    fn test_weight_and_distance_cost() {
        assert_eq!(calculate_fee("2.5", 150), 325.0);
        assert_eq!(calculate_fee(2.5, 150), 325.0);
        assert_eq!(calculate_fee("12", 1400), 2920.0);
    }

    #[test]
    fn test_unparsable_weight_is_zero() {
        assert_eq!(Weight::from("abc").kg(), 0.0);
        assert_eq!(Weight::from("kg 5").kg(), 0.0);
        assert_eq!(Weight::from(".").kg(), 0.0);
        assert_eq!(Weight::from("-").kg(), 0.0);
        assert_eq!(Weight::from(f64::NAN).kg(), 0.0);
        assert_eq!(Weight::from(f64::INFINITY).kg(), 0.0);
        assert_eq!(calculate_fee("heavy", 100), 200.0);
    }

    #[test]
    fn test_weight_numeric_prefix() {
        assert_eq!(Weight::from("2.5kg").kg(), 2.5);
        assert_eq!(Weight::from("  3 ").kg(), 3.0);
        assert_eq!(Weight::from(".5").kg(), 0.5);
        assert_eq!(Weight::from("4.").kg(), 4.0);
        assert_eq!(Weight::from("1e2").kg(), 100.0);
        assert_eq!(Weight::from("1e").kg(), 1.0);
        assert_eq!(Weight::from("1.5.3").kg(), 1.5);
        assert_eq!(Weight::from("-2").kg(), -2.0);
    }

    #[test]
    fn test_weight_deserializes_from_string_or_number() {
        let w: Weight = serde_json::from_str("\"7.5\"").unwrap();
        assert_eq!(w.kg(), 7.5);
        let w: Weight = serde_json::from_str("7.5").unwrap();
        assert_eq!(w.kg(), 7.5);
        let w: Weight = serde_json::from_str("\"\"").unwrap();
        assert_eq!(w.kg(), 0.0);
    }

    #[test]
    fn test_blank_weight_input() {
        let input: NumberInput = serde_json::from_str("\"  \"").unwrap();
        assert!(input.is_blank());
        let input: NumberInput = serde_json::from_str("0").unwrap();
        assert!(!input.is_blank());
        let input: NumberInput = serde_json::from_str("null").unwrap();
        assert!(input.is_blank());
        assert_eq!(Weight::from(NumberInput::Text("4kg".into())).kg(), 4.0);
    }

    #[test]
    fn test_non_numeric_json_reads_as_zero() {
        for raw in ["null", "true", "[1]", "{\"kg\": 3}"] {
            let w: Weight = serde_json::from_str(raw).unwrap();
            assert_eq!(w.kg(), 0.0, "{}", raw);
        }
        assert_eq!(calculate_fee(Weight::from(NumberInput::Other(IgnoredAny)), 150), 300.0);
    }

    #[test]
    fn test_breakdown_flags_minimum() {
        let b = price_breakdown("1", 5);
        assert_eq!(b.weight_cost, 10.0);
        assert_eq!(b.distance_cost, 10.0);
        assert_eq!(b.total, 50.0);
        assert!(b.is_minimum);

        // Raw cost landing exactly on the floor is not flagged
        let b = price_breakdown("3", 10);
        assert_eq!(b.total, 50.0);
        assert!(!b.is_minimum);

        let b = price_breakdown("2.5", 150);
        assert_eq!(b.total, 325.0);
        assert!(!b.is_minimum);
    }

    #[test]
    fn test_breakdown_total_matches_fee() {
        for weight in ["", "0", "0.5", "2.5", "10", "abc", "-3", "99.9"] {
            for distance in [0, 1, 20, 150, 549, 2150] {
                assert_eq!(
                    price_breakdown(weight, distance).total,
                    calculate_fee(weight, distance)
                );
            }
        }
    }

    #[test]
    fn test_fee_is_monotone() {
        let weights = [-5.0, 0.0, 0.5, 1.0, 2.5, 10.0, 100.0];
        let distances = [0, 10, 20, 150, 550, 2150];

        for pair in weights.windows(2) {
            for &d in &distances {
                assert!(calculate_fee(pair[0], d) <= calculate_fee(pair[1], d));
            }
        }
        for pair in distances.windows(2) {
            for &w in &weights {
                assert!(calculate_fee(w, pair[0]) <= calculate_fee(w, pair[1]));
            }
        }
    }
}
