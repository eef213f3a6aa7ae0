//! # Fragment Codec
//!
//! A *fragment* is the canonical text key of a stocked component: its kind
//! label followed by every attribute except the stock quantity, comma-joined.
//!
//! ```text
//! Battery,AA,1.5,3.10
//! LED Light,red,3.0,20,0.50
//! ```
//!
//! Fragments are decoded into the typed [`Component`] variant, whose numeric
//! attributes are fixed-point integers ([`Fixed`]). Equality of two components
//! is therefore equality of their canonical encodings: `"1.50"` and `"1.5"`
//! decode to the same value and land in the same ledger slot, and encoding a
//! decoded fragment is idempotent after the first normalization.
//!
//! Text attributes never contain commas; decoding splits on them.

use crate::error::ParseError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// A non-negative decimal stored as an integer count of `10^-PLACES` units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed<const PLACES: u32>(i64);

/// Whole numbers: wire length, milliamps, decibels.
pub type Whole = Fixed<0>;
/// One decimal place: volts, solar-panel amps, buzzer frequency.
pub type Tenths = Fixed<1>;
/// Two decimal places: prices.
pub type Price = Fixed<2>;

impl<const PLACES: u32> Fixed<PLACES> {
    const SCALE: i64 = 10_i64.pow(PLACES);

    pub const ZERO: Self = Self(0);

    pub fn from_units(units: i64) -> Self {
        Self(units)
    }

    pub fn units(self) -> i64 {
        self.0
    }

    /// Rounds half away from zero to `PLACES` decimals. `None` when the
    /// value does not fit.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(PLACES, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::from(Self::SCALE))?
            .to_i64()
            .map(Self)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, PLACES)
    }

    pub fn times(self, count: u64) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self(self.0.saturating_mul(count))
    }

    fn parse_field(field: &'static str, raw: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidNumber {
            field,
            value: raw.to_string(),
        };
        let value = Decimal::from_str(raw.trim()).map_err(|_| invalid())?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid());
        }
        Self::from_decimal(value).ok_or_else(invalid)
    }
}

impl<const PLACES: u32> fmt::Display for Fixed<PLACES> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if PLACES == 0 {
            return write!(f, "{}", self.0);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / scale,
            abs % scale,
            width = PLACES as usize
        )
    }
}

impl<const PLACES: u32> Add for Fixed<PLACES> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl<const PLACES: u32> Sum for Fixed<PLACES> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Wire,
    Battery,
    SolarPanel,
    LightGlobe,
    LedLight,
    Switch,
    Sensor,
    Buzzer,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 8] = [
        ComponentKind::Wire,
        ComponentKind::Battery,
        ComponentKind::SolarPanel,
        ComponentKind::LightGlobe,
        ComponentKind::LedLight,
        ComponentKind::Switch,
        ComponentKind::Sensor,
        ComponentKind::Buzzer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComponentKind::Wire => "Wire",
            ComponentKind::Battery => "Battery",
            ComponentKind::SolarPanel => "Solar Panel",
            ComponentKind::LightGlobe => "Light Globe",
            ComponentKind::LedLight => "LED Light",
            ComponentKind::Switch => "Switch",
            ComponentKind::Sensor => "Sensor",
            ComponentKind::Buzzer => "Buzzer",
        }
    }

    /// Number of fragment fields for this kind, counting the kind token.
    pub fn arity(self) -> usize {
        match self {
            ComponentKind::Wire => 3,
            ComponentKind::Battery
            | ComponentKind::SolarPanel
            | ComponentKind::Switch
            | ComponentKind::Sensor => 4,
            ComponentKind::LightGlobe | ComponentKind::LedLight => 5,
            ComponentKind::Buzzer => 6,
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ParseError::UnknownKind(s.trim().to_string()))
    }
}

/// A component specification: kind plus every attribute except quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    Wire {
        length_mm: Whole,
        price: Price,
    },
    Battery {
        size: String,
        voltage: Tenths,
        price: Price,
    },
    SolarPanel {
        voltage: Tenths,
        current_a: Tenths,
        price: Price,
    },
    LightGlobe {
        colour: String,
        voltage: Tenths,
        current_ma: Whole,
        price: Price,
    },
    LedLight {
        colour: String,
        voltage: Tenths,
        current_ma: Whole,
        price: Price,
    },
    Switch {
        style: String,
        voltage: Tenths,
        price: Price,
    },
    Sensor {
        style: String,
        voltage: Tenths,
        price: Price,
    },
    Buzzer {
        frequency_hz: Tenths,
        spl_db: Whole,
        voltage: Tenths,
        current_ma: Whole,
        price: Price,
    },
}

enum Case {
    Upper,
    Lower,
}

fn text(field: &'static str, raw: &str, case: Case) -> Result<String, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyField(field));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(ParseError::ControlCharacter(field));
    }
    Ok(match case {
        Case::Upper => trimmed.to_uppercase(),
        Case::Lower => trimmed.to_lowercase(),
    })
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Wire { .. } => ComponentKind::Wire,
            Component::Battery { .. } => ComponentKind::Battery,
            Component::SolarPanel { .. } => ComponentKind::SolarPanel,
            Component::LightGlobe { .. } => ComponentKind::LightGlobe,
            Component::LedLight { .. } => ComponentKind::LedLight,
            Component::Switch { .. } => ComponentKind::Switch,
            Component::Sensor { .. } => ComponentKind::Sensor,
            Component::Buzzer { .. } => ComponentKind::Buzzer,
        }
    }

    pub fn price(&self) -> Price {
        match self {
            Component::Wire { price, .. }
            | Component::Battery { price, .. }
            | Component::SolarPanel { price, .. }
            | Component::LightGlobe { price, .. }
            | Component::LedLight { price, .. }
            | Component::Switch { price, .. }
            | Component::Sensor { price, .. }
            | Component::Buzzer { price, .. } => *price,
        }
    }

    /// Attribute fields in canonical text form, kind token excluded.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Component::Wire { length_mm, price } => vec![length_mm.to_string(), price.to_string()],
            Component::Battery {
                size,
                voltage,
                price,
            } => vec![size.clone(), voltage.to_string(), price.to_string()],
            Component::SolarPanel {
                voltage,
                current_a,
                price,
            } => vec![voltage.to_string(), current_a.to_string(), price.to_string()],
            Component::LightGlobe {
                colour,
                voltage,
                current_ma,
                price,
            }
            | Component::LedLight {
                colour,
                voltage,
                current_ma,
                price,
            } => vec![
                colour.clone(),
                voltage.to_string(),
                current_ma.to_string(),
                price.to_string(),
            ],
            Component::Switch {
                style,
                voltage,
                price,
            }
            | Component::Sensor {
                style,
                voltage,
                price,
            } => vec![style.clone(), voltage.to_string(), price.to_string()],
            Component::Buzzer {
                frequency_hz,
                spl_db,
                voltage,
                current_ma,
                price,
            } => vec![
                frequency_hz.to_string(),
                spl_db.to_string(),
                voltage.to_string(),
                current_ma.to_string(),
                price.to_string(),
            ],
        }
    }

    /// Builds a component from its attribute fields (kind token excluded).
    pub fn from_fields<S: AsRef<str>>(kind: ComponentKind, fields: &[S]) -> Result<Self, ParseError> {
        let expected = kind.arity() - 1;
        if fields.len() != expected {
            return Err(ParseError::FieldCount {
                kind: kind.label(),
                expected: kind.arity(),
                found: fields.len() + 1,
            });
        }
        let f: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();

        Ok(match kind {
            ComponentKind::Wire => Component::Wire {
                length_mm: Whole::parse_field("length", f[0])?,
                price: Price::parse_field("price", f[1])?,
            },
            ComponentKind::Battery => Component::Battery {
                size: text("size", f[0], Case::Upper)?,
                voltage: Tenths::parse_field("voltage", f[1])?,
                price: Price::parse_field("price", f[2])?,
            },
            ComponentKind::SolarPanel => Component::SolarPanel {
                voltage: Tenths::parse_field("voltage", f[0])?,
                current_a: Tenths::parse_field("current", f[1])?,
                price: Price::parse_field("price", f[2])?,
            },
            ComponentKind::LightGlobe => Component::LightGlobe {
                colour: text("colour", f[0], Case::Lower)?,
                voltage: Tenths::parse_field("voltage", f[1])?,
                current_ma: Whole::parse_field("current", f[2])?,
                price: Price::parse_field("price", f[3])?,
            },
            ComponentKind::LedLight => Component::LedLight {
                colour: text("colour", f[0], Case::Lower)?,
                voltage: Tenths::parse_field("voltage", f[1])?,
                current_ma: Whole::parse_field("current", f[2])?,
                price: Price::parse_field("price", f[3])?,
            },
            ComponentKind::Switch => Component::Switch {
                style: text("type", f[0], Case::Lower)?,
                voltage: Tenths::parse_field("voltage", f[1])?,
                price: Price::parse_field("price", f[2])?,
            },
            ComponentKind::Sensor => Component::Sensor {
                style: text("type", f[0], Case::Lower)?,
                voltage: Tenths::parse_field("voltage", f[1])?,
                price: Price::parse_field("price", f[2])?,
            },
            ComponentKind::Buzzer => Component::Buzzer {
                frequency_hz: Tenths::parse_field("frequency", f[0])?,
                spl_db: Whole::parse_field("sound pressure", f[1])?,
                voltage: Tenths::parse_field("voltage", f[2])?,
                current_ma: Whole::parse_field("current", f[3])?,
                price: Price::parse_field("price", f[4])?,
            },
        })
    }

    /// The canonical fragment for this component.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses a comma-joined fragment, kind token first.
    pub fn decode(fragment: &str) -> Result<Self, ParseError> {
        let mut parts = fragment.split(',').map(str::trim);
        let kind: ComponentKind = parts.next().unwrap_or_default().parse()?;
        let fields: Vec<&str> = parts.collect();
        Self::from_fields(kind, &fields)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().label())?;
        for field in self.fields() {
            write!(f, ",{}", field)?;
        }
        Ok(())
    }
}

impl FromStr for Component {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [&str; 8] = [
        "Wire,100,0.50",
        "Battery,AA,1.5,3.10",
        "Solar Panel,6.0,0.5,12.00",
        "Light Globe,warm,12.0,250,4.75",
        "LED Light,red,3.0,20,0.50",
        "Switch,push,4.5,1.20",
        "Sensor,light,5.0,2.40",
        "Buzzer,2400.0,85,5.0,30,1.95",
    ];

    #[test]
    fn canonical_fragments_round_trip_for_every_kind() {
        for sample in SAMPLES {
            let component = Component::decode(sample).unwrap();
            assert_eq!(component.encode(), sample);
            assert_eq!(Component::decode(&component.encode()).unwrap(), component);
        }
    }

    #[test]
    fn samples_cover_every_kind_with_matching_arity() {
        for (sample, kind) in SAMPLES.iter().zip(ComponentKind::ALL) {
            let component = Component::decode(sample).unwrap();
            assert_eq!(component.kind(), kind);
            assert_eq!(sample.split(',').count(), kind.arity());
        }
    }

    #[test]
    fn decoding_normalizes_precision_and_case() {
        let loose = Component::decode(" battery , aa , 1.50 , 3.1 ").unwrap();
        let strict = Component::decode("Battery,AA,1.5,3.10").unwrap();
        assert_eq!(loose, strict);
        assert_eq!(loose.encode(), "Battery,AA,1.5,3.10");

        let led = Component::decode("led light,RED,3,20.0,0.5").unwrap();
        assert_eq!(led.encode(), "LED Light,red,3.0,20,0.50");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = Component::decode("Wire,99.6,0.499").unwrap().encode();
        let twice = Component::decode(&once).unwrap().encode();
        assert_eq!(once, "Wire,100,0.50");
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            Component::decode("Capacitor,10,0.20"),
            Err(ParseError::UnknownKind("Capacitor".into()))
        );
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        assert_eq!(
            Component::decode("Battery,AA,1.5"),
            Err(ParseError::FieldCount {
                kind: "Battery",
                expected: 4,
                found: 3,
            })
        );
        assert!(Component::decode("Wire,100,0.50,extra").is_err());
    }

    #[test]
    fn bad_numbers_and_empty_text_are_rejected() {
        assert!(matches!(
            Component::decode("Wire,long,0.50"),
            Err(ParseError::InvalidNumber { field: "length", .. })
        ));
        assert!(matches!(
            Component::decode("Wire,100,-1"),
            Err(ParseError::InvalidNumber { field: "price", .. })
        ));
        assert_eq!(
            Component::decode("Battery,,1.5,3.10"),
            Err(ParseError::EmptyField("size"))
        );
        assert!(Component::decode("").is_err());
    }

    #[test]
    fn line_breaks_in_text_fields_are_rejected() {
        assert_eq!(
            Component::decode("Battery,A\nA,1.5,3.10"),
            Err(ParseError::ControlCharacter("size"))
        );
        assert_eq!(
            Component::decode("LED Light,re\rd,3.0,20,0.50"),
            Err(ParseError::ControlCharacter("colour"))
        );
        assert!(Component::decode("Switch,to\tggle,4.5,1.20").is_err());
    }

    #[test]
    fn decimal_conversion_rounds_half_away_from_zero() {
        assert_eq!(Price::from_decimal(Decimal::new(3105, 3)), Some(Price::from_units(311)));
        assert_eq!(Tenths::from_decimal(Decimal::new(149, 2)), Some(Tenths::from_units(15)));
        assert_eq!(Whole::from_decimal(Decimal::MAX), None);
    }

    #[test]
    fn fixed_point_formats_with_padding() {
        assert_eq!(Price::from_units(5).to_string(), "0.05");
        assert_eq!(Price::from_units(310).to_string(), "3.10");
        assert_eq!(Tenths::from_units(15).to_string(), "1.5");
        assert_eq!(Whole::from_units(20).to_string(), "20");
        assert_eq!(Price::from_units(-125).to_string(), "-1.25");
    }

    #[test]
    fn prices_sum_and_multiply() {
        let total: Price = [Price::from_units(310), Price::from_units(50).times(2)]
            .into_iter()
            .sum();
        assert_eq!(total.to_string(), "4.10");
        assert_eq!(total.to_decimal(), Decimal::new(410, 2));
    }
}
