use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Marker the SuperHero API uses for a stat nobody has measured.
pub const UNKNOWN_MARKER: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKind {
    Intelligence,
    Strength,
    Speed,
    Durability,
    Power,
    Combat,
}

impl StatKind {
    pub const ALL: [StatKind; 6] = [
        StatKind::Intelligence,
        StatKind::Strength,
        StatKind::Speed,
        StatKind::Durability,
        StatKind::Power,
        StatKind::Combat,
    ];

    /// Key inside the `powerstats` JSON object.
    pub fn key(self) -> &'static str {
        match self {
            StatKind::Intelligence => "intelligence",
            StatKind::Strength => "strength",
            StatKind::Speed => "speed",
            StatKind::Durability => "durability",
            StatKind::Power => "power",
            StatKind::Combat => "combat",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A stat is either a number or explicitly unknown. Stored and sent as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatValue {
    Known(i32),
    Unknown,
}

impl StatValue {
    pub fn known(self) -> Option<i32> {
        match self {
            StatValue::Known(value) => Some(value),
            StatValue::Unknown => None,
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatValue::Known(value) => serializer.collect_str(value),
            StatValue::Unknown => serializer.serialize_str(UNKNOWN_MARKER),
        }
    }
}

struct StatValueVisitor;

impl<'de> Visitor<'de> for StatValueVisitor {
    type Value = StatValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an integer, an integer string or {:?}", UNKNOWN_MARKER)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<StatValue, E> {
        if v == UNKNOWN_MARKER {
            return Ok(StatValue::Unknown);
        }
        v.trim()
            .parse::<i32>()
            .map(StatValue::Known)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatValue, E> {
        i32::try_from(v)
            .map(StatValue::Known)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatValue, E> {
        i32::try_from(v)
            .map(StatValue::Known)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<StatValue, E> {
        Ok(StatValue::Unknown)
    }

    fn visit_none<E: de::Error>(self) -> Result<StatValue, E> {
        Ok(StatValue::Unknown)
    }
}

impl<'de> Deserialize<'de> for StatValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatValueVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStats {
    pub intelligence: StatValue,
    pub strength: StatValue,
    pub speed: StatValue,
    pub durability: StatValue,
    pub power: StatValue,
    pub combat: StatValue,
}

impl PowerStats {
    pub fn get(&self, kind: StatKind) -> StatValue {
        match kind {
            StatKind::Intelligence => self.intelligence,
            StatKind::Strength => self.strength,
            StatKind::Speed => self.speed,
            StatKind::Durability => self.durability,
            StatKind::Power => self.power,
            StatKind::Combat => self.combat,
        }
    }
}
