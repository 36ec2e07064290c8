//! MF-JSON (OGC Moving Features JSON) encoding. Mirrors `wkt.rs`'s
//! coverage (`Period`/`TimestampSet`/`PeriodSet`/temporal values) but
//! targets `serde_json::Value` instead of a textual grammar.
//!
//! The root object for a moving value is
//! `{"type":"Moving<Base>", "coordinates"|"values":…, "datetimes":…,
//! "interpolation":…, "lower_inc":…, "upper_inc":…, "crs":…, "bbox":…}`.
//! A sequence set nests its sequences under `"sequences"`. `Cbuffer`
//! has no OGC-assigned MF-JSON shape, so this crate represents one as
//! `{"x":…, "y":…, "radius":…}` under `"coordinates"` and calls the
//! type `"MovingRigidGeometry"` — a local choice, not a standard one.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::cbuffer::Cbuffer;
use crate::collections::datetime::{Period, PeriodSet, TimestampSet};
use crate::errors::{Result, TemporalError};
use crate::temporal::{BaseValue, TInstant, TInterpolation, TSequence, TSequenceSet, Temporal};

fn fmt_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TemporalError::parse(0, "an RFC 3339 timestamp"))
}

fn field<'a>(v: &'a Value, name: &str) -> Result<&'a Value> {
    v.get(name)
        .ok_or_else(|| TemporalError::parse(0, format!("field '{name}'")))
}

fn as_str<'a>(v: &'a Value, name: &str) -> Result<&'a str> {
    field(v, name)?
        .as_str()
        .ok_or_else(|| TemporalError::parse(0, format!("'{name}' to be a string")))
}

fn as_bool(v: &Value, name: &str) -> Result<bool> {
    field(v, name)?
        .as_bool()
        .ok_or_else(|| TemporalError::parse(0, format!("'{name}' to be a boolean")))
}

fn as_f64(v: &Value, name: &str) -> Result<f64> {
    field(v, name)?
        .as_f64()
        .ok_or_else(|| TemporalError::parse(0, format!("'{name}' to be a number")))
}

// -------------------------------------------------------------- Period

pub fn period_to_mfjson(p: &Period) -> Value {
    json!({
        "type": "Period",
        "begin": fmt_timestamp(p.lower()),
        "end": fmt_timestamp(p.upper()),
        "lower_inc": p.lower_inc(),
        "upper_inc": p.upper_inc(),
    })
}

pub fn period_from_mfjson(v: &Value) -> Result<Period> {
    let lower = parse_timestamp(as_str(v, "begin")?)?;
    let upper = parse_timestamp(as_str(v, "end")?)?;
    let lower_inc = as_bool(v, "lower_inc")?;
    let upper_inc = as_bool(v, "upper_inc")?;
    Period::new(lower, upper, lower_inc, upper_inc)
}

// -------------------------------------------------------- TimestampSet

pub fn timestamp_set_to_mfjson(ts: &TimestampSet) -> Value {
    json!({
        "type": "TimestampSet",
        "datetimes": ts.instants().iter().map(|t| fmt_timestamp(*t)).collect::<Vec<_>>(),
    })
}

pub fn timestamp_set_from_mfjson(v: &Value) -> Result<TimestampSet> {
    let datetimes = field(v, "datetimes")?
        .as_array()
        .ok_or_else(|| TemporalError::parse(0, "'datetimes' to be an array"))?;
    let instants = datetimes
        .iter()
        .map(|d| {
            d.as_str()
                .ok_or_else(|| TemporalError::parse(0, "a datetime string"))
                .and_then(parse_timestamp)
        })
        .collect::<Result<Vec<_>>>()?;
    TimestampSet::new(instants)
}

// ------------------------------------------------------------ PeriodSet

pub fn period_set_to_mfjson(ps: &PeriodSet) -> Value {
    json!({
        "type": "PeriodSet",
        "periods": ps.periods().iter().map(period_to_mfjson).collect::<Vec<_>>(),
    })
}

pub fn period_set_from_mfjson(v: &Value) -> Result<PeriodSet> {
    let periods = field(v, "periods")?
        .as_array()
        .ok_or_else(|| TemporalError::parse(0, "'periods' to be an array"))?
        .iter()
        .map(period_from_mfjson)
        .collect::<Result<Vec<_>>>()?;
    PeriodSet::new(periods)
}

// --------------------------------------------------------- base values

fn moving_type_name(v: &BaseValue) -> &'static str {
    match v {
        BaseValue::Bool(_) => "MovingBoolean",
        BaseValue::Int(_) => "MovingInteger",
        BaseValue::Float(_) => "MovingFloat",
        BaseValue::Text(_) => "MovingText",
        BaseValue::Point(_) => "MovingPoint",
        BaseValue::Cbuffer(_) => "MovingRigidGeometry",
    }
}

/// Whether a base type renders under the `"coordinates"` key (geometric
/// types) rather than `"values"` (scalar types).
fn uses_coordinates(v: &BaseValue) -> bool {
    matches!(v, BaseValue::Point(_) | BaseValue::Cbuffer(_))
}

fn base_value_json(v: &BaseValue) -> Value {
    match v {
        BaseValue::Bool(b) => json!(*b),
        BaseValue::Int(i) => json!(*i),
        BaseValue::Float(f) => json!(*f),
        BaseValue::Text(s) => json!(s),
        BaseValue::Point(p) => json!([p.x(), p.y()]),
        BaseValue::Cbuffer(c) => json!({"x": c.x(), "y": c.y(), "radius": c.radius()}),
    }
}

fn base_value_from_json(v: &Value, type_name: &str) -> Result<BaseValue> {
    match type_name {
        "MovingBoolean" => v
            .as_bool()
            .map(BaseValue::Bool)
            .ok_or_else(|| TemporalError::parse(0, "a boolean value")),
        "MovingInteger" => v
            .as_i64()
            .map(BaseValue::Int)
            .ok_or_else(|| TemporalError::parse(0, "an integer value")),
        "MovingFloat" => v
            .as_f64()
            .map(BaseValue::Float)
            .ok_or_else(|| TemporalError::parse(0, "a float value")),
        "MovingText" => v
            .as_str()
            .map(|s| BaseValue::Text(s.to_string()))
            .ok_or_else(|| TemporalError::parse(0, "a text value")),
        "MovingPoint" => {
            let arr = v
                .as_array()
                .ok_or_else(|| TemporalError::parse(0, "a [x, y] coordinate pair"))?;
            if arr.len() != 2 {
                return Err(TemporalError::parse(0, "a [x, y] coordinate pair"));
            }
            let x = arr[0]
                .as_f64()
                .ok_or_else(|| TemporalError::parse(0, "a numeric x coordinate"))?;
            let y = arr[1]
                .as_f64()
                .ok_or_else(|| TemporalError::parse(0, "a numeric y coordinate"))?;
            Ok(BaseValue::Point(geo_types::Point::new(x, y)))
        }
        "MovingRigidGeometry" => {
            let x = as_f64(v, "x")?;
            let y = as_f64(v, "y")?;
            let r = as_f64(v, "radius")?;
            Ok(BaseValue::Cbuffer(Cbuffer::new(geo_types::Point::new(x, y), r, None)?))
        }
        other => Err(TemporalError::unsupported(format!(
            "unrecognized MF-JSON moving type '{other}'"
        ))),
    }
}

fn interpolation_name(i: TInterpolation) -> &'static str {
    match i {
        TInterpolation::Discrete => "Discrete",
        TInterpolation::Step => "Step",
        TInterpolation::Linear => "Linear",
    }
}

fn parse_interpolation(s: &str) -> Result<TInterpolation> {
    match s {
        "Discrete" => Ok(TInterpolation::Discrete),
        "Step" => Ok(TInterpolation::Step),
        "Linear" => Ok(TInterpolation::Linear),
        other => Err(TemporalError::parse(0, format!("a known interpolation, got '{other}'"))),
    }
}

fn crs_of(v: &BaseValue) -> Option<Value> {
    match v {
        BaseValue::Cbuffer(c) => c.srid().map(|srid| {
            json!({"type": "Name", "properties": {"name": format!("EPSG:{srid}")}})
        }),
        _ => None,
    }
}

fn bbox_of_values(values: &[&BaseValue]) -> Option<Value> {
    let first = values.first()?;
    if uses_coordinates(first) {
        return None;
    }
    match first {
        BaseValue::Int(_) | BaseValue::Float(_) => {
            let nums: Vec<f64> = values
                .iter()
                .filter_map(|v| match v {
                    BaseValue::Int(i) => Some(*i as f64),
                    BaseValue::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            let lo = nums.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = nums.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            Some(json!([lo, hi]))
        }
        _ => None,
    }
}

// ----------------------------------------------------------- TInstant

pub fn instant_to_mfjson(i: &TInstant) -> Value {
    let key = if uses_coordinates(i.value()) { "coordinates" } else { "values" };
    let mut obj = json!({
        "type": moving_type_name(i.value()),
        key: base_value_json(i.value()),
        "datetimes": fmt_timestamp(i.t()),
    });
    if let Some(crs) = crs_of(i.value()) {
        obj["crs"] = crs;
    }
    obj
}

pub fn instant_from_mfjson(v: &Value) -> Result<TInstant> {
    let type_name = as_str(v, "type")?;
    let key = if type_name == "MovingPoint" || type_name == "MovingRigidGeometry" {
        "coordinates"
    } else {
        "values"
    };
    let value = base_value_from_json(field(v, key)?, type_name)?;
    let t = parse_timestamp(as_str(v, "datetimes")?)?;
    Ok(TInstant::new(value, t))
}

// ----------------------------------------------------------- TSequence

pub fn sequence_to_mfjson(s: &TSequence) -> Value {
    let instants = s.instants();
    let sample = instants[0].value();
    let key = if uses_coordinates(sample) { "coordinates" } else { "values" };
    let values: Vec<Value> = instants.iter().map(|i| base_value_json(i.value())).collect();
    let datetimes: Vec<String> = instants.iter().map(|i| fmt_timestamp(i.t())).collect();
    let mut obj = json!({
        "type": moving_type_name(sample),
        key: values,
        "datetimes": datetimes,
        "interpolation": interpolation_name(s.interpolation()),
        "lower_inc": s.span().lower_inc(),
        "upper_inc": s.span().upper_inc(),
    });
    if let Some(crs) = crs_of(sample) {
        obj["crs"] = crs;
    }
    let refs: Vec<&BaseValue> = instants.iter().map(|i| i.value()).collect();
    if let Some(bbox) = bbox_of_values(&refs) {
        obj["bbox"] = bbox;
    }
    obj
}

pub fn sequence_from_mfjson(v: &Value) -> Result<TSequence> {
    let type_name = as_str(v, "type")?;
    let key = if type_name == "MovingPoint" || type_name == "MovingRigidGeometry" {
        "coordinates"
    } else {
        "values"
    };
    let values = field(v, key)?
        .as_array()
        .ok_or_else(|| TemporalError::parse(0, format!("'{key}' to be an array")))?;
    let datetimes = field(v, "datetimes")?
        .as_array()
        .ok_or_else(|| TemporalError::parse(0, "'datetimes' to be an array"))?;
    if values.len() != datetimes.len() {
        return Err(TemporalError::parse(0, "'datetimes' and values to be the same length"));
    }
    let interpolation = parse_interpolation(as_str(v, "interpolation")?)?;
    let lower_inc = as_bool(v, "lower_inc")?;
    let upper_inc = as_bool(v, "upper_inc")?;
    let instants = values
        .iter()
        .zip(datetimes.iter())
        .map(|(val, dt)| {
            let value = base_value_from_json(val, type_name)?;
            let t = parse_timestamp(
                dt.as_str().ok_or_else(|| TemporalError::parse(0, "a datetime string"))?,
            )?;
            Ok(TInstant::new(value, t))
        })
        .collect::<Result<Vec<_>>>()?;
    TSequence::new(instants, interpolation, lower_inc, upper_inc)
}

// --------------------------------------------------------- TSequenceSet

pub fn sequence_set_to_mfjson(ss: &TSequenceSet) -> Value {
    let sequences = ss.sequences();
    let sample = sequences[0].instants()[0].value();
    let mut obj = json!({
        "type": moving_type_name(sample),
        "sequences": sequences.iter().map(sequence_to_mfjson).collect::<Vec<_>>(),
        "interpolation": interpolation_name(ss.interpolation()),
    });
    if let Some(crs) = crs_of(sample) {
        obj["crs"] = crs;
    }
    obj
}

pub fn sequence_set_from_mfjson(v: &Value) -> Result<TSequenceSet> {
    let sequences = field(v, "sequences")?
        .as_array()
        .ok_or_else(|| TemporalError::parse(0, "'sequences' to be an array"))?
        .iter()
        .map(sequence_from_mfjson)
        .collect::<Result<Vec<_>>>()?;
    TSequenceSet::new(sequences)
}

pub fn temporal_to_mfjson(t: &Temporal) -> Value {
    match t {
        Temporal::Instant(i) => instant_to_mfjson(i),
        Temporal::Sequence(s) => sequence_to_mfjson(s),
        Temporal::SequenceSet(ss) => sequence_set_to_mfjson(ss),
    }
}

pub fn temporal_from_mfjson(v: &Value) -> Result<Temporal> {
    if v.get("sequences").is_some() {
        return sequence_set_from_mfjson(v).map(Temporal::SequenceSet);
    }
    match field(v, "datetimes")? {
        Value::Array(_) => sequence_from_mfjson(v).map(Temporal::Sequence),
        Value::String(_) => instant_from_mfjson(v).map(Temporal::Instant),
        _ => Err(TemporalError::parse(0, "'datetimes' to be a string or an array")),
    }
}

/// Renders a temporal value as an MF-JSON text document, mirroring the
/// source's `as_mfjson` entry point.
pub fn as_mfjson(t: &Temporal) -> String {
    temporal_to_mfjson(t).to_string()
}

/// Parses an MF-JSON text document, mirroring the source's `from_mfjson`
/// entry point.
pub fn from_mfjson(input: &str) -> Result<Temporal> {
    let v: Value = serde_json::from_str(input)
        .map_err(|_| TemporalError::parse(0, "well-formed JSON"))?;
    temporal_from_mfjson(&v)
}
