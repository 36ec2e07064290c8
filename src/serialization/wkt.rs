//! WKT/EWKT formatting and parsing: `Period`,
//! `TimestampSet`, `PeriodSet`, `TInstant`/`TSequence`/`TSequenceSet`.
//! `Cbuffer`'s own WKT lives alongside its type in `cbuffer.rs`; this
//! module covers everything that wraps a timestamp or a `Cbuffer`.

use chrono::{DateTime, Utc};

use crate::cbuffer::Cbuffer;
use crate::collections::datetime::{Period, PeriodSet, TimestampSet};
use crate::errors::{Result, TemporalError};
use crate::serialization::cursor::Cursor;
use crate::temporal::{BaseValue, TInstant, TInterpolation, TSequence, TSequenceSet, Temporal};

fn fmt_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------- Period

pub fn period_to_wkt(p: &Period) -> String {
    let open = if p.lower_inc() { '[' } else { '(' };
    let close = if p.upper_inc() { ']' } else { ')' };
    format!(
        "{open}{}, {}{close}",
        fmt_timestamp(p.lower()),
        fmt_timestamp(p.upper())
    )
}

pub fn period_from_wkt(input: &str) -> Result<Period> {
    let mut c = Cursor::new(input);
    let period = parse_period(&mut c)?;
    c.skip_whitespace();
    if !c.is_at_end() {
        return Err(TemporalError::parse(c.pos(), "end of input"));
    }
    Ok(period)
}

fn parse_period(c: &mut Cursor) -> Result<Period> {
    let open = c.expect_one_of(&['[', '('])?;
    let lower = c.parse_timestamp()?;
    c.expect_char(',')?;
    let upper = c.parse_timestamp()?;
    let close = c.expect_one_of(&[']', ')'])?;
    Period::new(lower, upper, open == '[', close == ']')
}

// ---------------------------------------------------------- TimestampSet

pub fn timestamp_set_to_wkt(ts: &TimestampSet) -> String {
    let body: Vec<String> = ts.instants().iter().map(|t| fmt_timestamp(*t)).collect();
    format!("{{{}}}", body.join(", "))
}

pub fn timestamp_set_from_wkt(input: &str) -> Result<TimestampSet> {
    let mut c = Cursor::new(input);
    c.expect_char('{')?;
    let mut instants = vec![c.parse_timestamp()?];
    while c.try_expect_ci(",") {
        instants.push(c.parse_timestamp()?);
    }
    c.expect_char('}')?;
    c.skip_whitespace();
    if !c.is_at_end() {
        return Err(TemporalError::parse(c.pos(), "end of input"));
    }
    TimestampSet::new(instants)
}

// ------------------------------------------------------------- PeriodSet

pub fn period_set_to_wkt(ps: &PeriodSet) -> String {
    let body: Vec<String> = ps.periods().iter().map(period_to_wkt).collect();
    format!("{{{}}}", body.join(", "))
}

pub fn period_set_from_wkt(input: &str) -> Result<PeriodSet> {
    let mut c = Cursor::new(input);
    c.expect_char('{')?;
    let mut periods = vec![parse_period(&mut c)?];
    while c.try_expect_ci(",") {
        periods.push(parse_period(&mut c)?);
    }
    c.expect_char('}')?;
    c.skip_whitespace();
    if !c.is_at_end() {
        return Err(TemporalError::parse(c.pos(), "end of input"));
    }
    PeriodSet::new(periods)
}

// ----------------------------------------------------------- base values

fn base_value_to_wkt(v: &BaseValue) -> String {
    match v {
        BaseValue::Bool(b) => b.to_string(),
        BaseValue::Int(i) => i.to_string(),
        BaseValue::Float(f) => f.to_string(),
        BaseValue::Text(s) => format!("\"{s}\""),
        BaseValue::Point(p) => format!("POINT({} {})", p.x(), p.y()),
        BaseValue::Cbuffer(c) => c.to_wkt(),
    }
}

/// Parses a `Value` token of the `TInstant` grammar. The grammar
/// leaves `Value` abstract; this tries each base type's own literal
/// form in turn, the way the source's per-type `in` functions are
/// tried by the dispatch layer above them.
fn parse_base_value(c: &mut Cursor) -> Result<BaseValue> {
    c.skip_whitespace();
    if c.try_expect_ci("true") {
        return Ok(BaseValue::Bool(true));
    }
    if c.try_expect_ci("false") {
        return Ok(BaseValue::Bool(false));
    }
    if c.try_expect_ci("point") || c.peek() == Some('(') {
        c.try_expect_ci("point");
        c.expect_char('(')?;
        let x = c.parse_f64()?;
        let y = c.parse_f64()?;
        c.expect_char(')')?;
        return Ok(BaseValue::Point(geo_types::Point::new(x, y)));
    }
    c.skip_whitespace();
    let lowered = c.remaining().to_ascii_lowercase();
    if lowered.starts_with("srid=") || lowered.starts_with("cbuffer") {
        // Cbuffer::parse wants the whole token; hand it everything up
        // to the next '@' (the TInstant separator).
        let text = c.take_while(|ch| ch != '@').trim().to_string();
        return Ok(BaseValue::Cbuffer(Cbuffer::parse(&text)?));
    }
    if c.peek() == Some('"') {
        c.expect_char('"')?;
        let s = c.take_while(|ch| ch != '"').to_string();
        c.expect_char('"')?;
        return Ok(BaseValue::Text(s));
    }
    let start = c.pos();
    let text = c.take_while(|ch| ch != '@').trim().to_string();
    if text.contains('.') {
        text.parse::<f64>()
            .map(BaseValue::Float)
            .map_err(|_| TemporalError::parse(start, "a value"))
    } else {
        text.parse::<i64>()
            .map(BaseValue::Int)
            .or_else(|_| text.parse::<f64>().map(BaseValue::Float))
            .map_err(|_| TemporalError::parse(start, "a value"))
    }
}

// ----------------------------------------------------------- TInstant

pub fn instant_to_wkt(i: &TInstant) -> String {
    format!("{}@{}", base_value_to_wkt(i.value()), fmt_timestamp(i.t()))
}

// ----------------------------------------------------------- TSequence

pub fn sequence_to_wkt(s: &TSequence) -> String {
    let open = if s.span().lower_inc() { '[' } else { '(' };
    let close = if s.span().upper_inc() { ']' } else { ')' };
    let body: Vec<String> = s.instants().iter().map(instant_to_wkt).collect();
    format!("{open}{}{close}", body.join(", "))
}

// --------------------------------------------------------- TSequenceSet

pub fn sequence_set_to_wkt(ss: &TSequenceSet) -> String {
    let body: Vec<String> = ss.sequences().iter().map(sequence_to_wkt).collect();
    format!("{{{}}}", body.join(", "))
}

pub fn temporal_to_wkt(t: &Temporal) -> String {
    match t {
        Temporal::Instant(i) => instant_to_wkt(i),
        Temporal::Sequence(s) => sequence_to_wkt(s),
        Temporal::SequenceSet(ss) => sequence_set_to_wkt(ss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(n: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(n, 0).unwrap()
    }

    #[test]
    fn period_round_trips() {
        let p = Period::new(t(0), t(10), true, false).unwrap();
        let text = period_to_wkt(&p);
        assert!(text.starts_with('['));
        assert!(text.ends_with(')'));
        let parsed = period_from_wkt(&text).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn timestamp_set_round_trips() {
        let ts = TimestampSet::new(vec![t(0), t(5), t(10)]).unwrap();
        let text = timestamp_set_to_wkt(&ts);
        let parsed = timestamp_set_from_wkt(&text).unwrap();
        assert_eq!(parsed.instants(), ts.instants());
    }

    #[test]
    fn period_set_round_trips() {
        let ps = PeriodSet::new(vec![
            Period::new(t(0), t(5), true, false).unwrap(),
            Period::new(t(10), t(15), true, false).unwrap(),
        ])
        .unwrap();
        let text = period_set_to_wkt(&ps);
        let parsed = period_set_from_wkt(&text).unwrap();
        assert_eq!(parsed.periods(), ps.periods());
    }

    #[test]
    fn instant_wkt_uses_at_separator() {
        let i = TInstant::new(BaseValue::Int(42), t(0));
        assert_eq!(instant_to_wkt(&i), "42@1970-01-01T00:00:00Z");
    }

    #[test]
    fn sequence_wkt_reflects_bounds() {
        let s = TSequence::new(
            vec![TInstant::new(BaseValue::Float(1.0), t(0)), TInstant::new(BaseValue::Float(2.0), t(10))],
            TInterpolation::Linear,
            true,
            false,
        )
        .unwrap();
        let text = sequence_to_wkt(&s);
        assert!(text.starts_with('['));
        assert!(text.ends_with(')'));
        assert!(text.contains('@'));
    }
}
