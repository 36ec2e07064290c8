//! Integration-level tests for the concrete scenarios and cross-cutting
//! properties that don't belong to any single module: literal worked
//! examples and the universal laws that should hold across the whole
//! time-value and serialization surface.

use chrono::{TimeZone, Utc};
use geo_types::Point;

use geotemporal::cbuffer::Cbuffer;
use geotemporal::collections::datetime::relations;
use geotemporal::collections::datetime::{Period, PeriodSet, TimestampSet};
use geotemporal::collections::Collection;
use geotemporal::errors::TemporalError;
use geotemporal::geo;
use geotemporal::serialization::wkb::{self, WkbVariant};
use geotemporal::serialization::{mfjson, wkt};
use geotemporal::temporal::{lift1, synchronize, BaseValue, SyncMode, TInstant, TInterpolation, TSequence, Temporal};

fn t(n: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(n, 0).unwrap()
}

fn day(n: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(n * 86_400, 0).unwrap()
}

fn p(lo: i64, hi: i64, li: bool, ui: bool) -> Period {
    Period::new(t(lo), t(hi), li, ui).unwrap()
}

// --- Scenario 2: PeriodSet union literal cases ---------------------------

#[test]
fn periodset_union_merges_an_overlapping_third_period_into_one_span() {
    let a = PeriodSet::new(vec![p(1, 3, true, true), p(5, 7, true, true)]).unwrap();
    let b = PeriodSet::new(vec![p(2, 6, true, true)]).unwrap();
    let u = a.union(&b);
    assert_eq!(u.n(), 1);
    let only = u.period_n(0).unwrap();
    assert_eq!(only.lower(), t(1));
    assert_eq!(only.upper(), t(7));
    assert!(only.lower_inc());
    assert!(only.upper_inc());
}

#[test]
fn periodset_union_merges_opposite_exclusivity_adjacency() {
    // {[1,3)} ∪ {[3,5]} -> {[1,5]}: the two bounds meet at the same
    // instant with opposite exclusivity, so there's no gap between them.
    let a = PeriodSet::new(vec![p(1, 3, true, false)]).unwrap();
    let b = PeriodSet::new(vec![p(3, 5, true, true)]).unwrap();
    let u = a.union(&b);
    assert_eq!(u.n(), 1);
    let only = u.period_n(0).unwrap();
    assert_eq!(only.lower(), t(1));
    assert_eq!(only.upper(), t(5));
    assert!(only.lower_inc());
    assert!(only.upper_inc());
}

// --- Scenario 6: WKB endian round-trip ------------------------------------

#[test]
fn wkb_little_endian_encode_then_big_endian_hex_decode_round_trips_bit_exact() {
    let period = Period::new(day(10957), day(10958), true, true).unwrap();

    let le_opts = WkbVariant::Ndr | WkbVariant::Hex;
    let le_hex = wkb::period_to_wkb(&period, &le_opts);

    let decoded = wkb::period_from_wkb(&le_hex, &le_opts).unwrap();
    assert_eq!(decoded, period);

    let be_opts = WkbVariant::Xdr | WkbVariant::Hex;
    let be_hex = wkb::period_to_wkb(&decoded, &be_opts);
    assert_ne!(be_hex, le_hex, "LE and BE encodings of the same value must differ");

    let roundtripped = wkb::period_from_wkb(&be_hex, &be_opts).unwrap();
    assert_eq!(roundtripped, period);

    let le_hex_again = wkb::period_to_wkb(&roundtripped, &le_opts);
    assert_eq!(le_hex_again, le_hex, "re-encoding back to NDR must be bit-exact");
}

// --- Universal: round-trip across text / MF-JSON / WKB --------------------

#[test]
fn period_round_trips_through_every_format() {
    let period = Period::new(t(0), t(100), true, false).unwrap();

    let wkt_text = wkt::period_to_wkt(&period);
    assert_eq!(wkt::period_from_wkt(&wkt_text).unwrap(), period);

    let json = mfjson::period_to_mfjson(&period);
    assert_eq!(mfjson::period_from_mfjson(&json).unwrap(), period);

    for endian in [WkbVariant::Ndr, WkbVariant::Xdr] {
        for hex in [false, true] {
            let opts = if hex { endian | WkbVariant::Hex } else { endian };
            let bytes = wkb::period_to_wkb(&period, &opts);
            assert_eq!(wkb::period_from_wkb(&bytes, &opts).unwrap(), period);
        }
    }
}

#[test]
fn timestamp_set_round_trips_through_every_format() {
    let ts = TimestampSet::new(vec![t(0), t(10), t(20)]).unwrap();

    let wkt_text = wkt::timestamp_set_to_wkt(&ts);
    assert_eq!(wkt::timestamp_set_from_wkt(&wkt_text).unwrap(), ts);

    let json = mfjson::timestamp_set_to_mfjson(&ts);
    assert_eq!(mfjson::timestamp_set_from_mfjson(&json).unwrap(), ts);

    for endian in [WkbVariant::Ndr, WkbVariant::Xdr] {
        let opts = endian | WkbVariant::Hex;
        let bytes = wkb::timestamp_set_to_wkb(&ts, &opts);
        assert_eq!(wkb::timestamp_set_from_wkb(&bytes, &opts).unwrap(), ts);
    }
}

#[test]
fn period_set_round_trips_through_every_format() {
    let ps = PeriodSet::new(vec![p(0, 10, true, false), p(20, 30, true, true)]).unwrap();

    let wkt_text = wkt::period_set_to_wkt(&ps);
    assert_eq!(wkt::period_set_from_wkt(&wkt_text).unwrap(), ps);

    let json = mfjson::period_set_to_mfjson(&ps);
    assert_eq!(mfjson::period_set_from_mfjson(&json).unwrap(), ps);

    for endian in [WkbVariant::Ndr, WkbVariant::Xdr] {
        let opts = endian | WkbVariant::Hex;
        let bytes = wkb::period_set_to_wkb(&ps, &opts);
        assert_eq!(wkb::period_set_from_wkb(&bytes, &opts).unwrap(), ps);
    }
}

fn sample_sequence() -> TSequence {
    TSequence::new(
        vec![
            TInstant::new(BaseValue::Float(0.0), t(0)),
            TInstant::new(BaseValue::Float(10.0), t(10)),
            TInstant::new(BaseValue::Float(5.0), t(20)),
        ],
        TInterpolation::Linear,
        true,
        true,
    )
    .unwrap()
}

#[test]
fn sequence_round_trips_through_mfjson_and_wkb() {
    // Temporal-value WKT is output-only (MEOS's own temporal WKT has no
    // dedicated parser in this crate either), so only MF-JSON and WKB
    // are checked for a true round trip; WKT is checked for shape.
    let seq = sample_sequence();

    let wkt_text = wkt::sequence_to_wkt(&seq);
    assert!(wkt_text.starts_with('['));
    assert!(wkt_text.contains('@'));
    assert_eq!(wkt::temporal_to_wkt(&Temporal::Sequence(seq.clone())), wkt_text);

    let json = mfjson::sequence_to_mfjson(&seq);
    assert_eq!(mfjson::sequence_from_mfjson(&json).unwrap(), seq);

    for endian in [WkbVariant::Ndr, WkbVariant::Xdr] {
        let opts = endian | WkbVariant::Hex;
        let bytes = wkb::sequence_to_wkb(&seq, &opts);
        assert_eq!(wkb::sequence_from_wkb(&bytes, &opts).unwrap(), seq);
    }
}

#[test]
fn cbuffer_round_trips_through_wkb() {
    let cb = Cbuffer::new(Point::new(1.5, -2.5), 3.0, None).unwrap();
    for endian in [WkbVariant::Ndr, WkbVariant::Xdr] {
        let opts = endian | WkbVariant::Hex;
        let bytes = wkb::cbuffer_to_wkb(&cb, &opts);
        assert_eq!(wkb::cbuffer_from_wkb(&bytes, &opts).unwrap(), cb);
    }
}

// --- Universal: set-algebra laws ------------------------------------------

#[test]
fn period_set_algebra_laws_hold() {
    let a = PeriodSet::new(vec![p(0, 10, true, false), p(20, 30, true, false)]).unwrap();
    let b = PeriodSet::new(vec![p(5, 25, true, false)]).unwrap();

    // Idempotence.
    assert_eq!(a.union(&a), a);
    assert_eq!(a.intersection(&a).unwrap(), a);

    // Commutativity.
    assert_eq!(a.union(&b), b.union(&a));
    assert_eq!(a.intersection(&b), b.intersection(&a));

    // a \ a is empty (no period set can represent the empty set, so
    // the API surfaces this as `None`).
    assert!(a.minus(&a).is_none());

    // contains(a, b) <-> union(a, b) == a.
    let subset = PeriodSet::new(vec![p(2, 4, true, false)]).unwrap();
    assert!(relations::contains(&a, &subset));
    assert_eq!(a.union(&subset), a);

    assert!(!relations::contains(&a, &b));
    assert_ne!(a.union(&b), a);
}

#[test]
fn period_set_union_result_is_always_normalized() {
    let a = PeriodSet::new(vec![p(0, 10, true, false)]).unwrap();
    let b = PeriodSet::new(vec![p(10, 20, true, false), p(25, 35, true, false)]).unwrap();
    let u = a.union(&b);
    let periods = u.periods();
    for w in periods.windows(2) {
        assert!(w[0].upper() < w[1].lower() || (w[0].upper() == w[1].lower() && !(w[0].upper_inc() && w[1].lower_inc())));
    }
}

// --- Universal: cmp_bounds total order transitivity -----------------------

#[test]
fn period_ordering_relations_are_transitive_over_a_chain() {
    let periods = vec![
        p(0, 5, true, false),
        p(5, 10, true, false),
        p(10, 15, true, false),
        p(15, 20, true, false),
    ];
    for w in periods.windows(2) {
        assert!(w[0].is_before(&w[1]));
    }
    assert!(periods[0].is_before(&periods[3]));
}

// --- Universal: lifting coherence -----------------------------------------

#[test]
fn lift1_matches_pointwise_evaluation_at_every_instant() {
    let seq = sample_sequence();
    let temp = Temporal::Sequence(seq.clone());

    let doubled = lift1(&temp, |v| match v {
        BaseValue::Float(f) => Ok(BaseValue::Float(f * 2.0)),
        other => Err(TemporalError::domain(format!(
            "expected float, found '{}'",
            other.type_name()
        ))),
    })
    .unwrap();

    for inst in seq.instants() {
        let lifted_value = doubled.value_at(inst.t()).unwrap();
        let direct = match inst.value() {
            BaseValue::Float(f) => BaseValue::Float(f * 2.0),
            _ => unreachable!(),
        };
        assert_eq!(lifted_value, direct);
    }
}

// --- Universal: synchronization time-domain equality ----------------------

#[test]
fn synchronize_produces_operands_sharing_a_time_domain() {
    let a = Temporal::Sequence(
        TSequence::new(
            vec![
                TInstant::new(BaseValue::Float(0.0), t(0)),
                TInstant::new(BaseValue::Float(10.0), t(20)),
            ],
            TInterpolation::Linear,
            true,
            true,
        )
        .unwrap(),
    );
    let b = Temporal::Sequence(
        TSequence::new(
            vec![
                TInstant::new(BaseValue::Float(100.0), t(10)),
                TInstant::new(BaseValue::Float(0.0), t(30)),
            ],
            TInterpolation::Linear,
            true,
            true,
        )
        .unwrap(),
    );

    let (sa, sb) = synchronize(&a, &b, SyncMode::Intersection).unwrap();
    assert_eq!(sa.span(), sb.span());
}

// --- Universal: dwithin duality --------------------------------------------

#[test]
fn dwithin_is_dual_to_disjoint_on_a_buffered_geometry() {
    use geotemporal::cbuffer::traversed_area::circle;

    // Two unit disks centered 5 apart, rendered as GEOS geometries
    // through the crate's own circle/traversed-area machinery so the
    // test never has to name the `geos` crate directly.
    let a = geo::to_geos_geometry(&circle(&Cbuffer::new(Point::new(0.0, 0.0), 1.0, None).unwrap())).unwrap();
    let b = geo::to_geos_geometry(&circle(&Cbuffer::new(Point::new(5.0, 0.0), 1.0, None).unwrap())).unwrap();

    // The disks' rims are 3 apart: within distance 3 must hold exactly
    // when buffering `a` by 3 makes it no longer disjoint from `b`.
    assert!(!geo::dwithin(&a, &b, 2.0).unwrap());
    assert!(geo::dwithin(&a, &b, 3.0 + 1e-6).unwrap());

    let buffered_short = geo::buffer(&a, 2.0, 16).unwrap();
    assert!(geo::disjoint(&buffered_short, &b).unwrap());

    let buffered_long = geo::buffer(&a, 3.0 + 1e-6, 16).unwrap();
    assert!(!geo::disjoint(&buffered_long, &b).unwrap());
}
