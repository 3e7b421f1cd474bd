//! Property tests for the range index
//!
//! Random sets of disjoint ranges are inserted in random order; the index
//! must stay sorted and every covered address must resolve to its range.

use ip2country::{AddressRangeIndex, Interval, Range128, Range32};
use proptest::prelude::*;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Disjoint, gapped IPv4 ranges built from (gap, width) pairs, then shuffled
fn disjoint_v4() -> impl Strategy<Value = Vec<Range32>> {
    prop::collection::vec((1u32..1_000_000, 0u32..1_000_000), 1..60)
        .prop_map(|spans| {
            let mut ranges = Vec::new();
            let mut cursor = 0u32;
            for (i, (gap, width)) in spans.into_iter().enumerate() {
                let start = cursor.saturating_add(gap);
                let end = start.saturating_add(width);
                if end == u32::MAX || start > end {
                    break;
                }
                ranges.push(Range32::new(start, end, format!("C{}", i)));
                cursor = end.saturating_add(1);
            }
            ranges
        })
        .prop_shuffle()
}

fn disjoint_v6() -> impl Strategy<Value = Vec<Range128>> {
    prop::collection::vec((1u128..(1 << 100), 0u128..(1 << 100)), 1..40)
        .prop_map(|spans| {
            let mut ranges = Vec::new();
            let mut cursor = 0u128;
            for (i, (gap, width)) in spans.into_iter().enumerate() {
                let start = cursor + gap;
                let end = start + width;
                ranges.push(Range128::new(start, end, format!("S{}", i)));
                cursor = end + 1;
            }
            ranges
        })
        .prop_shuffle()
}

fn dataset_line_v4(r: &Range32) -> String {
    format!(
        "\"{}\",\"{}\",\"{}\"",
        Ipv4Addr::from(r.start),
        Ipv4Addr::from(r.end),
        r.country
    )
}

/// Full, non-elided form so every generated address is accepted
fn full_v6(value: u128) -> String {
    Ipv6Addr::from(value)
        .segments()
        .iter()
        .map(|s| format!("{:x}", s))
        .collect::<Vec<_>>()
        .join(":")
}

fn is_sorted_by_start<R: Interval>(ranges: &[R]) -> bool {
    ranges.windows(2).all(|w| w[0].start() <= w[1].start())
}

proptest! {
    #[test]
    fn prop_v4_sorted_after_any_insert_order(ranges in disjoint_v4()) {
        let mut index = AddressRangeIndex::new();
        for r in &ranges {
            index.insert(&dataset_line_v4(r)).unwrap();
            prop_assert!(is_sorted_by_start(index.ranges_v4()));
        }
        prop_assert_eq!(index.ranges_v4().len(), ranges.len());
    }

    #[test]
    fn prop_v4_round_trip(ranges in disjoint_v4()) {
        let mut index = AddressRangeIndex::new();
        for r in &ranges {
            index.insert(&dataset_line_v4(r)).unwrap();
        }

        for r in &ranges {
            let mid = r.start + (r.end - r.start) / 2;
            for addr in [r.start, mid, r.end] {
                prop_assert_eq!(index.lookup(&Ipv4Addr::from(addr).to_string()), r.country.as_str());
            }
            // Generated ranges always leave a gap on both sides
            prop_assert_eq!(index.lookup(&Ipv4Addr::from(r.start - 1).to_string()), "");
            prop_assert_eq!(index.lookup(&Ipv4Addr::from(r.end + 1).to_string()), "");
        }
    }

    #[test]
    fn prop_v6_round_trip(ranges in disjoint_v6()) {
        let mut index = AddressRangeIndex::new();
        for r in &ranges {
            let line = format!("{},{},{}", full_v6(r.start), full_v6(r.end), r.country);
            index.insert(&line).unwrap();
        }
        prop_assert!(is_sorted_by_start(index.ranges_v6()));

        for r in &ranges {
            prop_assert_eq!(index.lookup(&full_v6(r.start)), r.country.as_str());
            prop_assert_eq!(index.lookup(&full_v6(r.end)), r.country.as_str());
            prop_assert_eq!(index.lookup(&full_v6(r.start - 1)), "");
            prop_assert_eq!(index.lookup(&full_v6(r.end + 1)), "");
        }
    }

    #[test]
    fn prop_batch_equals_sequential(
        ranges in disjoint_v4(),
        probes in prop::collection::vec(any::<u32>(), 0..200),
    ) {
        let mut index = AddressRangeIndex::new();
        for r in ranges {
            index.insert_v4(r);
        }
        let texts: Vec<String> = probes.iter().map(|&p| Ipv4Addr::from(p).to_string()).collect();

        let batch = index.lookup_many(&texts);
        let sequential: Vec<String> = texts.iter().map(|t| index.lookup(t).to_string()).collect();
        prop_assert_eq!(batch, sequential);
    }

    #[test]
    fn prop_v4_codec_matches_std(addr in any::<u32>()) {
        let text = Ipv4Addr::from(addr).to_string();
        prop_assert_eq!(ip2country::parse_v4(&text).unwrap(), addr);
    }

    #[test]
    fn prop_v6_codec_matches_std(addr in any::<u128>()) {
        prop_assert_eq!(ip2country::parse_v6(&full_v6(addr)).unwrap(), addr);
    }

    #[test]
    fn prop_lookup_never_panics(text in "\\PC{0,40}") {
        let index = AddressRangeIndex::new();
        prop_assert_eq!(index.lookup(&text), "");
    }
}
