//! Derives format-only measurements from matched benchmark pairs.
//!
//! No library reports formatting cost directly. When a library appears with
//! both a decode+fmt and a decode-only measurement, the difference between
//! the two elapsed times is the cost of formatting alone.

use std::collections::HashMap;

use crate::error::BenchError;
use crate::options::RunOptions;
use crate::registry::{BenchKind, LibraryIdentity};
use crate::schema::Measurement;

/// Compute a format-only measurement for every library measured both ways.
///
/// Libraries with a single measurement pass through underived. Anything
/// other than a lone measurement or a decode+fmt / decode-only pair is a
/// registry defect. Results keep the registry's relative ordering via the
/// lower source index of each pair.
pub fn derive_format_only(
    measurements: &[Measurement],
    opts: &RunOptions,
) -> Result<Vec<Measurement>, BenchError> {
    let mut groups: HashMap<&LibraryIdentity, Vec<&Measurement>> = HashMap::new();
    for m in measurements {
        groups.entry(&m.lib).or_default().push(m);
    }

    let mut derived = Vec::new();
    for (lib, group) in groups {
        match group.as_slice() {
            [_] => continue,
            [a, b] => {
                let combined = [a, b].into_iter().find(|m| m.kind == BenchKind::DecodeFmt);
                let decode = [a, b].into_iter().find(|m| m.kind == BenchKind::Decode);
                let (Some(combined), Some(decode)) = (combined, decode) else {
                    return Err(BenchError::MalformedTargetGroup {
                        library: lib.display_name(),
                        detail: "expected one decode+fmt and one decode-only measurement".into(),
                    });
                };

                let time_s = combined.time_s - decode.time_s;
                if time_s <= 0.0 {
                    return Err(BenchError::InvalidDerivedDuration {
                        library: lib.display_name(),
                        time_s,
                    });
                }

                derived.push(Measurement::new(
                    BenchKind::Fmt,
                    lib.clone(),
                    combined.registry_index.min(decode.registry_index),
                    time_s,
                    opts,
                ));
            }
            more => {
                return Err(BenchError::MalformedTargetGroup {
                    library: lib.display_name(),
                    detail: format!("expected 1 or 2 measurements, got {}", more.len()),
                });
            }
        }
    }

    derived.sort_by_key(|m| m.registry_index);
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LangKind;
    use std::path::PathBuf;

    fn opts() -> RunOptions {
        RunOptions {
            code_filename: PathBuf::from("code.bin"),
            code_offset: 0,
            code_len: 10 * 1024 * 1024,
            loop_count: 1,
        }
    }

    fn lib(name: &str) -> LibraryIdentity {
        LibraryIdentity::new(name, LangKind::C, &[])
    }

    fn measured(
        kind: BenchKind,
        name: &str,
        registry_index: usize,
        time_s: f64,
    ) -> Measurement {
        Measurement::new(kind, lib(name), registry_index, time_s, &opts())
    }

    #[test]
    fn subtracts_decode_from_combined() {
        let ms = vec![
            measured(BenchKind::DecodeFmt, "Zydis", 1, 5.0),
            measured(BenchKind::Decode, "Zydis", 10, 2.0),
        ];
        let derived = derive_format_only(&ms, &opts()).unwrap();
        assert_eq!(derived.len(), 1);
        assert_eq!(derived[0].kind, BenchKind::Fmt);
        assert!((derived[0].time_s - 3.0).abs() < 1e-12);
        assert_eq!(derived[0].registry_index, 1);
    }

    #[test]
    fn zydis_end_to_end_scenario() {
        // Combined 0.80 s, decode-only 0.30 s, 10 MiB payload, one loop.
        let ms = vec![
            measured(BenchKind::DecodeFmt, "Zydis", 1, 0.8),
            measured(BenchKind::Decode, "Zydis", 10, 0.3),
        ];
        assert!((ms[0].mb_per_s - 12.5).abs() < 1e-9);
        assert!((ms[1].mb_per_s - 33.333333333333336).abs() < 1e-9);

        let derived = derive_format_only(&ms, &opts()).unwrap();
        assert!((derived[0].time_s - 0.5).abs() < 1e-12);
        assert!((derived[0].mb_per_s - 20.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_derived_time() {
        for combined in [2.0, 1.0] {
            let ms = vec![
                measured(BenchKind::DecodeFmt, "XED", 2, combined),
                measured(BenchKind::Decode, "XED", 11, 2.0),
            ];
            let err = derive_format_only(&ms, &opts()).unwrap_err();
            assert!(matches!(err, BenchError::InvalidDerivedDuration { .. }));
        }
    }

    #[test]
    fn single_measurement_passes_through_underived() {
        let ms = vec![measured(BenchKind::DecodeFmt, "Capstone", 0, 1.0)];
        assert!(derive_format_only(&ms, &opts()).unwrap().is_empty());
    }

    #[test]
    fn rejects_duplicate_kinds_in_a_pair() {
        let ms = vec![
            measured(BenchKind::Decode, "XED", 2, 1.0),
            measured(BenchKind::Decode, "XED", 11, 2.0),
        ];
        let err = derive_format_only(&ms, &opts()).unwrap_err();
        assert!(matches!(err, BenchError::MalformedTargetGroup { .. }));
    }

    #[test]
    fn rejects_groups_larger_than_two() {
        let ms = vec![
            measured(BenchKind::DecodeFmt, "XED", 2, 3.0),
            measured(BenchKind::Decode, "XED", 11, 1.0),
            measured(BenchKind::Decode, "XED", 12, 2.0),
        ];
        let err = derive_format_only(&ms, &opts()).unwrap_err();
        match err {
            BenchError::MalformedTargetGroup { detail, .. } => {
                assert!(detail.contains("got 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn derived_results_follow_registry_order() {
        let ms = vec![
            measured(BenchKind::DecodeFmt, "B", 3, 4.0),
            measured(BenchKind::DecodeFmt, "A", 1, 4.0),
            measured(BenchKind::Decode, "B", 8, 1.0),
            measured(BenchKind::Decode, "A", 9, 1.0),
        ];
        let derived = derive_format_only(&ms, &opts()).unwrap();
        let names: Vec<&str> = derived.iter().map(|m| m.lib.name()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(derived[0].registry_index, 1);
        assert_eq!(derived[1].registry_index, 3);
    }
}
