//! Tests for materialization statistics

use super::super::stats::MaterializeStats;

#[test]
fn test_missing_rate() {
    let stats = MaterializeStats {
        rows: 10,
        missing_values: 5,
        unparseable_fields: 2,
        skipped_lines: 0,
    };

    assert_eq!(stats.missing_rate(5), 10.0);
    assert!(!stats.is_clean());
}

#[test]
fn test_empty_stats() {
    let stats = MaterializeStats::new();

    assert_eq!(stats.rows, 0);
    assert_eq!(stats.missing_rate(3), 0.0);
    assert!(stats.is_clean());
}
