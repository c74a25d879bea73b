//! Tests for instance parsing.

use super::*;

#[test]
fn test_parse_basic() {
    let instance = Instance::parse("3 50\n60 10\n100 20\n120 30\n").unwrap();
    assert_eq!(instance.capacity(), 50);
    assert_eq!(instance.len(), 3);
    assert_eq!(instance.items()[0], Item::new(0, 60, 10));
    assert_eq!(instance.items()[2], Item::new(2, 120, 30));
    assert_eq!(instance.total_value(), Some(280));
    assert_eq!(instance.total_weight(), 60);
}

#[test]
fn test_parse_tolerates_blank_lines_and_extra_whitespace() {
    let instance = Instance::parse("\n  2\t7  \n\n1 2\n   3 4\n\n").unwrap();
    assert_eq!(instance.capacity(), 7);
    assert_eq!(instance.items()[1], Item::new(1, 3, 4));
}

#[test]
fn test_parse_windows_line_endings() {
    let instance = Instance::parse("1 5\r\n4 2\r\n").unwrap();
    assert_eq!(instance.items()[0], Item::new(0, 4, 2));
}

#[test]
fn test_parse_empty_instance() {
    let instance = Instance::parse("0 100").unwrap();
    assert!(instance.is_empty());
    assert_eq!(instance.capacity(), 100);
}

#[test]
fn test_parse_missing_header() {
    let err = Instance::parse("   \n\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingHeader);
}

#[test]
fn test_parse_missing_capacity() {
    let err = Instance::parse("3\n1 1\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingField { field: "capacity" }
    );
}

#[test]
fn test_parse_too_few_items() {
    let err = Instance::parse("3 10\n1 1\n2 2\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::ItemCountMismatch {
            declared: 3,
            found: 2
        }
    );
}

#[test]
fn test_parse_too_many_items() {
    let err = Instance::parse("1 10\n1 1\n2 2\n3 3\n").unwrap_err();
    assert_eq!(err.line, 3);
    assert_eq!(
        err.kind,
        ParseErrorKind::ItemCountMismatch {
            declared: 1,
            found: 3
        }
    );
}

#[test]
fn test_parse_non_integer() {
    let err = Instance::parse("1 10\n1.5 2\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(
        err.kind,
        ParseErrorKind::NotAnInteger { field: "value", .. }
    ));
}

#[test]
fn test_parse_negative_weight() {
    let err = Instance::parse("1 10\n4 -2\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Negative {
            field: "weight",
            value: -2
        }
    );
}

#[test]
fn test_parse_negative_capacity() {
    let err = Instance::parse("1 -10\n4 2\n").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(matches!(
        err.kind,
        ParseErrorKind::Negative {
            field: "capacity",
            ..
        }
    ));
}

#[test]
fn test_parse_missing_weight() {
    let err = Instance::parse("1 10\n4\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingField { field: "weight" });
}

#[test]
fn test_parse_trailing_field() {
    let err = Instance::parse("1 10\n1 4 2\n").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::TrailingField {
            token: "2".to_string()
        }
    );
}

#[test]
fn test_parse_large_unsigned_values() {
    let max = u64::MAX;
    let instance = Instance::parse(&format!("1 {max}\n{max} 1\n")).unwrap();
    assert_eq!(instance.capacity(), max);
    assert_eq!(instance.items()[0].value, max);
}

#[test]
fn test_parse_total_value_overflow() {
    let max = u64::MAX;
    let err = Instance::parse(&format!("3 5\n{max} 1\n\n1 1\n2 2\n")).unwrap_err();
    assert_eq!(err.line, 4);
    assert_eq!(err.kind, ParseErrorKind::TotalValueOverflow);
}

#[test]
fn test_from_str() {
    let instance: Instance = "1 3\n2 3".parse().unwrap();
    assert_eq!(instance, Instance::from_pairs(3, &[(2, 3)]));
}

#[test]
fn test_new_reindexes_items() {
    let instance = Instance::new(5, vec![Item::new(7, 1, 1), Item::new(3, 2, 2)]);
    assert_eq!(instance.items()[0].index, 0);
    assert_eq!(instance.items()[1].index, 1);
}

#[test]
fn test_ratio() {
    assert_eq!(Item::new(0, 60, 10).ratio(), 6.0);
    assert_eq!(Item::new(0, 5, 0).ratio(), f64::INFINITY);
    assert_eq!(Item::new(0, 0, 0).ratio(), 0.0);
}

#[test]
fn test_table_cells() {
    let instance = Instance::from_pairs(50, &[(1, 1), (2, 2), (3, 3)]);
    assert_eq!(instance.table_cells(), Some(4 * 7));

    let tight = Instance::from_pairs(4, &[(1, 3), (2, 3)]);
    assert_eq!(tight.table_cells(), Some(3 * 5));

    let clamped = Instance::from_pairs(u64::MAX, &[(1, 1)]);
    assert_eq!(clamped.table_cells(), Some(2 * 2));

    let huge = Instance::from_pairs(u64::MAX, &[(1, u64::MAX)]);
    assert_eq!(huge.table_cells(), None);
}

#[test]
fn test_parse_error_display() {
    let err = Instance::parse("2 10\n1 1\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 2: declared 2 items but found 1"
    );
}
