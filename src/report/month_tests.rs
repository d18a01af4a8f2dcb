#![allow(clippy::unwrap_used)]

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_display_pads() {
    assert_eq!(MonthKey::new(2024, 3).unwrap().to_string(), "2024-03");
    assert_eq!(MonthKey::new(987, 11).unwrap().to_string(), "0987-11");
}

#[test]
fn test_new_rejects_bad_month() {
    assert!(MonthKey::new(2024, 0).is_none());
    assert!(MonthKey::new(2024, 13).is_none());
}

#[test]
fn test_parse() {
    assert_eq!(MonthKey::parse("2024-07"), MonthKey::new(2024, 7));
    assert!(MonthKey::parse("2024-7").is_none());
    assert!(MonthKey::parse("2024-13").is_none());
    assert!(MonthKey::parse("July").is_none());
    assert!(MonthKey::parse("").is_none());
}

#[test]
fn test_months_before_rolls_year() {
    let jan = MonthKey::new(2024, 1).unwrap();
    assert_eq!(jan.months_before(0), jan);
    assert_eq!(jan.months_before(1), MonthKey::new(2023, 12).unwrap());
    assert_eq!(jan.months_before(13), MonthKey::new(2022, 12).unwrap());
    assert_eq!(jan.months_before(24), MonthKey::new(2022, 1).unwrap());
}

#[test]
fn test_ordering_matches_string_order() {
    let mut keys = vec![
        MonthKey::new(2024, 2).unwrap(),
        MonthKey::new(2023, 12).unwrap(),
        MonthKey::new(2024, 10).unwrap(),
        MonthKey::new(2024, 1).unwrap(),
    ];
    let mut as_strings: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    keys.sort();
    as_strings.sort();
    let sorted: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    assert_eq!(sorted, as_strings);
}

#[test]
fn test_labels() {
    assert_eq!(MonthKey::new(2024, 1).unwrap().label(), "Jan");
    assert_eq!(MonthKey::new(2024, 2).unwrap().label(), "Fev");
    assert_eq!(MonthKey::new(2024, 9).unwrap().label(), "Set");
    assert_eq!(MonthKey::new(2024, 12).unwrap().label(), "Dez");
}

#[test]
fn test_trailing_window_mid_year() {
    let window = trailing_window(date(2024, 8, 31));
    let keys: Vec<String> = window.iter().map(|k| k.to_string()).collect();
    assert_eq!(
        keys,
        ["2024-03", "2024-04", "2024-05", "2024-06", "2024-07", "2024-08"]
    );
}

#[test]
fn test_trailing_window_crosses_year() {
    let window = trailing_window(date(2024, 2, 1));
    let keys: Vec<String> = window.iter().map(|k| k.to_string()).collect();
    assert_eq!(
        keys,
        ["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
    );
}

#[test]
fn test_trailing_window_length() {
    for month in 1..=12 {
        assert_eq!(trailing_window(date(2025, month, 15)).len(), WINDOW_MONTHS as usize);
    }
}
