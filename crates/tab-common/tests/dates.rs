//! Year and month helpers against the default 1940-2039 window.

use tab_common::{DateError, Month, Year, YearWindow, parse_date_aa, parse_date_aamm};

#[test]
fn year_bounds() {
    assert!(matches!(
        Year::new(1939),
        Err(DateError::OutOfRange { min: 1940, max: 2039, .. })
    ));
    assert!(Year::new(2040).is_err());
    assert!(Year::new(1940).is_ok());
    assert!(Year::new(2039).is_ok());
}

#[test]
fn year_two_digits() {
    let cases = [(1940, 40, "40"), (2000, 0, "00"), (2039, 39, "39")];
    for (value, digits, text) in cases {
        let year = Year::new(value).unwrap();
        assert_eq!(year.two_digits(), digits);
        assert_eq!(year.two_digit_string(), text);
    }
}

#[test]
fn aa_codes() {
    assert_eq!(parse_date_aa("00").unwrap().value(), 2000);
    assert_eq!(parse_date_aa("39").unwrap().value(), 2039);
    assert_eq!(parse_date_aa("40").unwrap().value(), 1940);
    assert_eq!(parse_date_aa("99").unwrap().value(), 1999);
}

#[test]
fn aamm_codes() {
    let cases = [
        ("0001", 2000, Month::January),
        ("3901", 2039, Month::January),
        ("4001", 1940, Month::January),
        ("0012", 2000, Month::December),
        ("3912", 2039, Month::December),
        ("4012", 1940, Month::December),
    ];
    for (code, year, month) in cases {
        let (parsed_year, parsed_month) = parse_date_aamm(code).unwrap();
        assert_eq!(parsed_year.value(), year, "{code}");
        assert_eq!(parsed_month, month, "{code}");
    }
}

#[test]
fn month_two_digit_strings() {
    assert_eq!(Month::January.two_digit_string(), "01");
    assert_eq!(Month::September.two_digit_string(), "09");
    assert_eq!(Month::December.two_digit_string(), "12");
}

#[test]
fn shifted_window_changes_resolution() {
    let window = YearWindow::new(9).unwrap();
    assert_eq!(window.min_year(), 1910);
    assert_eq!(window.max_year(), 2009);
    assert_eq!(window.parse_aa("10").unwrap().value(), 1910);

    let (year, month) = window.parse_aamm("0907").unwrap();
    assert_eq!(year.to_string(), "2009");
    assert_eq!(month, Month::July);

    // years outside the default window are still valid in this one
    assert!(Year::new(1925).is_err());
    assert!(window.year(1925).is_ok());
}
