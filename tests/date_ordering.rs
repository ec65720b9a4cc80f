use std::cmp::Ordering;

use kindred::datey::{Date, DateRange, Datey};

#[test]
fn complete_dates_order_lexicographically() {
    assert!(Date::from_ymd(1970, 1, 1) < Date::from_ymd(1970, 1, 2));
    assert!(Date::from_ymd(1969, 12, 31) < Date::from_ymd(1970, 1, 1));
    assert_eq!(Date::from_ymd(1970, 1, 1), Date::from_ymd(1970, 1, 1));
}

#[test]
fn fuzziness_does_not_affect_equality() {
    assert_eq!(Date::from_ymd(1970, 1, 1), Date::from_ymd(1970, 1, 1).fuzzy());
}

#[test]
fn incomplete_dates_widen_before_comparing() {
    // 1970 widens to [1970-01-01, 1970-12-31], which precedes 1971-01-01
    assert!(Date::from_year(1970) < Date::from_ymd(1971, 1, 1));
    // but not a day inside its own covering range
    assert!(!(Date::from_year(1970) < Date::from_ymd(1970, 1, 1)));
    assert_eq!(
        Date::from_year(1970).partial_cmp(&Date::from_ymd(1970, 1, 1)),
        Some(Ordering::Greater)
    );
}

#[test]
fn widening_is_leap_aware() {
    let range = Date::from_year_month(1972, 2).to_range().unwrap();
    assert_eq!(range.end(), Some(&Date::from_ymd(1972, 2, 29)));
    let range = Date::from_year_month(1970, 2).to_range().unwrap();
    assert_eq!(range.end(), Some(&Date::from_ymd(1970, 2, 28)));
}

#[test]
fn dates_without_a_year_are_incomparable() {
    assert_eq!(
        Date::from_parts(None, Some(6), Some(1)).partial_cmp(&Date::from_ymd(1970, 1, 1)),
        None
    );
    assert_eq!(Date::empty().partial_cmp(&Date::empty()), None);
    assert!(Date::empty().to_range().is_err());
}

#[test]
fn range_ordering_compares_starts_first() {
    let sooner = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1971, 1, 1));
    let later = DateRange::between(Date::from_ymd(1970, 6, 1), Date::from_ymd(1970, 7, 1));
    assert!(sooner < later);
}

#[test]
fn a_range_lacking_an_end_sorts_after_one_that_closes() {
    let closed = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1971, 1, 1));
    let open = DateRange::since(Date::from_ymd(1970, 1, 1));
    assert!(closed < open);
    assert_eq!(open.partial_cmp(&closed), Some(Ordering::Greater));
}

#[test]
fn a_range_lies_after_the_range_it_starts_at() {
    let until = DateRange::until(Date::from_ymd(1970, 1, 1));
    let since = DateRange::since(Date::from_ymd(1970, 1, 1));
    assert_eq!(since.partial_cmp(&until), Some(Ordering::Greater));
    assert_eq!(until.partial_cmp(&since), Some(Ordering::Less));
}

#[test]
fn end_only_ranges_compare_their_ends() {
    let earlier = DateRange::until(Date::from_ymd(1960, 1, 1));
    let later = DateRange::until(Date::from_ymd(1970, 1, 1));
    assert!(earlier < later);
}

#[test]
fn range_equality_includes_the_boundary_flags() {
    let plain = DateRange::until(Date::from_ymd(1970, 1, 1));
    let boundary = DateRange::until(Date::from_ymd(1970, 1, 1)).with_end_boundary();
    assert_ne!(plain, boundary);
    assert_eq!(plain, DateRange::until(Date::from_ymd(1970, 1, 1)));
}

#[test]
fn datey_mixes_dates_and_ranges() {
    let date: Datey = Date::from_ymd(1969, 6, 1).into();
    let range: Datey = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1980, 1, 1)).into();
    assert!(date < range);
    assert!(range > date);
    // a date is never equal to a range
    assert_ne!(date, range);
}

#[test]
fn non_comparable_dateys_yield_no_ordering() {
    let blank: Datey = Date::empty().into();
    let dated: Datey = Date::from_ymd(1970, 1, 1).into();
    assert_eq!(blank.partial_cmp(&dated), None);
    assert!(!blank.comparable());
    assert!(dated.comparable());
}
