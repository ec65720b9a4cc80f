use kindred::datey::{Date, DateRange, Datey};

#[test]
fn bounded_range_contains_a_date_inside_it() {
    let range = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1999, 12, 31));
    assert!(range.contains(&Date::from_ymd(1985, 6, 1).into()));
    assert!(!range.contains(&Date::from_ymd(2000, 1, 1).into()));
    assert!(!range.contains(&Date::from_ymd(1969, 12, 31).into()));
    // bounds are inclusive
    assert!(range.contains(&Date::from_ymd(1970, 1, 1).into()));
    assert!(range.contains(&Date::from_ymd(1999, 12, 31).into()));
}

#[test]
fn bounded_ranges_overlap_when_bounds_cross() {
    let range = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1980, 1, 1));
    let overlapping = DateRange::between(Date::from_ymd(1975, 1, 1), Date::from_ymd(1985, 1, 1));
    let covering = DateRange::between(Date::from_ymd(1960, 1, 1), Date::from_ymd(1990, 1, 1));
    let disjoint = DateRange::between(Date::from_ymd(1990, 1, 1), Date::from_ymd(1995, 1, 1));
    assert!(range.contains(&overlapping.into()));
    assert!(range.contains(&covering.into()));
    assert!(!range.contains(&disjoint.into()));
}

#[test]
fn bounded_range_against_half_open_candidates() {
    let range = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1980, 1, 1));
    assert!(range.contains(&DateRange::since(Date::from_ymd(1975, 1, 1)).into()));
    assert!(!range.contains(&DateRange::since(Date::from_ymd(1990, 1, 1)).into()));
    assert!(range.contains(&DateRange::until(Date::from_ymd(1975, 1, 1)).into()));
    assert!(!range.contains(&DateRange::until(Date::from_ymd(1960, 1, 1)).into()));
}

#[test]
fn open_ended_ranges_with_matching_open_sides_always_overlap() {
    let a = DateRange::since(Date::from_ymd(1970, 1, 1));
    let b = DateRange::since(Date::from_ymd(2050, 1, 1));
    assert!(a.contains(&b.into()));
    let c = DateRange::until(Date::from_ymd(1970, 1, 1));
    let d = DateRange::until(Date::from_ymd(1900, 1, 1));
    assert!(c.contains(&d.into()));
}

#[test]
fn half_open_range_against_a_date() {
    let since = DateRange::since(Date::from_ymd(1970, 1, 1));
    assert!(since.contains(&Date::from_ymd(1980, 1, 1).into()));
    assert!(!since.contains(&Date::from_ymd(1960, 1, 1).into()));
    let until = DateRange::until(Date::from_ymd(1970, 1, 1));
    assert!(until.contains(&Date::from_ymd(1960, 1, 1).into()));
    assert!(!until.contains(&Date::from_ymd(1980, 1, 1).into()));
}

#[test]
fn non_comparable_operands_never_overlap() {
    let range = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1980, 1, 1));
    assert!(!range.contains(&Date::empty().into()));
    assert!(!range.contains(&DateRange::new(None, None).into()));
    let blank = DateRange::new(None, None);
    assert!(!blank.contains(&Date::from_ymd(1970, 1, 1).into()));
}

#[test]
fn a_date_contains_only_its_equal() {
    let date: Datey = Date::from_ymd(1970, 1, 1).into();
    assert!(date.contains(&Date::from_ymd(1970, 1, 1).into()));
    assert!(!date.contains(&Date::from_ymd(1970, 1, 2).into()));
    // a date lies within any range that overlaps it
    let range: Datey =
        DateRange::between(Date::from_ymd(1960, 1, 1), Date::from_ymd(1980, 1, 1)).into();
    assert!(date.contains(&range));
}

#[test]
fn partial_candidate_bounds_widen_inside_the_check() {
    // the year 1975 falls inside the seventies
    let range = DateRange::between(Date::from_ymd(1970, 1, 1), Date::from_ymd(1979, 12, 31));
    assert!(range.contains(&Date::from_year(1975).into()));
    assert!(!range.contains(&Date::from_year(1990).into()));
}
