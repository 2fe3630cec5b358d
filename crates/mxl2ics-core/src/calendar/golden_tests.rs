//! Golden tests for document assembly.
//!
//! These tests use insta inline snapshots to pin the exact output lines.
//! Run with `cargo insta review` to update snapshots after intentional changes.

use chrono::{DateTime, TimeZone, Utc};

use crate::calendar::convert_with_clock;
use crate::error::ConvertError;
use crate::time::FixedClock;

/// The reference time for all golden tests: 2025-02-05 10:00:00 UTC.
fn reference_clock() -> FixedClock {
    FixedClock(utc(2025, 2, 5, 10, 0, 0))
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Converts and splits the output into physical lines.
fn physical_lines(xml: &str) -> Vec<String> {
    let ics = convert_with_clock(xml, &reference_clock()).unwrap();
    assert!(ics.ends_with("\r\n"));
    ics.split("\r\n").map(str::to_string).collect()
}

#[test]
fn golden_empty_feed() {
    let lines = physical_lines("<schedule></schedule>");

    insta::assert_debug_snapshot!(lines, @r#"
    [
        "BEGIN:VCALENDAR",
        "PRODID:-//mxl-to-ics//saskpolytech//EN",
        "VERSION:2.0",
        "CALSCALE:GREGORIAN",
        "METHOD:PUBLISH",
        "END:VCALENDAR",
        "",
    ]
    "#);
}

#[test]
fn golden_single_timed_event() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<schedule>
  <event id="7" is_allday_event="False">
    <title>Intro &lt;b&gt;Class&lt;/b&gt;</title>
    <start_date>{utcdatetime:U2022-07-14T19:00:00.000}</start_date>
  </event>
</schedule>"#;

    insta::assert_debug_snapshot!(physical_lines(xml), @r#"
    [
        "BEGIN:VCALENDAR",
        "PRODID:-//mxl-to-ics//saskpolytech//EN",
        "VERSION:2.0",
        "CALSCALE:GREGORIAN",
        "METHOD:PUBLISH",
        "BEGIN:VEVENT",
        "DTSTART:20220714T190000Z",
        "UID:7-20220714T190000Z@mxl2ics",
        "SUMMARY:Intro Class",
        "DTSTAMP:20250205T100000Z",
        "END:VEVENT",
        "END:VCALENDAR",
        "",
    ]
    "#);
}

#[test]
fn golden_all_day_event() {
    let xml = r#"<schedule>
  <event id="7" is_allday_event="True">
    <title>Reading Week</title>
    <start_date>{utcdatetime:U2022-07-14T19:00:00.000}</start_date>
    <end_date>{utcdatetime:U2022-07-15T19:00:00.000}</end_date>
  </event>
</schedule>"#;

    insta::assert_debug_snapshot!(physical_lines(xml), @r#"
    [
        "BEGIN:VCALENDAR",
        "PRODID:-//mxl-to-ics//saskpolytech//EN",
        "VERSION:2.0",
        "CALSCALE:GREGORIAN",
        "METHOD:PUBLISH",
        "BEGIN:VEVENT",
        "DTSTART;VALUE=DATE:20220714",
        "DTEND;VALUE=DATE:20220715",
        "UID:7-20220714T190000Z@mxl2ics",
        "SUMMARY:Reading Week",
        "DTSTAMP:20250205T100000Z",
        "END:VEVENT",
        "END:VCALENDAR",
        "",
    ]
    "#);
}

#[test]
fn golden_weekly_recurrence_and_folding() {
    let xml = r#"<schedule>
  <event id="12">
    <title>Databases Lab</title>
    <description>Weekly lab session covering relational modelling and normalisation with hands-on exercises in the campus computer lab</description>
    <location>  Room 204  </location>
    <start_date>{utcdatetime:U2022-07-12T15:00:00.000}</start_date>
    <end_date>{utcdatetime:U2022-07-12T17:00:00.000}</end_date>
    <recurrence type="Weekly" repeat_every="2" repeat_on="0010010" until_date="{utcdatetime:U2022-08-01T00:00:00.000}"/>
  </event>
  <event id="13">
    <title>Office Hours</title>
    <start_date>2022-07-13T16:00:00Z</start_date>
    <recurrence type="Monthly" repeat_every="1"/>
  </event>
</schedule>"#;

    insta::assert_debug_snapshot!(physical_lines(xml), @r#"
    [
        "BEGIN:VCALENDAR",
        "PRODID:-//mxl-to-ics//saskpolytech//EN",
        "VERSION:2.0",
        "CALSCALE:GREGORIAN",
        "METHOD:PUBLISH",
        "BEGIN:VEVENT",
        "DTSTART:20220712T150000Z",
        "DTEND:20220712T170000Z",
        "UID:12-20220712T150000Z@mxl2ics",
        "SUMMARY:Databases Lab",
        "DESCRIPTION:Weekly lab session covering relational modelling and normalisat",
        " ion with hands-on exercises in the campus computer lab",
        "LOCATION:Room 204",
        "RRULE:FREQ=WEEKLY;INTERVAL=2;UNTIL=20220801T000000Z;BYDAY=TU,FR",
        "DTSTAMP:20250205T100000Z",
        "END:VEVENT",
        "BEGIN:VEVENT",
        "DTSTART:20220713T160000Z",
        "UID:13-20220713T160000Z@mxl2ics",
        "SUMMARY:Office Hours",
        "DTSTAMP:20250205T100000Z",
        "END:VEVENT",
        "END:VCALENDAR",
        "",
    ]
    "#);
}

#[test]
fn golden_event_without_start() {
    let xml = r#"<schedule><event><title>TBD</title></event></schedule>"#;

    insta::assert_debug_snapshot!(physical_lines(xml), @r#"
    [
        "BEGIN:VCALENDAR",
        "PRODID:-//mxl-to-ics//saskpolytech//EN",
        "VERSION:2.0",
        "CALSCALE:GREGORIAN",
        "METHOD:PUBLISH",
        "BEGIN:VEVENT",
        "UID:x-20250205T100000Z@mxl2ics",
        "SUMMARY:TBD",
        "DTSTAMP:20250205T100000Z",
        "END:VEVENT",
        "END:VCALENDAR",
        "",
    ]
    "#);
}

#[test]
fn golden_malformed_datetime_fails() {
    let xml = r#"<schedule>
  <event id="1"><title>ok</title><start_date>{utcdatetime:U2022-07-14T19:00:00.000}</start_date></event>
  <event id="2"><title>bad</title><start_date>not-a-date</start_date></event>
</schedule>"#;

    let err = convert_with_clock(xml, &reference_clock()).unwrap_err();
    assert_eq!(err, ConvertError::datetime("not-a-date"));
}
