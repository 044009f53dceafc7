// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the iCalendar formatter.

use calport_ical::{Calendar, Event, FormatOptions, LineEnding, Property, format, parse_str};

#[test]
fn test_format_built_calendar() {
    let mut calendar = Calendar::new();
    calendar.add_property("X-WR-CALNAME", "Work");

    let mut event = Event::new_component();
    event.add_property("UID", "1@example.com");
    event.insert_property(
        Property::new("DTSTART", "20250110T140000").with_param("TZID", "Europe/Berlin"),
    );
    event.add_property("SUMMARY", "Standup");
    calendar.add_event(event).unwrap();

    let formatted = FormatOptions::default()
        .line_ending(LineEnding::Lf)
        .write_to_string(&calendar);

    let expected = format!(
        "BEGIN:VCALENDAR\n\
PRODID:{}\n\
VERSION:2.0\n\
X-WR-CALNAME:Work\n\
BEGIN:VEVENT\n\
UID:1@example.com\n\
DTSTART;TZID=Europe/Berlin:20250110T140000\n\
SUMMARY:Standup\n\
END:VEVENT\n\
END:VCALENDAR\n",
        calendar.property("PRODID").unwrap().value()
    );
    assert_eq!(formatted, expected);
}

#[test]
fn test_format_creates_crlf_line_endings() {
    let calendar = parse_str("BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n").unwrap();
    let formatted = format(&calendar);

    assert_eq!(formatted, "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n");
}

#[test]
fn test_format_replaced_property_keeps_position() {
    let src = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:draft\n\
UID:a\n\
SUMMARY:final\n\
END:VEVENT\n\
END:VCALENDAR\n";
    let calendar = parse_str(src).unwrap();
    let event = calendar.events().next().unwrap();

    let formatted = FormatOptions::default()
        .line_ending(LineEnding::Lf)
        .write_to_string(event.component());
    assert_eq!(formatted, "BEGIN:VEVENT\nSUMMARY:final\nUID:a\nEND:VEVENT\n");
}

#[test]
fn test_format_recurrence_property() {
    let prop = Property::new("RRULE", "FREQ=WEEKLY;BYDAY=MO,WE");
    assert_eq!(prop.to_string(), "RRULE:FREQ=WEEKLY;BYDAY=MO,WE");

    let prop = Property::new("EXDATE", "20250115T090000").with_param("TZID", "Asia/Tokyo");
    assert_eq!(prop.to_string(), "EXDATE;TZID=Asia/Tokyo:20250115T090000");
}
