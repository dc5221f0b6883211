//! Campus events listed on the events page and in the services directory.

use time::{PrimitiveDateTime, macros::datetime};

/// An event on the events page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampusEvent {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
    pub location: &'static str,
    /// When the event starts, in campus local time.
    pub start_time: PrimitiveDateTime,
    /// The entry fee in dollars, zero for free events.
    pub cost: u32,
    /// The volunteer hours on offer, if the event takes volunteers.
    pub volunteer_hours: Option<u32>,
}

impl CampusEvent {
    /// Whether the event is free to attend.
    pub fn is_free(&self) -> bool {
        self.cost == 0
    }
}

/// The events shown on the events page, in date order.
pub const CAMPUS_EVENTS: [CampusEvent; 10] = [
    CampusEvent {
        id: 1,
        name: "Fintech Innovation Summit",
        category: "Finance",
        location: "Innovation Hub",
        start_time: datetime!(2025-11-05 09:00:00),
        cost: 5,
        volunteer_hours: Some(8),
    },
    CampusEvent {
        id: 2,
        name: "Digital Payments Workshop",
        category: "Finance",
        location: "Campus Center",
        start_time: datetime!(2025-11-06 14:00:00),
        cost: 0,
        volunteer_hours: None,
    },
    CampusEvent {
        id: 3,
        name: "Blockchain & Banking Forum",
        category: "Tech",
        location: "Business School Atrium",
        start_time: datetime!(2025-11-07 10:00:00),
        cost: 10,
        volunteer_hours: Some(6),
    },
    CampusEvent {
        id: 4,
        name: "AI in Fintech Hackathon",
        category: "Tech",
        location: "Innovation Lab",
        start_time: datetime!(2025-11-08 08:00:00),
        cost: 0,
        volunteer_hours: Some(10),
    },
    CampusEvent {
        id: 5,
        name: "WealthTech Career Mixer",
        category: "Career",
        location: "Auditorium A",
        start_time: datetime!(2025-11-09 17:00:00),
        cost: 5,
        volunteer_hours: None,
    },
    CampusEvent {
        id: 6,
        name: "Robo-Advisors Expo",
        category: "Finance",
        location: "Library Hall",
        start_time: datetime!(2025-11-10 13:00:00),
        cost: 0,
        volunteer_hours: Some(5),
    },
    CampusEvent {
        id: 7,
        name: "Crypto Compliance Meetup",
        category: "Legal",
        location: "Room 204",
        start_time: datetime!(2025-11-11 16:30:00),
        cost: 5,
        volunteer_hours: None,
    },
    CampusEvent {
        id: 8,
        name: "Open Banking Panel",
        category: "Finance",
        location: "Tech Hall 2",
        start_time: datetime!(2025-11-12 10:30:00),
        cost: 0,
        volunteer_hours: Some(4),
    },
    CampusEvent {
        id: 9,
        name: "Fintech UX/UI Showcase",
        category: "Design",
        location: "Student Center",
        start_time: datetime!(2025-11-13 12:00:00),
        cost: 0,
        volunteer_hours: Some(7),
    },
    CampusEvent {
        id: 10,
        name: "Investment API Summit",
        category: "Tech",
        location: "Innovation Hub",
        start_time: datetime!(2025-11-14 11:00:00),
        cost: 5,
        volunteer_hours: None,
    },
];

/// A drop-in session run by one of the student services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSession {
    pub title: &'static str,
    /// When the session runs, as shown to students.
    pub when: &'static str,
    pub location: &'static str,
    pub category: &'static str,
}

/// The sessions listed under the services directory.
pub const SERVICE_SESSIONS: [ServiceSession; 4] = [
    ServiceSession {
        title: "Resume Pop-Up Clinic",
        when: "Nov 20, 3:00-5:00 PM",
        location: "Career Studio",
        category: "Career",
    },
    ServiceSession {
        title: "FAFSA Help Night",
        when: "Nov 22, 6:00-8:00 PM",
        location: "Admin Hall 110",
        category: "Finance",
    },
    ServiceSession {
        title: "Mindfulness Monday",
        when: "Nov 24, 12:30-1:00 PM",
        location: "Health Center Lounge",
        category: "Wellness",
    },
    ServiceSession {
        title: "Advising Drop-ins",
        when: "Nov 25, 10:00 AM-2:00 PM",
        location: "Library 2F",
        category: "Academic",
    },
];

/// The total volunteer hours on offer across `events`.
pub fn total_volunteer_hours(events: &[CampusEvent]) -> u32 {
    events.iter().filter_map(|event| event.volunteer_hours).sum()
}
