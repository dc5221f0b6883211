//! The student services directory and its keyword search.

use serde::Deserialize;

/// The group a student service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCategory {
    Academic,
    Finance,
    Career,
    Wellness,
    Technology,
    CampusLife,
    Facilities,
}

impl ServiceCategory {
    /// Every category, in the order they are offered in the search form.
    pub const ALL: [ServiceCategory; 7] = [
        ServiceCategory::Academic,
        ServiceCategory::Finance,
        ServiceCategory::Career,
        ServiceCategory::Wellness,
        ServiceCategory::Technology,
        ServiceCategory::CampusLife,
        ServiceCategory::Facilities,
    ];

    /// The name shown to users, which is also the value used in the query string.
    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Academic => "Academic",
            ServiceCategory::Finance => "Finance",
            ServiceCategory::Career => "Career",
            ServiceCategory::Wellness => "Wellness",
            ServiceCategory::Technology => "Technology",
            ServiceCategory::CampusLife => "Campus Life",
            ServiceCategory::Facilities => "Facilities",
        }
    }

    /// The category with the label `label`, if there is one.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == label)
    }
}

/// How to reach a service. Any of the fields may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub location: Option<&'static str>,
    /// What the service costs, only listed for paid services.
    pub cost: Option<&'static str>,
}

/// A campus office or facility listed in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    /// A stable ID, unique within the directory.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ServiceCategory,
    /// Keywords that the search also matches against.
    pub tags: &'static [&'static str],
    pub contact: Contact,
}

impl Service {
    fn matches_keywords(&self, keywords: &str) -> bool {
        let haystack = format!(
            "{} {} {}",
            self.name,
            self.description,
            self.tags.join(" ")
        )
        .to_lowercase();

        haystack.contains(keywords)
    }
}

/// Every service in the directory, paid facilities first.
pub const SERVICES: [Service; 9] = [
    Service {
        id: "printing",
        name: "Printing & Copy Services",
        description: "High-quality printing, scanning, and copying for assignments and posters.",
        category: ServiceCategory::Facilities,
        tags: &["printing", "copying", "poster"],
        contact: Contact {
            email: Some("printshop@university.edu"),
            phone: Some("(555) 123-7000"),
            location: Some("Library 1F"),
            cost: Some("$0.10 per B/W page"),
        },
    },
    Service {
        id: "catering",
        name: "Campus Catering",
        description: "Full-service catering for events, meetings, and student gatherings.",
        category: ServiceCategory::Facilities,
        tags: &["food", "events", "orders"],
        contact: Contact {
            email: Some("catering@university.edu"),
            phone: Some("(555) 123-7100"),
            location: Some("Dining Services"),
            cost: Some("Varies by menu"),
        },
    },
    Service {
        id: "bookstore",
        name: "Campus Bookstore",
        description: "Purchase textbooks, university apparel, and class supplies.",
        category: ServiceCategory::Facilities,
        tags: &["books", "merch", "supplies"],
        contact: Contact {
            email: Some("bookstore@university.edu"),
            phone: Some("(555) 123-7200"),
            location: Some("Student Center 1F"),
            cost: Some("Varies"),
        },
    },
    Service {
        id: "advising",
        name: "Academic Advising",
        description: "Plan your courses, map your degree, and stay on track to graduate.",
        category: ServiceCategory::Academic,
        tags: &["appointments", "degree audit", "registration"],
        contact: Contact {
            email: Some("advising@university.edu"),
            phone: Some("(555) 123-1000"),
            location: Some("Library, 2nd Floor"),
            cost: None,
        },
    },
    Service {
        id: "fin-aid",
        name: "Financial Aid",
        description: "Grants, scholarships, FAFSA help, and budgeting workshops.",
        category: ServiceCategory::Finance,
        tags: &["fafsa", "scholarships", "grants"],
        contact: Contact {
            email: Some("finaid@university.edu"),
            phone: Some("(555) 123-2000"),
            location: Some("Admin Hall, Room 110"),
            cost: None,
        },
    },
    Service {
        id: "career",
        name: "Career Services",
        description: "Resumes, mock interviews, internships, and job fairs.",
        category: ServiceCategory::Career,
        tags: &["resume", "internships", "jobs"],
        contact: Contact {
            email: Some("careers@university.edu"),
            phone: Some("(555) 123-3000"),
            location: Some("Innovation Hub"),
            cost: None,
        },
    },
    Service {
        id: "counseling",
        name: "Counseling & Wellness",
        description: "Confidential counseling, support groups, and wellness coaching.",
        category: ServiceCategory::Wellness,
        tags: &["mental health", "wellbeing", "support"],
        contact: Contact {
            email: Some("wellness@university.edu"),
            phone: Some("(555) 123-4000"),
            location: Some("Health Center"),
            cost: None,
        },
    },
    Service {
        id: "it",
        name: "IT Help Desk",
        description: "Tech support, software access, and Wi-Fi troubleshooting.",
        category: ServiceCategory::Technology,
        tags: &["wifi", "software", "accounts"],
        contact: Contact {
            email: Some("helpdesk@university.edu"),
            phone: Some("(555) 123-5000"),
            location: Some("Tech Commons"),
            cost: None,
        },
    },
    Service {
        id: "student-life",
        name: "Student Life & Orgs",
        description: "Clubs, leadership, volunteering, and campus events.",
        category: ServiceCategory::CampusLife,
        tags: &["clubs", "leadership", "events"],
        contact: Contact {
            email: Some("studentlife@university.edu"),
            phone: Some("(555) 123-6000"),
            location: Some("Campus Center"),
            cost: None,
        },
    },
];

/// The search form's query parameters.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct ServiceQuery {
    /// Keywords to look for in a service's name, description and tags.
    #[serde(default)]
    pub q: String,
    /// A category label, or "All" (or nothing) for every category.
    #[serde(default)]
    pub category: String,
}

impl ServiceQuery {
    /// The category to restrict the search to.
    ///
    /// "All", an empty string and unknown labels all mean every category.
    pub fn category_filter(&self) -> Option<ServiceCategory> {
        ServiceCategory::from_label(&self.category)
    }
}

/// The services in `services` that match `query`, in directory order.
///
/// Keywords are matched case-insensitively against the name, the description
/// and the tags. Blank keywords match every service in the category.
pub fn search_services<'a>(services: &'a [Service], query: &ServiceQuery) -> Vec<&'a Service> {
    let keywords = query.q.trim().to_lowercase();
    let category = query.category_filter();

    services
        .iter()
        .filter(|service| category.is_none_or(|category| service.category == category))
        .filter(|service| keywords.is_empty() || service.matches_keywords(&keywords))
        .collect()
}
