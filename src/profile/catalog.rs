//! Built-in profiles for the demo storefront app.
//!
//! Three archetypes share the same target: a regular visitor mixing the
//! homepage, proxy routes and some 404 traffic; a power user hammering known
//! routes; and a slow reader who always lands on the homepage first.

use crate::paths::{MISSING_ASSETS, KNOWN_ROUTES, MISSING_PAGES, PROXY_ROUTES};
use super::{Step, TaskEntry, UserProfile, WaitTime};

const STANDARD_TASKS: &[TaskEntry] = &[
    TaskEntry::new("view_homepage", 5, &[Step::Get("/")]),
    TaskEntry::new("visit_google_proxy", 2, &[Step::Get("/google")]),
    TaskEntry::new("visit_amazon_proxy", 2, &[Step::Get("/amazon")]),
    TaskEntry::new("visit_walmart_proxy", 2, &[Step::Get("/walmart")]),
    TaskEntry::new("visit_nike_proxy", 2, &[Step::Get("/nike")]),
    TaskEntry::new("visit_github_proxy", 2, &[Step::Get("/github")]),
    TaskEntry::new("visit_random_404", 1, &[Step::GetAny(MISSING_PAGES)]).expecting_error(),
    TaskEntry::new("simulate_browser_assets", 1, &[Step::GetAny(MISSING_ASSETS)]).expecting_error(),
];

const POWER_TASKS: &[TaskEntry] = &[
    TaskEntry::new("rapid_fire_requests", 1, &[Step::GetAny(KNOWN_ROUTES)]),
];

const SLOW_TASKS: &[TaskEntry] = &[
    TaskEntry::new("slow_browsing", 1, &[Step::Get("/"), Step::GetAny(PROXY_ROUTES)]),
];

pub const STANDARD_USER: UserProfile = UserProfile {
    name: "standard",
    description: "Regular visitor: homepage, proxy routes, some 404 and asset traffic",
    wait: WaitTime::between(1.0, 5.0),
    weight: 1,
    tasks: STANDARD_TASKS,
};

pub const POWER_USER: UserProfile = UserProfile {
    name: "power",
    description: "Hits known routes in quick succession",
    wait: WaitTime::between(0.5, 2.0),
    weight: 1,
    tasks: POWER_TASKS,
};

pub const SLOW_USER: UserProfile = UserProfile {
    name: "slow",
    description: "Slow connection or slow reader: homepage, then one proxy route",
    wait: WaitTime::between(10.0, 30.0),
    weight: 1,
    tasks: SLOW_TASKS,
};

const BUILTIN: &[UserProfile] = &[STANDARD_USER, POWER_USER, SLOW_USER];

/// All built-in profiles in declaration order.
pub fn builtin() -> &'static [UserProfile] {
    BUILTIN
}

pub fn find(name: &str) -> Option<&'static UserProfile> {
    BUILTIN.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
