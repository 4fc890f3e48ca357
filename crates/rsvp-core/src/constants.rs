/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const RSVP_ROUTE_COMPONENT: &str = "rsvp";
pub const RSVP_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", RSVP_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";

/// Field length caps enforced on ingress.
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_TEXT_LEN: usize = 500;

/// Prefix that makes a spreadsheet treat a cell as literal text.
pub const FORMULA_NEUTRALIZER: char = '\'';

/// Leading characters spreadsheet software interprets as the start of a formula.
pub const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Placeholder rendered for fields that do not apply to this guest.
pub const NOT_APPLICABLE: &str = "N/A";
/// Placeholder rendered for an attended meal without dietary notes.
pub const NO_DIETARY_NOTE: &str = "None";

/// Accepted submissions allowed per phone within the window.
pub const DEFAULT_MAX_SUBMISSIONS: u32 = 3;
pub const DEFAULT_WINDOW_HOURS: u32 = 24;

pub const SUCCESS_MESSAGE: &str = "RSVP submitted successfully";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit RSVP. Please try again.";

/// Header row styling applied when a sheet is first created.
pub const HEADER_BACKGROUND: &str = "#F4C7D4";
pub const HEADER_FOREGROUND: &str = "#2D1E24";
