//! API request models and response messages.

use utoipa::IntoParams;

/// Returned when `pageNumber` is below 1.
pub const PAGE_NUMBER_INVALID: &str = "Page number must be 1 or greater.";
/// Returned when `size` is below 1.
pub const PAGE_SIZE_INVALID: &str = "Page size must be 1 or greater";
/// Returned when the requested page is empty.
pub const NO_EVENTS_FOR_PAGE: &str = "No user events found for the requested page.";
/// Returned when there are no session ids.
pub const NO_SESSION_IDS: &str = "No user event session ids were found.";
/// Returned when the session id path segment is blank.
pub const SESSION_ID_INVALID: &str = "Session Id cannot be null or empty.";
/// Returned when a session has no events.
pub const NO_EVENTS_FOR_SESSION: &str = "No user events found for the requested session.";
/// Returned by the count and aggregate endpoints when nothing is recorded.
pub const NO_EVENTS: &str = "No user events were found.";

const DEFAULT_PAGE_NUMBER: i32 = 1;
const DEFAULT_PAGE_SIZE: i32 = 50;

/// Query parameters for the paged event listing.
///
/// Keys are matched case-insensitively (`pagenumber`, `PageNumber` and
/// `pageNumber` are the same parameter); when a key repeats, the last value
/// wins. Values must fit a 32-bit signed integer.
#[derive(Debug, Clone, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct UserEventsQuery {
    /// Page number (1-indexed)
    #[param(default = 1, minimum = 1)]
    pub page_number: i32,
    /// Items per page
    #[param(default = 50, minimum = 1)]
    pub size: i32,
}

impl Default for UserEventsQuery {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl UserEventsQuery {
    /// Builds the query from raw `key=value` pairs.
    ///
    /// Unknown keys are ignored. Range checks (`>= 1`) are left to the
    /// handler so their messages stay in one place.
    ///
    /// # Errors
    ///
    /// Returns the message to send back when a value is not a valid integer.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, String> {
        let mut query = Self::default();

        for (key, value) in pairs {
            if key.eq_ignore_ascii_case("pageNumber") {
                query.page_number = parse_param("pageNumber", value)?;
            } else if key.eq_ignore_ascii_case("size") {
                query.size = parse_param("size", value)?;
            }
        }

        Ok(query)
    }
}

fn parse_param(name: &str, value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("The value '{value}' is not valid for {name}."))
}
