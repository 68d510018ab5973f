use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};

use super::schema::{category_info, connection_status, dm_details, ngo_info, status_codes};


const SHORT_TEXT_LEN: usize = 60;
const DAY_FIELD_LEN: usize = 10;
const RAW_TEXT_LEN: usize = 140;
const NGO_DESCRIPTION_LEN: usize = 500;


fn too_long(text: &str, limit: usize) -> bool {
    text.chars().count() > limit
}

fn too_long_opt(text: &Option<String>, limit: usize) -> bool {
    text.as_ref().map_or(false, |t| too_long(t, limit))
}

fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}


/// A row of `dm_details`, one incident collected from a direct message.
///
/// `x_cord` holds the latitude and `y_cord` the longitude.
#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct IncidentReport {
    pub incident_id: i32,
    pub user_id: i32,
    pub location: String,
    pub x_cord: Option<BigDecimal>,
    pub y_cord: Option<BigDecimal>,
    pub day_of_week: Option<String>,
    pub datetime: NaiveDate,
    pub month: Option<String>,
    pub time: Option<NaiveTime>,
    pub hour: Option<String>,
    pub category: Option<String>,
    pub raw_text: String,
    pub data_source: Option<String>,
    pub to_safety: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[table_name="dm_details"]
pub struct NewIncidentReport {
    pub user_id: i32,
    pub location: String,
    pub x_cord: Option<BigDecimal>,
    pub y_cord: Option<BigDecimal>,
    pub day_of_week: Option<String>,
    pub datetime: NaiveDate,
    pub month: Option<String>,
    pub time: Option<NaiveTime>,
    pub hour: Option<String>,
    pub category: Option<String>,
    pub raw_text: String,
    pub data_source: Option<String>,
    pub to_safety: String,
}

impl NewIncidentReport {
    pub fn verify_error(&self) -> Option<&'static str> {
        if too_long(&self.location, SHORT_TEXT_LEN) {
            Some("Location can not be longer than 60 characters")
        }
        else if self.x_cord.is_some() != self.y_cord.is_some() {
            Some("Coordinates must be given as a pair")
        }
        else if too_long_opt(&self.day_of_week, DAY_FIELD_LEN)
            || too_long_opt(&self.month, DAY_FIELD_LEN)
            || too_long_opt(&self.hour, DAY_FIELD_LEN) {
            Some("Day of week, month and hour can not be longer than 10 characters")
        }
        else if too_long_opt(&self.category, SHORT_TEXT_LEN) {
            Some("Category can not be longer than 60 characters")
        }
        else if too_long(&self.raw_text, RAW_TEXT_LEN) {
            Some("The maximum length of the text is 140")
        }
        else if too_long_opt(&self.data_source, SHORT_TEXT_LEN) {
            Some("Data source can not be longer than 60 characters")
        }
        else if too_long(&self.to_safety, SHORT_TEXT_LEN) {
            Some("Safety outcome can not be longer than 60 characters")
        }
        else {
            None
        }
    }
}


/// A row of `ngo_info`.
#[derive(Queryable, Clone, PartialEq)]
pub struct Ngo {
    pub org_id: i32,
    pub org_name: String,
    pub name: String,
    pub twitter_handle: String,
    pub email: String,
    pub phone: String,
    pub x_cord: BigDecimal,
    pub y_cord: BigDecimal,
    pub address: String,
    pub description: String,
    pub category: String,
    pub twitter_user_id: Option<String>,
    pub twitter_user_token: Option<String>,
    pub twitter_user_secret: Option<String>,
}

impl fmt::Debug for Ngo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ngo")
            .field("org_id", &self.org_id)
            .field("org_name", &self.org_name)
            .field("name", &self.name)
            .field("twitter_handle", &self.twitter_handle)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("x_cord", &self.x_cord)
            .field("y_cord", &self.y_cord)
            .field("address", &self.address)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("twitter_user_id", &self.twitter_user_id)
            .field("twitter_user_token", &redacted(&self.twitter_user_token))
            .field("twitter_user_secret", &redacted(&self.twitter_user_secret))
            .finish()
    }
}

#[derive(Insertable, Clone, PartialEq)]
#[table_name="ngo_info"]
pub struct NewNgo {
    pub org_name: String,
    pub name: String,
    pub twitter_handle: String,
    pub email: String,
    pub phone: String,
    pub x_cord: BigDecimal,
    pub y_cord: BigDecimal,
    pub address: String,
    pub description: String,
    pub category: String,
    pub twitter_user_id: Option<String>,
    pub twitter_user_token: Option<String>,
    pub twitter_user_secret: Option<String>,
}

impl NewNgo {
    pub fn verify_error(&self) -> Option<&'static str> {
        let short_fields = [
            &self.org_name,
            &self.name,
            &self.twitter_handle,
            &self.email,
            &self.phone,
            &self.address,
            &self.category,
        ];

        if short_fields.iter().any(|f| too_long(f, SHORT_TEXT_LEN)) {
            Some("Organization fields can not be longer than 60 characters")
        }
        else if too_long(&self.description, NGO_DESCRIPTION_LEN) {
            Some("The maximum length of the description is 500")
        }
        else if too_long_opt(&self.twitter_user_id, SHORT_TEXT_LEN)
            || too_long_opt(&self.twitter_user_token, SHORT_TEXT_LEN)
            || too_long_opt(&self.twitter_user_secret, SHORT_TEXT_LEN) {
            Some("Twitter credentials can not be longer than 60 characters")
        }
        else if self.twitter_user_token.is_some() != self.twitter_user_secret.is_some() {
            Some("Twitter token and secret must be given together")
        }
        else if self.twitter_user_token.is_some() && self.twitter_user_id.is_none() {
            Some("Twitter credentials need a twitter user id")
        }
        else {
            None
        }
    }
}

impl fmt::Debug for NewNgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewNgo")
            .field("org_name", &self.org_name)
            .field("name", &self.name)
            .field("twitter_user_id", &self.twitter_user_id)
            .field("twitter_user_token", &redacted(&self.twitter_user_token))
            .field("twitter_user_secret", &redacted(&self.twitter_user_secret))
            .finish()
    }
}


/// A row of `connection_status`: a user referred to an organization.
///
/// `ngo_id` is the organization's `twitter_user_id`, not its `org_id`.
#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct ConnectionStatus {
    pub connection_id: i32,
    pub user_id: String,
    pub ngo_id: String,
    pub description: String,
    pub status_code: String,
    pub category: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[table_name="connection_status"]
pub struct NewConnectionStatus {
    pub user_id: String,
    pub ngo_id: String,
    pub description: String,
    pub status_code: String,
    pub category: String,
}

impl NewConnectionStatus {
    pub fn verify_error(&self) -> Option<&'static str> {
        let fields = [
            &self.user_id,
            &self.ngo_id,
            &self.description,
            &self.status_code,
            &self.category,
        ];

        if fields.iter().any(|f| too_long(f, SHORT_TEXT_LEN)) {
            Some("Referral fields can not be longer than 60 characters")
        }
        else {
            None
        }
    }
}


#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct Category {
    pub category_id: i32,
    pub category: String,
    pub category_description: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[table_name="category_info"]
pub struct NewCategory {
    pub category: String,
    pub category_description: String,
}

impl NewCategory {
    pub fn verify_error(&self) -> Option<&'static str> {
        if too_long(&self.category, SHORT_TEXT_LEN)
            || too_long(&self.category_description, SHORT_TEXT_LEN) {
            Some("Category fields can not be longer than 60 characters")
        }
        else {
            None
        }
    }
}


#[derive(Queryable, Debug, Clone, PartialEq)]
pub struct Status {
    pub status_id: i32,
    pub status_code: String,
    pub status_description: String,
}

#[derive(Insertable, Debug, Clone, PartialEq)]
#[table_name="status_codes"]
pub struct NewStatus {
    pub status_code: String,
    pub status_description: String,
}

impl NewStatus {
    pub fn verify_error(&self) -> Option<&'static str> {
        if too_long(&self.status_code, SHORT_TEXT_LEN)
            || too_long(&self.status_description, SHORT_TEXT_LEN) {
            Some("Status fields can not be longer than 60 characters")
        }
        else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn decimal(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn incident() -> NewIncidentReport {
        NewIncidentReport {
            user_id: 7,
            location: "Mission St & 16th St".into(),
            x_cord: Some(decimal("37.7650")),
            y_cord: Some(decimal("-122.4194")),
            day_of_week: Some("Friday".into()),
            datetime: NaiveDate::from_ymd_opt(2017, 3, 10).unwrap(),
            month: Some("March".into()),
            time: Some(NaiveTime::from_hms_opt(21, 5, 0).unwrap()),
            hour: Some("21".into()),
            category: Some("harassment".into()),
            raw_text: "Followed from the station".into(),
            data_source: Some("twitter".into()),
            to_safety: "yes".into(),
        }
    }

    fn ngo() -> NewNgo {
        NewNgo {
            org_name: "Safe Streets".into(),
            name: "Safe Streets SF".into(),
            twitter_handle: "@safestreets".into(),
            email: "help@safestreets.org".into(),
            phone: "555-0100".into(),
            x_cord: decimal("37.7749"),
            y_cord: decimal("-122.4194"),
            address: "1 Market St".into(),
            description: "Walk-home escorts".into(),
            category: "escort".into(),
            twitter_user_id: Some("123456".into()),
            twitter_user_token: Some("token".into()),
            twitter_user_secret: Some("secret".into()),
        }
    }

    #[test]
    fn valid_incident_passes() {
        assert_eq!(incident().verify_error(), None);
    }

    #[test]
    fn incident_without_coordinates_passes() {
        let mut report = incident();
        report.x_cord = None;
        report.y_cord = None;
        assert_eq!(report.verify_error(), None);
    }

    #[test]
    fn incident_with_half_a_coordinate_fails() {
        let mut report = incident();
        report.y_cord = None;
        assert_eq!(report.verify_error(), Some("Coordinates must be given as a pair"));
    }

    #[test]
    fn incident_text_is_bounded() {
        let mut report = incident();
        report.raw_text = "x".repeat(140);
        assert_eq!(report.verify_error(), None);

        report.raw_text.push('x');
        assert_eq!(report.verify_error(), Some("The maximum length of the text is 140"));
    }

    #[test]
    fn text_bounds_count_characters() {
        let mut report = incident();
        report.location = "é".repeat(60);
        assert_eq!(report.verify_error(), None);
    }

    #[test]
    fn ngo_description_is_bounded() {
        let mut org = ngo();
        org.description = "d".repeat(501);
        assert_eq!(org.verify_error(), Some("The maximum length of the description is 500"));
    }

    #[test]
    fn ngo_credentials_come_in_pairs() {
        let mut org = ngo();
        org.twitter_user_secret = None;
        assert_eq!(org.verify_error(), Some("Twitter token and secret must be given together"));

        let mut org = ngo();
        org.twitter_user_id = None;
        assert_eq!(org.verify_error(), Some("Twitter credentials need a twitter user id"));

        let mut org = ngo();
        org.twitter_user_id = None;
        org.twitter_user_token = None;
        org.twitter_user_secret = None;
        assert_eq!(org.verify_error(), None);
    }

    #[test]
    fn ngo_debug_hides_credentials() {
        let printed = format!("{:?}", ngo());
        assert!(printed.contains("123456"));
        assert!(!printed.contains("token\""));
        assert!(!printed.contains("secret\""));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn connection_fields_are_bounded() {
        let conn = NewConnectionStatus {
            user_id: "42".into(),
            ngo_id: "123456".into(),
            description: "Asked for a call back".into(),
            status_code: "pending".into(),
            category: "counseling".into(),
        };
        assert_eq!(conn.verify_error(), None);

        let conn = NewConnectionStatus { status_code: "s".repeat(61), ..conn };
        assert_eq!(conn.verify_error(), Some("Referral fields can not be longer than 60 characters"));
    }

    #[test]
    fn lookup_fields_are_bounded() {
        let category = NewCategory {
            category: "harassment".into(),
            category_description: "c".repeat(61),
        };
        assert!(category.verify_error().is_some());

        let status = NewStatus {
            status_code: "pending".into(),
            status_description: "Waiting on the organization".into(),
        };
        assert_eq!(status.verify_error(), None);
    }
}
