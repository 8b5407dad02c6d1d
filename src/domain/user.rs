use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;

/// One or more non-space/non-@ characters, an @, a domain part, a dot, a TLD.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Represents one person record in the CRM.
///
/// Textual fields are always present: absent input is coerced to an empty
/// string on construction, so no field ever needs an `Option` check in the
/// presentation layer. Only the store-assigned `id` and the birth date are
/// genuinely optional.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Assigned by the store on creation; `None` before the first save.
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<DateTime<Utc>>,
    pub email: String,
    pub street: String,
    pub zip_code: String,
    pub city: String,
}

/// Explicit optional input for constructing a [`User`].
///
/// Every recognized field is named here; anything the caller leaves as `None`
/// is coerced to an empty string (or stays absent, for the birth date).
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

/// Coerces an optional textual value to a guaranteed string.
///
/// Returns the empty string when the value is absent.
pub fn ensure_string(value: Option<String>) -> String {
    value.unwrap_or_default()
}

impl User {
    /// Creates a new User with just the required name fields.
    ///
    /// # Arguments
    /// * `first_name` - User's given name
    /// * `last_name` - User's family name
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self::from_input(UserInput {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            ..UserInput::default()
        })
    }

    /// Creates an empty User, the starting point for a new record in an edit form.
    pub fn new_empty() -> Self {
        Self::from_input(UserInput::default())
    }

    /// Builds a User from a field bag, applying the empty-string coercion to
    /// every textual field.
    pub fn from_input(input: UserInput) -> Self {
        Self {
            id: input.id,
            first_name: ensure_string(input.first_name),
            last_name: ensure_string(input.last_name),
            birth_date: input.birth_date,
            email: ensure_string(input.email),
            street: ensure_string(input.street),
            zip_code: ensure_string(input.zip_code),
            city: ensure_string(input.city),
        }
    }

    /// First and last name separated by one space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whole years between the birth date and today, or `None` without a
    /// birth date.
    pub fn age(&self) -> Option<i32> {
        self.age_on(Utc::now().date_naive())
    }

    /// Age as of an explicit date.
    ///
    /// Decrements the naive year difference by one when the birthday has not
    /// occurred yet in `today`'s year.
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        let birth = self.birth_date?.date_naive();
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Joins the non-empty parts of `[street, "zip city"]` with `", "`.
    pub fn full_address(&self) -> String {
        let zip_city = format!("{} {}", self.zip_code, self.city)
            .trim()
            .to_string();
        [self.street.as_str(), zip_city.as_str()]
            .iter()
            .filter(|part| !part.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// True when both name fields are non-empty after trimming. This is the
    /// minimum required to persist the record.
    pub fn is_valid(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }

    /// True when the email is empty (it is optional) or matches the basic
    /// `local@domain.tld` shape.
    pub fn is_email_valid(&self) -> bool {
        let email = self.email.trim();
        email.is_empty() || EMAIL_PATTERN.is_match(email)
    }

    /// Name validity plus email-format validity.
    pub fn is_fully_valid(&self) -> bool {
        self.is_valid() && self.is_email_valid()
    }

    /// Uppercase first letters of the first and last name, or `"UN"` when
    /// both names are empty.
    pub fn initials(&self) -> String {
        let initials: String = self
            .first_name
            .trim()
            .chars()
            .take(1)
            .chain(self.last_name.trim().chars().take(1))
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "UN".to_string()
        } else {
            initials
        }
    }
}
