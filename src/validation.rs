//! Field checks shared by the HTML forms and the GraphQL inputs.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{DirectoryError, DirectoryResult};

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap());

/// Trim every genre and drop the blank ones, keeping the submitted order.
pub fn normalize_genres<S: AsRef<str>>(genres: impl IntoIterator<Item = S>) -> Vec<String> {
    genres
        .into_iter()
        .map(|genre| genre.as_ref().trim().to_owned())
        .filter(|genre| !genre.is_empty())
        .collect()
}

/// Collects a message for every failed check, so a form can report
/// all of its problems at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{} is required", label));
        }
        self
    }

    pub fn state(&mut self, value: &str) -> &mut Self {
        if value.is_empty() {
            self.errors.push("State is required".to_owned());
        } else if !STATES.contains(&value) {
            self.errors.push(format!("{} is not a valid state", value));
        }
        self
    }

    pub fn genres(&mut self, genres: &[String]) -> &mut Self {
        if genres.is_empty() {
            self.errors.push("Pick at least one genre".to_owned());
        }
        for genre in genres {
            if !GENRES.contains(&genre.as_str()) {
                self.errors.push(format!("{} is not a known genre", genre));
            }
        }
        self
    }

    pub fn phone(&mut self, value: &str) -> &mut Self {
        if !value.is_empty() && !PHONE.is_match(value) {
            self.errors
                .push("Phone must look like 123-456-7890".to_owned());
        }
        self
    }

    /// Empty links are allowed; anything else must be an absolute http(s) URL.
    pub fn link(&mut self, label: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            return self;
        }

        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => self.errors.push(format!("{} must be an http(s) URL", label)),
        }
        self
    }

    pub fn error(&mut self, message: impl Into<String>) -> &mut Self {
        self.errors.push(message.into());
        self
    }

    pub fn finish(&mut self) -> DirectoryResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DirectoryError::Invalid(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of(result: DirectoryResult<()>) -> Vec<String> {
        match result {
            Err(DirectoryError::Invalid(errors)) => errors,
            Err(other) => panic!("unexpected error: {other}"),
            Ok(()) => vec![],
        }
    }

    #[test]
    fn normalizing_genres_keeps_order() {
        let genres = normalize_genres([" Jazz", "", "Reggae ", "  ", "Swing"]);
        assert_eq!(genres, vec!["Jazz", "Reggae", "Swing"]);
    }

    #[test]
    fn valid_fields_pass() {
        let result = Validator::new()
            .required("Name", "The Musical Hop")
            .state("CA")
            .genres(&["Jazz".to_owned(), "Folk".to_owned()])
            .phone("123-123-1234")
            .link("Website", "https://www.themusicalhop.com")
            .link("Facebook link", "")
            .finish();

        assert!(result.is_ok());
    }

    #[test]
    fn every_failure_is_reported() {
        let errors = errors_of(
            Validator::new()
                .required("Name", "   ")
                .state("ZZ")
                .genres(&[])
                .phone("1231231234")
                .link("Website", "ftp://example.com")
                .finish(),
        );

        assert_eq!(
            errors,
            vec![
                "Name is required",
                "ZZ is not a valid state",
                "Pick at least one genre",
                "Phone must look like 123-456-7890",
                "Website must be an http(s) URL",
            ]
        );
    }

    #[test]
    fn unknown_genres_are_rejected() {
        let errors = errors_of(Validator::new().genres(&["Polka".to_owned()]).finish());
        assert_eq!(errors, vec!["Polka is not a known genre"]);
    }

    #[test]
    fn relative_links_are_rejected() {
        let errors = errors_of(Validator::new().link("Image link", "/img/hop.png").finish());
        assert_eq!(errors, vec!["Image link must be an http(s) URL"]);
    }
}
