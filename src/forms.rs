//! Decoding of the HTML form submissions.
//!
//! The venue and artist forms submit `genres` once per selected option,
//! so bodies are read as raw `application/x-www-form-urlencoded` pairs
//! rather than through a serde struct.

use serde::Deserialize;

use crate::error::DirectoryResult;
use crate::models::artist::NewArtist;
use crate::models::show::NewShow;
use crate::models::venue::NewVenue;
use crate::templates::ShowFields;

/// The decoded key/value pairs of a submitted form, in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// The first value submitted for `key`, or an empty string.
    pub fn value(&self, key: &str) -> String {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    /// The first non-empty value among several accepted names for a field.
    pub fn value_of_any(&self, keys: &[&str]) -> String {
        keys.iter()
            .map(|key| self.value(key))
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }

    pub fn values(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Whether a checkbox was ticked.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.value(key).trim().to_ascii_lowercase().as_str(),
            "y" | "yes" | "on" | "true" | "1"
        )
    }
}

impl From<&FormData> for NewVenue {
    fn from(form: &FormData) -> Self {
        Self {
            name: form.value("name"),
            genres: form.values("genres"),
            address: form.value("address"),
            city: form.value("city"),
            state: form.value("state"),
            phone: form.value("phone"),
            website: form.value_of_any(&["website_link", "website"]),
            facebook_link: form.value("facebook_link"),
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.value("seeking_description"),
            image_link: form.value("image_link"),
        }
    }
}

impl From<&FormData> for NewArtist {
    fn from(form: &FormData) -> Self {
        Self {
            name: form.value("name"),
            genres: form.values("genres"),
            city: form.value("city"),
            state: form.value("state"),
            phone: form.value("phone"),
            website: form.value_of_any(&["website_link", "website"]),
            facebook_link: form.value("facebook_link"),
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.value("seeking_description"),
            image_link: form.value("image_link"),
        }
    }
}

impl From<&FormData> for ShowFields {
    fn from(form: &FormData) -> Self {
        Self {
            venue_id: form.value("venue_id"),
            artist_id: form.value("artist_id"),
            start_time: form.value("start_time"),
        }
    }
}

impl ShowFields {
    pub fn to_new_show(&self) -> DirectoryResult<NewShow> {
        NewShow::from_form(&self.venue_id, &self.artist_id, &self.start_time)
    }
}

/// The search box on the listing pages.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}
