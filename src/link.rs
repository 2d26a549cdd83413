use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A Link Object, pointing from a HAL resource to a related resource.
///
/// Follows [the HAL draft](https://tools.ietf.org/html/draft-kelly-json-hal-08#section-5).
/// Only `href` is required, every other attribute is omitted from the JSON
/// output unless set.
///
/// # Examples
///
/// ```
/// use rustic_hal::HalLink;
///
/// let link = HalLink::new("https://example.com/orders{?id}")
///     .templated(true)
///     .with_title("Find an order");
/// assert_eq!(link.title(), Some("Find an order"));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HalLink {
    /// Either a URI [RFC3986] or a URI Template [RFC6570].
    ///
    /// If the value is a URI Template, `templated` should be `true`.
    pub href: String,
    /// Whether `href` is a URI Template.
    ///
    /// Anything other than a JSON `true` is read as `false`.
    #[serde(skip_serializing_if = "is_false", deserialize_with = "lenient_bool")]
    pub templated: bool,
    /// Hint for the media type expected when dereferencing the target.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Presence means the link will be removed at a future date. The value is
    /// a URL with further information about the deprecation.
    ///
    /// Clients should log a warning whenever they traverse such a link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<String>,
    /// URI hinting at the profile of the target resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Secondary key for selecting between links that share a relation type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable label for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Language of the target resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

macro_rules! chainable_string {
    ($field:ident, $setter:ident) => {
        pub fn $setter(mut self, $field: &str) -> Self {
            self.$field = Some($field.to_string());
            self
        }

        pub fn $field(&self) -> Option<&str> {
            self.$field.as_deref()
        }
    };
}

impl HalLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into(), ..Self::default() }
    }

    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = templated;
        self
    }

    chainable_string!(media_type, with_media_type);
    chainable_string!(deprecation, with_deprecation);
    chainable_string!(name, with_name);
    chainable_string!(profile, with_profile);
    chainable_string!(title, with_title);
    chainable_string!(hreflang, with_hreflang);

    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

impl From<&str> for HalLink {
    fn from(href: &str) -> Self {
        Self::new(href)
    }
}
impl From<String> for HalLink {
    fn from(href: String) -> Self {
        Self::new(href)
    }
}
impl From<&String> for HalLink {
    fn from(href: &String) -> Self {
        Self::new(href.as_str())
    }
}

/// Two links are the same if their href is the same; the rest is immaterial.
impl PartialEq for HalLink {
    fn eq(&self, other: &Self) -> bool {
        self.href == other.href
    }
}
impl Eq for HalLink {}
impl Hash for HalLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.href.hash(state);
    }
}

impl Display for HalLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.href)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}
