//! CURIE (compact URI) expansion for link relation types.
//!
//! A resource declares curies under the `curies` rel, each a templated link
//! with a `name` and an href containing the `{rel}` placeholder. A rel such as
//! `acme:widgets` is then shorthand for that href with `widgets` substituted.

use tracing::instrument;

use crate::HalLink;

/// The rel under which a resource lists its curies.
pub const CURIES_REL: &str = "curies";
/// Placeholder substituted with the reference part of a compact rel.
pub const REL_PLACEHOLDER: &str = "{rel}";

/// Split a compact rel into its `(prefix, reference)` parts.
pub fn split(rel: &str) -> Option<(&str, &str)> {
    rel.split_once(':').filter(|(prefix, reference)| !prefix.is_empty() && !reference.is_empty())
}

/// Expand `rel` against the named curie links.
///
/// Returns `None` when `rel` is not in `prefix:reference` form or no curie
/// carries that prefix as its name.
#[instrument(level = "trace", skip(curies))]
pub fn expand<'a>(curies: impl IntoIterator<Item = &'a HalLink>, rel: &str) -> Option<String> {
    let (prefix, reference) = split(rel)?;
    let curie = curies.into_iter().find(|curie| curie.name() == Some(prefix))?;
    Some(curie.href.replace(REL_PLACEHOLDER, reference))
}
