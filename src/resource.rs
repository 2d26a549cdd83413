use std::collections::BTreeMap;
use std::fmt::{Formatter, Result as FmtResult};

use exn::{OptionExt, ResultExt};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::OneOrMany;
use crate::curie::{self, CURIES_REL};
use crate::error::{ErrorKind, Result};
use crate::link::HalLink;

const LINKS_KEY: &str = "_links";
const EMBEDDED_KEY: &str = "_embedded";
const SELF_REL: &str = "self";

fn is_reserved(key: &str) -> bool {
    key == LINKS_KEY || key == EMBEDDED_KEY
}

/// A HAL resource: links, embedded resources and the resource's own state.
///
/// Serializes to a single JSON object with `_links` first, `_embedded` second
/// and the payload properties flattened after them. Rels are kept in lexical
/// order.
///
/// ```
/// use rustic_hal::{HalLink, HalResource};
///
/// let order = HalResource::new(serde_json::json!({"total": 30}))
///     .with_link("self", "/orders/123")
///     .with_link("ea:basket", HalLink::new("/baskets/98712"))
///     .with_curie("ea", "https://example.com/docs/rels/{rel}");
///
/// assert_eq!(order.get_self().map(|l| l.href.as_str()), Some("/orders/123"));
/// assert_eq!(
///     order.expand_rel("ea:basket").as_deref(),
///     Some("https://example.com/docs/rels/basket")
/// );
/// assert_eq!(order.get_extra_data::<u32>("total").unwrap(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct HalResource {
    links: BTreeMap<String, OneOrMany<HalLink>>,
    embedded: BTreeMap<String, OneOrMany<HalResource>>,
    data: Value,
}

impl HalResource {
    /// Create a resource whose state is `payload`.
    ///
    /// A payload that cannot be represented as JSON (e.g. a map with
    /// non-string keys) is logged and replaced by `null`; use
    /// [`try_new`](Self::try_new) to get the error instead.
    pub fn new(payload: impl Serialize) -> Self {
        match Self::try_new(payload) {
            Ok(resource) => resource,
            Err(err) => {
                tracing::warn!(error = %err, "Resource payload could not be converted to JSON; using an empty payload");
                Self::default()
            },
        }
    }

    /// Like [`new`](Self::new), but returns the conversion error.
    ///
    /// `_links` and `_embedded` properties of the payload are dropped, as they
    /// could never be written back out.
    pub fn try_new(payload: impl Serialize) -> Result<Self> {
        let mut data = serde_json::to_value(payload).or_raise(|| ErrorKind::Json)?;
        if let Value::Object(map) = &mut data {
            map.retain(|key, _| {
                let reserved = is_reserved(key);
                if reserved {
                    tracing::warn!(key = %key, "Reserved key dropped from resource payload");
                }
                !reserved
            });
        }
        Ok(Self { data, ..Self::default() })
    }

    pub fn with_link(mut self, rel: impl Into<String>, link: impl Into<HalLink>) -> Self {
        self.add_link(rel, link);
        self
    }

    /// Append a link under `rel`. Curies are always kept in array form.
    pub fn add_link(&mut self, rel: impl Into<String>, link: impl Into<HalLink>) -> &mut Self {
        self.links
            .entry(rel.into())
            .or_insert_with_key(|rel| {
                let mut links = OneOrMany::new();
                if rel == CURIES_REL {
                    links.force_many();
                }
                links
            })
            .push(link.into());
        self
    }

    pub fn with_link_array(mut self, rel: impl Into<String>) -> Self {
        self.force_link_array(rel);
        self
    }

    /// Serialize links under `rel` as an array, even if there are none or one.
    pub fn force_link_array(&mut self, rel: impl Into<String>) -> &mut Self {
        self.links.entry(rel.into()).or_default().force_many();
        self
    }

    pub fn with_resource(mut self, rel: impl Into<String>, resource: HalResource) -> Self {
        self.add_resource(rel, resource);
        self
    }

    pub fn add_resource(&mut self, rel: impl Into<String>, resource: HalResource) -> &mut Self {
        self.embedded.entry(rel.into()).or_default().push(resource);
        self
    }

    pub fn with_embedded_array(mut self, rel: impl Into<String>) -> Self {
        self.force_embedded_array(rel);
        self
    }

    pub fn force_embedded_array(&mut self, rel: impl Into<String>) -> &mut Self {
        self.embedded.entry(rel.into()).or_default().force_many();
        self
    }

    /// Switch every existing link and embedded entry named in `rels` to array
    /// form, in this resource and all resources embedded in it.
    pub fn force_arrays<S: AsRef<str>>(&mut self, rels: &[S]) -> &mut Self {
        for rel in rels.iter().map(AsRef::as_ref) {
            if let Some(links) = self.links.get_mut(rel) {
                links.force_many();
            }
            if let Some(embedded) = self.embedded.get_mut(rel) {
                embedded.force_many();
            }
        }
        for child in self.embedded.values_mut().flat_map(OneOrMany::iter_mut) {
            child.force_arrays(rels);
        }
        self
    }

    /// Declare a curie: a named, templated link documenting `prefix:*` rels.
    pub fn with_curie(self, name: &str, href: &str) -> Self {
        self.with_link(CURIES_REL, HalLink::new(href).templated(true).with_name(name))
    }

    /// Set a payload property. Failures are logged and leave the resource
    /// unchanged; use [`insert_data`](Self::insert_data) to get the error.
    pub fn with_extra_data(mut self, name: &str, value: impl Serialize) -> Self {
        if let Err(err) = self.insert_data(name, value) {
            tracing::warn!(key = name, error = %err, "Extra data not added to resource");
        }
        self
    }

    /// Set a payload property, turning a non-object payload into an object
    /// holding only this property.
    pub fn insert_data(&mut self, name: &str, value: impl Serialize) -> Result<()> {
        if is_reserved(name) {
            exn::bail!(ErrorKind::ReservedKey(name.to_string()));
        }
        let value = serde_json::to_value(value).or_raise(|| ErrorKind::Json)?;
        match &mut self.data {
            Value::Object(map) => {
                map.insert(name.to_string(), value);
            },
            data => *data = Value::Object(Map::from_iter([(name.to_string(), value)])),
        }
        Ok(())
    }

    /// The first link under `rel`.
    ///
    /// Fetching a deprecated link logs a warning carrying its deprecation URL.
    pub fn get_link(&self, rel: &str) -> Option<&HalLink> {
        let link = self.links.get(rel)?.single()?;
        if let Some(deprecation) = &link.deprecation {
            tracing::warn!(rel, href = %link.href, deprecation = %deprecation, "Traversing deprecated link");
        }
        Some(link)
    }

    pub fn get_self(&self) -> Option<&HalLink> {
        self.get_link(SELF_REL)
    }

    pub fn get_links(&self, rel: &str) -> Option<&[HalLink]> {
        self.links.get(rel).map(OneOrMany::many)
    }

    pub fn has_link(&self, rel: &str) -> bool {
        self.links.get(rel).is_some_and(|links| !links.is_empty())
    }

    pub fn links(&self) -> impl Iterator<Item = (&str, &OneOrMany<HalLink>)> {
        self.links.iter().map(|(rel, links)| (rel.as_str(), links))
    }

    pub fn get_embedded(&self, rel: &str) -> Option<&[HalResource]> {
        self.embedded.get(rel).map(OneOrMany::many)
    }

    pub fn get_embedded_one(&self, rel: &str) -> Option<&HalResource> {
        self.embedded.get(rel)?.single()
    }

    pub fn embedded(&self) -> impl Iterator<Item = (&str, &OneOrMany<HalResource>)> {
        self.embedded.iter().map(|(rel, resources)| (rel.as_str(), resources))
    }

    pub fn curies(&self) -> impl Iterator<Item = &HalLink> {
        self.links.get(CURIES_REL).into_iter().flat_map(OneOrMany::iter)
    }

    /// Expand a compact rel like `ea:basket` using this resource's curies.
    pub fn expand_rel(&self, rel: &str) -> Option<String> {
        curie::expand(self.curies(), rel)
    }

    /// Read one payload property as `V`.
    #[instrument(level = "trace", skip(self))]
    pub fn get_extra_data<V: DeserializeOwned>(&self, name: &str) -> Result<V> {
        let Value::Object(map) = &self.data else {
            exn::bail!(ErrorKind::InvalidPayload);
        };
        let value = map.get(name).ok_or_raise(|| ErrorKind::MissingKey(name.to_string()))?;
        V::deserialize(value).or_raise(|| ErrorKind::Json)
    }

    /// Read the whole payload as `V`.
    #[instrument(level = "trace", skip(self))]
    pub fn get_data<V: DeserializeOwned>(&self) -> Result<V> {
        V::deserialize(&self.data).or_raise(|| ErrorKind::Json)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    fn self_link(&self) -> Option<&HalLink> {
        self.links.get(SELF_REL).and_then(OneOrMany::single)
    }
}

/// Resources are the same if they point to the same `self`.
impl PartialEq for HalResource {
    fn eq(&self, other: &Self) -> bool {
        self.self_link() == other.self_link()
    }
}

/// The entries of a rel map that still have something to say: at least one
/// element, or an explicit request for an (empty) array.
struct Populated<'a, T>(&'a BTreeMap<String, OneOrMany<T>>);

impl<'a, T> Populated<'a, T> {
    fn entries(&self) -> impl Iterator<Item = (&'a String, &'a OneOrMany<T>)> + use<'a, T> {
        self.0.iter().filter(|(_, entry)| !entry.is_empty() || entry.is_forced_many())
    }

    fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

impl<T: Serialize> Serialize for Populated<'_, T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries())
    }
}

impl Serialize for HalResource {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let links = Populated(&self.links);
        let embedded = Populated(&self.embedded);
        // Scalar payloads have no property names to flatten into the object.
        let payload = match &self.data {
            Value::Object(map) => Some(map),
            _ => None,
        };
        let properties = || payload.into_iter().flatten().filter(|(key, _)| !is_reserved(key));

        let len = usize::from(!links.is_empty()) + usize::from(!embedded.is_empty()) + properties().count();
        let mut state = serializer.serialize_map(Some(len))?;
        if !links.is_empty() {
            state.serialize_entry(LINKS_KEY, &links)?;
        }
        if !embedded.is_empty() {
            state.serialize_entry(EMBEDDED_KEY, &embedded)?;
        }
        for (key, value) in properties() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for HalResource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Reads `_links` and `_embedded` into their maps and collects every
        /// other key into an object payload.
        struct ResourceVisitor;

        impl<'de> Visitor<'de> for ResourceVisitor {
            type Value = HalResource;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a HAL resource object")
            }

            fn visit_map<M>(self, mut access: M) -> std::result::Result<HalResource, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut resource = HalResource::default();
                let mut payload = Map::new();
                while let Some(key) = access.next_key::<String>()? {
                    if key == LINKS_KEY {
                        resource.links = access.next_value()?;
                    } else if key == EMBEDDED_KEY {
                        resource.embedded = access.next_value()?;
                    } else {
                        let value = access.next_value()?;
                        payload.insert(key, value);
                    }
                }
                if let Some(curies) = resource.links.get_mut(CURIES_REL) {
                    curies.force_many();
                }
                resource.data = Value::Object(payload);
                Ok(resource)
            }
        }

        deserializer.deserialize_map(ResourceVisitor)
    }
}
