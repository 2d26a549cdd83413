use std::io::Write;

use exn::ResultExt;
use rustic_hal::{HalLink, HalResource};
use rustic_hal_config::{Config, OutputStyle};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorKind, Result};

/// One line per link: `rel<TAB>href`.
///
/// Compact rels are followed by their expansion in brackets and templated
/// hrefs are marked as such.
pub fn links(resource: &HalResource, config: &Config, out: &mut impl Write) -> Result<()> {
    for (rel, links) in resource.links() {
        let label = match resource.expand_rel(rel).filter(|_| config.expand_curies) {
            Some(expanded) => format!("{rel} [{expanded}]"),
            None => rel.to_string(),
        };
        for link in links {
            if config.warn_deprecated {
                warn_if_deprecated(rel, link);
            }
            let suffix = if link.templated { " (templated)" } else { "" };
            writeln!(out, "{label}\t{}{suffix}", link.href).or_raise(|| ErrorKind::Output)?;
        }
    }
    Ok(())
}

fn warn_if_deprecated(rel: &str, link: &HalLink) {
    if let Some(deprecation) = link.deprecation() {
        tracing::warn!(rel, href = %link.href, deprecation, "Link is deprecated");
    }
}

/// One line per embedded rel: `rel<TAB>count<TAB>self-hrefs`.
///
/// Self hrefs are comma separated, with `-` for resources lacking one.
pub fn embedded(resource: &HalResource, out: &mut impl Write) -> Result<()> {
    for (rel, resources) in resource.embedded() {
        let hrefs = resources
            .iter()
            .map(|child| child.get_self().map_or("-", |link| link.href.as_str()))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{rel}\t{}\t{hrefs}", resources.len()).or_raise(|| ErrorKind::Output)?;
    }
    Ok(())
}

/// Re-emit the document with the configured rels forced into array form.
pub fn normalize(mut resource: HalResource, config: &Config, style: OutputStyle, out: &mut impl Write) -> Result<()> {
    resource.force_arrays(config.array_rels.as_slice());
    write_json(&resource, style, out)
}

/// Print the payload, or a single property of it.
pub fn data(resource: &HalResource, key: Option<&str>, style: OutputStyle, out: &mut impl Write) -> Result<()> {
    let value = match key {
        Some(key) => resource.get_extra_data::<Value>(key).or_raise(|| ErrorKind::Data)?,
        None => resource.data().clone(),
    };
    write_json(&value, style, out)
}

fn write_json(value: &impl Serialize, style: OutputStyle, out: &mut impl Write) -> Result<()> {
    let written = match style {
        OutputStyle::Pretty => serde_json::to_writer_pretty(&mut *out, value),
        OutputStyle::Compact => serde_json::to_writer(&mut *out, value),
    };
    written.or_raise(|| ErrorKind::Output)?;
    writeln!(out).or_raise(|| ErrorKind::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_resource;
    use rstest::{fixture, rstest};
    use std::sync::{Arc, Mutex};

    const DOCUMENT: &str = r#"{
        "_links": {
            "self": {"href": "/orders"},
            "curies": [{"name": "ea", "href": "http://example.com/docs/rels/{rel}", "templated": true}],
            "ea:find": {"href": "/orders{?id}", "templated": true},
            "next": {"href": "/orders?page=2", "deprecation": "/why"}
        },
        "_embedded": {
            "ea:order": [
                {"_links": {"self": {"href": "/orders/123"}}, "total": 30},
                {"total": 20}
            ],
            "ea:admin": {"_links": {"self": {"href": "/admins/2"}}}
        },
        "currentlyProcessing": 14
    }"#;

    #[fixture]
    fn resource() -> HalResource {
        parse_resource(DOCUMENT.as_bytes()).unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);
    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Everything logged at warn level or above while `f` runs.
    fn warnings(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        String::from_utf8(captured.0.lock().unwrap().clone()).unwrap()
    }

    #[rstest]
    fn links_with_expanded_curies(resource: HalResource) {
        let output = render(|out| links(&resource, &Config::default(), out));
        assert_eq!(
            output,
            concat!(
                "curies\thttp://example.com/docs/rels/{rel} (templated)\n",
                "ea:find [http://example.com/docs/rels/find]\t/orders{?id} (templated)\n",
                "next\t/orders?page=2\n",
                "self\t/orders\n",
            )
        );
    }

    #[rstest]
    fn links_without_curie_expansion(resource: HalResource) {
        let config = Config { expand_curies: false, warn_deprecated: false, ..Config::default() };
        let output = render(|out| links(&resource, &config, out));
        assert!(output.contains("ea:find\t/orders{?id} (templated)\n"));
        assert!(!output.contains('['));
    }

    #[rstest]
    #[case(true, 1)]
    #[case(false, 0)]
    fn listing_deprecated_links_warns(resource: HalResource, #[case] warn_deprecated: bool, #[case] expected: usize) {
        let config = Config { warn_deprecated, ..Config::default() };
        let output = warnings(|| {
            render(|out| links(&resource, &config, out));
        });
        assert_eq!(output.matches("Link is deprecated").count(), expected, "{output}");
        if warn_deprecated {
            assert!(output.contains("rel=\"next\""), "{output}");
            assert!(output.contains("href=/orders?page=2"), "{output}");
            assert!(output.contains("deprecation=\"/why\""), "{output}");
        }
    }

    #[rstest]
    fn embedded_lists_counts_and_self_links(resource: HalResource) {
        let output = render(|out| embedded(&resource, out));
        assert_eq!(output, "ea:admin\t1\t/admins/2\nea:order\t2\t/orders/123,-\n");
    }

    #[rstest]
    fn normalize_forces_configured_rels(resource: HalResource) {
        let config = Config { array_rels: vec!["self".to_string(), "ea:admin".to_string()], ..Config::default() };
        let output = render(|out| normalize(resource, &config, OutputStyle::Compact, out));
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["_links"]["self"], serde_json::json!([{"href": "/orders"}]));
        assert_eq!(value["_embedded"]["ea:admin"][0]["_links"]["self"][0]["href"], "/admins/2");
        assert_eq!(value["_links"]["next"]["href"], "/orders?page=2");
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 1);
    }

    #[rstest]
    fn normalize_pretty_prints(resource: HalResource) {
        let output = render(|out| normalize(resource, &Config::default(), OutputStyle::Pretty, out));
        assert!(output.lines().count() > 1);
        assert!(output.starts_with("{\n  \"_links\""));
    }

    #[rstest]
    #[case(None, r#"{"currentlyProcessing":14}"#)]
    #[case(Some("currentlyProcessing"), "14")]
    fn data_prints_payload(resource: HalResource, #[case] key: Option<&str>, #[case] expected: &str) {
        let output = render(|out| data(&resource, key, OutputStyle::Compact, out));
        assert_eq!(output.trim_end(), expected);
    }

    #[rstest]
    fn data_with_missing_key_is_an_error(resource: HalResource) {
        let err = data(&resource, Some("absent"), OutputStyle::Compact, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(*err, ErrorKind::Data);
    }
}
