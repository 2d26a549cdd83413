//! Declarative builders for [`HalResource`](crate::HalResource).
//!
//! Each entry is `key op value`, with `op` one of:
//!
//! - `=>` a link built from any `Into<HalLink>` value,
//! - `>` a plain link to an href,
//! - `>>` a templated link to an href,
//! - `=` a payload property.
//!
//! ```
//! use rustic_hal::{hal, hal_extend, HalLink};
//!
//! let order = hal!(serde_json::json!({"total": 30}),
//!     "self" > "/orders/123",
//!     "find" >> "/orders{?id}",
//!     "help" => HalLink::new("/help").with_title("Help"),
//!     "currency" = "USD"
//! );
//! let order = hal_extend!(order, "next" > "/orders/124");
//!
//! assert!(order.get_link("find").unwrap().templated);
//! assert_eq!(order.get_extra_data::<String>("currency").unwrap(), "USD");
//! assert!(order.has_link("next"));
//! ```

/// Apply builder entries to a resource expression. Used by [`hal!`] and [`hal_extend!`].
#[macro_export]
macro_rules! halextra {
    ($prefix:expr, $name:tt => $value:expr) => {
        $prefix.with_link($name, $value)
    };
    ($prefix:expr, $name:tt >> $value:expr) => {
        $prefix.with_link($name, $crate::HalLink::new($value).templated(true))
    };
    ($prefix:expr, $name:tt > $value:expr) => {
        $prefix.with_link($name, $crate::HalLink::new($value))
    };
    ($prefix:expr, $name:tt = $value:expr) => {
        $prefix.with_extra_data($name, $value)
    };
    ($prefix:expr, $name:tt => $value:expr, $($key:tt $op:tt $val:expr),+) => {
        $crate::halextra!($prefix.with_link($name, $value), $($key $op $val),+)
    };
    ($prefix:expr, $name:tt >> $value:expr, $($key:tt $op:tt $val:expr),+) => {
        $crate::halextra!($prefix.with_link($name, $crate::HalLink::new($value).templated(true)), $($key $op $val),+)
    };
    ($prefix:expr, $name:tt > $value:expr, $($key:tt $op:tt $val:expr),+) => {
        $crate::halextra!($prefix.with_link($name, $crate::HalLink::new($value)), $($key $op $val),+)
    };
    ($prefix:expr, $name:tt = $value:expr, $($key:tt $op:tt $val:expr),+) => {
        $crate::halextra!($prefix.with_extra_data($name, $value), $($key $op $val),+)
    };
}

/// Build a [`HalResource`](crate::HalResource) from a payload and builder entries.
#[macro_export]
macro_rules! hal {
    () => {
        $crate::HalResource::new(())
    };
    ($payload:expr) => {
        $crate::HalResource::new($payload)
    };
    ($payload:expr, $($key:tt $op:tt $val:expr),+ $(,)?) => {
        $crate::halextra!($crate::HalResource::new($payload), $($key $op $val),+)
    };
}

/// Apply builder entries to an existing [`HalResource`](crate::HalResource) value.
#[macro_export]
macro_rules! hal_extend {
    ($initial:expr) => {
        $initial
    };
    ($initial:expr, $($key:tt $op:tt $val:expr),+ $(,)?) => {
        $crate::halextra!($initial, $($key $op $val),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::{HalLink, HalResource};
    use serde_json::{json, to_value};

    #[test]
    fn empty_resource() {
        assert_eq!(to_value(hal!()).unwrap(), json!({}));
    }

    #[test]
    fn payload_only() {
        assert_eq!(to_value(hal!(json!({"a": 1}))).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn every_entry_form() {
        let resource: HalResource = hal!(json!({"a": 1}),
            "self" > "/a",
            "find" >> "/a{?q}",
            "help" => HalLink::new("/help").with_title("Help"),
            "b" = 2,
        );
        assert_eq!(
            to_value(&resource).unwrap(),
            json!({
                "_links": {
                    "find": {"href": "/a{?q}", "templated": true},
                    "help": {"href": "/help", "title": "Help"},
                    "self": {"href": "/a"}
                },
                "a": 1,
                "b": 2
            })
        );
    }

    #[test]
    fn single_entry_of_each_form() {
        assert!(hal!((), "x" > "/x").has_link("x"));
        assert!(hal!((), "x" >> "/x{y}").get_link("x").unwrap().templated);
        assert_eq!(hal!((), "x" => "/x").get_link("x"), Some(&HalLink::new("/x")));
        assert_eq!(hal!((), "x" = 1).get_extra_data::<u8>("x").unwrap(), 1);
    }

    #[test]
    fn extend_existing_resource() {
        let base = hal!(json!({"a": 1}), "self" > "/a");
        let extended = hal_extend!(base.clone(), "next" > "/b", "a" = 5);
        assert!(extended.has_link("next"));
        assert_eq!(extended.get_extra_data::<u8>("a").unwrap(), 5);
        assert_eq!(hal_extend!(base.clone()), base);
    }
}
