//! Lenient accessors over untyped CMS JSON.
//!
//! The CMS enforces no schema, so every accessor treats a missing key, a
//! `null`, and a value of the wrong shape the same way: as absent.

use serde_json::{Map, Value};

use crate::model::{ImageRef, Link};

pub(crate) type Object = Map<String, Value>;

/// Host that relative media URLs are served from.
pub const ASSET_HOST: &str = "https://esign-admin.signmary.com";

/// Non-blank string (or number) at `key`.
pub(crate) fn text(obj: &Object, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Nested object at `key`.
pub(crate) fn object<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
    obj.get(key)?.as_object()
}

/// Array at `key`, or an empty slice.
pub(crate) fn array<'a>(obj: &'a Object, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Objects inside the array at `key`; non-object entries are skipped.
pub(crate) fn objects<'a>(obj: &'a Object, key: &str) -> impl Iterator<Item = &'a Object> {
    array(obj, key).iter().filter_map(Value::as_object)
}

/// Truthy flag at `key`. Accepts booleans and the strings `"true"`/`"1"`.
pub(crate) fn flag(obj: &Object, key: &str) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}

/// Finite floating-point number at `key` (numeric strings accepted).
pub(crate) fn number(obj: &Object, key: &str) -> Option<f64> {
    let n = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// Block or item identifier; CMS ids are strings or integers.
pub(crate) fn id(obj: &Object) -> Option<String> {
    text(obj, "id")
}

/// Non-blank strings inside the array at `key`.
pub(crate) fn strings(obj: &Object, key: &str) -> Vec<String> {
    array(obj, key)
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Image reference at `key`: either `{ "url": …, "title": … }` or a bare URL.
pub(crate) fn image(obj: &Object, key: &str) -> Option<ImageRef> {
    image_value(obj.get(key)?)
}

pub(crate) fn image_value(value: &Value) -> Option<ImageRef> {
    match value {
        Value::String(url) if !url.trim().is_empty() => Some(ImageRef {
            url: normalize_image_url(url.trim()),
            title: None,
        }),
        Value::Object(inner) => {
            let url = text(inner, "url")?;
            Some(ImageRef {
                url: normalize_image_url(url.trim()),
                title: text(inner, "title"),
            })
        }
        _ => None,
    }
}

/// A link from separate text and URL keys; both must be present.
pub(crate) fn link(obj: &Object, text_key: &str, url_key: &str) -> Option<Link> {
    Some(Link {
        text: text(obj, text_key)?,
        url: text(obj, url_key)?,
    })
}

/// Make an image URL absolute.
///
/// Absolute (`http://`, `https://`) and protocol-relative (`//`) URLs pass
/// through unchanged. Anything else is joined with [`ASSET_HOST`].
pub fn normalize_image_url(url: &str) -> String {
    if is_absolute(url) {
        url.to_owned()
    } else if url.starts_with('/') {
        format!("{ASSET_HOST}{url}")
    } else {
        format!("{ASSET_HOST}/{url}")
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || url.starts_with("//")
}
