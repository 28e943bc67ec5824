use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::Url;

use crate::domain::{ErrorInfo, ListPage, RequestSpec};

const EMBEDDED: &str = "_embedded";

/// Items of one page of a list endpoint.
///
/// The cursor holds a single fetched page; iterating it never performs I/O and
/// can be repeated with [`ListCursor::iter`]. When the response advertised a
/// `_links.next.href`, [`ListCursor::has_next_page`] is `true` and
/// [`crate::Client::next_page`] fetches the following page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListCursor<T> {
    page: ListPage<T>,
    spec: RequestSpec,
    embedded_key: String,
    next_href: Option<String>,
}

impl<T> ListCursor<T> {
    pub(crate) fn new(
        page: ListPage<T>,
        spec: RequestSpec,
        embedded_key: impl Into<String>,
        next_href: Option<String>,
    ) -> Self {
        Self {
            page,
            spec,
            embedded_key: embedded_key.into(),
            next_href,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.page.items.iter()
    }

    pub fn items(&self) -> &[T] {
        &self.page.items
    }

    pub fn len(&self) -> usize {
        self.page.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page.items.is_empty()
    }

    /// The `_embedded` object of the page, including collections other than the
    /// one being iterated.
    pub fn embedded(&self) -> &Map<String, Value> {
        &self.page.embedded
    }

    pub fn embedded_key(&self) -> &str {
        &self.embedded_key
    }

    pub fn page(&self) -> &ListPage<T> {
        &self.page
    }

    pub fn into_page(self) -> ListPage<T> {
        self.page
    }

    pub(crate) fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    pub fn has_next_page(&self) -> bool {
        self.next_href.is_some()
    }

    /// Request for the page after this one. `base` is the host the page was
    /// fetched from; the link is resolved against the page's own URL.
    ///
    /// Query parameters from the link override the ones of the original request.
    pub(crate) fn next_spec(&self, base: &Url) -> Result<Option<RequestSpec>, url::ParseError> {
        let Some(href) = self.next_href.as_deref() else {
            return Ok(None);
        };
        let target = self.page_url(base)?.join(href)?;

        let mut spec = self.spec.clone();
        let prefix = base.path().trim_end_matches('/');
        spec.path = target
            .path()
            .strip_prefix(prefix)
            .unwrap_or(target.path())
            .to_owned();
        spec.path_segments.clear();
        for (key, value) in target.query_pairs() {
            spec.params.insert(key.into_owned(), Value::String(value.into_owned()));
        }
        Ok(Some(spec))
    }

    fn page_url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            self.spec.path.trim_start_matches('/')
        ))?;
        if !self.spec.path_segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
                .pop_if_empty()
                .extend(&self.spec.path_segments);
        }
        Ok(url)
    }
}

impl<T> IntoIterator for ListCursor<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListCursor<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split a list response into its items and the next-page link.
///
/// Items are read from `_embedded.<key>`, falling back to a top-level `<key>`
/// array or a bare array body. A response without the collection is an empty page.
pub fn decode_page<T: DeserializeOwned>(
    body: Value,
    embedded_key: &str,
) -> Result<(ListPage<T>, Option<String>), ErrorInfo> {
    let mut object = match body {
        Value::Object(object) => object,
        Value::Null => Map::new(),
        Value::Array(items) => Map::from_iter([(embedded_key.to_owned(), Value::Array(items))]),
        other => {
            return Err(ErrorInfo::new(format!(
                "expected a JSON object for a list response, got {other}"
            )));
        }
    };

    let next_href = object
        .get("_links")
        .and_then(|links| links.get("next"))
        .and_then(|next| next.get("href"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    let embedded = match object.remove(EMBEDDED) {
        Some(Value::Object(embedded)) => embedded,
        _ => Map::new(),
    };

    let collection = embedded
        .get(embedded_key)
        .cloned()
        .or_else(|| object.remove(embedded_key));

    let items = match collection {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|err| {
                    ErrorInfo::new(format!(
                        "failed to decode `{embedded_key}` item {index}: {err}"
                    ))
                })
            })
            .collect::<Result<Vec<T>, ErrorInfo>>()?,
        Some(other) => {
            return Err(ErrorInfo::new(format!(
                "expected `{embedded_key}` to be an array, got {other}"
            )));
        }
    };

    Ok((ListPage { items, embedded }, next_href))
}
