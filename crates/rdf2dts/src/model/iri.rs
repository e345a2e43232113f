//! IRI decomposition for naming-context matching and local names.

use percent_encoding::percent_decode_str;

/// An IRI split into the pieces naming contexts compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IriParts<'a> {
    pub scheme: &'a str,
    pub authority: &'a str,
    /// Path up to the local name, trailing `/` and `#` trimmed.
    pub namespace_path: &'a str,
    pub query: Option<&'a str>,
    /// Raw (still percent-encoded) local name. Empty for IRIs ending in `/`.
    pub local_name: &'a str,
}

impl<'a> IriParts<'a> {
    /// Scheme-relaxed namespace comparison.
    ///
    /// An `http:` IRI matches an `https:` namespace but not the reverse.
    pub fn same_namespace(&self, base: &BaseUrl<'_>) -> bool {
        let scheme_ok = self.scheme.eq_ignore_ascii_case(base.scheme)
            || (self.scheme.eq_ignore_ascii_case("http")
                && base.scheme.eq_ignore_ascii_case("https"));
        scheme_ok
            && self.authority.eq_ignore_ascii_case(base.authority)
            && self.namespace_path == base.path
            && self.query == base.query
    }
}

/// A namespace URL as registered in a naming context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseUrl<'a> {
    pub scheme: &'a str,
    pub authority: &'a str,
    /// Full path, trailing `/` and `#` trimmed.
    pub path: &'a str,
    pub query: Option<&'a str>,
}

fn trim_separators(path: &str) -> &str {
    path.trim_end_matches(|c| c == '/' || c == '#')
}

fn is_authority_end(c: char) -> bool {
    matches!(c, '/' | '?' | '#')
}

/// Split `scheme://authority/rest` into its three parts.
fn split_hierarchical(iri: &str) -> Option<(&str, &str, &str)> {
    let (scheme, rest) = iri.split_once("://")?;
    if scheme.is_empty() {
        return None;
    }
    let end = rest.find(is_authority_end).unwrap_or(rest.len());
    let (authority, rest) = rest.split_at(end);
    Some((scheme, authority, rest))
}

fn split_query(path_and_query: &str) -> (&str, Option<&str>) {
    match path_and_query.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (path_and_query, None),
    }
}

/// Split an entity IRI into namespace and local name.
///
/// A non-empty fragment is the local name (`rdfs:Class`); otherwise the last
/// path segment is. Returns `None` for IRIs without a `scheme://` authority.
pub fn split(iri: &str) -> Option<IriParts<'_>> {
    let (scheme, authority, rest) = split_hierarchical(iri)?;
    let (before_fragment, fragment) = match rest.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (rest, None),
    };
    let (path, query) = split_query(before_fragment);

    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        return Some(IriParts {
            scheme,
            authority,
            namespace_path: trim_separators(path),
            query,
            local_name: fragment,
        });
    }

    let (namespace, local) = match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    };
    Some(IriParts {
        scheme,
        authority,
        namespace_path: trim_separators(namespace),
        query,
        local_name: local,
    })
}

/// Parse a naming-context base URL.
pub fn parse_base(url: &str) -> Option<BaseUrl<'_>> {
    let (scheme, authority, rest) = split_hierarchical(url)?;
    if authority.is_empty() && scheme != "file" {
        return None;
    }
    let before_fragment = rest.split_once('#').map_or(rest, |(before, _)| before);
    let (path, query) = split_query(before_fragment);
    Some(BaseUrl {
        scheme,
        authority,
        path: trim_separators(path),
        query,
    })
}

/// Percent-decode a local name for display.
pub fn decode(local: &str) -> String {
    percent_decode_str(local).decode_utf8_lossy().into_owned()
}

/// Best-effort local name of any IRI, decoded.
///
/// Falls back to the text after the last `/`, `#` or `:` for IRIs that
/// [`split`] cannot decompose (e.g. `urn:` identifiers).
pub fn local_name(iri: &str) -> String {
    let raw = split(iri)
        .map(|parts| parts.local_name)
        .filter(|local| !local.is_empty())
        .unwrap_or_else(|| {
            iri.rsplit(|c| c == '/' || c == '#' || c == ':')
                .find(|segment| !segment.is_empty())
                .unwrap_or(iri)
        });
    decode(raw)
}
