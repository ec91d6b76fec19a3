use url::form_urlencoded;

/// Derive the query-parameter name for an optional qualifier.
///
/// A qualifier that already starts with the default name (which includes
/// being equal to it) is used verbatim; anything else is prefixed with the
/// default name and an underscore. Multiple independent sortable lists on
/// one page get distinct parameters this way.
pub fn query_param_name(default: &str, qualifier: Option<&str>) -> String {
    match qualifier {
        Some(q) if q.starts_with(default) => q.to_string(),
        Some(q) => format!("{default}_{q}"),
        None => default.to_string(),
    }
}

/// Extract the named parameter from an URL-encoded query string. Repeated
/// parameters collapse to the last occurrence.
pub fn query_value(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.into_owned())
        .last()
}

/// Rebuild `path_and_query` with `name` set to `value`.
///
/// Existing parameters keep their order; the named parameter is replaced in
/// place and any duplicates of it dropped; a parameter not present yet is
/// appended. The value is form-urlencoded on the way out.
pub fn set_query_param(path_and_query: &str, name: &str, value: &str) -> String {
    let (path, query) = match path_and_query.split_once('?') {
        Some((path, query)) => (path, query),
        None => (path_and_query, ""),
    };
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut replaced = false;
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        if k.as_ref() == name {
            if !replaced {
                serializer.append_pair(name, value);
                replaced = true;
            }
        } else {
            serializer.append_pair(&k, &v);
        }
    }
    if !replaced {
        serializer.append_pair(name, value);
    }
    format!("{path}?{}", serializer.finish())
}
