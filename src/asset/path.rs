/// Resolve the model URL against the static asset base path.
///
/// An empty or `/` base puts the asset at the site root. Otherwise the two
/// parts are joined and runs of `/` collapse to one, leaving a `scheme://`
/// prefix intact.
#[must_use]
pub fn resolve_asset_url(base_path: &str, asset_path: &str) -> String {
    let asset = asset_path.trim_start_matches('/');
    let base = base_path.trim();
    if base.is_empty() || base == "/" {
        return format!("/{asset}");
    }

    let joined = format!("{base}/{asset}");
    let (scheme, rest) = joined
        .find("://")
        .map_or(("", joined.as_str()), |i| joined.split_at(i + 3));

    let mut out = String::with_capacity(joined.len());
    out.push_str(scheme);
    let mut prev_slash = false;
    for c in rest.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        out.push(c);
    }
    out
}
