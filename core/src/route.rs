/// Join `route` onto `root` with exactly one `/` between them.
///
/// `root` is expected without a trailing slash; `ShimClient::new` trims it.
pub fn format_route(root: &str, route: &str) -> String {
    if route.starts_with('/') {
        format!("{root}{route}")
    } else {
        format!("{root}/{route}")
    }
}
