pub const APP_NAME: &str = "trade-routes";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Release tag when built from a tagged checkout, otherwise the crate version.
pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// Version label plus the short commit when known, for `--version`.
pub fn long_version() -> String {
    match GIT_COMMIT {
        Some(commit) => format!("{} ({commit})", version_label()),
        None => version_label(),
    }
}

/// User agent sent with every provider request.
pub fn default_user_agent() -> String {
    format!("{}/{}", APP_NAME, version_label())
}
