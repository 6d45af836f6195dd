//! Paths inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which normally maps to the
//! directory Zellij was started from (usually the user's home).

use std::path::PathBuf;

/// Directory holding the plugin's trace files: `/host/.local/share/zellij/notepane`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("notepane")
}

/// Rewrites `~` and `~/...` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use notepane::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host_share() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/notepane")
        );
    }

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("a/~/b"), "a/~/b");
    }
}
