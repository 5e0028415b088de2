//! Filesystem locations for configuration and data.
//!
//! Follows the XDG base directory convention: data under
//! `$XDG_DATA_HOME/vcfinder` (default `~/.local/share/vcfinder`), configuration
//! under `$XDG_CONFIG_HOME/vcfinder` (default `~/.config/vcfinder`).

use std::path::PathBuf;

const APP_DIR: &str = "vcfinder";

/// Returns the data directory holding preferences and the trace file.
///
/// Falls back to the system temp directory when neither `XDG_DATA_HOME` nor
/// `HOME` is set.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    data_dir_from(env_var("XDG_DATA_HOME").as_deref(), env_var("HOME").as_deref())
}

/// Returns the default configuration file path, whether or not it exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    config_path_from(env_var("XDG_CONFIG_HOME").as_deref(), env_var("HOME").as_deref())
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or a tilde when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use vcfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, env_var("HOME").as_deref())
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn data_dir_from(xdg_data_home: Option<&str>, home: Option<&str>) -> PathBuf {
    match (xdg_data_home, home) {
        (Some(xdg), _) => PathBuf::from(xdg).join(APP_DIR),
        (None, Some(home)) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        (None, None) => std::env::temp_dir().join(APP_DIR),
    }
}

fn config_path_from(xdg_config_home: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    let base = match (xdg_config_home, home) {
        (Some(xdg), _) => PathBuf::from(xdg),
        (None, Some(home)) => PathBuf::from(home).join(".config"),
        (None, None) => return None,
    };
    Some(base.join(APP_DIR).join("config.toml"))
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match (path, home) {
        ("~", Some(home)) => home.to_string(),
        (p, Some(home)) if p.starts_with("~/") => p.replacen('~', home, 1),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_data_home_wins() {
        assert_eq!(
            data_dir_from(Some("/xdg/data"), Some("/home/u")),
            PathBuf::from("/xdg/data/vcfinder")
        );
        assert_eq!(
            data_dir_from(None, Some("/home/u")),
            PathBuf::from("/home/u/.local/share/vcfinder")
        );
    }

    #[test]
    fn config_path_needs_a_base() {
        assert_eq!(
            config_path_from(None, Some("/home/u")),
            Some(PathBuf::from("/home/u/.config/vcfinder/config.toml"))
        );
        assert_eq!(config_path_from(None, None), None);
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde_with("~/themes/x.toml", Some("/home/u")), "/home/u/themes/x.toml");
        assert_eq!(expand_tilde_with("~", Some("/home/u")), "/home/u");
        assert_eq!(expand_tilde_with("~/x", None), "~/x");
        assert_eq!(expand_tilde_with("/etc/x", Some("/home/u")), "/etc/x");
    }
}
