//! Destination resolver

use std::path::PathBuf;

use super::site::SiteConfig;

/// One directory a placement may land in. Its rank is its position in the
/// resolved list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    /// Whether this is the per-user directory
    pub user: bool,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            user: false,
        }
    }

    pub fn user(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            user: true,
        }
    }
}

/// Compute the ordered candidate list.
///
/// The primary directories come first, in order. The user directory is
/// appended when it is enabled, set, and exists. If the environment root
/// appears verbatim in the list, that one entry moves to the end so the
/// environment's library directory is tried before its root.
pub fn resolve_candidates(config: &SiteConfig) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = config
        .site_packages
        .iter()
        .cloned()
        .map(Candidate::new)
        .collect();

    if config.enable_user_site
        && let Some(user_site) = &config.user_site
        && user_site.is_dir()
    {
        candidates.push(Candidate::user(user_site.clone()));
    }

    if let Some(root) = &config.env_root
        && let Some(idx) = candidates.iter().position(|c| &c.path == root)
    {
        let entry = candidates.remove(idx);
        candidates.push(entry);
    }

    tracing::debug!(
        candidates = ?candidates.iter().map(|c| &c.path).collect::<Vec<_>>(),
        "Resolved candidate directories"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn paths(candidates: &[Candidate]) -> Vec<PathBuf> {
        candidates.iter().map(|c| c.path.clone()).collect()
    }

    #[test]
    fn primary_list_is_kept_in_order() {
        let config = SiteConfig {
            site_packages: vec!["/sys_a".into(), "/sys_b".into()],
            ..Default::default()
        };
        assert_eq!(
            paths(&resolve_candidates(&config)),
            vec![PathBuf::from("/sys_a"), PathBuf::from("/sys_b")]
        );
    }

    #[test]
    fn existing_user_site_is_appended_when_enabled() {
        let user = tempdir().unwrap();
        let mut config = SiteConfig {
            site_packages: vec!["/sys_a".into()],
            user_site: Some(user.path().to_path_buf()),
            enable_user_site: false,
            env_root: None,
        };
        assert_eq!(resolve_candidates(&config).len(), 1);

        config.enable_user_site = true;
        let candidates = resolve_candidates(&config);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1], Candidate::user(user.path()));
    }

    #[test]
    fn missing_user_site_is_skipped() {
        let config = SiteConfig {
            site_packages: vec!["/sys_a".into()],
            user_site: Some("/definitely/not/here".into()),
            ..Default::default()
        };
        assert_eq!(paths(&resolve_candidates(&config)), vec![PathBuf::from("/sys_a")]);
    }

    #[test]
    fn environment_root_is_tried_after_its_library_dir() {
        let config = SiteConfig {
            site_packages: vec!["/venv".into(), "/venv/lib/site-packages".into()],
            env_root: Some("/venv".into()),
            ..Default::default()
        };
        assert_eq!(
            paths(&resolve_candidates(&config)),
            vec![
                PathBuf::from("/venv/lib/site-packages"),
                PathBuf::from("/venv")
            ]
        );
    }

    #[test]
    fn environment_root_not_in_list_changes_nothing() {
        let config = SiteConfig {
            site_packages: vec!["/a".into(), "/b".into()],
            env_root: Some("/elsewhere".into()),
            ..Default::default()
        };
        assert_eq!(
            paths(&resolve_candidates(&config)),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }
}
