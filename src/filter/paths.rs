//! Suspicious path set.
//!
//! A static membership set of request paths associated with probing and
//! reconnaissance traffic. Loaded once at construction, read-only after.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Built-in list of paths commonly probed by scanners: admin panels,
/// leaked configuration, CMS internals, dumped backups.
pub static DEFAULT_SUSPICIOUS_PATHS: &[&str] = &[
    // Admin panels
    "/admin",
    "/administrator",
    "/admin.php",
    "/admin.html",
    "/admin-login",
    "/admin-login.php",
    "/login",
    "/dashboard",
    "/console",
    "/backend",
    "/backend.php",
    "/adminpanel",
    "/adminpanel.php",
    "/admin_area",
    "/admin_area.php",
    "/adminarea",
    "/adminarea.php",
    "/controlpanel",
    "/controlpanel.php",
    "/moderator",
    "/moderator.php",
    "/webadmin",
    "/webadmin.php",
    "/adminLogin",
    "/adminLogin.php",
    "/admin/account",
    "/admin/index",
    "/admin/index.php",
    "/admin/login",
    "/admin/login.php",
    "/admin/logout",
    "/admin/home",
    "/admin_area/login",
    "/admin_area/index",
    "/admincp",
    "/admincp.php",
    "/admincontrol",
    "/admincontrol.php",
    "/admincontrol/login",
    "/adminpanel/login",
    "/administer",
    "/siteadmin",
    "/siteadmin.php",
    "/systemadmin",
    "/admins",
    "/adm",
    "/adm.php",
    "/moderator/login",
    "/superuser",
    "/webmaster",
    "/memberadmin",
    "/administratorlogin",
    // Configuration files
    "/.env",
    "/.git",
    "/.gitignore",
    "/config",
    "/config.php",
    "/config.inc",
    "/config.inc.php",
    "/config.txt",
    "/config.bak",
    "/config.old",
    // CMS platforms
    "/wp-admin",
    "/wp-login",
    "/wp-content",
    "/wp-includes",
    "/wp-config",
    "/wp-config.php",
    "/wp-json",
    "/xmlrpc.php",
    "/phpmyadmin",
    "/typo3",
    "/typo3/install",
    "/typo3/index.php",
    "/joomla",
    "/joomla/administrator",
    "/drupal",
    "/drupal/admin",
    "/drupal/user",
    "/phpinfo.php",
    "/phpinfo",
    // Discovery resources
    "/robots.txt",
    "/sitemap.xml",
    // Others
    "/debug",
    "/test",
    "/test.php",
    "/temp",
    "/tmp",
    "/backup",
    "/backup.zip",
    "/backup.sql",
    "/backup.tar.gz",
    "/backup.bak",
    "/database",
    "/database.php",
    "/dump",
    "/dump.sql",
    "/logs",
    "/log",
    "/shell",
    "/shell.php",
    "/webshell",
    "/webshell.php",
    "/upload",
    "/upload.php",
    "/eval",
    "/eval.php",
    "/cmd",
    "/cmd.php",
    "/exec",
    "/exec.php",
    "/info.php",
    "/sql",
    "/sql.php",
    "/db",
    "/db.php",
    "/db.bak",
];

/// Read-only set of suspicious request paths.
#[derive(Debug, Clone)]
pub struct SuspiciousPathSet {
    paths: HashSet<String>,
}

impl Default for SuspiciousPathSet {
    fn default() -> Self {
        Self::new(DEFAULT_SUSPICIOUS_PATHS.iter().copied())
    }
}

impl SuspiciousPathSet {
    /// Build a set from an explicit path list.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a path list from a file, one path per line. Lines that do not
    /// start with `/` (comments, blanks) are ignored.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(load_paths(path)?))
    }

    /// Exact membership check against the request path.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Read `/`-prefixed lines from a path-list file.
pub fn load_paths(path: &Path) -> std::io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| line.starts_with('/'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let paths = SuspiciousPathSet::default();
        assert!(paths.contains("/admin"));
        assert!(paths.contains("/wp-login"));
        assert!(paths.contains("/.env"));
        assert!(!paths.contains("/home"));
        assert!(!paths.contains("/api/v1/users"));
    }

    #[test]
    fn test_custom_list() {
        let paths = SuspiciousPathSet::new(["/secret", "/hidden"]);
        assert!(paths.contains("/secret"));
        assert!(!paths.contains("/admin"));
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_load_paths_filters_non_slash_lines() {
        let file = "test_suspicious_paths.txt";
        std::fs::write(file, "# comment\n/admin\n\n/login\nnot-a-path\n/.env\n").unwrap();

        let paths = load_paths(Path::new(file)).unwrap();
        assert_eq!(paths, vec!["/admin", "/login", "/.env"]);

        let set = SuspiciousPathSet::from_file(Path::new(file)).unwrap();
        assert!(set.contains("/login"));
        assert!(!set.contains("# comment"));

        std::fs::remove_file(file).unwrap_or_default();
    }
}
