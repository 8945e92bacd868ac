//! Session environment table
//!
//! The variables an operation reads and mutates, plus the session's current
//! location. Names compare case-insensitively like the Windows environment
//! block; the first spelling seen for a name is kept.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Separator for list-valued variables (PATH, INCLUDE, LIB)
pub const LIST_SEPARATOR: char = ';';

/// Environment table owned by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEnv {
    vars: BTreeMap<String, String>,
    current_dir: Option<PathBuf>,
}

impl SessionEnv {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment and working directory
    pub fn from_process() -> Self {
        let mut env = Self::from_os_vars(std::env::vars_os());
        env.current_dir = std::env::current_dir().ok();
        env
    }

    /// Collect variables, skipping entries that are not valid Unicode
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        vars.into_iter()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (name, _) => {
                    debug!("Skipping non-Unicode variable {:?}", name);
                    None
                }
            })
            .collect()
    }

    /// Builder-style variable assignment
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    fn key_for(&self, name: &str) -> Option<&String> {
        self.vars.keys().find(|k| k.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.key_for(name)
            .and_then(|k| self.vars.get(k))
            .map(String::as_str)
    }

    /// Non-empty value of a variable
    pub fn get_nonempty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.key_for(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let key = self
            .key_for(name)
            .cloned()
            .unwrap_or_else(|| name.to_string());
        self.vars.insert(key, value.into());
    }

    /// Remove a variable, returning its previous value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let key = self.key_for(name)?.clone();
        self.vars.remove(&key)
    }

    /// Replace every variable with `vars`, keeping the current location
    pub fn replace_vars(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        let location = self.current_dir.take();
        *self = vars.into_iter().collect();
        self.current_dir = location;
    }

    /// Iterate variables in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn set_current_dir(&mut self, dir: impl Into<PathBuf>) {
        self.current_dir = Some(dir.into());
    }

    /// Split a list variable into its segments; missing or empty yields none
    pub fn list(&self, name: &str) -> Vec<String> {
        match self.get(name) {
            Some(value) if !value.is_empty() => {
                value.split(LIST_SEPARATOR).map(str::to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Overwrite a list variable from segments
    pub fn set_list(&mut self, name: &str, segments: &[String]) {
        let sep = LIST_SEPARATOR.to_string();
        self.set(name, segments.join(&sep));
    }

    /// Prepend directories to PATH, in the given order, without deduplication
    pub fn prepend_path<P: AsRef<Path>>(&mut self, dirs: &[P]) {
        let mut segments: Vec<String> = dirs
            .iter()
            .map(|d| d.as_ref().display().to_string())
            .collect();
        segments.extend(self.list("PATH"));
        self.set_list("PATH", &segments);
    }

    /// Drop PATH entries that equal one of `entries` byte for byte
    pub fn remove_path_entries(&mut self, entries: &[&str]) -> usize {
        let before = self.list("PATH");
        let kept: Vec<String> = before
            .iter()
            .filter(|seg| !entries.contains(&seg.as_str()))
            .cloned()
            .collect();
        let removed = before.len() - kept.len();
        if removed > 0 {
            self.set_list("PATH", &kept);
        }
        removed
    }

    /// Locate an executable on PATH, returning the PATH entry it was found
    /// under (verbatim) and the full file path
    pub fn find_program(&self, name: &str) -> Option<(String, PathBuf)> {
        self.list("PATH")
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .find_map(|entry| {
                let candidate = Path::new(&entry).join(name);
                candidate.is_file().then(|| (entry, candidate))
            })
    }
}

impl FromIterator<(String, String)> for SessionEnv {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (name, value) in iter {
            env.set(&name, value);
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn names_are_case_insensitive() {
        let mut env = SessionEnv::new().with_var("Path", r"C:\a");
        assert_eq!(env.get("PATH"), Some(r"C:\a"));

        env.set("PATH", r"C:\b");
        assert_eq!(env.iter().collect::<Vec<_>>(), vec![("Path", r"C:\b")]);

        assert_eq!(env.remove("path").as_deref(), Some(r"C:\b"));
        assert!(!env.contains("Path"));
    }

    #[test]
    fn prepend_accumulates_duplicates() {
        let mut env = SessionEnv::new().with_var("PATH", r"C:\Windows");
        env.prepend_path(&[r"C:\tool\bin"]);
        env.prepend_path(&[r"C:\tool\bin"]);
        assert_eq!(
            env.get("PATH"),
            Some(r"C:\tool\bin;C:\tool\bin;C:\Windows")
        );
    }

    #[test]
    fn prepend_into_empty_path() {
        let mut env = SessionEnv::new();
        env.prepend_path(&[r"C:\a", r"C:\b"]);
        assert_eq!(env.get("PATH"), Some(r"C:\a;C:\b"));
    }

    #[test]
    fn remove_path_entries_is_exact() {
        let mut env = SessionEnv::new().with_var("PATH", r"C:\x\bin\;C:\x\bin;C:\y");
        let removed = env.remove_path_entries(&[r"C:\x\bin\"]);
        assert_eq!(removed, 1);
        assert_eq!(env.get("PATH"), Some(r"C:\x\bin;C:\y"));
    }

    #[test]
    fn remove_nothing_leaves_path_untouched() {
        let mut env = SessionEnv::new().with_var("PATH", "a;;b");
        assert_eq!(env.remove_path_entries(&["c"]), 0);
        assert_eq!(env.get("PATH"), Some("a;;b"));
    }

    #[test]
    fn replace_vars_keeps_location() {
        let mut env = SessionEnv::new().with_var("OLD", "1");
        env.set_current_dir(r"S:\");
        env.replace_vars([("NEW".to_string(), "2".to_string())]);
        assert!(!env.contains("OLD"));
        assert_eq!(env.get("NEW"), Some("2"));
        assert_eq!(env.current_dir(), Some(Path::new(r"S:\")));
    }

    #[test]
    fn find_program_returns_matching_entry() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("swift.exe"), b"").unwrap();

        let path = format!("{};{}", temp.path().display(), bin.display());
        let env = SessionEnv::new().with_var("PATH", path);

        let (entry, exe) = env.find_program("swift.exe").unwrap();
        assert_eq!(entry, bin.display().to_string());
        assert_eq!(exe, bin.join("swift.exe"));
        assert!(env.find_program("clang.exe").is_none());
    }

    #[test]
    #[serial]
    fn from_process_captures_variables() {
        std::env::set_var("SWENV_TEST_CAPTURE", "captured");
        let env = SessionEnv::from_process();
        std::env::remove_var("SWENV_TEST_CAPTURE");

        assert_eq!(env.get("SWENV_TEST_CAPTURE"), Some("captured"));
        assert!(env.current_dir().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let env = SessionEnv::from_os_vars([
            (OsString::from("GOOD"), OsString::from("yes")),
            (OsString::from("BAD"), OsString::from_vec(vec![0x66, 0xff, 0x6f])),
            (OsString::from_vec(vec![0xfe]), OsString::from("x")),
        ]);

        assert_eq!(env.iter().collect::<Vec<_>>(), vec![("GOOD", "yes")]);
    }
}
