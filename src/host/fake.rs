//! Recording host for unit tests

use crate::error::{SwenvError, SwenvResult};
use crate::host::{DevShellRequest, Host};
use crate::session::SessionEnv;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeHost {
    pub existing: Mutex<HashSet<PathBuf>>,
    pub calls: Mutex<Vec<String>>,
    pub installations_json: String,
    pub kits_root: Option<String>,
    /// Variables the developer shell adds on top of the incoming session
    pub dev_shell_vars: Vec<(String, String)>,
    pub fail_download: bool,
    pub fail_alias: bool,
    pub requests: Mutex<Vec<DevShellRequest>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(self, path: impl Into<PathBuf>) -> Self {
        self.add_existing(path);
        self
    }

    pub fn add_existing(&self, path: impl Into<PathBuf>) {
        self.existing.lock().unwrap().insert(path.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn dev_shell_requests(&self) -> Vec<DevShellRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Host for FakeHost {
    fn path_exists(&self, path: &Path) -> bool {
        self.existing.lock().unwrap().contains(path)
    }

    async fn download(&self, url: &str, dest: &Path) -> SwenvResult<()> {
        self.record(format!("download {} -> {}", url, dest.display()));
        if self.fail_download {
            return Err(SwenvError::download(url, "connection reset"));
        }
        self.add_existing(dest);
        Ok(())
    }

    async fn extract(&self, archive: &Path, dest: &Path) -> SwenvResult<()> {
        self.record(format!("extract {} -> {}", archive.display(), dest.display()));
        let stem = archive.file_stem().map(PathBuf::from).unwrap_or_default();
        self.add_existing(dest.join(stem));
        Ok(())
    }

    async fn remove_file(&self, path: &Path) -> SwenvResult<()> {
        self.record(format!("remove {}", path.display()));
        self.existing.lock().unwrap().remove(path);
        Ok(())
    }

    async fn create_alias(&self, drive: &str, target: &Path) -> SwenvResult<()> {
        self.record(format!("alias {} -> {}", drive, target.display()));
        if self.fail_alias {
            return Err(SwenvError::AliasCreation {
                drive: drive.to_string(),
                target: target.to_path_buf(),
                reason: "Access is denied.".to_string(),
            });
        }
        Ok(())
    }

    async fn query_installations(&self, locator: &Path) -> SwenvResult<String> {
        self.record(format!("locate {}", locator.display()));
        Ok(self.installations_json.clone())
    }

    async fn registry_value(&self, key: &str, value: &str) -> SwenvResult<Option<String>> {
        self.record(format!("registry {}\\{}", key, value));
        Ok(self.kits_root.clone())
    }

    async fn activate_dev_shell(
        &self,
        env: &SessionEnv,
        request: &DevShellRequest,
    ) -> SwenvResult<Vec<(String, String)>> {
        self.record(format!("devshell {} {}", request.arch, request.argument_string()));
        self.requests.lock().unwrap().push(request.clone());

        let mut result = env.clone();
        for (name, value) in &self.dev_shell_vars {
            result.set(name, value.clone());
        }
        Ok(result
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect())
    }
}
