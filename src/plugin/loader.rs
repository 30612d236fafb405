//! Generator discovery and execution
//!
//! Generators are discovered from:
//! 1. PATH (executables starting with "archsmith-ideate-")
//! 2. Additional directories registered with [`PluginLoader::add_plugin_dir`]

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::ideation::GenerationError;
use super::protocol::{PluginRequest, PluginResponse};

/// Executable name prefix of concept-brief generators
pub const GENERATOR_PREFIX: &str = "archsmith-ideate-";

/// Information about a discovered generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Executable file name
    pub name: String,

    /// Path to the executable
    pub path: PathBuf,
}

/// Generator loader and executor
#[derive(Debug, Default)]
pub struct PluginLoader {
    /// Discovered generators, ordered by name
    plugins: BTreeMap<String, PluginInfo>,

    /// Additional plugin directories
    plugin_dirs: Vec<PathBuf>,
}

impl PluginLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin directory to search
    pub fn add_plugin_dir(&mut self, dir: impl Into<PathBuf>) {
        self.plugin_dirs.push(dir.into());
    }

    /// Discovers all available generators
    pub fn discover(&mut self) {
        self.plugins.clear();

        for dir in self.search_dirs() {
            self.scan_directory(&dir);
        }

        debug!(count = self.plugins.len(), "discovered generators");
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = std::env::var_os("PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();
        dirs.extend(self.plugin_dirs.iter().cloned());
        dirs
    }

    /// Scans a directory for generators
    fn scan_directory(&mut self, dir: &Path) {
        // unreadable directories are skipped
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if name.starts_with(GENERATOR_PREFIX) && is_executable(&path) {
                // first found wins
                self.plugins
                    .entry(name.to_string())
                    .or_insert_with(|| PluginInfo {
                        name: name.to_string(),
                        path: path.clone(),
                    });
            }
        }
    }

    /// Lists all discovered generators
    pub fn list(&self) -> Vec<&PluginInfo> {
        self.plugins.values().collect()
    }

    /// Looks up a discovered generator by executable name
    pub fn get(&self, name: &str) -> Option<&PluginInfo> {
        self.plugins.get(name)
    }

    /// Picks the generator to run
    ///
    /// A configured command is used as a path when it contains a separator,
    /// otherwise it is looked up by name in the search directories. Without a
    /// configured command the first discovered generator is used.
    pub fn resolve(&self, command: Option<&str>) -> Result<PathBuf, GenerationError> {
        match command {
            Some(command) if command.contains(std::path::MAIN_SEPARATOR) || command.contains('/') => {
                Ok(PathBuf::from(command))
            }
            Some(command) => match self.get(command) {
                Some(info) => Ok(info.path.clone()),
                None => self
                    .search_dirs()
                    .into_iter()
                    .map(|dir| dir.join(command))
                    .find(|path| is_executable(path))
                    .ok_or_else(|| GenerationError::NoGenerator(command.to_string())),
            },
            None => self
                .plugins
                .values()
                .next()
                .map(|info| info.path.clone())
                .ok_or_else(|| GenerationError::NoGenerator(format!("{}*", GENERATOR_PREFIX))),
        }
    }

    /// Executes a request and collects every response line
    pub fn execute(
        &self,
        path: &Path,
        request: &PluginRequest,
    ) -> Result<Vec<PluginResponse>, GenerationError> {
        debug!(generator = %path.display(), operation = %request.operation, "spawning generator");

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GenerationError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;

        let request_json = serde_json::to_string(request)?;
        if let Some(mut stdin) = child.stdin.take() {
            writeln!(stdin, "{}", request_json).map_err(GenerationError::Io)?;
            // stdin is closed here so the generator sees EOF
        }

        // collects stdout and stderr together so neither pipe can fill up
        let output = child.wait_with_output().map_err(GenerationError::Io)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("generator exited with {}", output.status)
            } else {
                stderr
            };
            return Err(GenerationError::Failed(message));
        }

        let mut responses = Vec::new();
        for line in output.stdout.as_slice().lines() {
            let line = line.map_err(GenerationError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            responses.push(serde_json::from_str::<PluginResponse>(&line)?);
        }

        debug!(lines = responses.len(), "generator finished");
        Ok(responses)
    }
}

/// Checks if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = path.metadata() {
            return meta.is_file() && meta.permissions().mode() & 0o111 != 0;
        }
    }

    #[cfg(windows)]
    {
        if let Some(ext) = path.extension() {
            return path.is_file() && (ext == "exe" || ext == "bat" || ext == "cmd");
        }
    }

    false
}
