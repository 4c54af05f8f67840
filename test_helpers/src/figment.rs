//! Jailed configuration scenarios for `hello-verifier` tests.
//!
//! [`JailSetup`] describes the files, `HELLO_VERIFIER_*` settings, and working
//! directory a configuration test needs, then runs the test body inside a
//! `figment::Jail` so none of it leaks into other tests.

use std::fmt::Display;
use std::path::Path;

use anyhow::{Result, anyhow};

/// Configuration file discovered by `hello-verifier` when `--config` is absent.
pub const CONFIG_FILE: &str = "hello_verifier.toml";

/// Prefix applied to keys passed to [`JailSetup::setting`].
pub const ENV_PREFIX: &str = "HELLO_VERIFIER_";

/// Files, environment, and working directory for one jailed test.
#[derive(Debug, Default, Clone)]
pub struct JailSetup {
    files: Vec<(String, String)>,
    env: Vec<(String, String)>,
    cwd: Option<String>,
}

impl JailSetup {
    /// Starts from an empty jail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `contents` to [`CONFIG_FILE`] in the jail root.
    #[must_use]
    pub fn config(self, contents: &str) -> Self {
        self.file(CONFIG_FILE, contents)
    }

    /// Writes `contents` to `path`, relative to the jail root.
    #[must_use]
    pub fn file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((path.to_owned(), contents.to_owned()));
        self
    }

    /// Sets `HELLO_VERIFIER_<KEY>` to `value`.
    #[must_use]
    pub fn setting(self, key: &str, value: &str) -> Self {
        let name = format!("{ENV_PREFIX}{}", key.to_ascii_uppercase());
        self.env(&name, value)
    }

    /// Sets an arbitrary environment variable.
    #[must_use]
    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.env.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Runs the body from `dir`, created under the jail root if missing.
    #[must_use]
    pub fn cwd(mut self, dir: &str) -> Self {
        self.cwd = Some(dir.to_owned());
        self
    }

    /// Prepares the jail and runs `body` inside it.
    ///
    /// # Errors
    ///
    /// Returns an error when the jail cannot be prepared or `body` fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use hello_verifier_test_helpers::figment::JailSetup;
    ///
    /// let value = JailSetup::new()
    ///     .setting("case_name", "FromEnv")
    ///     .run(|| std::env::var("HELLO_VERIFIER_CASE_NAME"))?;
    /// assert_eq!(value, "FromEnv");
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn run<T, E, F>(self, body: F) -> Result<T>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = None;
        figment::Jail::try_with(|jail| {
            let root = jail.directory().to_path_buf();
            for (path, contents) in &self.files {
                if let Some(parent) = Path::new(path).parent() {
                    std::fs::create_dir_all(root.join(parent)).map_err(to_figment)?;
                }
                jail.create_file(path, contents)?;
            }
            for (name, value) in &self.env {
                jail.set_env(name, value);
            }
            if let Some(dir) = &self.cwd {
                let target = root.join(dir);
                std::fs::create_dir_all(&target).map_err(to_figment)?;
                std::env::set_current_dir(&target).map_err(to_figment)?;
            }
            slot = Some(body().map_err(to_figment)?);
            Ok(())
        })
        .map_err(|err| anyhow!("jailed test failed: {err}"))?;
        slot.ok_or_else(|| anyhow!("jailed test produced no value"))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "map_err hands over owned errors"
)]
fn to_figment<E: Display>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
