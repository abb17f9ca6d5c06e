//! Make sure the environment can run a benchmark at all
//!
//! These checks run before anything else. Any failure is reported as
//! `UNKNOWN`, since we never got far enough to learn anything about the
//! cluster.

use std::fmt;
use std::path::PathBuf;
use std::result::Result as StdResult;

use nix::unistd::{geteuid, Uid};

use crate::config::Config;

#[derive(Debug, From)]
pub enum PreflightError {
    /// The effective user is not root
    #[from(ignore)]
    NotRoot(Uid),
    /// A required executable is not on `$PATH`
    MissingTool(MissingTool),
}

impl fmt::Display for PreflightError {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        match *self {
            PreflightError::NotRoot(uid) => write!(f, "must be run as root (effective uid is {})", uid),
            PreflightError::MissingTool(ref e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub struct MissingTool {
    pub name: String,
    pub error: which::Error,
}

impl fmt::Display for MissingTool {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        write!(f, "required tool '{}' not found: {}", self.name, self.error)
    }
}

pub type Result<T> = StdResult<T, PreflightError>;

/// Run every preflight check, stopping at the first failure
pub fn run(config: &Config) -> Result<()> {
    check_privilege(config)?;
    let found = check_tools(config)?;
    debug!("preflight ok, tools: {:?}", found);
    Ok(())
}

pub fn check_privilege(config: &Config) -> Result<()> {
    if config.require_root {
        check_uid(geteuid())
    } else {
        Ok(())
    }
}

fn check_uid(uid: Uid) -> Result<()> {
    if uid.is_root() {
        Ok(())
    } else {
        Err(PreflightError::NotRoot(uid))
    }
}

/// Resolve every required tool, returning where each one lives
pub fn check_tools(config: &Config) -> Result<Vec<PathBuf>> {
    config
        .required_tools
        .iter()
        .map(|name| {
            which::which(name).map_err(|error| {
                PreflightError::from(MissingTool {
                    name: name.clone(),
                    error,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use nix::unistd::Uid;

    use super::{check_privilege, check_tools, check_uid, PreflightError};
    use crate::config::Config;

    fn config_with_tools(tools: &[&str]) -> Config {
        Config {
            required_tools: tools.iter().map(|t| t.to_string()).collect(),
            require_root: false,
            ..Config::default()
        }
    }

    #[test]
    fn root_passes_and_others_fail() {
        assert!(check_uid(Uid::from_raw(0)).is_ok());
        match check_uid(Uid::from_raw(1000)) {
            Err(PreflightError::NotRoot(uid)) => assert_eq!(uid.as_raw(), 1000),
            other => panic!("expected NotRoot, got {:?}", other),
        }
    }

    #[test]
    fn privilege_check_can_be_disabled() {
        let config = config_with_tools(&[]);
        assert!(check_privilege(&config).is_ok());
    }

    #[test]
    fn finds_tools_on_path() {
        let found = check_tools(&config_with_tools(&["sh"])).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("sh"));
    }

    #[test]
    fn names_the_missing_tool() {
        let err = check_tools(&config_with_tools(&["sh", "definitely-not-a-real-tool-xyz"]))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("required tool 'definitely-not-a-real-tool-xyz' not found"));
    }
}
