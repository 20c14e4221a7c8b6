use std::{env, ffi::OsString, io, path::PathBuf};

use anyhow::{anyhow, Result};

/// Environment variable overriding the data file location.
pub const DATA_PATH_VARIABLE: &str = "CHAOSCATCHER_DATA";

const DATA_FILE_NAME: &str = ".chaoscatcher.json";

/// Directory for application state that isn't user data, like logs.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = {
        #[cfg(windows)]
        {
            let mut path = env::var("APPDATA")
                .map(PathBuf::from)
                .map_err(|_| anyhow!("APPDATA should be present on Windows"))?;
            path.push("chaoscatcher");
            path
        }
        #[cfg(not(windows))]
        {
            let mut path = env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .map_err(|_| anyhow!("Couldn't find neither XDG_STATE_HOME nor HOME"))?;
            path.push("chaoscatcher");
            path
        }
    };

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

/// Resolves the data file from the `--data` flag, then [DATA_PATH_VARIABLE], then the home
/// directory.
pub fn resolve_data_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    data_path_from(flag, env::var_os(DATA_PATH_VARIABLE), home_dir())
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    let home = env::var_os("USERPROFILE");
    #[cfg(not(windows))]
    let home = env::var_os("HOME");
    home.filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn data_path_from(
    flag: Option<PathBuf>,
    variable: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = variable.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    home.map(|home| home.join(DATA_FILE_NAME)).ok_or_else(|| {
        anyhow!("Couldn't find a home directory. Pass --data or set {DATA_PATH_VARIABLE}")
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::data_path_from;

    #[test]
    fn test_flag_wins() {
        let path = data_path_from(
            Some("/tmp/flag.json".into()),
            Some("/tmp/env.json".into()),
            Some("/home/user".into()),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/flag.json"));
    }

    #[test]
    fn test_variable_before_home() {
        let path =
            data_path_from(None, Some("/tmp/env.json".into()), Some("/home/user".into())).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/env.json"));
    }

    #[test]
    fn test_empty_variable_is_ignored() {
        let path = data_path_from(None, Some("".into()), Some("/home/user".into())).unwrap();
        assert_eq!(path, PathBuf::from("/home/user/.chaoscatcher.json"));
    }

    #[test]
    fn test_nothing_to_go_on() {
        assert!(data_path_from(None, None, None).is_err());
    }
}
