//! `TokenStore` implementation backed by a file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use metricboard_app::ports::TokenStore;
use metricboard_domain::error::StorageError;
use metricboard_domain::session::SessionToken;

/// Keeps the session token as the whole content of one file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open for writing, creating the file owner-only from the start.
#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten a pre-existing file too.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<SessionToken>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(SessionToken::parse(&content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &SessionToken) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = open_private(&self.path)?;
        file.write_all(token.as_str().as_bytes())?;
        tracing::debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "session token removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
        FileTokenStore::new(dir.path().join("nested").join("access_token"))
    }

    #[test]
    fn should_return_none_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().unwrap().is_none());
    }

    #[test]
    fn should_roundtrip_token_and_create_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let token = SessionToken::parse("abc.def.ghi").unwrap();

        store.save(&token).unwrap();

        assert_eq!(store.load().unwrap(), Some(token));
    }

    #[test]
    fn should_treat_blank_file_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");
        fs::write(&path, "\n").unwrap();

        assert!(FileTokenStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn should_clear_token_and_tolerate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&SessionToken::parse("tok").unwrap()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn should_restrict_file_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&SessionToken::parse("tok").unwrap()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn should_tighten_existing_file_and_replace_its_content() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");
        fs::write(&path, "an-older-and-longer-token").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        let store = FileTokenStore::new(&path);

        store.save(&SessionToken::parse("tok").unwrap()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "tok");
    }

    #[test]
    fn should_report_io_cause_when_clear_fails() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be removed with `remove_file`
        let store = FileTokenStore::new(dir.path());

        let err = store.clear().unwrap_err();

        assert!(err.to_string().starts_with("failed to access token file: "));
    }
}
