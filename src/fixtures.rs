use std::{
    collections::{btree_map, BTreeMap},
    env, fs, io,
    path::{Path, PathBuf},
};

/// Fixtures whose name starts with this character are private and never loaded.
pub const SKIP_PREFIX: char = '_';

/// Environment variable overriding [`default_dir`].
pub const FIXTURES_ENV: &str = "DEFLATE_CONFORMANCE_FIXTURES";

/// Name-keyed collection of fixture payloads, iterated in lexicographic name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    entries: BTreeMap<String, Vec<u8>>,
}

impl Fixtures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fixture, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), data.into());
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

impl<N: Into<String>, D: Into<Vec<u8>>> FromIterator<(N, D)> for Fixtures {
    fn from_iter<T: IntoIterator<Item = (N, D)>>(iter: T) -> Self {
        let mut fixtures = Fixtures::new();
        for (name, data) in iter {
            fixtures.insert(name, data);
        }
        fixtures
    }
}

/// Iterator over `(name, data)` pairs of a [`Fixtures`] collection.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Vec<u8>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Fixtures {
    type Item = (&'a str, &'a [u8]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Directory holding the checked-in fixture corpus.
pub fn default_dir() -> PathBuf {
    match env::var_os(FIXTURES_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
    }
}

/// Loads every fixture in `dir`.
///
/// Entries are visited in file name order. The fixture name is the file name with its last
/// extension removed; names starting with [`SKIP_PREFIX`] are skipped. Symbolic links are
/// followed; anything that does not resolve to a regular file is ignored. The first I/O error,
/// including a dangling link, aborts loading.
pub fn load_fixtures(dir: impl AsRef<Path>) -> io::Result<Fixtures> {
    let dir = dir.as_ref();

    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut fixtures = Fixtures::new();
    for entry in entries {
        let path = entry.path();
        if !fs::metadata(&path)?.is_file() {
            log::trace!("Skipping {}: not a file", path.display());
            continue;
        }

        let name = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };
        if name.starts_with(SKIP_PREFIX) {
            log::trace!("Skipping private fixture {}", path.display());
            continue;
        }

        let data = fs::read(&path)?;
        log::trace!("Loaded fixture {:?} ({} bytes)", name, data.len());
        fixtures.insert(name, data);
    }

    log::debug!("Loaded {} fixtures from {}", fixtures.len(), dir.display());
    Ok(fixtures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, data: &[u8]) {
        fs::write(dir.join(name), data).unwrap();
    }

    #[test]
    fn skips_private() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", b"aaaa");
        write(dir.path(), "_skip.txt", b"skipped");

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures.get("a"), Some(&b"aaaa"[..]));
        assert!(!fixtures.contains("_skip"));
    }

    #[test]
    fn strips_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sample.bin", &[0, 1, 2, 3]);
        write(dir.path(), "_private.bin", &[4, 5, 6, 7]);
        write(dir.path(), "noext", b"x");
        write(dir.path(), "archive.tar.gz", b"y");

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(
            fixtures.names().collect::<Vec<_>>(),
            ["archive.tar", "noext", "sample"]
        );
        assert_eq!(fixtures.get("sample"), Some(&[0, 1, 2, 3][..]));
        assert!(!fixtures.contains("_private"));
    }

    #[test]
    fn ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(dir.path(), "file.txt", b"");

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.names().collect::<Vec<_>>(), ["file"]);
        assert_eq!(fixtures.get("file"), Some(&[][..]));
    }

    #[test]
    fn duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "dup.a", b"first");
        write(dir.path(), "dup.b", b"second");

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.len(), 1);
        assert_eq!(fixtures.get("dup"), Some(&b"second"[..]));
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(target.path(), "real.bin", b"data");
        std::os::unix::fs::symlink(target.path().join("real.bin"), dir.path().join("linked.bin"))
            .unwrap();

        let fixtures = load_fixtures(dir.path()).unwrap();
        assert_eq!(fixtures.names().collect::<Vec<_>>(), ["linked"]);
        assert_eq!(fixtures.get("linked"), Some(&b"data"[..]));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", b"aaaa");
        std::os::unix::fs::symlink(dir.path().join("missing.bin"), dir.path().join("dangling.bin"))
            .unwrap();

        let err = load_fixtures(dir.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_fixtures(dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn sorted_iteration() {
        let fixtures: Fixtures = [("b", "2"), ("c", "3"), ("a", "1")].into_iter().collect();
        let names: Vec<_> = fixtures.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
