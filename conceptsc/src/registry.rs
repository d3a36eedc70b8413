//! The I/O-factory registry: a map from file-extension string to
//! `(reader, writer)`, a lazily-initialised, read-mostly lookup table
//! behind an `RwLock`, exposed as an explicit parameter to
//! `parse`/`save` rather than a bare global; [`DEFAULT`] is kept only
//! as a convenience for callers who don't need a custom one.
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use concepts_core::ImplicationalSystem;
use parking_lot::RwLock;

use crate::error::ConceptsIoError;
use crate::format;

/// Parses text in some registered format into an [`ImplicationalSystem`].
pub type Reader = fn(&str) -> Result<ImplicationalSystem<String>, ConceptsIoError>;
/// Renders an [`ImplicationalSystem`] into some registered format's text.
pub type Writer = fn(&ImplicationalSystem<String>) -> String;

/// A process-wide-shaped, but explicitly instantiable, `extension ->
/// (reader, writer)` table.
#[derive(Clone)]
pub struct IoFactory {
    readers: Arc<RwLock<BTreeMap<String, Reader>>>,
    writers: Arc<RwLock<BTreeMap<String, Writer>>>,
}

impl IoFactory {
    /// An empty factory with no extensions registered.
    pub fn empty() -> Self {
        Self {
            readers: Arc::new(RwLock::new(BTreeMap::new())),
            writers: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// A factory with the line-oriented IS text format registered
    /// under the `is` extension.
    pub fn with_defaults() -> Self {
        let factory = Self::empty();
        factory.register("is", format::parse_is, format::write_is);
        factory
    }

    /// Registers a reader/writer pair for `extension`, overwriting any
    /// existing registration.
    pub fn register(&self, extension: &str, reader: Reader, writer: Writer) {
        self.readers.write().insert(extension.to_owned(), reader);
        self.writers.write().insert(extension.to_owned(), writer);
    }

    /// The reader registered for `extension`, if any.
    pub fn reader(&self, extension: &str) -> Option<Reader> {
        self.readers.read().get(extension).copied()
    }

    /// The writer registered for `extension`, if any.
    pub fn writer(&self, extension: &str) -> Option<Writer> {
        self.writers.read().get(extension).copied()
    }
}

impl Default for IoFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

lazy_static::lazy_static! {
    /// The default, lazily-initialised factory [`parse`]/[`save`] fall
    /// back to when called without an explicit one.
    pub static ref DEFAULT: IoFactory = IoFactory::with_defaults();
}

fn extension_of(path: &Path) -> Result<&str, ConceptsIoError> {
    path.extension()
        .and_then(|e| e.to_str())
        .ok_or(ConceptsIoError::NoExtension)
}

/// Reads `path`, dispatching on its extension to a reader in
/// `factory`. The file handle is scoped to [`std::fs::read_to_string`]
/// and released on every exit path, success or failure, by its own
/// `Drop`.
pub fn parse(path: &Path, factory: &IoFactory) -> Result<ImplicationalSystem<String>, ConceptsIoError> {
    let extension = extension_of(path)?;
    let reader = factory
        .reader(extension)
        .ok_or_else(|| ConceptsIoError::UnknownExtension(extension.to_owned()))?;
    let text = std::fs::read_to_string(path)?;
    reader(&text)
}

/// Writes `is` to `path`, dispatching on its extension to a writer in
/// `factory`.
pub fn save(
    is: &ImplicationalSystem<String>,
    path: &Path,
    factory: &IoFactory,
) -> Result<(), ConceptsIoError> {
    let extension = extension_of(path)?;
    let writer = factory
        .writer(extension)
        .ok_or_else(|| ConceptsIoError::UnknownExtension(extension.to_owned()))?;
    std::fs::write(path, writer(is))?;
    Ok(())
}

/// [`parse`] against the lazily-initialised [`DEFAULT`] factory.
pub fn parse_default(path: &Path) -> Result<ImplicationalSystem<String>, ConceptsIoError> {
    parse(path, &DEFAULT)
}

/// [`save`] against the lazily-initialised [`DEFAULT`] factory.
pub fn save_default(is: &ImplicationalSystem<String>, path: &Path) -> Result<(), ConceptsIoError> {
    save(is, path, &DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_extension_is_an_error() {
        let factory = IoFactory::empty();
        let err = parse(Path::new("foo.unknown"), &factory).unwrap_err();
        assert!(matches!(err, ConceptsIoError::UnknownExtension(ref e) if e == "unknown"));
    }

    #[test]
    fn a_path_with_no_extension_is_an_error() {
        let factory = IoFactory::with_defaults();
        let err = parse(Path::new("noext"), &factory).unwrap_err();
        assert!(matches!(err, ConceptsIoError::NoExtension));
    }

    #[test]
    fn save_then_parse_round_trips_through_the_filesystem() {
        let dir = std::env::temp_dir().join(format!("conceptsc-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sample.is");

        let mut is = ImplicationalSystem::new();
        is.add_all_elements(["a", "b"].map(str::to_owned));
        is.add_rule(concepts_core::Rule::new(
            ["a"].map(str::to_owned).into_iter().collect(),
            ["b"].map(str::to_owned).into_iter().collect(),
        ));

        save_default(&is, &path).unwrap();
        let parsed = parse_default(&path).unwrap();
        assert_eq!(parsed.elements(), is.elements());
        assert_eq!(parsed.rules(), is.rules());

        std::fs::remove_dir_all(&dir).ok();
    }
}
