use crate::font::Font;
use crate::OverlapTextError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps font names, as used in [`Attributes::font`](crate::Attributes::font),
/// to loaded fonts
pub trait FontResolver {
    fn resolve(&mut self, name: &str) -> Result<Font, OverlapTextError>;
}

/// Loads fonts by name from a directory, looking for `<name>.ttf` and then
/// `<name>.otf`. Each font is only read from disk once.
#[derive(Debug)]
pub struct FontDirectory {
    root: PathBuf,
    cache: HashMap<String, Font>,
}

impl FontDirectory {
    pub fn new<P: Into<PathBuf>>(root: P) -> FontDirectory {
        FontDirectory {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find(&self, name: &str) -> Option<PathBuf> {
        ["ttf", "otf"]
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }
}

impl FontResolver for FontDirectory {
    fn resolve(&mut self, name: &str) -> Result<Font, OverlapTextError> {
        if let Some(font) = self.cache.get(name) {
            return Ok(font.clone());
        }

        let path = self
            .find(name)
            .ok_or_else(|| OverlapTextError::FontNotFound(name.to_string()))?;
        let font = Font::load(std::fs::read(&path)?)?;
        log::info!("loaded font `{name}` from {}", path.display());

        self.cache.insert(name.to_string(), font.clone());
        Ok(font)
    }
}

/// A resolver that knows no fonts, for views that never name one
#[derive(Debug, Default, Copy, Clone)]
pub struct NoFonts;

impl FontResolver for NoFonts {
    fn resolve(&mut self, name: &str) -> Result<Font, OverlapTextError> {
        Err(OverlapTextError::FontNotFound(name.to_string()))
    }
}
