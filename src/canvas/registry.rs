//! Surface registry: the headless stand-in for a document's element lookup.

use std::collections::HashMap;

use super::{ContextOptions, DrawContext, Surface, SurfaceProvider};

/// Surfaces keyed by id.
///
/// Homogeneous by default so tests can read their surfaces back
/// (`SurfaceRegistry<RecordingSurface>`); use `Box<dyn Surface>` to mix kinds.
pub struct SurfaceRegistry<S: Surface = Box<dyn Surface>> {
    surfaces: HashMap<String, S>,
}

impl<S: Surface> Default for SurfaceRegistry<S> {
    fn default() -> Self {
        Self {
            surfaces: HashMap::new(),
        }
    }
}

impl<S: Surface> SurfaceRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a surface under `id`.
    pub fn insert(&mut self, id: impl Into<String>, surface: S) -> Option<S> {
        self.surfaces.insert(id.into(), surface)
    }

    pub fn remove(&mut self, id: &str) -> Option<S> {
        self.surfaces.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&S> {
        self.surfaces.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

impl<S: Surface> SurfaceProvider for SurfaceRegistry<S> {
    fn surface_mut(&mut self, id: &str) -> Option<&mut dyn Surface> {
        match self.surfaces.get_mut(id) {
            Some(surface) => Some(surface),
            None => None,
        }
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn displayed_size(&self) -> Option<(u32, u32)> {
        (**self).displayed_size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn context_2d(&mut self, options: ContextOptions) -> Option<&mut dyn DrawContext> {
        (**self).context_2d(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{RasterSurface, RecordingSurface};

    #[test]
    fn test_insert_and_lookup() {
        let mut registry = SurfaceRegistry::new();
        assert!(registry.is_empty());
        registry.insert("a", RecordingSurface::new());
        assert!(registry.contains("a"));
        assert!(registry.surface_mut("a").is_some());
        assert!(registry.surface_mut("b").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mixed_surfaces() {
        let mut registry: SurfaceRegistry = SurfaceRegistry::new();
        registry.insert("rec", Box::new(RecordingSurface::new()));
        registry.insert("px", Box::new(RasterSurface::new(10, 10)));

        registry.surface_mut("px").unwrap().resize(20, 5);
        assert_eq!(registry.get("px").unwrap().size(), (20, 5));
        assert!(registry.remove("rec").is_some());
        assert!(!registry.contains("rec"));
    }
}
