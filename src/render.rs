//! Renderer surface.
//!
//! Thin wrappers over the toolkit's renderer abstraction. A renderer is
//! autocreated for a backend and destroyed with it on the native side;
//! textures created through a renderer are binding-owned and go through
//! the same lifetime tracker as everything else.

use crate::backend::Backend;
use crate::errors::{BindingError, Result};
use crate::handle::{HandleType, RawHandle};
use crate::lifetime::Owner;
use crate::registry::Registry;

/// Renderer attached to one backend. Native-owned: it dies with the
/// backend, the binding layer only observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    handle: RawHandle,
}

impl Renderer {
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn is_valid(&self, registry: &Registry) -> bool {
        registry.is_valid(self.handle)
    }
}

/// GPU texture created from pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    handle: RawHandle,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Registry {
    /// Autocreate a renderer for a backend.
    pub fn create_renderer(&mut self, backend: &Backend) -> Result<Renderer> {
        self.ensure_valid(backend.handle())?;
        let addr = self
            .native_mut()
            .create_renderer(backend.handle().addr())
            .map_err(|message| BindingError::backend_error(backend.variant(), message))?;
        let handle = self.wrap(addr, HandleType::Renderer);
        tracing::debug!("created renderer {} for {}", handle, backend.handle());
        Ok(Renderer { handle })
    }

    /// Upload tightly packed ARGB8888 pixels into a new texture.
    pub fn create_texture(
        &mut self,
        renderer: &Renderer,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Texture> {
        self.ensure_valid(renderer.handle)?;
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(BindingError::invalid_config(
                "texture",
                "dimensions must be non-zero",
            ));
        }
        if pixels.len() != expected {
            return Err(BindingError::invalid_config(
                "texture",
                format!(
                    "pixel buffer is {} bytes, expected {} for {}x{} argb8888",
                    pixels.len(),
                    expected,
                    width,
                    height
                ),
            ));
        }
        let addr = self
            .native_mut()
            .create_texture(renderer.handle.addr(), width, height)
            .map_err(|message| {
                BindingError::invalid_config("texture", message)
            })?;
        let handle = self.wrap(addr, HandleType::Texture);
        self.track(handle, Owner::Binding)?;
        Ok(Texture {
            handle,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendConfig, HeadlessConfig};
    use crate::native::StubToolkit;

    #[test]
    fn test_texture_pixel_buffer_validation() {
        let toolkit = StubToolkit::new();
        let control = toolkit.control();
        let mut registry = Registry::new(Box::new(toolkit));
        let backend = registry
            .create_backend(&BackendConfig::Headless(HeadlessConfig::default()))
            .unwrap();
        let renderer = registry.create_renderer(&backend).unwrap();
        control.calls().clear();

        // Short buffer is rejected before any native call.
        let err = registry
            .create_texture(&renderer, 2, 2, &[0u8; 8])
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(control.calls().is_empty());

        let texture = registry
            .create_texture(&renderer, 2, 2, &[0u8; 16])
            .unwrap();
        assert_eq!(texture.dimensions(), (2, 2));
        assert!(registry.is_valid(texture.handle()));
    }

    #[test]
    fn test_renderer_dies_with_backend() {
        let toolkit = StubToolkit::new();
        let mut registry = Registry::new(Box::new(toolkit));
        let backend = registry
            .create_backend(&BackendConfig::Headless(HeadlessConfig::default()))
            .unwrap();
        let renderer = registry.create_renderer(&backend).unwrap();
        assert!(renderer.is_valid(&registry));

        registry.destroy(backend.handle()).unwrap();
        assert!(!renderer.is_valid(&registry));
    }
}
