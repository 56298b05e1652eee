//! Viewport capabilities the driver needs from its environment

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::ViewportError;
use crate::scroll::{Dimensions, Position, Target, Viewport};

/// Read and write access to scrollable surfaces
#[async_trait]
pub trait ViewportHost: Send + Sync {
    /// Current scroll offset and scene size of `target`
    async fn read_viewport(&self, target: &Target) -> Result<Viewport, ViewportError>;

    /// Move the scroll offset of `target`
    async fn set_viewport(&self, target: &Target, position: Position) -> Result<(), ViewportError>;
}

/// In-memory viewports keyed by target
///
/// Used by the `simulate` command and by tests. Writes are stored as given,
/// without clamping.
#[derive(Debug, Default)]
pub struct MemoryViewport {
    surfaces: Mutex<HashMap<Target, Viewport>>,
}

impl MemoryViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a surface
    pub fn with_surface(self, target: Target, viewport: Viewport) -> Self {
        self.insert(target, viewport);
        self
    }

    pub fn insert(&self, target: Target, viewport: Viewport) {
        self.lock().insert(target, viewport);
    }

    pub fn remove(&self, target: &Target) -> Option<Viewport> {
        self.lock().remove(target)
    }

    pub fn offset(&self, target: &Target) -> Option<Position> {
        self.lock().get(target).map(|v| v.offset)
    }

    pub fn scene(&self, target: &Target) -> Option<Dimensions> {
        self.lock().get(target).map(|v| v.scene)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Target, Viewport>> {
        // Values are plain data, a poisoned map is still consistent
        self.surfaces.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn missing(target: &Target) -> ViewportError {
        match target {
            Target::Window => ViewportError::Unavailable("no window registered".to_string()),
            Target::Element(name) => ViewportError::ElementNotFound(name.clone()),
        }
    }
}

#[async_trait]
impl ViewportHost for MemoryViewport {
    async fn read_viewport(&self, target: &Target) -> Result<Viewport, ViewportError> {
        self.lock()
            .get(target)
            .copied()
            .ok_or_else(|| Self::missing(target))
    }

    async fn set_viewport(&self, target: &Target, position: Position) -> Result<(), ViewportError> {
        match self.lock().get_mut(target) {
            Some(viewport) => {
                viewport.offset = position;
                Ok(())
            }
            None => Err(Self::missing(target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryViewport {
        MemoryViewport::new().with_surface(
            Target::Window,
            Viewport::new(Position::new(0.0, 500.0), Dimensions::new(800.0, 2000.0)),
        )
    }

    #[tokio::test]
    async fn test_read_registered_surface() {
        let viewport = host().read_viewport(&Target::Window).await.unwrap();
        assert_eq!(viewport.offset, Position::new(0.0, 500.0));
        assert_eq!(viewport.scene, Dimensions::new(800.0, 2000.0));
    }

    #[tokio::test]
    async fn test_missing_element() {
        let err = host()
            .read_viewport(&Target::element("sidebar"))
            .await
            .unwrap_err();
        assert_eq!(err, ViewportError::ElementNotFound("sidebar".to_string()));

        let err = host()
            .set_viewport(&Target::element("sidebar"), Position::default())
            .await
            .unwrap_err();
        assert_eq!(err, ViewportError::ElementNotFound("sidebar".to_string()));
    }

    #[tokio::test]
    async fn test_write_updates_offset_only() {
        let host = host();
        host.set_viewport(&Target::Window, Position::new(3.0, 120.0))
            .await
            .unwrap();
        assert_eq!(host.offset(&Target::Window), Some(Position::new(3.0, 120.0)));
        assert_eq!(host.scene(&Target::Window), Some(Dimensions::new(800.0, 2000.0)));
    }
}
