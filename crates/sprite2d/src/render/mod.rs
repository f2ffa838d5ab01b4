//! Windowed rendering context
//!
//! [`RenderContext`] owns the two display-side resources, the OS window
//! (through the [`WindowBackend`] seam) and the software canvas, for the
//! program's lifetime. Creation failures are distinguishable per sub-step
//! ([`ContextError::Backend`] / [`ContextError::Window`] /
//! [`ContextError::Renderer`]); teardown runs in reverse-acquisition order
//! and is idempotent.

pub mod canvas;
pub mod window;

pub use canvas::Canvas;
pub use window::{MinifbWindow, WindowBackend};

use crate::assets::ImageData;
use crate::foundation::handle::ResourceHandle;
use crate::foundation::math::Rect;
use crate::input::RawEvent;
use thiserror::Error;

/// Display initialization and presentation errors
#[derive(Error, Debug)]
pub enum ContextError {
    /// Windowing backend failed to initialize
    #[error("window backend initialization failed: {0}")]
    Backend(String),

    /// OS window could not be created
    #[error("window creation failed: {0}")]
    Window(String),

    /// Renderer (framebuffer) could not be acquired
    #[error("renderer acquisition failed: {0}")]
    Renderer(String),

    /// A finished frame could not be published
    #[error("frame presentation failed: {0}")]
    Present(String),
}

/// Owns the window and the canvas; presents frames to the screen
pub struct RenderContext {
    window: ResourceHandle<Box<dyn WindowBackend>>,
    canvas: Canvas,
    background: u32,
    destroyed: bool,
}

impl RenderContext {
    /// Create a window of the given size and the canvas backing it.
    ///
    /// Sub-step failures stay distinguishable: backend initialization and
    /// window creation report through [`MinifbWindow::open`], framebuffer
    /// acquisition through [`ContextError::Renderer`]. A window that was
    /// already created when a later step fails is released exactly once.
    pub fn create(
        title: &str,
        width: u32,
        height: u32,
        background: u32,
    ) -> Result<Self, ContextError> {
        log::info!("creating {}x{} window '{}'", width, height, title);
        let backend = MinifbWindow::open(title, width, height)?;
        Self::from_backend(Box::new(backend), width, height, background)
    }

    /// Build a context over an already-created window backend.
    ///
    /// This is the seam used by tests and headless runs; the backend is
    /// owned from this point on and released with the context.
    pub fn from_backend(
        backend: Box<dyn WindowBackend>,
        width: u32,
        height: u32,
        background: u32,
    ) -> Result<Self, ContextError> {
        let window = ResourceHandle::new(backend, "window");
        // If canvas acquisition fails the window handle drops here, which
        // releases the already-created window exactly once.
        let canvas = Canvas::new(width, height)?;

        Ok(Self {
            window,
            canvas,
            background,
            destroyed: false,
        })
    }

    /// Drawable size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// The full drawable as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        self.canvas.bounds()
    }

    /// The canvas pixels, for inspection
    pub fn buffer(&self) -> &[u32] {
        self.canvas.buffer()
    }

    /// Whether [`RenderContext::destroy`] has run
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Start a frame by clearing the drawable to the background color
    pub fn begin_frame(&mut self) {
        self.canvas.clear(self.background);
    }

    /// Fill a rectangle, clipped to the drawable
    pub fn fill_rect(&mut self, rect: &Rect, color: u32) {
        self.canvas.fill_rect(rect, color);
    }

    /// Draw a one-pixel rectangle outline, clipped to the drawable
    pub fn draw_rect(&mut self, rect: &Rect, color: u32) {
        self.canvas.draw_rect(rect, color);
    }

    /// Composite an image at the dest rect's origin, or at the top-left of
    /// the drawable when no dest is given. Degenerate input no-ops safely.
    pub fn draw_image(&mut self, image: &ImageData, dest: Option<Rect>) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let (dx, dy) = match dest {
            Some(rect) if rect.is_empty() => return,
            Some(rect) => (rect.x, rect.y),
            None => (0, 0),
        };
        self.canvas.blit(image, dx, dy);
    }

    /// Publish the frame to the window surface.
    ///
    /// All draw calls made since [`RenderContext::begin_frame`] are visible
    /// after this call and not before.
    pub fn present(&mut self) -> Result<(), ContextError> {
        match self.window.get_mut() {
            Some(window) => window.present(
                self.canvas.buffer(),
                self.canvas.width(),
                self.canvas.height(),
            ),
            None => {
                log::warn!("present called after destroy; dropping frame");
                Ok(())
            }
        }
    }

    /// Drain the input events pending at the instant of the call
    pub fn poll_events(&mut self) -> Vec<RawEvent> {
        self.window
            .get_mut()
            .map(|window| window.poll_events())
            .unwrap_or_default()
    }

    /// Change the window title
    pub fn set_title(&mut self, title: &str) {
        if let Some(window) = self.window.get_mut() {
            window.set_title(title);
        }
    }

    /// Release renderer and window in reverse-acquisition order.
    ///
    /// Idempotent; also run on drop.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        // Canvas memory goes with the context; the window is released now.
        self.window.release();
        log::info!("render context destroyed");
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        self.destroy();
    }
}
