//! Exactly-once release handles for externally-allocated resources
//!
//! Window backends and decoded images are owned through [`ResourceHandle`],
//! which guarantees that the underlying resource is released exactly once on
//! every exit path: either through an explicit [`ResourceHandle::release`]
//! call or, failing that, when the handle is dropped.

use std::fmt;

/// An owned, exactly-once-releasable handle to an external resource.
///
/// The handle stores the resource together with an optional releaser closure.
/// `release()` is idempotent: only the first call runs the releaser (or drops
/// the resource when no releaser was supplied); later calls are no-ops. The
/// `Drop` impl releases whatever has not been released explicitly.
pub struct ResourceHandle<T> {
    resource: Option<T>,
    releaser: Option<Box<dyn FnOnce(T)>>,
    label: String,
}

impl<T> ResourceHandle<T> {
    /// Wrap a resource whose release is simply dropping it.
    pub fn new(resource: T, label: impl Into<String>) -> Self {
        Self {
            resource: Some(resource),
            releaser: None,
            label: label.into(),
        }
    }

    /// Wrap a resource with a custom releaser, run exactly once.
    pub fn with_releaser(
        resource: T,
        label: impl Into<String>,
        releaser: impl FnOnce(T) + 'static,
    ) -> Self {
        Self {
            resource: Some(resource),
            releaser: Some(Box::new(releaser)),
            label: label.into(),
        }
    }

    /// Access the resource, or `None` once it has been released.
    pub fn get(&self) -> Option<&T> {
        self.resource.as_ref()
    }

    /// Mutable access to the resource, or `None` once it has been released.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.resource.as_mut()
    }

    /// Whether the underlying resource has already been released.
    pub fn is_released(&self) -> bool {
        self.resource.is_none()
    }

    /// The label this handle was created with, used for release tracing.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Release the underlying resource.
    ///
    /// Safe to call multiple times; only the first call has an effect.
    pub fn release(&mut self) {
        if let Some(resource) = self.resource.take() {
            log::debug!("releasing resource '{}'", self.label);
            if let Some(releaser) = self.releaser.take() {
                releaser(resource);
            }
        }
    }
}

impl<T> Drop for ResourceHandle<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> fmt::Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("label", &self.label)
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted_handle(count: &Rc<Cell<u32>>) -> ResourceHandle<u8> {
        let count = Rc::clone(count);
        ResourceHandle::with_releaser(7, "counted", move |_| count.set(count.get() + 1))
    }

    #[test]
    fn release_is_idempotent() {
        let count = Rc::new(Cell::new(0));
        let mut handle = counted_handle(&count);

        handle.release();
        handle.release();

        assert_eq!(count.get(), 1);
        assert!(handle.is_released());
        assert!(handle.get().is_none());
    }

    #[test]
    fn drop_releases_exactly_once() {
        let count = Rc::new(Cell::new(0));
        {
            let _handle = counted_handle(&count);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_after_explicit_release_does_not_release_again() {
        let count = Rc::new(Cell::new(0));
        {
            let mut handle = counted_handle(&count);
            handle.release();
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn get_returns_resource_until_released() {
        let mut handle = ResourceHandle::new(42u8, "plain");
        assert_eq!(handle.get(), Some(&42));
        handle.release();
        assert_eq!(handle.get(), None);
    }
}
