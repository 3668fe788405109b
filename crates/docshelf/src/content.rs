//! Deferred content handles
//!
//! A [`DeferredLoader`] captures how to produce a document's body without
//! producing it. Loaders are invoked only by the [`Resolver`](crate::Resolver).

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed error returned by loader implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future returned by a loader invocation.
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<Content, BoxError>> + Send>>;

/// Type alias for loader function pointers to reduce complexity
pub type LoaderFnPtr = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// An opaque renderable unit handed to the rendering collaborator.
///
/// Cheap to clone; the body is never inspected here.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Content(Arc<str>);

impl Content {
    /// Wrap a document body.
    pub fn new(body: impl Into<Arc<str>>) -> Self {
        Self(body.into())
    }

    /// The body as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Content({} bytes)", self.0.len())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Content {
    fn from(body: String) -> Self {
        Self::new(body)
    }
}

impl From<&str> for Content {
    fn from(body: &str) -> Self {
        Self::new(body)
    }
}

/// A handle that, when invoked, asynchronously produces a document body.
#[derive(Clone)]
pub struct DeferredLoader {
    func: LoaderFnPtr,
}

impl DeferredLoader {
    /// Wrap an async closure.
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Content, BoxError>> + Send + 'static,
    {
        Self {
            func: Arc::new(move || Box::pin(func()) as LoadFuture),
        }
    }

    /// A loader that always yields `body`.
    pub fn from_static(body: impl Into<Arc<str>>) -> Self {
        let content = Content::new(body);
        Self::new(move || {
            let content = content.clone();
            async move { Ok::<_, BoxError>(content) }
        })
    }

    /// A loader that reads `path` as UTF-8 text.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path: Arc<PathBuf> = Arc::new(path.into());
        Self::new(move || {
            let path = Arc::clone(&path);
            async move {
                let body = tokio::fs::read_to_string(path.as_path()).await?;
                Ok::<_, BoxError>(Content::from(body))
            }
        })
    }

    /// Start the load. Nothing happens until the returned future is polled.
    pub fn invoke(&self) -> LoadFuture {
        (self.func)()
    }
}

impl fmt::Debug for DeferredLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeferredLoader(<fn>)")
    }
}
