//! Read side of the personalization collaborator.

use std::sync::Arc;

/// Anything that can report the user's current top interest categories.
///
/// Implementations must be cheap to query: the ranker calls
/// [`InterestSource::top_interests`] once per ranking pass.
pub trait InterestSource: Send + Sync {
    /// Categories the user cares most about, strongest first.
    fn top_interests(&self) -> Vec<String>;
}

/// An interest source that never reports anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterests;

impl InterestSource for NoInterests {
    fn top_interests(&self) -> Vec<String> {
        Vec::new()
    }
}

impl InterestSource for Vec<String> {
    fn top_interests(&self) -> Vec<String> {
        self.clone()
    }
}

impl<T: InterestSource + ?Sized> InterestSource for Arc<T> {
    fn top_interests(&self) -> Vec<String> {
        (**self).top_interests()
    }
}

impl<T: InterestSource + ?Sized> InterestSource for &T {
    fn top_interests(&self) -> Vec<String> {
        (**self).top_interests()
    }
}
