use crate::error::Result;
use crate::{QueryOptions, SearchPage};
use async_trait::async_trait;
use std::sync::Arc;

/// The managed search service, seen only through its query interface.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, options: &QueryOptions) -> Result<SearchPage>;
}

#[async_trait]
impl<T> SearchBackend for Arc<T>
where
    T: SearchBackend + ?Sized,
{
    async fn search(&self, options: &QueryOptions) -> Result<SearchPage> {
        (**self).search(options).await
    }
}
