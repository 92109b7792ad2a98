use anyhow::Result;
use async_trait::async_trait;

use crate::{Context, Id};

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Insert<T> {
    type Draft;
    async fn insert(&self, ctx: &Context, draft: Self::Draft) -> Result<T>;
}

/// Partial update: fields absent from the patch are kept.
#[async_trait]
pub trait Update<T> {
    type Patch;
    async fn update(&self, id: Id, patch: Self::Patch) -> Result<T>;
}

#[async_trait]
pub trait Retrieve<T> {
    async fn retrieve(&self, id: Id) -> Result<T>;
}

/// Deleting an id that does not exist is not an error.
#[async_trait]
pub trait Delete<T> {
    async fn delete(&self, id: Id) -> Result<()>;
}
