//! Concurrent loading of reference records for form option lists.
//!
//! A form that depends on several lookup entities fetches all of them at once
//! and renders only when every fetch succeeded. One failure fails the join so
//! the page shows a single load error instead of partially populated selects.

#[cfg(test)]
#[path = "reference_test.rs"]
mod reference_test;

use std::future::Future;

use futures::future::try_join_all;
use gateway::EntityKind;

use crate::entity::ReferenceOptions;
use crate::error::AppError;
use crate::net::types::Record;

pub async fn join_reference_options<F, Fut>(kinds: &[EntityKind], fetch: F) -> Result<ReferenceOptions, AppError>
where
    F: Fn(EntityKind) -> Fut,
    Fut: Future<Output = Result<Vec<Record>, AppError>>,
{
    let loads = kinds.iter().map(|&kind| {
        let pending = fetch(kind);
        async move { pending.await.map(|records| (kind, records)) }
    });
    Ok(try_join_all(loads).await?.into_iter().collect())
}
