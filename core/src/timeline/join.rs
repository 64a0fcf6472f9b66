//! Joins for fanned out upstream calls.
//!
//! Both wait for every future to finish, none is cancelled early, and results come back in
//! input order regardless of completion order. They differ only in what a failure does.

use std::future::Future;

use futures::future::join_all;

/// All-or-nothing join: if any future failed the whole join fails with the first error in
/// input order. Siblings of a failed future still run to completion, their results are
/// dropped.
pub async fn join_all_or_fail<I, F, T, E>(futures: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    join_all(futures).await.into_iter().collect()
}

/// Never-failing join: a failed future yields `T::default()` in its slot.
/// `on_failure` receives the input index and error of every failed future.
pub async fn join_all_degrading<I, F, T, E>(
    futures: I,
    mut on_failure: impl FnMut(usize, E),
) -> Vec<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    T: Default,
{
    join_all(futures)
        .await
        .into_iter()
        .enumerate()
        .map(|(idx, result)| match result {
            Ok(value) => value,
            Err(err) => {
                on_failure(idx, err);
                T::default()
            }
        })
        .collect()
}
