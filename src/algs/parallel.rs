//! Worker-pool plumbing for the data-parallel stages.
//!
//! The classifier and the preprocessing copy are the only parallel code
//! paths. When the caller pins a worker count, the whole run executes
//! inside a dedicated pool so results do not depend on the ambient global
//! pool's configuration.

#[cfg(feature = "rayon")]
pub(crate) fn run_with_pool<F, R>(num_threads: Option<usize>, f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    match num_threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .expect("Failed to build simplification worker pool")
            .install(f),
        None => f(),
    }
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn run_with_pool<F, R>(_num_threads: Option<usize>, f: F) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    f()
}
