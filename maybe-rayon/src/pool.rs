use core::num::NonZeroUsize;

#[cfg(feature = "parallel")]
pub use rayon::ThreadPoolBuildError as PoolBuildError;

/// Building a serial "pool" cannot fail.
#[cfg(not(feature = "parallel"))]
pub type PoolBuildError = core::convert::Infallible;

/// Run `op` on a worker pool built for this call alone.
///
/// The pool has `num_threads` workers, or rayon's default count when `None`
/// (`RAYON_NUM_THREADS`, else one per core). It is torn down before `install`
/// returns, and every parallel iterator started inside `op` has completed by then.
#[cfg(feature = "parallel")]
pub fn install<R, F>(num_threads: Option<NonZeroUsize>, op: F) -> Result<R, PoolBuildError>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    // Zero asks rayon for its default size without starting the global pool.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads.map_or(0, NonZeroUsize::get))
        .thread_name(|idx| format!("tpose-worker-{idx}"))
        .build()?;
    Ok(pool.install(op))
}

/// Without the `parallel` feature every call runs on the current thread and
/// `num_threads` is ignored.
#[cfg(not(feature = "parallel"))]
pub fn install<R, F>(_num_threads: Option<NonZeroUsize>, op: F) -> Result<R, PoolBuildError>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    Ok(op())
}

/// Number of workers a parallel iterator started here would use.
#[cfg(feature = "parallel")]
#[must_use]
pub fn current_num_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(not(feature = "parallel"))]
#[must_use]
pub const fn current_num_threads() -> usize {
    1
}
