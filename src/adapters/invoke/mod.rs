//! Downstream function dispatch
//!
//! The hourly trigger fans out one fetch per active city. Dispatch is
//! fire-and-forget; each fetch succeeds or fails on its own.

pub mod lambda;

pub use lambda::LambdaInvoker;

use async_trait::async_trait;

use crate::domain::Result;

/// Dispatcher for per-city fetch invocations
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Dispatch one asynchronous fetch for one city
    ///
    /// Returns as soon as the invocation is accepted; the fetch outcome
    /// is not observed here.
    ///
    /// # Errors
    ///
    /// Returns an invocation error if the dispatch is not accepted.
    async fn dispatch_fetch(&self, city_id: i64) -> Result<()>;
}
