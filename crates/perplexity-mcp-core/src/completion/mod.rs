//! Chat completion against the Perplexity API
//!
//! Two execution modes share one `Transport`:
//! - `SyncExecutor`: a single POST that returns the answer
//! - `AsyncExecutor`: submit a job, then poll it with backoff
//!
//! `HttpTransport` talks to the real API; `MockTransport` replays scripted
//! responses for tests.

mod async_executor;
mod backoff;
mod error;
mod http;
mod mock;
mod sync_executor;
mod transport;

pub use async_executor::{AsyncExecutor, AsyncJob, AsyncOutcome, JobStatus, TIMEOUT_ADVISORY, UNKNOWN_FAILURE};
pub use backoff::{BackoffSchedule, PollPolicy};
pub use error::{CompletionError, CompletionResult};
pub use http::HttpTransport;
pub use mock::{MockReply, MockTransport, RecordedRequest};
pub use sync_executor::{extract_content, SyncExecutor};
pub use transport::{HttpResponse, Transport};
