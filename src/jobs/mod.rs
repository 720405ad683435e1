//! Background jobs: queued email dispatch and the mailing-list
//! unsubscribe listener.

mod dispatcher;
mod email_job;
mod unsubscribe_job;

pub use dispatcher::{JobDispatcher, PostgresQueue};
pub use email_job::{email_job_handler, EmailJob};
pub use unsubscribe_job::{run_unsubscribe, unsubscribe_job_handler, UnsubscribeJob};

#[cfg(any(test, feature = "test-utils"))]
pub use dispatcher::MockJobDispatcher;
