#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod session;

pub use envelope::Envelope;
pub use error::{ApiError, SessionStoreError};
pub use gateway::{
    AccountGateway, AnswerDraft, CompletionEntry, CourseGateway, Credentials, ProfileUpdate,
    ProgressGateway, QuestionDraft, Registration,
};
pub use http::HttpGateway;
pub use memory::InMemoryGateway;
pub use session::{FileSessionStore, InMemorySessionStore, SessionStore};
