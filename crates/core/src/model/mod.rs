mod account;
mod course;
mod ids;
mod question;
mod session;

pub use ids::{AccountId, AnswerId, CourseId, ParseIdError, QuestionId};

pub use account::{Account, Role};
pub use course::{Course, CourseDraft, CourseError, CourseType, Difficulty, ValidatedCourse};
pub use question::{Answer, Question, QuestionType, Response};
pub use session::Session;
