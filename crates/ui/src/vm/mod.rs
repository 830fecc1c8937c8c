mod attempt_vm;
mod course_vm;
mod leaderboard_vm;

pub use attempt_vm::{AttemptIntent, AttemptSnapshot, FeedbackVm, QuestionVm, snapshot_attempt};
pub use course_vm::{CourseCardVm, map_course_cards};
pub use leaderboard_vm::{LeaderboardRowVm, map_leaderboard_rows};
