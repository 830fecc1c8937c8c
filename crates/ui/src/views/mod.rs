mod admin;
mod course_player;
mod guard;
mod home;
mod landing;
mod leaderboard;
mod login;
mod multiplayer;
mod not_found;
mod profile;
mod register;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use course_player::CoursePlayerView;
pub use guard::{SignedOutNotice, use_session};
pub use home::HomeView;
pub use landing::LandingView;
pub use leaderboard::LeaderboardView;
pub use login::LoginView;
pub use multiplayer::MultiplayerView;
pub use not_found::NotFoundView;
pub use profile::ProfileView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
