use api::InMemoryGateway;
use chrono::Duration;
use duo_core::model::{
    Account, AccountId, Answer, AnswerId, Course, CourseId, CourseType, Difficulty, Question,
    QuestionId, QuestionType, Role, Session,
};
use duo_core::time::fixed_now;

use super::test_harness::{ViewKind, setup_view_harness};

fn learner_session() -> Session {
    Session::new("wira", AccountId::new(7), Role::User)
}

fn admin_session() -> Session {
    Session::new("boss", AccountId::new(1), Role::Admin)
}

fn question(id: u64, order_number: u32) -> Question {
    Question {
        id: QuestionId::new(id),
        content: format!("What is question {id}?"),
        image_url: None,
        question_type: QuestionType::MultipleChoice,
        explanation: String::new(),
        order_number,
        answers: vec![
            Answer {
                id: AnswerId::new(id * 10),
                content: "right".into(),
                is_correct: true,
            },
            Answer {
                id: AnswerId::new(id * 10 + 1),
                content: "wrong".into(),
                is_correct: false,
            },
        ],
    }
}

fn singleplayer_course(id: u64) -> Course {
    Course {
        id: CourseId::new(id),
        title: format!("Basics {id}"),
        description: "Starter vocabulary".into(),
        difficulty: Difficulty::Easy,
        exp_reward: 40,
        course_type: CourseType::Singleplayer,
        deadline: None,
        questions: vec![question(1, 1)],
    }
}

fn multiplayer_course(id: u64) -> Course {
    Course {
        id: CourseId::new(id),
        title: format!("Race {id}"),
        description: "Timed run".into(),
        difficulty: Difficulty::Hard,
        exp_reward: 0,
        course_type: CourseType::Multiplayer,
        deadline: Some((fixed_now() + Duration::days(1)).naive_utc()),
        questions: vec![question(1, 1)],
    }
}

fn account(id: u64, username: &str, exp: u64) -> Account {
    Account {
        id: AccountId::new(id),
        username: username.into(),
        email: format!("{username}@example.com"),
        exp,
        role: Role::User,
        image_url: None,
        created_at: None,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_offers_sign_in() {
    let mut harness = setup_view_harness(ViewKind::Landing, InMemoryGateway::new(), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in"), "missing sign in in {html}");
    assert!(html.contains("Create account"), "missing register in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, InMemoryGateway::new(), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("login-username"), "missing username field in {html}");
    assert!(html.contains("login-password"), "missing password field in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_course_cards() {
    let gateway = InMemoryGateway::new();
    gateway.insert_course(singleplayer_course(1));
    let mut harness = setup_view_harness(ViewKind::Home, gateway, Some(learner_session()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Basics 1"), "missing course title in {html}");
    assert!(html.contains("+40 XP"), "missing reward in {html}");
    assert!(html.contains("Easy"), "missing difficulty badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn multiplayer_view_smoke_shows_deadline_and_retake() {
    let gateway = InMemoryGateway::new();
    gateway.insert_course(multiplayer_course(1));
    gateway.set_completion_time(AccountId::new(7), CourseId::new(1), 205);
    let mut harness = setup_view_harness(ViewKind::Multiplayer, gateway, Some(learner_session()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Race 1"), "missing course title in {html}");
    assert!(html.contains("Closes"), "missing deadline in {html}");
    assert!(
        html.contains("You finished in 3m 25s"),
        "missing retake banner in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn course_player_smoke_renders_first_question() {
    let gateway = InMemoryGateway::new();
    gateway.insert_course(singleplayer_course(1));
    let mut harness = setup_view_harness(
        ViewKind::CoursePlayer(1),
        gateway,
        Some(learner_session()),
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("What is question 1?"),
        "missing question in {html}"
    );
    assert!(html.contains("Question 1 of 1"), "missing progress in {html}");
    assert!(html.contains("Check"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn course_player_smoke_renders_error_state() {
    let gateway = InMemoryGateway::new();
    gateway.insert_course(singleplayer_course(1));
    gateway.fail_get_course(true);
    let mut harness = setup_view_harness(
        ViewKind::CoursePlayer(1),
        gateway,
        Some(learner_session()),
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Something went wrong"),
        "missing error in {html}"
    );
    assert!(html.contains("Back to courses"), "missing back link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_ranks_users() {
    let gateway = InMemoryGateway::new();
    gateway.insert_account(account(1, "slow", 40), "pw");
    gateway.insert_account(account(2, "fast", 250), "pw");
    let mut harness = setup_view_harness(ViewKind::Leaderboard, gateway, Some(learner_session()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    let fast = html.find("fast").expect("fast ranked");
    let slow = html.find("slow").expect("slow ranked");
    assert!(fast < slow, "expected fast before slow in {html}");
    assert!(html.contains("250 XP"), "missing exp in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_account() {
    let gateway = InMemoryGateway::new();
    gateway.insert_account(account(7, "wira", 120), "pw");
    let mut harness = setup_view_harness(ViewKind::Profile, gateway, Some(learner_session()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Experience: 120 XP"), "missing exp in {html}");
    assert!(html.contains("profile-username"), "missing form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_is_gated_for_learners() {
    let mut harness = setup_view_harness(
        ViewKind::Admin,
        InMemoryGateway::new(),
        Some(learner_session()),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("administrators only"),
        "missing gate in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn not_found_view_smoke_names_the_path() {
    let mut harness = setup_view_harness(ViewKind::NotFound, InMemoryGateway::new(), None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Page not found"), "missing heading in {html}");
    assert!(html.contains("/no/such"), "missing path in {html}");
    assert!(
        html.contains("Back to the start"),
        "missing way back in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_courses() {
    let gateway = InMemoryGateway::new();
    gateway.insert_course(singleplayer_course(1));
    gateway.insert_course(multiplayer_course(2));
    let mut harness = setup_view_harness(ViewKind::Admin, gateway, Some(admin_session()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Basics 1"), "missing course in {html}");
    assert!(html.contains("Multiplayer"), "missing type label in {html}");
    assert!(html.contains("New course"), "missing form in {html}");
}
