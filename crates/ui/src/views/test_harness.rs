use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use api::{InMemoryGateway, InMemorySessionStore, SessionStore};
use duo_core::model::Session;
use duo_core::time::fixed_clock;
use services::{
    AdminService, AttemptLoopService, AuthService, CatalogService, LeaderboardService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AdminView, CoursePlayerView, HomeView, LandingView, LeaderboardView, LoginView,
    MultiplayerView, NotFoundView, ProfileView,
};

#[derive(Clone)]
struct TestApp {
    auth: Arc<AuthService>,
    catalog: Arc<CatalogService>,
    attempts: Arc<AttemptLoopService>,
    leaderboard: Arc<LeaderboardService>,
    admin: Arc<AdminService>,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    fn attempts(&self) -> Arc<AttemptLoopService> {
        Arc::clone(&self.attempts)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Login,
    Home,
    Multiplayer,
    CoursePlayer(u64),
    Leaderboard,
    Profile,
    Admin,
    NotFound,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Multiplayer => rsx! { MultiplayerView {} },
        ViewKind::CoursePlayer(course_id) => rsx! { CoursePlayerView { course_id } },
        ViewKind::Leaderboard => rsx! { LeaderboardView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Admin => rsx! { AdminView {} },
        ViewKind::NotFound => rsx! {
            NotFoundView { segments: vec!["no".to_string(), "such".to_string()] }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub gateway: InMemoryGateway,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(
    view: ViewKind,
    gateway: InMemoryGateway,
    session: Option<Session>,
) -> ViewHarness {
    let clock = fixed_clock();
    let store: Arc<dyn SessionStore> = match session {
        Some(session) => Arc::new(InMemorySessionStore::with_session(session)),
        None => Arc::new(InMemorySessionStore::new()),
    };

    let app = Arc::new(TestApp {
        auth: Arc::new(AuthService::new(Arc::new(gateway.clone()), store)),
        catalog: Arc::new(CatalogService::new(
            clock,
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
        )),
        attempts: Arc::new(AttemptLoopService::new(
            Arc::new(gateway.clone()),
            Arc::new(gateway.clone()),
        )),
        leaderboard: Arc::new(LeaderboardService::new(Arc::new(gateway.clone()))),
        admin: Arc::new(AdminService::new(Arc::new(gateway.clone()))),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, gateway }
}
