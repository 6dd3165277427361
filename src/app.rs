//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::AppConfig;
use crate::gallery::GalleryBridge;
use crate::pages::workspace::WorkspacePage;
use crate::state::auth::{AuthState, AuthStatus};
use crate::state::chat::ChatState;
use crate::state::ui::UiState;

fn current_origin() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}

/// Root application component.
///
/// Provides all shared state contexts, resolves the sign-in state, and sets
/// up client-side routing once the user may use the workspace.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env(&current_origin());
    let initial_auth = if config.auth.is_none() {
        AuthState::disabled()
    } else {
        AuthState::default()
    };

    let auth = RwSignal::new(initial_auth);
    let chat = RwSignal::new(ChatState::with_greeting());
    let ui = RwSignal::new(UiState::default());

    provide_context(auth);
    provide_context(chat);
    provide_context(ui);
    provide_context(GalleryBridge::new());
    provide_context(config.clone());

    #[cfg(feature = "csr")]
    {
        if config.auth.is_some() {
            leptos::task::spawn_local(async move {
                let next = crate::util::auth::initialize(&config).await;
                auth.set(next);
            });
        }
    }

    let status = Memo::new(move |_| auth.with(|a| a.status));

    view! {
        <Title text="Rose Studio"/>

        {move || match status.get() {
            AuthStatus::Loading => view! { <div class="app-loading">"Signing you in..."</div> }.into_any(),
            AuthStatus::Failed => view! {
                <div class="app-error">
                    <p>"Authentication failed. Check the console for details."</p>
                </div>
            }
                .into_any(),
            AuthStatus::Authenticated | AuthStatus::Unauthenticated => view! {
                <Router>
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=WorkspacePage/>
                        <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=WorkspacePage/>
                    </Routes>
                </Router>
            }
                .into_any(),
        }}
    }
}
