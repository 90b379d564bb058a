use crate::shared::flash::{use_flash, FlashKind, FlashMessage};
use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::guard::RequireAuth;
use crate::system::pages::login::LoginPage;
use crate::system::pages::signup::SignupPage;
use crate::system::pages::AuthScreen;
use crate::usecases::u101_symptom_check::SymptomCheckPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let flash = use_flash();

    let username = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.username)
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        do_logout(set_auth_state);
        flash.show(FlashKind::Info, "You have been successfully logged out.");
    };

    view! {
        <header class="app-header">
            <span class="brand">"Symptom Checker"</span>
            <div class="user-menu">
                <span class="username">{username}</span>
                <button class="btn-secondary" on:click=on_logout>"Log out"</button>
            </div>
        </header>
        <main class="app-main">
            <FlashMessage />
            <SymptomCheckPage />
        </main>
    }
}

#[component]
fn PublicPages() -> impl IntoView {
    let screen = RwSignal::new(AuthScreen::default());

    view! {
        <main class="app-main">
            <FlashMessage />
            {move || match screen.get() {
                AuthScreen::Login => view! { <LoginPage screen=screen /> }.into_any(),
                AuthScreen::Signup => view! { <SignupPage screen=screen /> }.into_any(),
            }}
        </main>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <PublicPages /> }>
            <MainLayout />
        </RequireAuth>
    }
}
