use leptos::prelude::*;
use leptos::task::spawn_local;

use super::AuthScreen;
use crate::shared::flash::{use_flash, FlashKind};
use crate::system::auth::context::{use_auth, AuthState};
use crate::system::auth::{api, storage};

#[component]
pub fn LoginPage(screen: RwSignal<AuthScreen>) -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let flash = use_flash();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        flash.clear();

        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(response) => {
                    storage::save_access_token(&response.access_token);
                    flash.show(
                        FlashKind::Success,
                        format!("Welcome back, {}!", response.user.username),
                    );

                    // Switches the router to the symptom page
                    set_auth_state.set(AuthState {
                        access_token: Some(response.access_token),
                        user_info: Some(response.user),
                    });
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    flash.show(FlashKind::Danger, e);
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="glass-card login-box">
                <h1>"Symptom Checker"</h1>
                <h2>"Log in"</h2>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "No account yet? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        flash.clear();
                        screen.set(AuthScreen::Signup);
                    }>"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
