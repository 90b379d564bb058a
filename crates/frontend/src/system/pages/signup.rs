use contracts::system::auth::SignupRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::AuthScreen;
use crate::shared::flash::{use_flash, FlashKind};
use crate::system::auth::api;

#[component]
pub fn SignupPage(screen: RwSignal<AuthScreen>) -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_loading, set_is_loading) = signal(false);

    let flash = use_flash();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let request = SignupRequest {
            username: username.get(),
            email: email.get(),
            password: password.get(),
        };

        set_is_loading.set(true);
        flash.clear();

        spawn_local(async move {
            match api::signup(request).await {
                Ok(response) => {
                    flash.show(FlashKind::Success, response.message);
                    set_password.set(String::new());
                    screen.set(AuthScreen::Login);
                }
                Err(e) => {
                    log::warn!("Signup failed: {}", e);
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
                <h2>"Create an account"</h2>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="signup-username">"Username"</label>
                        <input
                            type="text"
                            id="signup-username"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="signup-email">"Email"</label>
                        <input
                            type="email"
                            id="signup-email"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="signup-password">"Password"</label>
                        <input
                            type="password"
                            id="signup-password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            minlength="6"
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>

                <p class="auth-switch">
                    "Already registered? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        flash.clear();
                        screen.set(AuthScreen::Login);
                    }>"Log in"</a>
                </p>
            </div>
        </div>
    }
}
