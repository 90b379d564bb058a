use crate::routes::routes::AppRoutes;
use crate::shared::flash::FlashService;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Flash messages outlive the page that raised them (login -> main)
    provide_context(FlashService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
