use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Danger,
}

impl FlashKind {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashKind::Success => "flash flash-success",
            FlashKind::Info => "flash flash-info",
            FlashKind::Danger => "flash flash-danger",
        }
    }
}

/// One-shot message shown above the current page until dismissed or replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct FlashService(RwSignal<Option<Flash>>);

impl FlashService {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn show(&self, kind: FlashKind, message: impl Into<String>) {
        self.0.set(Some(Flash {
            kind,
            message: message.into(),
        }));
    }

    pub fn clear(&self) {
        self.0.set(None);
    }

    pub fn current(&self) -> Option<Flash> {
        self.0.get()
    }
}

impl Default for FlashService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_flash() -> FlashService {
    use_context::<FlashService>().expect("FlashService not provided")
}

#[component]
pub fn FlashMessage() -> impl IntoView {
    let flash = use_flash();

    view! {
        {move || flash.current().map(|f| view! {
            <div class=f.kind.css_class() role="alert">
                <span>{f.message}</span>
                <button class="flash-close" on:click=move |_| flash.clear()>"×"</button>
            </div>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_class() {
        assert_eq!(FlashKind::Success.css_class(), "flash flash-success");
        assert_eq!(FlashKind::Danger.css_class(), "flash flash-danger");
    }
}
