use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_symptom_check::ui::{BUTTON_BUSY, BUTTON_IDLE};
use contracts::usecases::u101_symptom_check::{
    PredictionResult, SymptomCheck, FIELD_NOTES, FIELD_SYMPTOMS,
};
use gloo_timers::future::TimeoutFuture;
use leptos::html::{Div, Form, Select};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::api;
use super::controller::{SubmissionController, SubmissionView};
use super::form_fields::FormFields;
use super::render::card_markup;
use super::selector::{mount_selector, symptom_label};
use super::transport::FetchTransport;
use crate::shared::spotlight::{attach_spotlight, attach_to_existing};

/// Reactive handles of the symptom page.
///
/// A request can outlive the page (logout while `/predict` is pending), so
/// every access tolerates already disposed handles.
#[derive(Clone, Copy)]
pub struct SymptomCheckVm {
    pub is_loading: RwSignal<bool>,
    pub result_visible: RwSignal<bool>,
    pub result_region: NodeRef<Div>,
}

impl Default for SymptomCheckVm {
    fn default() -> Self {
        Self {
            is_loading: RwSignal::new(false),
            result_visible: RwSignal::new(false),
            result_region: NodeRef::new(),
        }
    }
}

impl SubmissionView for SymptomCheckVm {
    fn enter_loading(&self) {
        let _ = self.is_loading.try_set(true);
        let _ = self.result_visible.try_set(false);
    }

    fn exit_loading(&self) {
        let _ = self.is_loading.try_set(false);
    }

    fn render(&self, result: PredictionResult) {
        let Some(region) = self.result_region.try_get_untracked().flatten() else {
            log::warn!("Result container is gone; dropping the prediction result");
            return;
        };

        replace_card(&region, &card_markup(&result));
        let _ = self.result_visible.try_set(true);
    }
}

/// Replaces the whole content of `region` with `markup` and binds the
/// spotlight to the new card. The previous card and its listener go away
/// with the old content.
pub fn replace_card(region: &Element, markup: &str) -> Option<HtmlElement> {
    region.set_inner_html(markup);

    let card = region
        .query_selector(".glass-card")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    attach_spotlight(card.as_ref());
    card
}

#[component]
pub fn SymptomCheckPage() -> impl IntoView {
    let vm = SymptomCheckVm::default();
    let controller = StoredValue::new_local(SubmissionController::new(FetchTransport, vm));

    let form_ref = NodeRef::<Form>::new();
    let select_ref = NodeRef::<Select>::new();
    let (symptoms, set_symptoms) = signal(Vec::<String>::new());
    let (load_error, set_load_error) = signal(None::<String>);

    // Options first, then the search widget on top of the rendered <select>
    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_symptoms().await {
                Ok(list) => {
                    log::debug!("Loaded {} symptoms", list.len());
                    set_symptoms.set(list);
                    TimeoutFuture::new(0).await;
                    match select_ref.get_untracked() {
                        Some(select) => mount_selector(&select),
                        None => log::error!("Symptom select is not mounted"),
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    set_load_error.set(Some("Could not load the symptom list.".to_string()));
                }
            }
        });
    });

    Effect::new(move |_| {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            attach_to_existing(&document);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(form) = form_ref.get_untracked() else {
            log::error!("Symptom form is not mounted");
            return;
        };
        let fields = match FormFields::from_form(&form) {
            Ok(fields) => fields,
            Err(e) => {
                log::error!("Failed to read the form: {:?}", e);
                return;
            }
        };

        log::debug!(
            "Submitting {} symptoms{}",
            fields.values(FIELD_SYMPTOMS).count(),
            if fields.last(FIELD_NOTES).is_some_and(|n| !n.trim().is_empty()) {
                " with notes"
            } else {
                ""
            }
        );

        match controller.with_value(|c| c.begin(fields)) {
            Some(cycle) => spawn_local(cycle.run()),
            None => log::debug!("Submission ignored: a request is already in flight"),
        }
    };

    view! {
        <section class="symptom-check">
            <div class="glass-card form-card">
                <h1>{SymptomCheck::display_name()}</h1>
                <p class="subtitle">{SymptomCheck::description()}</p>

                <Show when=move || load_error.get().is_some()>
                    <div class="error-message">
                        {move || load_error.get().unwrap_or_default()}
                    </div>
                </Show>

                <form id="symptom-form" node_ref=form_ref on:submit=on_submit>
                    <div class="form-group">
                        <label for="symptoms">"Symptoms"</label>
                        <select id="symptoms" name=FIELD_SYMPTOMS multiple node_ref=select_ref>
                            <For
                                each=move || symptoms.get()
                                key=|s| s.clone()
                                let:symptom
                            >
                                <option value=symptom.clone()>{symptom_label(&symptom)}</option>
                            </For>
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="notes">"Anything else?"</label>
                        <textarea
                            id="notes"
                            name=FIELD_NOTES
                            rows="3"
                            placeholder="Describe how you feel (optional)"
                        ></textarea>
                    </div>

                    <button
                        type="submit"
                        id="predict-btn"
                        class="btn-primary"
                        disabled=move || vm.is_loading.get()
                    >
                        <span class="btn-text">
                            {move || if vm.is_loading.get() { BUTTON_BUSY } else { BUTTON_IDLE }}
                        </span>
                        <span class="spinner" class:hidden=move || !vm.is_loading.get()></span>
                    </button>
                </form>
            </div>

            <div
                id="result-container"
                node_ref=vm.result_region
                class:hidden=move || !vm.result_visible.get()
            ></div>

            <p class="disclaimer">
                "This tool is not a medical diagnosis. Consult a doctor for any health concern."
            </p>
        </section>
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::{MouseEvent, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_region() -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let region = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&region).unwrap();
        region
    }

    fn success(prediction: &str) -> PredictionResult {
        PredictionResult::Success {
            prediction: prediction.into(),
            suggestion: "Rest.".into(),
            confidence: None,
        }
    }

    fn move_pointer(card: &HtmlElement, dx: i32, dy: i32) -> (String, String) {
        let rect = card.get_bounding_client_rect();
        let client_x = rect.left() as i32 + dx;
        let client_y = rect.top() as i32 + dy;

        let init = MouseEventInit::new();
        init.set_client_x(client_x);
        init.set_client_y(client_y);
        let ev = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
        card.dispatch_event(&ev).unwrap();

        (
            format!("{}px", f64::from(client_x) - rect.left()),
            format!("{}px", f64::from(client_y) - rect.top()),
        )
    }

    #[wasm_bindgen_test]
    fn second_render_rebinds_spotlight_to_new_card() {
        let region = mount_region();

        let first = replace_card(&region, &card_markup(&success("Flu"))).expect("first card");
        let second =
            replace_card(&region, &card_markup(&success("Malaria"))).expect("second card");

        assert!(!first.is_connected());
        assert!(second.is_connected());
        assert!(second.has_attribute("data-spotlight"));
        assert_eq!(region.query_selector_all(".glass-card").unwrap().length(), 1);

        let (x, y) = move_pointer(&second, 12, 7);
        let style = second.style();
        assert_eq!(style.get_property_value("--mouse-x").unwrap(), x);
        assert_eq!(style.get_property_value("--mouse-y").unwrap(), y);
    }

    #[wasm_bindgen_test]
    fn error_card_gets_spotlight_too() {
        let region = mount_region();

        let card = replace_card(&region, &card_markup(&PredictionResult::generic_failure()))
            .expect("error card");

        assert!(card.class_list().contains("error"));
        assert!(card.has_attribute("data-spotlight"));
    }
}
