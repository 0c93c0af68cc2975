use crate::constants::*;
use crate::core::{
    ContactError, ContactForm, Field, MailRelayConfig, SubmitStatus, Submission,
    STATUS_DISMISS_AFTER,
};
use crate::dom::{self, Listener};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = emailjs, js_name = send, catch)]
    async fn emailjs_send(
        service_id: &str,
        template_id: &str,
        params: JsValue,
        public_key: &str,
    ) -> Result<JsValue, JsValue>;
}

// options for Date.toLocaleString, e.g. "Monday, June 2, 2025 at 03:04 PM GMT+2"
const TIME_FORMAT: &str = r#"{"weekday":"long","year":"numeric","month":"long","day":"numeric","hour":"2-digit","minute":"2-digit","timeZoneName":"short"}"#;

// covers setTimeout firing a little ahead of the Instant deadline
const DISMISS_SLACK: Duration = Duration::from_millis(50);

fn timestamp() -> String {
    let options = js_sys::JSON::parse(TIME_FORMAT).unwrap_or(JsValue::UNDEFINED);
    js_sys::Date::new_0()
        .to_locale_string("en-US", &options)
        .as_string()
        .unwrap_or_default()
}

/// Deliver one submission through the mail relay SDK.
async fn send(submission: &Submission) -> Result<(), ContactError> {
    let json = serde_json::to_string(&submission.params)
        .map_err(|e| ContactError::Relay(e.to_string()))?;
    let params =
        js_sys::JSON::parse(&json).map_err(|e| ContactError::Relay(format!("{:?}", e)))?;
    let cfg = &submission.config;
    emailjs_send(&cfg.service_id, &cfg.template_id, params, &cfg.public_key)
        .await
        .map(|_| ())
        .map_err(|e| ContactError::Relay(format!("{:?}", e)))
}

#[derive(Clone)]
struct ContactView {
    form: web::HtmlFormElement,
    submit: web::HtmlButtonElement,
    status: web::HtmlElement,
}

impl ContactView {
    fn render(&self, state: &ContactForm) {
        let busy = state.is_submitting();
        self.submit.set_disabled(busy);
        self.submit
            .set_text_content(Some(if busy { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL_IDLE }));

        let cl = self.status.class_list();
        _ = cl.remove_2("status-success", "status-error");
        match state.status() {
            SubmitStatus::Idle => {
                _ = cl.add_1("hidden");
            }
            SubmitStatus::Success => {
                _ = cl.remove_1("hidden");
                _ = cl.add_1("status-success");
            }
            SubmitStatus::Error => {
                _ = cl.remove_1("hidden");
                _ = cl.add_1("status-error");
            }
        }
        self.status.set_text_content(Some(state.message()));
    }
}

/// Settle the form after a submission and arm the auto-dismiss timer.
fn finish(
    form: &Rc<RefCell<ContactForm>>,
    view: &ContactView,
    outcome: Result<(), ContactError>,
) {
    let succeeded = outcome.is_ok();
    form.borrow_mut().complete(outcome, Instant::now());
    if succeeded {
        view.form.reset();
        log::info!("[contact] message sent");
    }
    view.render(&form.borrow());

    let form = form.clone();
    let view = view.clone();
    let delay = (STATUS_DISMISS_AFTER + DISMISS_SLACK).as_millis() as i32;
    dom::set_timeout(delay, move || {
        if form.borrow_mut().tick(Instant::now()) {
            view.render(&form.borrow());
        }
    });
}

fn on_submit(form: &Rc<RefCell<ContactForm>>, view: &ContactView) {
    let Some(fields) = form.borrow_mut().begin_submit() else {
        return;
    };
    view.render(&form.borrow());

    match Submission::prepare(MailRelayConfig::from_build_env(), &fields, timestamp()) {
        Err(e) => finish(form, view, Err(e)),
        Ok(submission) => {
            let form = form.clone();
            let view = view.clone();
            spawn_local(async move {
                let outcome = send(&submission).await;
                finish(&form, &view, outcome);
            });
        }
    }
}

fn field_value(target: &web::EventTarget) -> Option<(Field, String)> {
    if let Some(input) = target.dyn_ref::<web::HtmlInputElement>() {
        return Field::from_name(&input.name()).map(|f| (f, input.value()));
    }
    if let Some(area) = target.dyn_ref::<web::HtmlTextAreaElement>() {
        return Field::from_name(&area.name()).map(|f| (f, area.value()));
    }
    None
}

/// Contact form wiring; listeners live as long as the handle.
pub struct ContactHandle {
    _form: Rc<RefCell<ContactForm>>,
    _listeners: Vec<Listener>,
}

pub fn mount(document: &web::Document) -> anyhow::Result<ContactHandle> {
    let view = ContactView {
        form: dom::element_by_id(document, CONTACT_FORM_ID)?,
        submit: dom::element_by_id(document, CONTACT_SUBMIT_ID)?,
        status: dom::element_by_id(document, CONTACT_STATUS_ID)?,
    };
    for name in CONTACT_FIELD_NAMES {
        if view.form.query_selector(&format!("[name='{}']", name)).ok().flatten().is_none() {
            log::warn!("[contact] form has no '{}' field", name);
        }
    }
    if let Err(e) = MailRelayConfig::from_build_env() {
        log::warn!("[contact] {}; submissions will fail", e);
    }

    let form = Rc::new(RefCell::new(ContactForm::new()));
    view.render(&form.borrow());

    let input = {
        let form = form.clone();
        Listener::new(view.form.as_ref(), "input", move |ev| {
            if let Some((field, value)) = ev.target().as_ref().and_then(field_value) {
                form.borrow_mut().set_field(field, value);
            }
        })?
    };
    let submit = {
        let form = form.clone();
        let view_submit = view.clone();
        Listener::new(view.form.as_ref(), "submit", move |ev| {
            ev.prevent_default();
            on_submit(&form, &view_submit);
        })?
    };

    Ok(ContactHandle {
        _form: form,
        _listeners: vec![input, submit],
    })
}
