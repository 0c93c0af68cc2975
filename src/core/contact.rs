use super::constants::*;
use instant::Instant;
use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("mail relay configuration is incomplete: missing {0}")]
    MissingConfig(&'static str),
    #[error("mail relay rejected the message: {0}")]
    Relay(String),
}

/// Credentials for the third-party mail relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailRelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl MailRelayConfig {
    /// Build a config from optional values; absent or blank values are missing.
    pub fn resolve(
        service_id: Option<&str>,
        template_id: Option<&str>,
        public_key: Option<&str>,
    ) -> Result<Self, ContactError> {
        fn required(value: Option<&str>, name: &'static str) -> Result<String, ContactError> {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => Ok(v.to_string()),
                _ => Err(ContactError::MissingConfig(name)),
            }
        }
        Ok(Self {
            service_id: required(service_id, "service id")?,
            template_id: required(template_id, "template id")?,
            public_key: required(public_key, "public key")?,
        })
    }

    /// Values baked in from the build environment.
    pub fn from_build_env() -> Result<Self, ContactError> {
        Self::resolve(
            option_env!("FOLIO_MAILRELAY_SERVICE_ID"),
            option_env!("FOLIO_MAILRELAY_TEMPLATE_ID"),
            option_env!("FOLIO_MAILRELAY_PUBLIC_KEY"),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Map a form control's `name` attribute.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "message" => Some(Field::Message),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }
}

/// Parameter object handed to the mail relay template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub name: String,
    pub from_email: String,
    pub name_first_letter: String,
    pub to_email: String,
    pub message: String,
    pub subject: String,
    pub time: String,
}

impl TemplateParams {
    pub fn new(fields: &ContactFields, to_email: &str, time: String) -> Self {
        let name_first_letter: String = fields
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        Self {
            name: fields.name.clone(),
            from_email: fields.email.clone(),
            name_first_letter,
            to_email: to_email.to_string(),
            message: fields.message.clone(),
            subject: format!("New Portfolio Contact from {}", fields.name),
            time,
        }
    }
}

/// A validated request ready to go out to the relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub config: MailRelayConfig,
    pub params: TemplateParams,
}

impl Submission {
    /// Fails on configuration problems before anything touches the network.
    pub fn prepare(
        config: Result<MailRelayConfig, ContactError>,
        fields: &ContactFields,
        time: String,
    ) -> Result<Self, ContactError> {
        let config = config?;
        Ok(Self {
            config,
            params: TemplateParams::new(fields, CONTACT_RECIPIENT, time),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

pub fn failure_message() -> String {
    format!(
        "Failed to send message. Please try again or contact me directly at {}",
        CONTACT_RECIPIENT
    )
}

/// Contact form fields plus the submit/status state machine.
///
/// `Idle -> in flight -> Success | Error -> Idle` once the dismiss deadline
/// passes. Only one submission may be in flight; later completions replace
/// the pending deadline.
#[derive(Debug, Default)]
pub struct ContactForm {
    fields: ContactFields,
    status: SubmitStatus,
    message: String,
    in_flight: bool,
    dismiss_at: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn dismiss_at(&self) -> Option<Instant> {
        self.dismiss_at
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value.into());
    }

    /// Start a submission and snapshot the fields, or `None` if one is already running.
    pub fn begin_submit(&mut self) -> Option<ContactFields> {
        if self.in_flight {
            log::debug!("[contact] submit ignored, already in flight");
            return None;
        }
        self.in_flight = true;
        self.status = SubmitStatus::Idle;
        self.message.clear();
        self.dismiss_at = None;
        Some(self.fields.clone())
    }

    pub fn complete(&mut self, outcome: Result<(), ContactError>, now: Instant) {
        match outcome {
            Ok(()) => {
                self.status = SubmitStatus::Success;
                self.message = SUCCESS_MESSAGE.to_string();
                self.fields = ContactFields::default();
            }
            Err(e) => {
                log::error!("[contact] submission failed: {}", e);
                self.status = SubmitStatus::Error;
                self.message = failure_message();
            }
        }
        self.in_flight = false;
        self.dismiss_at = Some(now + STATUS_DISMISS_AFTER);
    }

    /// Clear an expired status message. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.dismiss_at {
            Some(deadline) if now >= deadline => {
                self.status = SubmitStatus::Idle;
                self.message.clear();
                self.dismiss_at = None;
                true
            }
            _ => false,
        }
    }
}
