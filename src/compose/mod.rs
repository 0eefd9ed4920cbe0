//! Outbound composition links: the form hands the finished message to the visitor's
//! mail client (or WhatsApp / the dialer) instead of posting it anywhere.

mod opener;

pub use opener::{LinkOpener, RecordingOpener, StdoutOpener};

use crate::core::validation::FieldValues;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern"));

/// Percent-encodes a URI component the way browsers' `encodeURIComponent` does for
/// the characters that matter in a mailto body: spaces, newlines, `&`, `?`, `#`, `=`.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Replaces `{field}` placeholders with form values. Unknown placeholders stay as written.
pub fn render_template(template: &str, values: &FieldValues) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.trim().to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Fixed recipient and message template for a form. Not user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeTemplate {
    pub to: String,
    #[serde(default)]
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

impl ComposeTemplate {
    pub fn render(&self, values: &FieldValues) -> OutboundMessage {
        OutboundMessage {
            to: self.to.clone(),
            cc: self.cc.clone(),
            subject: render_template(&self.subject, values),
            body: render_template(&self.body, values),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub to: String,
    pub cc: Option<String>,
    pub subject: String,
    pub body: String,
}

impl OutboundMessage {
    pub fn mailto_uri(&self) -> String {
        let mut uri = format!("mailto:{}?", self.to);
        if let Some(cc) = &self.cc {
            uri.push_str("cc=");
            uri.push_str(cc);
            uri.push('&');
        }
        uri.push_str("subject=");
        uri.push_str(&encode_component(&self.subject));
        uri.push_str("&body=");
        uri.push_str(&encode_component(&self.body));
        uri
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactLink {
    Mail(OutboundMessage),
    WhatsApp { phone: String, text: String },
    Phone(String),
}

impl ContactLink {
    pub fn uri(&self) -> String {
        match self {
            Self::Mail(message) => message.mailto_uri(),
            Self::WhatsApp { phone, text } => {
                let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
                format!("https://wa.me/{digits}?text={}", encode_component(text))
            }
            Self::Phone(number) => format!("tel:{}", number.trim()),
        }
    }
}

const BOOKING_BODY: &str = "Dear Front Desk,

I would like to book a room at {hotel}, {location}.

Booking Details:
Hotel: {hotel}
Location: {location}
Check-in Date: [Please fill]
Check-out Date: [Please fill]
Number of Guests: [Please fill]
Room Type: [Please fill]

Guest Information:
Name: [Please fill]
Phone: [Please fill]
Email: [Please fill]
Special Requirements: [Please fill]

Please confirm availability, room rates, cancellation policy and accepted payment methods.

---
Sent from the website booking page";

/// Room booking e-mail for a listed hotel, addressed like the contact form.
pub fn booking_request(template: &ComposeTemplate, hotel: &str, location: &str) -> OutboundMessage {
    let mut values = FieldValues::new();
    values.insert("hotel".into(), hotel.to_string());
    values.insert("location".into(), location.to_string());
    OutboundMessage {
        to: template.to.clone(),
        cc: template.cc.clone(),
        subject: render_template("Room Booking Request - {hotel}", &values),
        body: render_template(BOOKING_BODY, &values),
    }
}
