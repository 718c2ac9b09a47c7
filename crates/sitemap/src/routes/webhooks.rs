use route_codec::matcher::{MatcherExt, form, json, path, post};
use route_codec::{OneOf, case, one_of, sequence};
use serde::{Deserialize, Serialize};

/// Routes below `/webhooks`, called by third party services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookRoute {
    /// `POST /webhooks/stripe` with a JSON event.
    Stripe(StripeEvent),
    /// `POST /webhooks/mailgun` with a form-encoded event.
    Mailgun(MailgunEvent),
}

/// The part of a billing provider event the site acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created: i64,
    #[serde(default)]
    pub livemode: bool,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeEventData {
    pub object: StripeObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

/// An email delivery event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailgunEvent {
    pub event: String,
    pub recipient: String,
    pub timestamp: u64,
    pub token: String,
    pub signature: String,
}

pub(crate) fn webhook_routes() -> OneOf<WebhookRoute> {
    one_of()
        .or(sequence()
            .skip(post())
            .skip(path("stripe"))
            .take(json::<StripeEvent>())
            .map(case!(WebhookRoute::Stripe(event))))
        .or(sequence()
            .skip(post())
            .skip(path("mailgun"))
            .take(form::<MailgunEvent>())
            .map(case!(WebhookRoute::Mailgun(event))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use indoc::indoc;
    use route_codec::{MatchError, Matcher, RequestData};

    #[test]
    fn stripe_event() {
        let body = indoc! {r#"
            {
              "id": "evt_1",
              "type": "invoice.payment_failed",
              "created": 1700000000,
              "data": { "object": { "id": "in_1", "customer": "cus_1" } },
              "request": null
            }
        "#};
        let mut data = RequestData::from_uri(Method::POST, "/stripe").unwrap().with_body(mime::APPLICATION_JSON, body);

        let Ok(WebhookRoute::Stripe(event)) = webhook_routes().parse(&mut data) else {
            panic!("expected a stripe event");
        };
        assert_eq!(event.kind, "invoice.payment_failed");
        assert!(!event.livemode);
        assert_eq!(event.data.object.customer.as_deref(), Some("cus_1"));
    }

    #[test]
    fn wrong_content_type_is_rejected() {
        let mut data = RequestData::from_uri(Method::POST, "/stripe")
            .unwrap()
            .with_body(mime::APPLICATION_WWW_FORM_URLENCODED, "id=evt_1");

        assert_eq!(webhook_routes().parse(&mut data), Err(MatchError::NoAlternative));
    }

    #[test]
    fn mailgun_event() {
        let mut data = RequestData::from_uri(Method::POST, "/mailgun").unwrap().with_body(
            mime::APPLICATION_WWW_FORM_URLENCODED,
            "event=failed&recipient=blob%40example.com&timestamp=1700000000&token=t&signature=s",
        );

        assert_eq!(
            webhook_routes().parse(&mut data),
            Ok(WebhookRoute::Mailgun(MailgunEvent {
                event: "failed".into(),
                recipient: "blob@example.com".into(),
                timestamp: 1_700_000_000,
                token: "t".into(),
                signature: "s".into(),
            }))
        );
    }
}
