//! Shared doubles and fixtures for the dispatcher and invocation suites.

use std::sync::{Arc, Mutex};

use mockall::mock;
use relay_types::{Directive, DirectiveHeader, Endpoint, Scope};
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::envelope::Stamper;
use crate::external::{
    CommandQueue, DocumentStore, ExternalError, ExternalSystems, IdentityResolver, UserProfile,
};

pub const TOKEN: &str = "Atza|token-1";
pub const USER_ID: &str = "amzn1.account.u1";
pub const QUEUE: &str = "https://queue.example/u1";
pub const ENDPOINT_ID: &str = "lamp-1";
pub const CORRELATION: &str = "corr-1";
pub const MESSAGE_ID: &str = "msg-fixed";
pub const SAMPLE_TIME: &str = "2026-03-04T05:06:07Z";
pub const MANUFACTURER: &str = "Hearth";

pub const LIGHT_DOCUMENT: &str = r#"{
    "queue": "https://queue.example/u1",
    "devices": [
        {
            "id": "lamp-1",
            "friendly_name": "Sofa light",
            "description": "Floor lamp",
            "display_category": "LIGHT",
            "capability_codes": ["PowerController", "BrightnessController", "ColorController"]
        },
        {
            "id": "strip-1",
            "friendly_name": "Shelf strip",
            "description": "LED strip",
            "display_category": "LIGHT",
            "capability_codes": ["PowerController", "PlaybackController"]
        }
    ]
}"#;

pub const SPEAKER_DOCUMENT: &str = r#"{
    "queue": "https://queue.example/u1",
    "devices": [
        {
            "id": "lamp-1",
            "friendly_name": "Sofa light",
            "description": "Floor lamp",
            "display_category": "LIGHT",
            "capability_codes": ["PowerController"]
        },
        {
            "id": "kitchen-speaker",
            "friendly_name": "Kitchen",
            "description": "Speaker",
            "display_category": "SPEAKER",
            "capability_codes": ["PlaybackController"]
        }
    ]
}"#;

mock! {
    pub Identity {}
    impl IdentityResolver for Identity {
        fn resolve(&self, token: &str) -> Result<UserProfile, ExternalError>;
    }
}

mock! {
    pub Documents {}
    impl DocumentStore for Documents {
        fn fetch(&self, key: &str) -> Result<Vec<u8>, ExternalError>;
    }
}

mock! {
    pub Queue {}
    impl CommandQueue for Queue {
        fn send(&self, queue: &str, body: &str) -> Result<(), ExternalError>;
    }
}

/// Stamper returning constant ids and times.
pub struct FixedStamper;

impl Stamper for FixedStamper {
    fn message_id(&self) -> String {
        MESSAGE_ID.to_owned()
    }

    fn timestamp(&self) -> String {
        SAMPLE_TIME.to_owned()
    }
}

/// Queue double that records every delivery.
#[derive(Default)]
pub struct RecordingQueue {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingQueue {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("queue lock").clone()
    }
}

impl CommandQueue for RecordingQueue {
    fn send(&self, queue: &str, body: &str) -> Result<(), ExternalError> {
        self.sent
            .lock()
            .expect("queue lock")
            .push((queue.to_owned(), body.to_owned()));
        if self.fail {
            Err(ExternalError::Status {
                url: queue.to_owned(),
                status: 503,
            })
        } else {
            Ok(())
        }
    }
}

/// Identity double resolving every token to [`USER_ID`].
pub fn resolving_identity() -> MockIdentity {
    let mut identity = MockIdentity::new();
    identity.expect_resolve().returning(|_| {
        Ok(UserProfile {
            user_id: USER_ID.to_owned(),
            name: Some("Ada".to_owned()),
            email: None,
        })
    });
    identity
}

/// Document double serving `document` for [`USER_ID`].
pub fn serving_documents(document: &'static str) -> MockDocuments {
    let mut documents = MockDocuments::new();
    documents
        .expect_fetch()
        .withf(|key| key == "discovery/amzn1.account.u1.json")
        .returning(move |_| Ok(document.as_bytes().to_vec()));
    documents
}

/// Groups collaborator doubles.
pub fn systems(
    identity: impl IdentityResolver + 'static,
    documents: impl DocumentStore + 'static,
    queue: impl CommandQueue + 'static,
) -> ExternalSystems {
    ExternalSystems::new(Arc::new(identity), Arc::new(documents), Arc::new(queue))
}

/// Collaborators that panic on any call.
pub fn untouchable_systems() -> ExternalSystems {
    let mut identity = MockIdentity::new();
    identity.expect_resolve().never();
    let mut documents = MockDocuments::new();
    documents.expect_fetch().never();
    let mut queue = MockQueue::new();
    queue.expect_send().never();
    systems(identity, documents, queue)
}

pub fn dispatcher(systems: &ExternalSystems) -> Dispatcher {
    Dispatcher::new(systems, Arc::new(FixedStamper), MANUFACTURER)
}

/// A directive with the standard endpoint, token, queue, and correlation token.
pub fn control_directive(namespace: &str, name: &str, payload: Value) -> Directive {
    Directive {
        header: DirectiveHeader {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
            message_id: Some("in-1".to_owned()),
            correlation_token: Some(CORRELATION.to_owned()),
            payload_version: Some("3".to_owned()),
        },
        endpoint: Some(Endpoint {
            scope: Some(Scope::bearer(TOKEN)),
            endpoint_id: Some(ENDPOINT_ID.to_owned()),
            cookie: [("queue".to_owned(), QUEUE.to_owned())].into_iter().collect(),
        }),
        payload,
    }
}

/// A discovery directive carrying `scope` in its payload.
pub fn discover_directive(scope: Scope) -> Directive {
    Directive {
        header: DirectiveHeader {
            namespace: "Alexa.Discovery".to_owned(),
            name: "Discover".to_owned(),
            message_id: Some("in-2".to_owned()),
            correlation_token: None,
            payload_version: Some("3".to_owned()),
        },
        endpoint: None,
        payload: serde_json::json!({ "scope": scope }),
    }
}
