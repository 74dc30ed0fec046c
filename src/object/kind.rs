use std::borrow::Cow;

use crate::client::ClientRef;

pub static DEFAULT_KIND_NAME: &'static str = "ApiObject";

/// What an object is rendered as, plus the client a specialized resource binds to.
///
/// A preset client takes precedence over the one passed at construction.
#[derive(Debug, Clone)]
pub struct Kind {
    name: Cow<'static, str>,
    client: Option<ClientRef>,
}

impl Kind {
    pub fn named<N: Into<Cow<'static, str>>>(name: N) -> Self {
        Kind { name: name.into(), client: None }
    }

    pub fn with_client(mut self, client: ClientRef) -> Self {
        self.client = Some(client);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> Option<&ClientRef> {
        self.client.as_ref()
    }
}

impl Default for Kind {
    fn default() -> Self {
        Kind::named(DEFAULT_KIND_NAME)
    }
}
