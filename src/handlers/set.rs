// src/handlers/set.rs
//! Set handler — store caller-supplied credential values

use tracing::info;

use crate::core::request::SetRequest;
use crate::core::store::CredentialStore;
use crate::core::Result;
use crate::views::CredentialView;

pub trait SetHandler {
    fn handle(&mut self, request: SetRequest) -> Result<CredentialView>;
}

pub struct DefaultSetHandler<'a> {
    store: &'a mut CredentialStore,
}

impl<'a> DefaultSetHandler<'a> {
    pub fn new(store: &'a mut CredentialStore) -> Self {
        Self { store }
    }
}

impl SetHandler for DefaultSetHandler<'_> {
    fn handle(&mut self, request: SetRequest) -> Result<CredentialView> {
        let view = self.store.set(request)?;
        info!(name = %view.name, credential_type = %view.credential_type, "set credential");
        Ok(view)
    }
}
