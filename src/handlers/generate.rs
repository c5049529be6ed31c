// src/handlers/generate.rs
//! Generate handler — server-side credential generation

use tracing::info;

use crate::core::request::GenerateRequest;
use crate::core::store::CredentialStore;
use crate::core::Result;
use crate::views::CredentialView;

pub trait GenerateHandler {
    fn handle(&mut self, request: GenerateRequest) -> Result<CredentialView>;
}

pub struct DefaultGenerateHandler<'a> {
    store: &'a mut CredentialStore,
}

impl<'a> DefaultGenerateHandler<'a> {
    pub fn new(store: &'a mut CredentialStore) -> Self {
        Self { store }
    }
}

impl GenerateHandler for DefaultGenerateHandler<'_> {
    fn handle(&mut self, request: GenerateRequest) -> Result<CredentialView> {
        let mode = request.mode;
        let view = self.store.generate(request)?;
        info!(
            name = %view.name,
            credential_type = %view.credential_type,
            ?mode,
            "generated credential"
        );
        Ok(view)
    }
}
