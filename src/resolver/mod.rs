use crate::client::DirectoryLookup;
use crate::error::ClientError;
use crate::types::{StoreRecord, UserProfile};

/// Placeholder label when nothing else about the user names a store.
pub const FALLBACK_LABEL: &str = "Filial";

/// Computes the human-readable current-store label for an authenticated user.
///
/// Resolution is an explicit ordered list of strategies, first success wins:
/// 1. `loja_id` on the profile, via a store lookup;
/// 2. the employee record for `user.id`, directly via its `nome_loja` or
///    indirectly via its `loja_id`;
/// 3. `nome_loja` carried on the profile itself.
/// A strategy whose preconditions are missing passes to the next one. A
/// failed lookup at any step short-circuits to the final fallback expression
/// instead of trying later strategies; the error is logged and absorbed.
///
/// An empty `nome_loja` counts as absent wherever it appears - the backend
/// stores blank strings for unassigned employees - so the resolver never
/// yields an empty label.
pub struct StoreLabelResolver<L> {
    lookup: L,
}

impl<L: DirectoryLookup> StoreLabelResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub async fn resolve(&self, user: &UserProfile, token: &str) -> String {
        match self.try_strategies(user, token).await {
            Ok(Some(label)) => label,
            Ok(None) => fallback_label(user),
            Err(e) => {
                tracing::warn!(error = %e, "store label lookup failed, using fallback");
                fallback_label(user)
            }
        }
    }

    async fn try_strategies(
        &self,
        user: &UserProfile,
        token: &str,
    ) -> Result<Option<String>, ClientError> {
        if let Some(label) = self.by_store_id(user, token).await? {
            return Ok(Some(label));
        }
        if let Some(label) = self.by_employee(user, token).await? {
            return Ok(Some(label));
        }
        Ok(by_profile_store_name(user))
    }

    async fn by_store_id(
        &self,
        user: &UserProfile,
        token: &str,
    ) -> Result<Option<String>, ClientError> {
        match user.loja_id {
            Some(loja_id) => {
                let store = self.lookup.store_by_id(loja_id, token).await?;
                Ok(Some(store_label(&store, loja_id)))
            }
            None => Ok(None),
        }
    }

    async fn by_employee(
        &self,
        user: &UserProfile,
        token: &str,
    ) -> Result<Option<String>, ClientError> {
        let Some(id) = user.id else {
            return Ok(None);
        };

        let employee = self.lookup.employee_by_id(id, token).await?;
        if let Some(nome_loja) = employee.nome_loja.filter(|n| !n.is_empty()) {
            return Ok(Some(nome_loja));
        }
        match employee.loja_id {
            Some(loja_id) => {
                let store = self.lookup.store_by_id(loja_id, token).await?;
                Ok(Some(store_label(&store, loja_id)))
            }
            None => Ok(None),
        }
    }
}

fn by_profile_store_name(user: &UserProfile) -> Option<String> {
    user.nome_loja.clone().filter(|n| !n.is_empty())
}

fn store_label(store: &StoreRecord, id: i64) -> String {
    store
        .nome
        .clone()
        .or_else(|| store.nome_fantasia.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Final fallback expression: `nome_completo ?? email ?? "Filial"`.
pub fn fallback_label(user: &UserProfile) -> String {
    user.nome_completo
        .clone()
        .or_else(|| user.email.clone())
        .unwrap_or_else(|| FALLBACK_LABEL.to_string())
}
