//! Model invocation facade.
//!
//! Generation itself is not wired up: a validated request returns the
//! placeholder text from [`placeholder_response`]. Callers and tests treat
//! that string as the output contract.

use crate::unexpected;
use cloudops_core::{
    CloudOpsError, CloudOpsResult, ErrorPolicy, FacadeConfig, InvocationResult, ModelSummary,
    Operation, Response,
};
use cloudops_provider::Collaborator;

/// Lists and validates foundation models.
///
/// Collaborator faults follow `config.error_policy`: under
/// [`ErrorPolicy::Degrade`] they are logged and turned into an empty result,
/// under [`ErrorPolicy::Propagate`] they are returned. An unknown model id is
/// always an error.
pub struct ModelFacade<'a> {
    client: &'a dyn Collaborator,
    config: &'a FacadeConfig,
}

impl<'a> ModelFacade<'a> {
    pub fn new(client: &'a dyn Collaborator, config: &'a FacadeConfig) -> Self {
        Self { client, config }
    }

    /// One ListFoundationModels call. Never cached.
    pub async fn list_available_models(&self) -> CloudOpsResult<Vec<ModelSummary>> {
        match self.fetch_models().await {
            Ok(models) => Ok(models),
            Err(err) => self.degrade(err, "listing models", Vec::new),
        }
    }

    pub async fn invoke_model(&self, prompt: &str, model: &str) -> CloudOpsResult<InvocationResult> {
        let models = match self.fetch_models().await {
            Ok(models) => models,
            Err(err) => return self.degrade(err, "invoking model", InvocationResult::default),
        };

        let available: Vec<String> = models.into_iter().map(|m| m.model_id).collect();
        if !available.iter().any(|id| id == model) {
            tracing::warn!(model, available = available.len(), "requested model not available");
            return Err(CloudOpsError::InvalidModel {
                model: model.to_string(),
                available,
            });
        }

        tracing::info!(model, prompt_len = prompt.len(), "returning placeholder response");
        Ok(InvocationResult::new(placeholder_response(prompt)))
    }

    /// [`invoke_model`](Self::invoke_model) with the configured default model.
    pub async fn invoke_default(&self, prompt: &str) -> CloudOpsResult<InvocationResult> {
        self.invoke_model(prompt, &self.config.default_model_id).await
    }

    async fn fetch_models(&self) -> CloudOpsResult<Vec<ModelSummary>> {
        match self.client.invoke(Operation::ListFoundationModels).await? {
            Response::ModelSummaries(models) => {
                tracing::info!(count = models.len(), "listed foundation models");
                Ok(models)
            }
            other => Err(unexpected("ListFoundationModels", &other)),
        }
    }

    fn degrade<T>(
        &self,
        err: CloudOpsError,
        context: &str,
        empty: impl FnOnce() -> T,
    ) -> CloudOpsResult<T> {
        match self.config.error_policy {
            ErrorPolicy::Propagate => Err(err),
            ErrorPolicy::Degrade => {
                tracing::warn!(error = %err, "error {context}; returning empty result");
                Ok(empty())
            }
        }
    }
}

/// Text returned for a validated prompt in place of a generated answer.
pub fn placeholder_response(prompt: &str) -> String {
    format!("This is a placeholder response for the prompt: {prompt}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_echoes_prompt() {
        assert_eq!(
            placeholder_response("Capital of France"),
            "This is a placeholder response for the prompt: Capital of France"
        );
    }
}
