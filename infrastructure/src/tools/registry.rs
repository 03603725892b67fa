//! Tool Registry
//!
//! The [`ToolRegistry`] aggregates the domain tool providers and implements
//! [`ToolExecutorPort`]. It owns the dispatch contract every tool call
//! goes through.
//!
//! # Usage
//!
//! ```ignore
//! use ociops_infrastructure::tools::{ComputeToolProvider, StorageToolProvider, ToolRegistry};
//!
//! let registry = ToolRegistry::builder()
//!     .register(ComputeToolProvider::new(clients.compute.clone()))
//!     .register(StorageToolProvider::new(clients.storage.clone(), &params))
//!     .with_confirmation(Arc::new(InteractiveConfirmation::new()), ConfirmationMode::Enforced)
//!     .build()?;
//!
//! let call = ToolCall::new("list_vcns").with_arg("compartment_id", "ocid1.compartment...");
//! let result = registry.execute(&call).await;
//! ```
//!
//! # Dispatch
//!
//! 1. Look the tool up by name (`NotFound` if absent)
//! 2. Validate arguments against the tool's schema; on failure the
//!    handler is never invoked
//! 3. In enforced mode, ask the [`ConfirmationPort`] before a mutating tool
//! 4. Run the provider's handler; provider errors keep their code and message
//!
//! Tool names are unique across providers: a second registration of the
//! same name fails the build instead of shadowing the first.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use ociops_application::ports::confirmation::{
    AutoReject, ConfirmationDecision, ConfirmationMode, ConfirmationPort,
};
use ociops_application::ports::tool_executor::ToolExecutorPort;
use ociops_application::use_cases::tool_helpers::tool_args_preview;
use ociops_domain::core::error::{DispatchError, DuplicateToolError, ToolExecutionError};
use ociops_domain::tool::{
    SchemaValidator, ToolCall, ToolContent, ToolError, ToolProvider, ToolResult, ToolSpec,
    ToolValidator,
};
use tracing::{debug, info, warn};

/// Collects providers before the tool spec is frozen
pub struct ToolRegistryBuilder {
    providers: Vec<Arc<dyn ToolProvider>>,
    confirmation: Arc<dyn ConfirmationPort>,
    mode: ConfirmationMode,
}

impl ToolRegistryBuilder {
    /// Register a tool provider
    pub fn register<P: ToolProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Gate mutating tools on `port` when `mode` is enforced.
    pub fn with_confirmation(
        mut self,
        port: Arc<dyn ConfirmationPort>,
        mode: ConfirmationMode,
    ) -> Self {
        self.confirmation = port;
        self.mode = mode;
        self
    }

    /// Freeze the tool spec; fails on the first duplicate tool name.
    pub fn build(self) -> Result<ToolRegistry, DuplicateToolError> {
        let mut tool_spec = ToolSpec::new();
        let mut tool_mapping = HashMap::new();

        for (index, provider) in self.providers.iter().enumerate() {
            for tool in provider.tools() {
                debug!(tool = %tool.name, provider = provider.id(), "Registered tool");
                tool_mapping.insert(tool.name.clone(), index);
                tool_spec = tool_spec.try_register(tool)?;
            }
        }

        info!(
            providers = self.providers.len(),
            tools = tool_spec.len(),
            mode = ?self.mode,
            "Tool registry ready"
        );

        Ok(ToolRegistry {
            providers: self.providers,
            tool_mapping,
            tool_spec,
            confirmation: self.confirmation,
            mode: self.mode,
        })
    }
}

/// Tool registry that aggregates the domain providers
///
/// Implements `ToolExecutorPort`; every call goes through [`ToolRegistry::dispatch`].
pub struct ToolRegistry {
    /// Registered providers
    providers: Vec<Arc<dyn ToolProvider>>,
    /// Tool name -> provider index
    tool_mapping: HashMap<String, usize>,
    /// Merged tool specification
    tool_spec: ToolSpec,
    confirmation: Arc<dyn ConfirmationPort>,
    mode: ConfirmationMode,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder {
            providers: Vec::new(),
            confirmation: Arc::new(AutoReject),
            mode: ConfirmationMode::Advisory,
        }
    }

    pub fn confirmation_mode(&self) -> ConfirmationMode {
        self.mode
    }

    /// Get a list of registered provider IDs
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    fn provider_for(&self, tool_name: &str) -> Option<&Arc<dyn ToolProvider>> {
        self.tool_mapping
            .get(tool_name)
            .and_then(|index| self.providers.get(*index))
    }

    /// Validate, gate and run one tool call.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<Vec<ToolContent>, DispatchError> {
        let unknown = || DispatchError::UnknownTool(call.tool_name.clone());
        let definition = self.tool_spec.get(&call.tool_name).ok_or_else(unknown)?;

        SchemaValidator.validate(call, definition)?;

        if self.mode == ConfirmationMode::Enforced && definition.is_mutating() {
            let decision = self
                .confirmation
                .confirm(call, definition)
                .await
                .unwrap_or_else(|e| {
                    warn!(tool = %call.tool_name, error = %e, "Confirmation failed, declining");
                    ConfirmationDecision::Decline
                });
            if decision == ConfirmationDecision::Decline {
                return Err(DispatchError::ConfirmationDeclined {
                    tool: call.tool_name.clone(),
                });
            }
        }

        let provider = self.provider_for(&call.tool_name).ok_or_else(unknown)?;
        provider.execute(call).await.map_err(|e| {
            ToolExecutionError {
                tool: call.tool_name.clone(),
                code: e.code(),
                message: e.message(),
            }
            .into()
        })
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();
        let outcome = self.dispatch(call).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mutating = self
            .tool_spec
            .get(&call.tool_name)
            .is_some_and(|d| d.is_mutating());
        let args_preview = tool_args_preview(call);

        match outcome {
            Ok(content) => {
                info!(
                    tool = %call.tool_name,
                    mutating,
                    outcome = "ok",
                    duration_ms,
                    args = %args_preview,
                    "tool_audit"
                );
                ToolResult::success(&call.tool_name, content).with_duration_ms(duration_ms)
            }
            Err(e) => {
                warn!(
                    tool = %call.tool_name,
                    mutating,
                    outcome = "error",
                    code = e.code(),
                    duration_ms,
                    args = %args_preview,
                    "tool_audit"
                );
                ToolResult::failure(&call.tool_name, ToolError::from(&e))
                    .with_duration_ms(duration_ms)
            }
        }
    }
}
