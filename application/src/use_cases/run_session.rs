//! Run Session use case — one query in, one narrated answer out.
//!
//! [`AgentSession`] hands the query, the system instruction text and the
//! tool schemas to the [`ReasoningRuntime`], then consumes the runtime's
//! [`SessionMessage`] stream strictly in order:
//!
//! - every text fragment goes to the [`NarrationSink`] immediately and is
//!   appended to the transcript
//! - tool round-trips are run by the runtime against the registry this
//!   session keeps alive; the session only reports them
//! - a terminal error is surfaced after whatever was already narrated
//!
//! `run` takes `self` by value, so a session cannot be reused.

use std::sync::Arc;

use ociops_domain::prompt::SystemPrompt;
use ociops_domain::session::{
    AssistantBlock, InvalidTransition, SessionEvent, SessionMessage, SessionState, TerminalStatus,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ExecutionParams;
use crate::ports::confirmation::ConfirmationMode;
use crate::ports::narration::NarrationSink;
use crate::ports::reasoning::{ReasoningRuntime, RuntimeRequest};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;

const CLOSED_WITHOUT_RESULT: &str = "Reasoning runtime closed the stream without a result";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

/// Final state of a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub status: TerminalStatus,
    /// Every narrated fragment, concatenated in order
    pub transcript: String,
    pub num_turns: usize,
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, TerminalStatus::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            TerminalStatus::Error(message) => Some(message),
            TerminalStatus::Success => None,
        }
    }
}

/// A single-use orchestrated session
pub struct AgentSession {
    runtime: Arc<dyn ReasoningRuntime>,
    tools: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
    params: ExecutionParams,
    state: SessionState,
    transcript: String,
}

impl AgentSession {
    pub fn new(
        runtime: Arc<dyn ReasoningRuntime>,
        tools: Arc<dyn ToolExecutorPort>,
        schema: Arc<dyn ToolSchemaPort>,
        params: ExecutionParams,
    ) -> Self {
        Self {
            runtime,
            tools,
            schema,
            params,
            state: SessionState::Idle,
            transcript: String::new(),
        }
    }

    /// Run the session to a terminal state.
    ///
    /// Runtime failures are not `Err`: they end the session in
    /// `Terminal(Error)` and are reported to `sink`.
    pub async fn run(
        mut self,
        query: &str,
        sink: &dyn NarrationSink,
    ) -> Result<SessionOutcome, SessionError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SessionError::EmptyQuery);
        }
        self.advance(SessionEvent::QueryAccepted)?;

        let spec = self.tools.tool_spec();
        let request = RuntimeRequest {
            system_prompt: SystemPrompt::build(
                spec,
                self.params.confirmation == ConfirmationMode::Enforced,
            ),
            query: query.to_string(),
            tools: self.schema.all_tools_schema(spec),
            max_turns: self.params.max_tool_turns,
        };
        info!(tools = request.tools.len(), "Starting session");

        let mut stream = match self.runtime.start(request, Arc::clone(&self.tools)).await {
            Ok(stream) => stream,
            Err(e) => return self.fail(e.to_string(), 0, sink),
        };

        while let Some(message) = stream.next().await {
            match message {
                SessionMessage::Assistant(blocks) => {
                    for block in blocks {
                        self.on_block(block, sink)?;
                    }
                }
                SessionMessage::Result(result) => {
                    if result.is_error {
                        return self.fail(result.result, result.num_turns, sink);
                    }
                    self.advance(SessionEvent::Completed)?;
                    sink.on_session_end();
                    info!(turns = result.num_turns, "Session completed");
                    return Ok(SessionOutcome {
                        status: TerminalStatus::Success,
                        transcript: self.transcript,
                        num_turns: result.num_turns,
                    });
                }
            }
        }

        self.fail(CLOSED_WITHOUT_RESULT.to_string(), 0, sink)
    }

    fn on_block(&mut self, block: AssistantBlock, sink: &dyn NarrationSink) -> Result<(), SessionError> {
        match block {
            AssistantBlock::Text(fragment) => {
                self.advance(SessionEvent::TextReceived)?;
                sink.on_text(&fragment);
                self.transcript.push_str(&fragment);
            }
            AssistantBlock::ToolUse { id, name } => {
                debug!(tool = %name, id = %id, "Tool round-trip");
                self.advance(SessionEvent::ToolRoundTrip)?;
                sink.on_tool_start(&name);
            }
            AssistantBlock::ToolResult { name, is_error, .. } => {
                sink.on_tool_end(&name, is_error);
            }
        }
        Ok(())
    }

    fn fail(
        mut self,
        message: String,
        num_turns: usize,
        sink: &dyn NarrationSink,
    ) -> Result<SessionOutcome, SessionError> {
        warn!(error = %message, "Session ended with error");
        self.advance(SessionEvent::Failed(message.clone()))?;
        sink.on_session_error(&message);
        Ok(SessionOutcome {
            status: TerminalStatus::Error(message),
            transcript: self.transcript,
            num_turns,
        })
    }

    fn advance(&mut self, event: SessionEvent) -> Result<(), InvalidTransition> {
        let current = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = current.transition(event)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning::{MessageStream, RuntimeError};
    use async_trait::async_trait;
    use ociops_domain::session::ResultMessage;
    use ociops_domain::tool::{
        Mutability, ToolCall, ToolContent, ToolDefinition, ToolResult, ToolSpec,
    };
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    // ==================== Mocks ====================

    struct ScriptedRuntime {
        script: Vec<SessionMessage>,
        /// Tool call the runtime makes before replaying the script
        call: Option<ToolCall>,
        fail_start: bool,
        seen: Mutex<Option<RuntimeRequest>>,
    }

    impl ScriptedRuntime {
        fn new(script: Vec<SessionMessage>) -> Self {
            Self {
                script,
                call: None,
                fail_start: false,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ReasoningRuntime for ScriptedRuntime {
        async fn start(
            &self,
            request: RuntimeRequest,
            tools: Arc<dyn ToolExecutorPort>,
        ) -> Result<MessageStream, RuntimeError> {
            *self.seen.lock().unwrap() = Some(request);
            if self.fail_start {
                return Err(RuntimeError::Connection("connection refused".to_string()));
            }

            let (tx, rx) = mpsc::channel(self.script.len() + 4);
            if let Some(call) = &self.call {
                tx.send(SessionMessage::Assistant(vec![AssistantBlock::ToolUse {
                    id: "toolu_1".to_string(),
                    name: call.tool_name.clone(),
                }]))
                .await
                .unwrap();
                let result = tools.execute(call).await;
                tx.send(SessionMessage::Assistant(vec![AssistantBlock::ToolResult {
                    tool_use_id: "toolu_1".to_string(),
                    name: call.tool_name.clone(),
                    is_error: result.is_error(),
                }]))
                .await
                .unwrap();
            }
            for message in &self.script {
                tx.send(message.clone()).await.unwrap();
            }
            Ok(MessageStream::new(rx))
        }
    }

    struct CountingTools {
        spec: ToolSpec,
        calls: AtomicUsize,
    }

    impl CountingTools {
        fn new() -> Self {
            let spec = ToolSpec::new()
                .try_register(ToolDefinition::new(
                    "list_instances",
                    "List instances",
                    Mutability::ReadOnly,
                ))
                .unwrap()
                .try_register(ToolDefinition::new(
                    "stop_instance",
                    "Stop an instance",
                    Mutability::Mutating,
                ))
                .unwrap();
            Self {
                spec,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for CountingTools {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ToolResult::success(&call.tool_name, vec![ToolContent::text("[]")])
        }
    }

    struct NameSchema;

    impl ToolSchemaPort for NameSchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value {
            serde_json::json!({ "name": tool.name })
        }

        fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
            let mut names: Vec<&str> = spec.names().collect();
            names.sort();
            names.into_iter().map(|n| serde_json::json!({ "name": n })).collect()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl NarrationSink for RecordingSink {
        fn on_text(&self, fragment: &str) {
            self.events.lock().unwrap().push(format!("text:{fragment}"));
        }

        fn on_tool_start(&self, name: &str) {
            self.events.lock().unwrap().push(format!("tool:{name}"));
        }

        fn on_tool_end(&self, name: &str, is_error: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("tool_end:{name}:{is_error}"));
        }

        fn on_session_error(&self, message: &str) {
            self.events.lock().unwrap().push(format!("error:{message}"));
        }

        fn on_session_end(&self) {
            self.events.lock().unwrap().push("end".to_string());
        }
    }

    fn session(runtime: Arc<ScriptedRuntime>, tools: Arc<CountingTools>) -> AgentSession {
        AgentSession::new(runtime, tools, Arc::new(NameSchema), ExecutionParams::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_fragments_streamed_in_order() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![
            SessionMessage::text("Found "),
            SessionMessage::text("2 "),
            SessionMessage::text("instances."),
            SessionMessage::Result(ResultMessage::success("Found 2 instances.", 2)),
        ]));
        let sink = RecordingSink::default();

        let outcome = session(runtime, Arc::new(CountingTools::new()))
            .run("list my instances", &sink)
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.transcript, "Found 2 instances.");
        assert_eq!(outcome.num_turns, 2);
        assert_eq!(
            sink.events(),
            vec!["text:Found ", "text:2 ", "text:instances.", "end"]
        );
    }

    #[tokio::test]
    async fn test_error_keeps_partial_transcript() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![
            SessionMessage::text("Checking compartments"),
            SessionMessage::Result(ResultMessage::error("API error (529): Overloaded", 1)),
        ]));
        let sink = RecordingSink::default();

        let outcome = session(runtime, Arc::new(CountingTools::new()))
            .run("list compartments", &sink)
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.error_message(), Some("API error (529): Overloaded"));
        assert_eq!(outcome.transcript, "Checking compartments");
        assert_eq!(
            sink.events(),
            vec![
                "text:Checking compartments",
                "error:API error (529): Overloaded"
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_closed_without_result_is_error() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![SessionMessage::text("partial")]));
        let sink = RecordingSink::default();

        let outcome = session(runtime, Arc::new(CountingTools::new()))
            .run("anything", &sink)
            .await
            .unwrap();

        assert_eq!(outcome.error_message(), Some(CLOSED_WITHOUT_RESULT));
        assert_eq!(outcome.transcript, "partial");
    }

    #[tokio::test]
    async fn test_tool_calls_routed_to_registry() {
        let mut runtime = ScriptedRuntime::new(vec![
            SessionMessage::text("No instances."),
            SessionMessage::Result(ResultMessage::success("No instances.", 2)),
        ]);
        runtime.call = Some(
            ToolCall::new("list_instances").with_arg("compartment_id", "ocid1.compartment.oc1..a"),
        );
        let tools = Arc::new(CountingTools::new());
        let sink = RecordingSink::default();

        let outcome = session(Arc::new(runtime), tools.clone())
            .run("list instances", &sink)
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(tools.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            sink.events(),
            vec![
                "tool:list_instances",
                "tool_end:list_instances:false",
                "text:No instances.",
                "end"
            ]
        );
    }

    #[tokio::test]
    async fn test_request_carries_policy_and_schemas() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![SessionMessage::Result(
            ResultMessage::success("", 1),
        )]));
        let sink = RecordingSink::default();

        session(runtime.clone(), Arc::new(CountingTools::new()))
            .run("  stop web-1  ", &sink)
            .await
            .unwrap();

        let request = runtime.seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.query, "stop web-1");
        assert_eq!(request.tools.len(), 2);
        assert_eq!(request.tools[0]["name"], "list_instances");
        assert!(request.system_prompt.contains("- stop_instance"));
        assert_eq!(request.max_turns, ExecutionParams::default().max_tool_turns);
    }

    #[tokio::test]
    async fn test_enforced_gate_changes_mutation_guidance() {
        let sink = RecordingSink::default();

        let advisory = Arc::new(ScriptedRuntime::new(vec![SessionMessage::Result(
            ResultMessage::success("", 1),
        )]));
        session(advisory.clone(), Arc::new(CountingTools::new()))
            .run("stop web-1", &sink)
            .await
            .unwrap();
        let prompt = advisory.seen.lock().unwrap().clone().unwrap().system_prompt;
        assert!(prompt.contains("Do not call it until they have."));

        let enforced = Arc::new(ScriptedRuntime::new(vec![SessionMessage::Result(
            ResultMessage::success("", 1),
        )]));
        let params = ExecutionParams {
            confirmation: ConfirmationMode::Enforced,
            ..ExecutionParams::default()
        };
        AgentSession::new(
            enforced.clone(),
            Arc::new(CountingTools::new()),
            Arc::new(NameSchema),
            params,
        )
        .run("stop web-1", &sink)
        .await
        .unwrap();
        let prompt = enforced.seen.lock().unwrap().clone().unwrap().system_prompt;
        assert!(prompt.contains("then make the call"));
        assert!(!prompt.contains("Do not call it until they have."));
    }

    #[tokio::test]
    async fn test_start_failure_is_terminal_error() {
        let mut runtime = ScriptedRuntime::new(vec![]);
        runtime.fail_start = true;
        let sink = RecordingSink::default();

        let outcome = session(Arc::new(runtime), Arc::new(CountingTools::new()))
            .run("hello", &sink)
            .await
            .unwrap();

        assert_eq!(
            outcome.error_message(),
            Some("Connection error: connection refused")
        );
        assert_eq!(sink.events(), vec!["error:Connection error: connection refused"]);
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let runtime = Arc::new(ScriptedRuntime::new(vec![]));
        let err = session(runtime.clone(), Arc::new(CountingTools::new()))
            .run("   ", &RecordingSink::default())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::EmptyQuery));
        assert!(runtime.seen.lock().unwrap().is_none());
    }
}
