pub mod cloud;
pub mod confirmation;
pub mod narration;
pub mod reasoning;
pub mod tool_executor;
pub mod tool_schema;
