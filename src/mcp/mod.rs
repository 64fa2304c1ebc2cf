pub mod protocol;
pub mod server;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
pub use server::{McpError, McpServer, MAX_LINE_LENGTH, PROTOCOL_VERSION, SERVER_NAME};
