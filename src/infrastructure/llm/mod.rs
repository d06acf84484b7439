mod mock_chat_backend;
mod openai_chat_backend;

pub use mock_chat_backend::MockChatBackend;
pub use openai_chat_backend::OpenAiChatBackend;
