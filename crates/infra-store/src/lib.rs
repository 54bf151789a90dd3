// PAI Job Client Infrastructure - Credential Storage
// Implements: CredentialStore

mod session_file;

pub use session_file::{default_session_path, FileCredentialStore};
