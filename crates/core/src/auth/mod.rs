mod error;
mod functions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::generate_session_id;
pub use traits::{PageMapper, ProviderConnector, Result};
pub use types::{AccessToken, Session, SessionId};
