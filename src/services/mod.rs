//! Business logic services.
//!
//! This module contains the backend API client, session handling, token
//! storage, notifications and the approval workflow.
//!
//! Services are independent of any particular UI toolkit.

pub mod api_client;
pub mod approval_workflow;
pub mod credentials;
pub mod notifications;
pub mod session;

pub use api_client::ApiClient;
pub use credentials::{AuthTokens, KeyringTokenStore, MemoryTokenStore, TokenStore};
pub use notifications::NotificationCenter;
pub use session::SessionContext;
