//! # Authentication
//!
//! Login/verify/register against the back-office API, an explicit session
//! context, and the role table that decides where a user lands.
//!
//! ```text
//! AuthGateway ──▶ AuthApi (AuthClient: reqwest)
//!      │
//!      ├──▶ SessionStore   create / clear
//!      └──▶ RoleTable      default_dashboard(roles)
//! ```
//!
//! ## Example
//!
//! ```
//! use pitboss::auth::RoleTable;
//!
//! let table = RoleTable::default();
//! assert_eq!(table.default_dashboard(Some(&["extracciones", "admin"][..])), "/admin/dashboard");
//! assert_eq!(table.default_dashboard::<&str>(None), "/dashboard");
//! ```

pub mod client;
pub mod gateway;
pub mod roles;
pub mod session;

pub use client::{AuthApi, AuthClient, LoginData};
pub use gateway::AuthGateway;
pub use roles::{DEFAULT_ROUTE, RoleEntry, RoleTable, UNKNOWN_PRIORITY};
pub use session::{ModuleAccess, Session, SessionStore, User};
