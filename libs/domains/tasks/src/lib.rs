//! Tasks Domain
//!
//! Task lifecycle plus the list of task ids kept on each user record.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, id parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Validation  │  ← Ordered field rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Task/user consistency
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Traits + MongoDB and in-memory implementations
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{MongoTaskRepository, MongoUserRepository, TaskService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("taskboard");
//!
//! let service = TaskService::new(MongoTaskRepository::new(&db), MongoUserRepository::new(&db));
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use models::{Task, TaskDraft, TaskFields, User};
pub use self::mongodb::{MongoTaskRepository, MongoUserRepository};
pub use repository::{TaskRepository, UserRepository};
pub use service::TaskService;
