pub(crate) mod users_errors;
pub(crate) mod users_model;
pub(crate) mod users_repository;
pub(crate) mod users_service;
pub(crate) mod users_traits;

pub use users_errors::{Result, UserError};
pub use users_model::{validate_email, NewUser, User, UserDB, UserRole, UserUpdate};
pub use users_repository::UserRepository;
pub use users_service::UserService;
pub use users_traits::UserServiceTrait;
