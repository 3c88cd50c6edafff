pub mod applications_service;
pub mod auth_service;
pub mod datasets;
pub mod jobs_service;
pub mod messages_service;
pub mod news_service;
pub mod users_service;

pub use applications_service::ApplicationsService;
pub use auth_service::AuthService;
pub use datasets::DatasetService;
pub use jobs_service::JobsService;
pub use messages_service::MessagesService;
pub use news_service::NewsService;
pub use users_service::UsersService;
