// Sub-modules organized by functional domain
pub mod api;
pub mod application;
pub mod demographic;
pub mod engagement;
pub mod hiring;
pub mod hr_operation;
pub mod job;
pub mod leaver;
pub mod message;
pub mod metric;
pub mod news;
pub mod payroll;
pub mod training;
pub mod user;

// API response structures
pub use api::*;

// Authentication and user models
pub use user::*;

// Content models
pub use application::*;
pub use job::*;
pub use message::*;
pub use news::*;

// Dashboard datasets
pub use demographic::*;
pub use engagement::*;
pub use hiring::*;
pub use hr_operation::*;
pub use leaver::*;
pub use metric::*;
pub use payroll::*;
pub use training::*;
