//! Permission domain module

mod policy;
mod status;

pub use policy::DeniedPolicy;
pub use status::PermissionStatus;
