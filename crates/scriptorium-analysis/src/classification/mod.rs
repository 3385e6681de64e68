//! Classification: frozen token→class table, class roles, derived class flags.

pub mod mapper;
pub mod roles;
pub mod table;

pub use mapper::{ClassInfo, Classification, Classifier};
pub use roles::{Role, RoleMap};
pub use table::ClassTable;
