pub mod bootstrap;
pub mod initdb;
pub mod serve;

pub use bootstrap::bootstrap;
pub use initdb::init_database;
pub use serve::serve;
