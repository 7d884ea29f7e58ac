//! Domain ports describing how adapters drive the directory.

mod user_directory;

#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
