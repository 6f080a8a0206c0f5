pub mod root_directory;

pub use root_directory::RootDirectory;
