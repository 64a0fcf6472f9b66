mod activity;
mod comment;
mod id_types;
mod person;
mod timeline_entry;
pub use activity::*;
pub use comment::*;
pub use id_types::*;
pub use person::*;
pub use timeline_entry::*;
