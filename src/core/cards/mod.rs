//! Card lookup and display: matching a query against a catalog and turning
//! the hit into a chat attachment.

pub mod attachment;
pub mod dice;
pub mod fields;
pub mod matcher;
pub mod schema;

pub use attachment::{Attachment, AttachmentField};
pub use schema::{build, schema_for, CardSchema, FormatError};
