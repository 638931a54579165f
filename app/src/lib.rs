//! Interactive console client for the student-records service.
//!
//! # Overview
//! Drives the five CRUD operations of `students-core` against a live
//! backend and turns each response into a UI effect: a re-rendered list
//! view, a cleared form, or a blocking notification.
//!
//! # Design
//! - `Session` is the single owner of all client-side state: the rendered
//!   view, the create form, and the in-flight submit guards. Handlers are
//!   methods taking a `student_id`, never free functions over shared state.
//! - I/O lives behind two seams: `Transport` (HTTP execution) and `UserIo`
//!   (alerts and confirmation prompts), so every handler is testable with
//!   fakes.
//! - Mutations never patch the view in place: on success the list is
//!   re-fetched and re-rendered from scratch.

pub mod console;
pub mod forms;
pub mod session;
pub mod transport;
pub mod view;

pub use forms::{CreateForm, EditForm};
pub use session::{ClientError, Session, UserIo};
pub use transport::{Transport, TransportError, UreqTransport};
pub use view::{Card, CardMode, ListView};
