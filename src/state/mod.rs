//! Client-side state.
//!
//! DESIGN
//! ======
//! `credentials` is the durable record, `session` the in-memory flags the UI
//! reacts to, and `auth` the flows that change both at once. `vm_form` holds
//! the create-VM form model so placement rules are testable without a DOM.

pub mod auth;
pub mod credentials;
pub mod session;
pub mod vm_form;
