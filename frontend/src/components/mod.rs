pub mod confirm_dialog;
pub mod error;
pub mod guard;
pub mod layout;
pub mod toast;
