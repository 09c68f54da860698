pub mod action_cards;
pub mod audio_modal;
pub mod credit_confirm_modal;
pub mod document_modal;
pub mod login_modal;
pub mod note_detail_modal;
pub mod note_list;
pub mod profile_modal;

pub use action_cards::ActionCards;
pub use audio_modal::AudioUploadModal;
pub use credit_confirm_modal::CreditConfirmModal;
pub use document_modal::DocumentUploadModal;
pub use login_modal::LoginModal;
pub use note_detail_modal::NoteDetailModal;
pub use note_list::NoteList;
pub use profile_modal::ProfileModal;
