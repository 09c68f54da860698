use crate::api::{ApiError, NoteKind, NoteResponse};

pub fn sort_notes_newest_first(notes: &mut [NoteResponse]) {
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Pre-flight check for the login form; nothing reaches the network on
/// failure.
pub fn validate_login(student_id: &str, name: &str) -> Result<(), ApiError> {
    if student_id.trim().is_empty() || name.trim().is_empty() {
        return Err(ApiError::validation("학번과 이름을 모두 입력해주세요."));
    }
    Ok(())
}

/// Static per-kind presentation data, resolved at render time.
pub fn kind_icon(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Audio => "fa-solid fa-microphone",
        NoteKind::Document => "fa-solid fa-file-lines",
    }
}

pub fn kind_accent(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Audio => "bg-purple-600",
        NoteKind::Document => "bg-blue-600",
    }
}

pub fn kind_label(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Audio => "오디오",
        NoteKind::Document => "문서",
    }
}
