#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use chrono::TimeZone;
    use leptos::*;

    use crate::api::{NoteKind, NoteResponse, UserResponse};
    use crate::state::auth::AuthState;

    pub fn student_user() -> UserResponse {
        UserResponse {
            id: "u-student".into(),
            student_id: "20240001".into(),
            name: "김철수".into(),
            daily_credits: 10,
            api_key: None,
        }
    }

    pub fn student_with_credits(daily_credits: i32) -> UserResponse {
        UserResponse {
            daily_credits,
            ..student_user()
        }
    }

    pub fn sample_note(id: &str, kind: NoteKind) -> NoteResponse {
        NoteResponse {
            id: id.into(),
            title: format!("강의 노트 {}", id),
            original_transcription: "전체 전사 내용입니다.".into(),
            summary: "## 요약\n- 핵심 내용".into(),
            media_duration_seconds: 93.5,
            note_type: kind,
            created_at: chrono::Utc.with_ymd_and_hms(2025, 6, 3, 9, 30, 0).unwrap(),
        }
    }

    /// Provides an auth context seeded with the given user. Authenticated
    /// follows from the user being present, mirroring the real session rule.
    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let is_authenticated = user.is_some();
        let (auth, set_auth) = create_signal(AuthState {
            user,
            is_authenticated,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
