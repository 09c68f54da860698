use std::rc::Rc;

use crate::api::{
    ApiClient, ApiError, MessageResponse, NoteKind, NotePdfResponse, NoteResponse,
};
use crate::pages::dashboard::{upload::PendingUpload, utils};

/// Data access for the dashboard: the note list, single notes, deletions and
/// the two conversion endpoints.
#[derive(Clone)]
pub struct NotesRepository {
    client: Rc<ApiClient>,
}

impl Default for NotesRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesRepository {
    pub fn new() -> Self {
        Self::new_with_client(Rc::new(ApiClient::new()))
    }

    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the caller's notes, newest first.
    pub async fn fetch_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        let mut notes = self.client.list_notes().await?;
        utils::sort_notes_newest_first(&mut notes);
        Ok(notes)
    }

    pub async fn fetch_note(&self, note_id: &str) -> Result<NoteResponse, ApiError> {
        self.client.get_note(note_id).await
    }

    pub async fn delete_note(&self, note_id: &str) -> Result<MessageResponse, ApiError> {
        self.client.delete_note(note_id).await
    }

    pub async fn fetch_note_pdf(&self, note_id: &str) -> Result<NotePdfResponse, ApiError> {
        self.client.get_note_pdf(note_id).await
    }

    /// Sends a confirmed upload to the conversion endpoint for its kind.
    pub async fn submit_upload(
        &self,
        kind: NoteKind,
        upload: &PendingUpload,
    ) -> Result<NoteResponse, ApiError> {
        let bytes = upload.bytes.as_ref().clone();
        match kind {
            NoteKind::Audio => {
                self.client
                    .create_note_from_media(&upload.file_name, &upload.media_type, bytes)
                    .await
            }
            NoteKind::Document => {
                self.client
                    .create_note_from_document(&upload.file_name, &upload.media_type, bytes)
                    .await
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use std::rc::Rc;

    use super::*;
    use crate::api::test_support::mock::{MockServer, DELETE, GET, POST};
    use crate::utils::storage::{MemorySessionStore, SessionStore, AUTH_TOKEN_KEY};

    fn repository(server: &MockServer) -> NotesRepository {
        let store = Rc::new(MemorySessionStore::default());
        store
            .set(AUTH_TOKEN_KEY, "tk_student")
            .expect("seed token");
        let client = ApiClient::new_with_base_url(server.url("")).with_store(store);
        NotesRepository::new_with_client(Rc::new(client))
    }

    fn note_json(id: &str, created_at: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "강의 노트",
            "original_transcription": "전체 전사",
            "summary": "## 요약",
            "media_duration_seconds": 0.0,
            "note_type": "document",
            "created_at": created_at,
        })
    }

    #[tokio::test]
    async fn fetch_notes_returns_newest_first() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/notes");
            then.status(200).json_body(serde_json::json!([
                note_json("old", "2025-06-01T09:00:00+00:00"),
                note_json("new", "2025-06-07T09:00:00+00:00"),
                note_json("mid", "2025-06-03T09:00:00+00:00"),
            ]));
        });

        let notes = repository(&server).fetch_notes().await.unwrap();
        let order: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn submit_upload_routes_by_note_kind() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/notes/from-media");
            then.status(200)
                .json_body(note_json("n-audio", "2025-06-07T09:00:00+00:00"));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/notes/from-document");
            then.status(200)
                .json_body(note_json("n-doc", "2025-06-07T09:00:00+00:00"));
        });

        let repo = repository(&server);

        let audio = PendingUpload::new("recorded-audio.mp3", "audio/mp3", vec![1]);
        let created = repo.submit_upload(NoteKind::Audio, &audio).await.unwrap();
        assert_eq!(created.id, "n-audio");

        let document = PendingUpload::new("slides.pdf", "application/pdf", vec![2]);
        let created = repo
            .submit_upload(NoteKind::Document, &document)
            .await
            .unwrap();
        assert_eq!(created.id, "n-doc");
    }

    #[tokio::test]
    async fn delete_note_surfaces_the_server_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(DELETE).path("/api/v1/notes/n1");
            then.status(200)
                .json_body(serde_json::json!({"message": "노트가 삭제되었습니다."}));
        });

        let message = repository(&server).delete_note("n1").await.unwrap();
        assert_eq!(message.message, "노트가 삭제되었습니다.");
    }
}
