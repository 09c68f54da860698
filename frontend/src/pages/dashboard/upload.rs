use std::rc::Rc;

use crate::api::{ApiError, NoteKind};

pub const TOAST_LOGIN_NEEDED: &str = "로그인 필요";
pub const TOAST_UNSUPPORTED_FILE: &str = "지원하지 않는 파일 형식";
pub const TOAST_NOTE_CREATED: &str = "노트 생성 완료";
pub const TOAST_PROCESSING_FAILED: &str = "처리 오류";
pub const TOAST_MIC_ERROR: &str = "마이크 접근 오류";

pub const MIC_ACCESS_FAILED: &str = "마이크에 접근할 수 없습니다. 권한을 확인해주세요.";

/// Extensions accepted for document conversion, compared case-insensitively.
const DOCUMENT_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "ppt", "pptx", "txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Idle,
    FileSelected,
    ConfirmPending,
    Processing,
}

/// The file waiting to be converted. Bytes sit behind an `Rc` so the value can
/// travel into a dispatched request and back without copying the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpload {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Rc<Vec<u8>>,
}

impl PendingUpload {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: Rc::new(bytes),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// One upload workflow instance. The audio and the document modal each own
/// one, so their pending files never interfere.
///
/// Stages move `Idle → FileSelected → ConfirmPending → Processing` and every
/// completion path returns to a stage from which the user can act again. The
/// credit cost shown before confirmation is display only; the server keeps
/// the authoritative balance and rejects on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFlow {
    kind: NoteKind,
    stage: UploadStage,
    pending: Option<PendingUpload>,
}

impl UploadFlow {
    pub fn new(kind: NoteKind) -> Self {
        Self {
            kind,
            stage: UploadStage::Idle,
            pending: None,
        }
    }

    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    pub fn stage(&self) -> UploadStage {
        self.stage
    }

    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.stage == UploadStage::Processing
    }

    /// Accepts a picked, dropped or recorded file. Validation happens here;
    /// a rejected file leaves the machine untouched. Selecting again simply
    /// replaces the previous choice.
    pub fn select(
        &mut self,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        if self.stage == UploadStage::Processing {
            return Err(ApiError::validation("이미 파일을 처리하고 있습니다."));
        }
        let file_name = file_name.into();
        let mut media_type = media_type.into();
        validate_upload(self.kind, &file_name, &media_type)?;
        // Browsers report no media type for some documents; the multipart
        // part still needs one.
        if self.kind == NoteKind::Document && media_type.is_empty() {
            media_type = "application/octet-stream".to_string();
        }
        self.pending = Some(PendingUpload::new(file_name, media_type, bytes));
        self.stage = UploadStage::FileSelected;
        Ok(())
    }

    /// Moves to the credit confirmation dialog. Requires an active session;
    /// without one the machine stays where it is.
    pub fn request_confirm(&mut self, authenticated: bool) -> Result<(), ApiError> {
        match self.stage {
            UploadStage::ConfirmPending => return Ok(()),
            UploadStage::Processing => {
                return Err(ApiError::validation("이미 파일을 처리하고 있습니다."))
            }
            UploadStage::Idle => {
                return Err(ApiError::validation("파일을 먼저 선택해주세요."))
            }
            UploadStage::FileSelected => {}
        }
        if !authenticated {
            return Err(ApiError::auth_required(login_needed_message(self.kind)));
        }
        self.stage = UploadStage::ConfirmPending;
        Ok(())
    }

    /// Consumes the confirmed file and enters `Processing`. A second call
    /// without a fresh selection finds nothing to dispatch, which keeps one
    /// confirmation from ever producing two requests.
    pub fn take_confirmed(&mut self) -> Option<PendingUpload> {
        if self.stage != UploadStage::ConfirmPending {
            return None;
        }
        let upload = self.pending.take()?;
        self.stage = UploadStage::Processing;
        Some(upload)
    }

    /// Cancels the credit dialog without touching the network. The document
    /// flow keeps its chosen file in the form; the audio flow drops the
    /// capture entirely.
    pub fn cancel_confirm(&mut self) {
        if self.stage != UploadStage::ConfirmPending {
            return;
        }
        match self.kind {
            NoteKind::Audio => *self = Self::new(self.kind),
            NoteKind::Document => self.stage = UploadStage::FileSelected,
        }
    }

    pub fn complete_success(&mut self) {
        *self = Self::new(self.kind);
    }

    /// Puts the machine back where a failed attempt can be retried: document
    /// uploads get their file back for re-submission, audio starts over.
    pub fn complete_failure(&mut self, upload: PendingUpload) {
        match self.kind {
            NoteKind::Audio => *self = Self::new(self.kind),
            NoteKind::Document => {
                self.pending = Some(upload);
                self.stage = UploadStage::FileSelected;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

pub fn validate_upload(
    kind: NoteKind,
    file_name: &str,
    media_type: &str,
) -> Result<(), ApiError> {
    match kind {
        NoteKind::Audio => {
            if media_type.starts_with("audio/") {
                Ok(())
            } else {
                Err(ApiError::validation(invalid_file_message(kind)))
            }
        }
        NoteKind::Document => match file_extension(file_name) {
            Some(ext)
                if DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext)) =>
            {
                Ok(())
            }
            _ => Err(ApiError::validation(invalid_file_message(kind))),
        },
    }
}

fn file_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

pub fn login_needed_message(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Audio => "파일을 처리하려면 먼저 로그인해주세요.",
        NoteKind::Document => "문서를 처리하려면 먼저 로그인해주세요.",
    }
}

pub fn invalid_file_message(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Audio => "오디오 파일(.mp3, .wav 등)만 업로드 가능합니다.",
        NoteKind::Document => "PDF, DOC, DOCX, PPT, PPTX, TXT 파일만 업로드 가능합니다.",
    }
}

pub fn success_body(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Audio => "오디오 파일이 성공적으로 노트로 변환되었습니다.",
        NoteKind::Document => "문서가 성공적으로 노트로 변환되었습니다.",
    }
}

/// Failure toast body; a backend error without a usable message falls back to
/// a per-kind default.
pub fn failure_body(kind: NoteKind, error: &ApiError) -> String {
    if error.message.trim().is_empty() {
        match kind {
            NoteKind::Audio => "미디어 파일 처리 중 오류가 발생했습니다.".to_string(),
            NoteKind::Document => "문서 처리 중 오류가 발생했습니다.".to_string(),
        }
    } else {
        error.message.clone()
    }
}

/// Closing the modal must be confirmed while a recording or a dispatched
/// request would otherwise be silently abandoned.
pub fn close_needs_confirmation(stage: UploadStage, recording: bool) -> bool {
    recording || stage == UploadStage::Processing
}
