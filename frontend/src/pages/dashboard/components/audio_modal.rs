use leptos::ev::{DragEvent, KeyboardEvent};
use leptos::*;
use web_sys::HtmlInputElement;

use crate::api::NoteKind;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::LoadingSpinner;
use crate::pages::dashboard::components::credit_confirm_modal::CreditConfirmModal;
use crate::pages::dashboard::upload::{self, close_needs_confirmation, UploadStage};
use crate::pages::dashboard::view_model::use_dashboard_view_model;
use crate::state::toast::{toast_error, use_toasts};
use crate::utils::format::{format_clock, format_file_size};

/// File name and media type given to an in-browser recording when it is
/// handed to the upload workflow.
pub const RECORDED_FILE_NAME: &str = "recorded-audio.mp3";
pub const RECORDED_MEDIA_TYPE: &str = "audio/mp3";

/// Audio conversion modal: record with the microphone or pick an audio file,
/// confirm the credit cost, wait for the server. The microphone is an
/// exclusive resource; both stop paths release its tracks before anything
/// else happens. A failed attempt returns the modal to a clean start.
#[component]
pub fn AudioUploadModal() -> impl IntoView {
    let vm = use_dashboard_view_model();
    let is_open = vm.audio_open;
    let flow = vm.audio_flow;
    let (_toasts, set_toasts) = use_toasts();

    let recording = create_rw_signal(false);
    let elapsed = create_rw_signal(0u32);
    let force_close_open = create_rw_signal(false);

    let stage = Signal::derive(move || flow.get().stage());
    let processing = Signal::derive(move || flow.get().is_processing());
    let selection = Signal::derive(move || {
        flow.get()
            .pending()
            .map(|pending| (pending.file_name.clone(), pending.size()))
    });
    let confirm_open = Signal::derive(move || stage.get() == UploadStage::ConfirmPending);

    #[cfg(target_arch = "wasm32")]
    let session = store_value(wasm::RecordingSession::default());

    #[cfg(target_arch = "wasm32")]
    let start_recording = move || {
        if recording.get_untracked() || processing.get_untracked() {
            return;
        }
        elapsed.set(0);
        spawn_local(async move {
            let capture = wasm::Capture::start(move |bytes| {
                vm.select_upload(
                    NoteKind::Audio,
                    RECORDED_FILE_NAME.to_string(),
                    RECORDED_MEDIA_TYPE.to_string(),
                    bytes,
                );
            })
            .await;
            match capture {
                Ok(capture) => {
                    let timer = gloo_timers::callback::Interval::new(1_000, move || {
                        elapsed.update(|seconds| *seconds += 1);
                    });
                    session.update_value(|state| {
                        state.capture = Some(capture);
                        state.timer = Some(timer);
                    });
                    recording.set(true);
                }
                Err(error) => {
                    log::error!("microphone capture failed: {:?}", error);
                    toast_error(set_toasts, upload::TOAST_MIC_ERROR, upload::MIC_ACCESS_FAILED);
                }
            }
        });
    };

    // The recorded chunks are assembled and fed into the workflow by the
    // capture's stop handler; this only ends the session.
    #[cfg(target_arch = "wasm32")]
    let stop_recording = move || {
        session.update_value(|state| {
            state.timer = None;
            if let Some(capture) = state.capture.take() {
                capture.stop();
            }
        });
        recording.set(false);
    };

    // Force-close path: the device is released but the capture is discarded
    // instead of becoming a pending upload.
    #[cfg(target_arch = "wasm32")]
    let abandon_recording = move || {
        session.update_value(|state| {
            state.timer = None;
            if let Some(capture) = state.capture.take() {
                capture.abandon();
            }
        });
        recording.set(false);
    };

    // There is no capture device off the browser; host builds keep the same
    // control flow so server-side tests can render the modal.
    #[cfg(not(target_arch = "wasm32"))]
    let start_recording = move || {
        toast_error(set_toasts, upload::TOAST_MIC_ERROR, upload::MIC_ACCESS_FAILED);
    };
    #[cfg(not(target_arch = "wasm32"))]
    let stop_recording = move || recording.set(false);
    #[cfg(not(target_arch = "wasm32"))]
    let abandon_recording = move || recording.set(false);

    // Leaving the page entirely must not keep the microphone open.
    #[cfg(target_arch = "wasm32")]
    on_cleanup(move || {
        session.try_update_value(|state| {
            state.timer = None;
            if let Some(capture) = state.capture.take() {
                capture.abandon();
            }
        });
    });

    let toggle_recording = move || {
        if recording.get_untracked() {
            stop_recording();
        } else {
            start_recording();
        }
    };

    let request_close = move || {
        if close_needs_confirmation(stage.get_untracked(), recording.get_untracked()) {
            force_close_open.set(true);
        } else {
            vm.close_upload(NoteKind::Audio);
        }
    };

    let force_close_message = Signal::derive(move || {
        if recording.get() {
            "녹음이 진행 중입니다. 닫으면 녹음 내용이 사라집니다. 정말 닫으시겠습니까?".to_string()
        } else {
            "파일을 처리하는 중입니다. 정말 닫으시겠습니까?".to_string()
        }
    });

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[50] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="닫기"
                    class="absolute inset-0 bg-black/50"
                    on:click=move |_| request_close()
                ></button>
                <div
                    class="relative z-[51] w-full max-w-lg rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            request_close();
                        }
                    }
                >
                    <div class="flex items-start justify-between gap-3">
                        <h2 class="text-lg font-semibold text-gray-900">{"오디오로 노트 만들기"}</h2>
                        <button
                            type="button"
                            aria-label="닫기"
                            class="text-gray-400 hover:text-gray-600"
                            on:click=move |_| request_close()
                        >
                            {"✕"}
                        </button>
                    </div>

                    <div class="rounded-lg border border-gray-200 p-6 text-center space-y-3">
                        <button
                            type="button"
                            class=move || {
                                if recording.get() {
                                    "w-16 h-16 rounded-full bg-red-600 text-white animate-pulse"
                                } else {
                                    "w-16 h-16 rounded-full bg-purple-600 text-white hover:bg-purple-700"
                                }
                            }
                            disabled=move || processing.get()
                            on:click=move |_| toggle_recording()
                        >
                            <i class=move || {
                                if recording.get() { "fa-solid fa-stop" } else { "fa-solid fa-microphone" }
                            }></i>
                        </button>
                        <p class="text-2xl font-mono text-gray-900">
                            {move || format_clock(elapsed.get())}
                        </p>
                        <p class="text-sm text-gray-600">
                            {move || if recording.get() { "녹음 중지" } else { "녹음 시작" }}
                        </p>
                    </div>

                    <div class="flex items-center gap-3 text-xs text-gray-400">
                        <span class="h-px flex-1 bg-gray-200"></span>
                        {"또는"}
                        <span class="h-px flex-1 bg-gray-200"></span>
                    </div>

                    <label
                        for="audio-file-input"
                        class="block cursor-pointer rounded-lg border-2 border-dashed border-gray-300 p-6 text-center hover:border-purple-400"
                        on:dragover=move |ev: DragEvent| ev.prevent_default()
                        on:drop=move |ev: DragEvent| {
                            ev.prevent_default();
                            if let Some(file) = ev
                                .data_transfer()
                                .and_then(|transfer| transfer.files())
                                .and_then(|files| files.get(0))
                            {
                                vm.select_browser_file(NoteKind::Audio, file);
                            }
                        }
                    >
                        <i class="fa-solid fa-file-audio text-2xl text-purple-600"></i>
                        <p class="mt-2 text-sm text-gray-700">
                            {"오디오 파일을 끌어다 놓거나 클릭하여 선택하세요"}
                        </p>
                        <p class="mt-1 text-xs text-gray-500">{"MP3, WAV, M4A 등"}</p>
                    </label>
                    <input
                        id="audio-file-input"
                        type="file"
                        class="hidden"
                        accept="audio/*"
                        on:change=move |ev| {
                            let input = event_target::<HtmlInputElement>(&ev);
                            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                                vm.select_browser_file(NoteKind::Audio, file);
                            }
                            // Picking the same file again must re-fire change.
                            input.set_value("");
                        }
                    />

                    <Show when=move || selection.get().is_some()>
                        <div class="flex items-center gap-2 rounded-md bg-purple-50 px-3 py-2 text-sm text-purple-800">
                            <i class="fa-solid fa-music"></i>
                            {move || selection.get().map(|(name, size)| {
                                format!("{} ({})", name, format_file_size(size))
                            })}
                        </div>
                    </Show>

                    <button
                        type="button"
                        class="w-full inline-flex items-center justify-center gap-2 rounded-md px-4 py-2 text-sm font-semibold bg-purple-600 text-white hover:bg-purple-700 disabled:opacity-50"
                        disabled=move || processing.get() || recording.get()
                        on:click=move |_| vm.request_confirm(NoteKind::Audio)
                    >
                        <Show when=move || processing.get()>
                            <LoadingSpinner />
                        </Show>
                        {move || if processing.get() { "처리 중..." } else { "노트 생성하기" }}
                    </button>
                </div>
            </div>

            <CreditConfirmModal
                is_open=confirm_open
                kind=NoteKind::Audio
                on_confirm=Callback::new(move |_| vm.confirm_upload(NoteKind::Audio))
                on_cancel=Callback::new(move |_| vm.cancel_confirm(NoteKind::Audio))
            />
            <ConfirmDialog
                is_open=force_close_open.into()
                title="작업 중단"
                message=force_close_message
                confirm_label="닫기"
                destructive=true
                on_confirm=Callback::new(move |_| {
                    force_close_open.set(false);
                    if recording.get_untracked() {
                        abandon_recording();
                    }
                    vm.close_upload(NoteKind::Audio);
                })
                on_cancel=Callback::new(move |_| force_close_open.set(false))
            />
        </Show>
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobEvent, BlobPropertyBag, MediaRecorder, MediaStream, MediaStreamConstraints,
        MediaStreamTrack,
    };

    use super::RECORDED_MEDIA_TYPE;

    /// Live state of one modal instance: the exclusive capture and the
    /// 1-second elapsed-time tick. Dropping the interval stops the tick.
    #[derive(Default)]
    pub struct RecordingSession {
        pub capture: Option<Capture>,
        pub timer: Option<gloo_timers::callback::Interval>,
    }

    /// One exclusive microphone session. Chunks accumulate until the recorder
    /// stops; the stop handler releases every device track first and then
    /// assembles the chunks into a single `audio/mp3` payload.
    pub struct Capture {
        recorder: MediaRecorder,
        stream: MediaStream,
        discard: Rc<Cell<bool>>,
        _on_data: Closure<dyn FnMut(BlobEvent)>,
        _on_stop: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Capture {
        pub async fn start(on_bytes: impl Fn(Vec<u8>) + 'static) -> Result<Self, JsValue> {
            let window =
                web_sys::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
            let devices = window.navigator().media_devices()?;

            let mut constraints = MediaStreamConstraints::new();
            constraints.audio(&JsValue::TRUE);
            let granted = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
                .await?;
            let stream: MediaStream = granted.dyn_into()?;

            let recorder = match MediaRecorder::new(&stream) {
                Ok(recorder) => recorder,
                Err(error) => {
                    release_tracks(&stream);
                    return Err(error);
                }
            };

            let chunks: Rc<RefCell<Vec<Blob>>> = Rc::new(RefCell::new(Vec::new()));
            let discard = Rc::new(Cell::new(false));
            let on_bytes: Rc<dyn Fn(Vec<u8>)> = Rc::new(on_bytes);

            let chunks_sink = Rc::clone(&chunks);
            let on_data = Closure::<dyn FnMut(BlobEvent)>::new(move |event: BlobEvent| {
                if let Some(blob) = event.data() {
                    chunks_sink.borrow_mut().push(blob);
                }
            });
            recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

            let stream_to_release = stream.clone();
            let discard_flag = Rc::clone(&discard);
            let on_stop = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                release_tracks(&stream_to_release);
                if discard_flag.get() {
                    chunks.borrow_mut().clear();
                    return;
                }
                let parts = std::mem::take(&mut *chunks.borrow_mut());
                let sequence = js_sys::Array::new();
                for part in &parts {
                    sequence.push(part.as_ref());
                }
                let mut options = BlobPropertyBag::new();
                options.type_(RECORDED_MEDIA_TYPE);
                let assembled = match Blob::new_with_blob_sequence_and_options(
                    sequence.as_ref(),
                    &options,
                ) {
                    Ok(blob) => blob,
                    Err(error) => {
                        log::error!("could not assemble the recording: {:?}", error);
                        return;
                    }
                };
                let on_bytes = Rc::clone(&on_bytes);
                wasm_bindgen_futures::spawn_local(async move {
                    match JsFuture::from(assembled.array_buffer()).await {
                        Ok(buffer) => on_bytes(js_sys::Uint8Array::new(&buffer).to_vec()),
                        Err(error) => {
                            log::error!("could not read the recording: {:?}", error)
                        }
                    }
                });
            });
            recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

            if let Err(error) = recorder.start() {
                release_tracks(&stream);
                return Err(error);
            }

            Ok(Self {
                recorder,
                stream,
                discard,
                _on_data: on_data,
                _on_stop: on_stop,
            })
        }

        /// Ends the recording; the stop handler hands the assembled bytes to
        /// the callback given at start.
        pub fn stop(&self) {
            let _ = self.recorder.stop();
        }

        /// Ends the recording and throws the capture away. The tracks are
        /// released here as well, so the device closes even if the stop event
        /// never fires.
        pub fn abandon(&self) {
            self.discard.set(true);
            let _ = self.recorder.stop();
            release_tracks(&self.stream);
        }
    }

    fn release_tracks(stream: &MediaStream) {
        for track in stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use std::rc::Rc;

    use super::*;
    use crate::api::ApiClient;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;
    use crate::utils::storage::MemorySessionStore;

    fn render_modal(open: bool) -> String {
        render_to_string(move || {
            provide_context(
                ApiClient::new_with_base_url("http://127.0.0.1:9")
                    .with_store(Rc::new(MemorySessionStore::default())),
            );
            provide_auth(None);
            let vm = use_dashboard_view_model();
            vm.audio_open.set(open);
            view! { <AudioUploadModal /> }
        })
    }

    #[test]
    fn open_modal_shows_recorder_and_drop_zone() {
        let html = render_modal(true);
        assert!(html.contains("오디오로 노트 만들기"));
        assert!(html.contains("00:00"));
        assert!(html.contains("녹음 시작"));
        assert!(html.contains("오디오 파일을 끌어다 놓거나 클릭하여 선택하세요"));
        assert!(html.contains("노트 생성하기"));
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let html = render_modal(false);
        assert!(!html.contains("오디오로 노트 만들기"));
    }
}
