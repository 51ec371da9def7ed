use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};

use gtk4::prelude::*;
use gtk4::{self as gtk, gdk, glib, Application, ApplicationWindow, CssProvider, Label};

use super::styles::CSS;
use crate::client::Classifier;
use crate::config;
use crate::dispatch::{self, Resolution};
use crate::prediction::{Category, PredictionOutcome};
use crate::workflow::{Trigger, Workflow, WorkflowState};

const PULSE_STEP: f64 = 0.15;
/// Starts on the three-dot frame so the first ticks keep the label steady.
const PULSE_START: f64 = 3.0;

/// Widgets the render pass touches.
struct WindowWidgets {
    file_label: Label,
    predict_btn: gtk::Button,
    error_box: gtk::Box,
    error_text: Label,
    result_box: gtk::Box,
    result_label: Label,
    pulse_phase: Cell<f64>,
}

/// Everything the main thread needs to drive requests.
struct Session {
    workflow: RefCell<Workflow>,
    classifier: Arc<dyn Classifier>,
    tx: Sender<Resolution>,
}

pub fn run_window(
    classifier: Arc<dyn Classifier>,
    initial_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let app = Application::builder()
        .application_id("com.voxcheck.detector")
        .flags(gtk::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| {
        if app.active_window().is_some() {
            return;
        }
        build_ui(app, classifier.clone(), initial_file.clone());
    });

    // GTK application expects &[&str] args; pass empty since we use clap.
    let empty: Vec<String> = vec![];
    app.run_with_args(&empty);
    Ok(())
}

fn build_ui(app: &Application, classifier: Arc<dyn Classifier>, initial_file: Option<PathBuf>) {
    // --- CSS ---
    let provider = CssProvider::new();
    provider.load_from_data(CSS);
    match gdk::Display::default() {
        Some(display) => gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => tracing::warn!("No default display, running unstyled"),
    }

    // --- Window ---
    let win = ApplicationWindow::builder()
        .application(app)
        .title("AI Voice Detector")
        .default_width(config::WINDOW_WIDTH)
        .default_height(config::WINDOW_HEIGHT)
        .resizable(false)
        .build();

    // --- Widget tree ---
    let container = gtk::Box::new(gtk::Orientation::Vertical, 14);
    container.add_css_class("container");

    let title = Label::new(Some("AI Voice Detector"));
    title.add_css_class("title");
    container.append(&title);

    let subtitle = Label::new(Some("Upload an audio file to determine if it's AI or Human."));
    subtitle.add_css_class("subtitle");
    subtitle.set_wrap(true);
    container.append(&subtitle);

    // Picker
    let choose_btn = gtk::Button::with_label("Choose audio file");
    choose_btn.add_css_class("choose-btn");
    container.append(&choose_btn);

    let hint = Label::new(Some("WAV, MP3, or other audio formats"));
    hint.add_css_class("upload-hint");
    container.append(&hint);

    let file_label = Label::new(None);
    file_label.add_css_class("file-name");
    file_label.set_ellipsize(gtk::pango::EllipsizeMode::Middle);
    file_label.set_visible(false);
    container.append(&file_label);

    let predict_btn = gtk::Button::with_label("Predict");
    predict_btn.add_css_class("predict-btn");
    predict_btn.set_halign(gtk::Align::Center);
    predict_btn.set_sensitive(false);
    container.append(&predict_btn);

    // Error box
    let error_box = gtk::Box::new(gtk::Orientation::Vertical, 4);
    error_box.add_css_class("error-box");
    error_box.set_visible(false);
    let error_title = Label::new(Some("Error"));
    error_title.add_css_class("error-title");
    error_title.set_halign(gtk::Align::Start);
    error_box.append(&error_title);
    let error_text = Label::new(None);
    error_text.add_css_class("error-text");
    error_text.set_halign(gtk::Align::Start);
    error_text.set_wrap(true);
    error_text.set_max_width_chars(48);
    error_box.append(&error_text);
    container.append(&error_box);

    // Result box
    let result_box = gtk::Box::new(gtk::Orientation::Vertical, 4);
    result_box.add_css_class("result-box");
    result_box.set_visible(false);
    let result_title = Label::new(Some("Prediction Result"));
    result_title.add_css_class("result-title");
    result_box.append(&result_title);
    let result_label = Label::new(None);
    result_box.append(&result_label);
    container.append(&result_box);

    let footer_text = format!("Classifier: {}", config::endpoint());
    let footer = Label::new(Some(footer_text.as_str()));
    footer.add_css_class("footer");
    footer.set_vexpand(true);
    footer.set_valign(gtk::Align::End);
    container.append(&footer);

    win.set_child(Some(&container));

    // --- Shared state ---
    let widgets = Rc::new(WindowWidgets {
        file_label,
        predict_btn: predict_btn.clone(),
        error_box,
        error_text,
        result_box,
        result_label,
        pulse_phase: Cell::new(PULSE_START),
    });

    let (tx, rx) = mpsc::channel::<Resolution>();
    let session = Rc::new(Session {
        workflow: RefCell::new(Workflow::new()),
        classifier,
        tx,
    });

    // --- File chooser ---
    let chooser = {
        let session = Rc::clone(&session);
        let w = Rc::clone(&widgets);
        audio_chooser(&win, move |path| select(&session, &w, path))
    };
    choose_btn.connect_clicked(move |_| chooser.show());

    // --- Predict button ---
    {
        let session = Rc::clone(&session);
        let w = Rc::clone(&widgets);
        predict_btn.connect_clicked(move |_| predict(&session, &w));
    }

    // --- Escape closes the window ---
    let key_ctrl = gtk::EventControllerKey::new();
    {
        let win_ref = win.downgrade();
        key_ctrl.connect_key_pressed(move |_ctrl, keyval, _keycode, _modifier| {
            if keyval == gdk::Key::Escape {
                if let Some(win) = win_ref.upgrade() {
                    win.close();
                }
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
    }
    win.add_controller(key_ctrl);

    // --- Poll timer: drains worker results and animates the busy label ---
    {
        let session = Rc::clone(&session);
        let w = Rc::clone(&widgets);
        glib::timeout_add_local(config::POLL_INTERVAL, move || {
            let mut changed = false;
            while let Ok(resolution) = rx.try_recv() {
                changed |= session
                    .workflow
                    .borrow_mut()
                    .resolve(resolution.ticket, resolution.result);
            }

            let wf = session.workflow.borrow();
            if changed {
                render(&w, &wf);
            }
            if wf.state() == WorkflowState::InFlight {
                let phase = w.pulse_phase.get() + PULSE_STEP;
                w.pulse_phase.set(phase);
                w.predict_btn.set_label(&busy_label(phase));
            }

            glib::ControlFlow::Continue
        });
    }

    if let Some(path) = initial_file {
        select(&session, &widgets, path);
    }

    win.present();
}

/// Native picker limited to audio types. Only a hint; the server decides
/// what it accepts.
#[allow(deprecated)]
fn audio_chooser(
    win: &ApplicationWindow,
    on_pick: impl Fn(PathBuf) + 'static,
) -> gtk::FileChooserNative {
    let chooser = gtk::FileChooserNative::new(
        Some("Select an audio file"),
        Some(win),
        gtk::FileChooserAction::Open,
        Some("Open"),
        Some("Cancel"),
    );
    let filter = gtk::FileFilter::new();
    filter.set_name(Some("Audio files"));
    filter.add_mime_type("audio/*");
    chooser.add_filter(&filter);

    chooser.connect_response(move |dialog, response| {
        if response != gtk::ResponseType::Accept {
            return;
        }
        match dialog.file().and_then(|f| f.path()) {
            Some(path) => on_pick(path),
            None => tracing::warn!("Picked file has no local path"),
        }
    });
    chooser
}

fn select(session: &Session, w: &WindowWidgets, path: PathBuf) {
    session.workflow.borrow_mut().select_file(path);
    render(w, &session.workflow.borrow());
}

fn predict(session: &Session, w: &WindowWidgets) {
    let trigger = session.workflow.borrow_mut().trigger();
    if let Trigger::Dispatch(request) = trigger {
        w.pulse_phase.set(PULSE_START);
        dispatch::spawn_request(Arc::clone(&session.classifier), request, session.tx.clone());
    }
    render(w, &session.workflow.borrow());
}

fn render(w: &WindowWidgets, wf: &Workflow) {
    match wf.selection() {
        Some(selected) => {
            w.file_label
                .set_text(&format!("Selected: {}", selected.display_name));
            w.file_label.set_visible(true);
        }
        None => w.file_label.set_visible(false),
    }

    w.predict_btn.set_sensitive(wf.can_trigger());
    if wf.is_in_flight() {
        w.predict_btn.set_label(&busy_label(w.pulse_phase.get()));
    } else {
        w.predict_btn.set_label("Predict");
    }

    match wf.outcome() {
        Some(PredictionOutcome::Failure { message }) => {
            w.error_text.set_text(message);
            w.error_box.set_visible(true);
            w.result_box.set_visible(false);
        }
        Some(PredictionOutcome::Result(prediction)) => {
            for category in [Category::Ai, Category::Human] {
                w.result_label.remove_css_class(category.css_class());
            }
            w.result_label.add_css_class(prediction.category().css_class());
            w.result_label.set_text(&prediction.label());
            w.result_box.set_visible(true);
            w.error_box.set_visible(false);
        }
        None => {
            w.error_box.set_visible(false);
            w.result_box.set_visible(false);
        }
    }
}

fn busy_label(phase: f64) -> String {
    let dots = ".".repeat((phase as usize) % 4);
    format!("Analyzing{dots}")
}
