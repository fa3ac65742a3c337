//! Background task handling for simq
//!
//! # Error Handling Patterns
//!
//! Channel sends (`tx.send(...)`) use `let _ =`. If the receiver is dropped
//! the app is shutting down and nobody is listening for the result anyway.
//!
//! # Search completion
//!
//! Every search handed out by the coalescer produces exactly one
//! [`BackgroundMessage::SimilarFinished`], even when the request fails or the
//! task panics. The coalescer is released only by that message, so a lost
//! completion would block searching for the rest of the session.

use crate::app::messages::BackgroundMessage;
use crate::app::RuntimeContext;
use crate::search::{fanout, SearchRequest};
use crate::ui::App;
use crate::util::truncate;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::mpsc;

pub fn drain_messages(app: &mut App, rx: &mpsc::Receiver<BackgroundMessage>, ctx: &RuntimeContext) {
    while let Ok(msg) = rx.try_recv() {
        handle_message(app, msg, ctx);
    }
}

pub fn handle_message(app: &mut App, msg: BackgroundMessage, ctx: &RuntimeContext) {
    match msg {
        BackgroundMessage::SimilarFinished { seq, query, result } => {
            if app.coalescer.in_flight_seq() != Some(seq) {
                tracing::warn!(seq, "completion for a search that is not in flight");
                return;
            }
            match result {
                Ok(candidates) => {
                    tracing::debug!(seq, found = candidates.len(), "similarity search finished");
                    spawn_fanout(ctx, seq, &candidates);
                    app.show_similar(seq, query, candidates);
                }
                Err(e) => {
                    tracing::info!(seq, error = %e, "similarity search failed");
                    app.push_status(format!("Error : {}", e));
                }
            }
            if let Some(rerun) = app.coalescer.complete(&app.input) {
                spawn_search(ctx, rerun);
            }
        }
        BackgroundMessage::QuestionResolved(resolution) => {
            app.similar.apply_resolution(resolution);
        }
        BackgroundMessage::AllQuestions(result) => match result {
            Ok(questions) => app.set_all_questions(questions),
            Err(e) => app.push_status(format!("Error : {}", e)),
        },
        BackgroundMessage::Submitted { question, result } => match result {
            Ok(()) => {
                tracing::info!(question = %question, "question submitted");
                app.clear_input();
                app.show_toast(&format!("+ Added: {}", truncate(question.trim(), 60)));
                check_similarity(app, ctx);
                refresh_all_questions(ctx);
            }
            Err(e) => {
                app.push_status(format!("Error : {}", e));
                app.show_toast(&format!("Submit failed: {}", truncate(&e, 80)));
            }
        },
        BackgroundMessage::Error(e) => {
            tracing::error!("{}", e);
            app.show_toast(&truncate(&e, 80));
            app.push_status(format!("Error : {}", e));
        }
    }
}

/// Ask for a similarity search of the current input. Starts one right away
/// unless a search is already running, in which case a rerun is queued.
pub fn check_similarity(app: &mut App, ctx: &RuntimeContext) {
    if let Some(request) = app.coalescer.trigger(&app.input) {
        spawn_search(ctx, request);
    }
}

/// Startup work: load the question list and search for the (empty) input.
pub fn start_session(app: &mut App, ctx: &RuntimeContext) {
    refresh_all_questions(ctx);
    check_similarity(app, ctx);
}

pub fn spawn_search(ctx: &RuntimeContext, request: SearchRequest) {
    let tx = ctx.tx.clone();
    let search = ctx.service.similar(&request.query);
    tokio::spawn(async move {
        let SearchRequest { seq, query } = request;
        let result = match AssertUnwindSafe(search).catch_unwind().await {
            Ok(Ok(candidates)) => Ok(candidates),
            Ok(Err(e)) => Err(e.to_string()),
            Err(panic) => Err(format!("Search crashed unexpectedly: {}", panic_detail(&*panic))),
        };
        let _ = tx.send(BackgroundMessage::SimilarFinished { seq, query, result });
    });
}

/// One task per candidate; each reports only when it resolved text.
pub fn spawn_fanout(ctx: &RuntimeContext, generation: u64, candidates: &[crate::service::Candidate]) {
    for lookup in fanout::lookups(ctx.service.as_ref(), generation, candidates) {
        let tx = ctx.tx.clone();
        spawn_background(ctx.tx.clone(), "question_lookup", async move {
            if let Some(resolution) = lookup.await {
                let _ = tx.send(BackgroundMessage::QuestionResolved(resolution));
            }
        });
    }
}

pub fn refresh_all_questions(ctx: &RuntimeContext) {
    let tx = ctx.tx.clone();
    let fetch = ctx.service.all_questions();
    spawn_background(ctx.tx.clone(), "all_questions", async move {
        let result = fetch.await.map_err(|e| e.to_string());
        let _ = tx.send(BackgroundMessage::AllQuestions(result));
    });
}

/// Submit the input exactly as typed. Blank input is refused locally.
pub fn submit_question(app: &mut App, ctx: &RuntimeContext) {
    if app.input.trim().is_empty() {
        app.push_status("Nothing to submit".to_string());
        return;
    }
    let question = app.input.clone();
    let tx = ctx.tx.clone();
    let submit = ctx.service.submit(&question);
    spawn_background(ctx.tx.clone(), "submit_question", async move {
        let result = submit.await.map(|_receipt| ()).map_err(|e| e.to_string());
        let _ = tx.send(BackgroundMessage::Submitted { question, result });
    });
}

fn panic_detail(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

pub fn spawn_background<F>(tx: mpsc::Sender<BackgroundMessage>, task_name: &'static str, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(panic) = AssertUnwindSafe(fut).catch_unwind().await {
            let _ = tx.send(BackgroundMessage::Error(format!(
                "Background task '{}' crashed unexpectedly: {}",
                task_name,
                panic_detail(&*panic)
            )));
        }
    });
}
