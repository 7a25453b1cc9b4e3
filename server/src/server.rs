//! tiny_http worker loop and routing.
//!
//! One synchronous request-response cycle per incoming request; a small
//! pool of OS threads shares the listener so simultaneous clients do not
//! queue behind a single slow GitHub call.

use std::io::Read;
use std::sync::Arc;

use tiny_http::{Header, Method, Request, Response, Server};

use crate::handlers::App;

/// Cap on form bodies; a username form never comes close.
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Run `workers` threads over the shared listener. Blocks until the
/// listener shuts down.
pub fn serve(server: Server, app: Arc<App>, workers: usize) {
    let server = Arc::new(server);
    let mut handles = Vec::with_capacity(workers);
    for worker in 0..workers {
        let server = Arc::clone(&server);
        let app = Arc::clone(&app);
        handles.push(std::thread::spawn(move || {
            loop {
                match server.recv() {
                    Ok(request) => handle_request(&app, request),
                    Err(e) => {
                        tracing::error!("worker {worker}: listener error: {e}");
                        break;
                    }
                }
            }
        }));
    }
    for handle in handles {
        let _ = handle.join();
    }
}

fn handle_request(app: &App, mut request: Request) {
    let method = request.method().clone();
    let path = request
        .url()
        .split('?')
        .next()
        .unwrap_or_default()
        .to_string();

    let outcome = match (&method, path.as_str()) {
        (Method::Get, "/") => app.index_page(),
        (Method::Post, "/analyze") => match read_form_field(&mut request, "username") {
            Some(username) => app.analyze_page(&username),
            None => app.missing_username_page(),
        },
        _ => {
            respond(request, Response::from_string("not found").with_status_code(404));
            return;
        }
    };

    match outcome {
        Ok(html) => respond(request, html_response(html)),
        Err(e) => {
            tracing::error!("{method} {path} failed: {e}");
            respond(
                request,
                Response::from_string("internal server error").with_status_code(500),
            );
        }
    }
}

/// Pull one field out of an urlencoded form body.
fn read_form_field(request: &mut Request, name: &str) -> Option<String> {
    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .ok()?;
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn html_response(html: String) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut response = Response::from_string(html);
    if let Ok(header) =
        Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
    {
        response.add_header(header);
    }
    response
}

fn respond<R: Read>(request: Request, response: Response<R>) {
    if let Err(e) = request.respond(response) {
        tracing::warn!("failed to send response: {e}");
    }
}
