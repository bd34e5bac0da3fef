// Page-level helpers for the bits of the page that live outside the component tree.
// Web builds talk to the DOM through web-sys; desktop builds go through the webview's `eval`.
#[cfg(not(target_arch = "wasm32"))]
use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlElement, KeyboardEvent};

#[cfg(not(target_arch = "wasm32"))]
const ESCAPE_POLL_MS: u64 = 100;

fn overflow_value(locked: bool) -> &'static str {
    if locked {
        "hidden"
    } else {
        ""
    }
}

/// Suppresses background scrolling while the modal is open.
#[cfg(target_arch = "wasm32")]
pub fn set_page_scroll_locked(locked: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let _ = body.style().set_property("overflow", overflow_value(locked));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_page_scroll_locked(locked: bool) {
    let script = format!(
        r#"if (document.body) {{ document.body.style.overflow = "{}"; }}"#,
        overflow_value(locked)
    );
    let _ = document::eval(&script);
}

/// Rendered width of the scrub track, used to turn a click offset into a fraction.
#[cfg(target_arch = "wasm32")]
pub async fn scrub_track_width(id: &str) -> Option<f64> {
    let element = window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let width = element.client_width() as f64;
    (width > 0.0).then_some(width)
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn scrub_track_width(id: &str) -> Option<f64> {
    let id = serde_json::to_string(id).ok()?;
    let eval = document::eval(&format!(
        r#"return (function () {{
            const el = document.getElementById({id});
            return el ? el.clientWidth : 0;
        }})();"#
    ));
    let width = eval.join::<f64>().await.ok()?;
    (width > 0.0).then_some(width)
}

/// Calls `on_escape` for every Escape keydown on the document.
#[cfg(target_arch = "wasm32")]
pub fn listen_for_escape<F>(mut on_escape: F)
where
    F: FnMut() + 'static,
{
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let key_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            on_escape();
        }
    }) as Box<dyn FnMut(_)>);
    let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    key_cb.forget();
}

/// Desktop variant: the webview counts Escape presses and a task drains the count.
/// Must be called from inside a component scope.
#[cfg(not(target_arch = "wasm32"))]
pub fn listen_for_escape<F>(mut on_escape: F)
where
    F: FnMut() + 'static,
{
    let _ = document::eval(
        r#"(() => {
            if (window.__tapeshelfEscapes !== undefined) return true;
            window.__tapeshelfEscapes = 0;
            document.addEventListener("keydown", (event) => {
                if (event.key === "Escape") window.__tapeshelfEscapes += 1;
            });
            return true;
        })();"#,
    );

    spawn(async move {
        loop {
            let eval = document::eval(&format!(
                r#"return (async function () {{
                    await new Promise(resolve => setTimeout(resolve, {ESCAPE_POLL_MS}));
                    const pressed = window.__tapeshelfEscapes || 0;
                    window.__tapeshelfEscapes = 0;
                    return pressed;
                }})();"#
            ));
            match eval.join::<u32>().await {
                Ok(0) => {}
                Ok(_) => on_escape(),
                // No webview to talk to
                Err(_) => break,
            }
        }
    });
}
