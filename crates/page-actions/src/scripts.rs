//! In-page script builders.
//!
//! Every interaction script returns a `{ status, ... }` object so the Rust
//! side can distinguish "target absent" from "dispatch blew up" without
//! parsing exception text.

use serde_json::Value;

use crate::{ActionError, ElementState};

/// Quote a string as a JS literal.
pub(crate) fn js_str(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Shared helper snippets injected ahead of each script body.
const HELPERS: &str = r#"
const visible = (el) => {
    if (!el) { return false; }
    const rects = el.getClientRects();
    if (!rects || rects.length === 0) { return false; }
    const style = window.getComputedStyle(el);
    return style.visibility !== 'hidden' && style.display !== 'none';
};
const fireSequence = (el) => {
    const opts = { bubbles: true, cancelable: true, view: window };
    for (const type of ['pointerdown', 'mousedown', 'pointerup', 'mouseup', 'click']) {
        const ev = type.startsWith('pointer')
            ? new PointerEvent(type, opts)
            : new MouseEvent(type, opts);
        el.dispatchEvent(ev);
    }
};
const setNativeValue = (el, value) => {
    const proto = el instanceof HTMLTextAreaElement
        ? HTMLTextAreaElement.prototype
        : HTMLInputElement.prototype;
    const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
    setter.call(el, value);
    el.dispatchEvent(new Event('input', { bubbles: true }));
    el.dispatchEvent(new Event('change', { bubbles: true }));
};
"#;

fn wrap(body: &str) -> String {
    format!("(() => {{ try {{ {HELPERS}\n{body} }} catch (err) {{ return {{ status: 'error', message: String(err) }}; }} }})()")
}

/// Boolean predicate for an element-state wait.
pub(crate) fn state_predicate(selector: &str, state: ElementState) -> String {
    let q = js_str(selector);
    let body = match state {
        ElementState::Present => format!("return document.querySelector({q}) !== null;"),
        ElementState::Visible => format!("return visible(document.querySelector({q}));"),
        ElementState::Hidden => format!("return !visible(document.querySelector({q}));"),
        ElementState::Interactable => format!(
            "const el = document.querySelector({q});\n\
             return visible(el) && !el.disabled && !el.readOnly;"
        ),
    };
    format!("(() => {{ {HELPERS}\n{body} }})()")
}

pub(crate) fn click_sequence(selector: &str) -> String {
    let q = js_str(selector);
    wrap(&format!(
        "const el = document.querySelector({q});\n\
         if (!el) {{ return {{ status: 'missing' }}; }}\n\
         fireSequence(el);\n\
         return {{ status: 'ok' }};"
    ))
}

pub(crate) fn click_sequence_by_text(scope: &str, text: &str) -> String {
    let q = js_str(scope);
    let t = js_str(text);
    wrap(&format!(
        "const wanted = {t};\n\
         for (const el of document.querySelectorAll({q})) {{\n\
             if ((el.textContent || '').trim() === wanted) {{\n\
                 fireSequence(el);\n\
                 return {{ status: 'ok' }};\n\
             }}\n\
         }}\n\
         return {{ status: 'missing' }};"
    ))
}

pub(crate) fn click_sequence_in_row(
    row_selector: &str,
    label_selector: &str,
    label: &str,
    target_selector: &str,
) -> String {
    let rows = js_str(row_selector);
    let labels = js_str(label_selector);
    let wanted = js_str(label);
    let target = js_str(target_selector);
    wrap(&format!(
        "const wanted = {wanted};\n\
         for (const row of document.querySelectorAll({rows})) {{\n\
             const name = row.querySelector({labels});\n\
             if (!name || (name.textContent || '').trim() !== wanted) {{ continue; }}\n\
             const target = row.querySelector({target});\n\
             if (!target) {{ return {{ status: 'target-missing' }}; }}\n\
             fireSequence(target);\n\
             return {{ status: 'ok' }};\n\
         }}\n\
         return {{ status: 'missing' }};"
    ))
}

pub(crate) fn row_exists(row_selector: &str, label_selector: &str, label: &str) -> String {
    let rows = js_str(row_selector);
    let labels = js_str(label_selector);
    let wanted = js_str(label);
    format!(
        "(() => {{\n\
         const wanted = {wanted};\n\
         for (const row of document.querySelectorAll({rows})) {{\n\
             const name = row.querySelector({labels});\n\
             if (name && (name.textContent || '').trim() === wanted) {{ return true; }}\n\
         }}\n\
         return false;\n\
         }})()"
    )
}

pub(crate) fn set_value(selector: &str, value: &str) -> String {
    let q = js_str(selector);
    let v = js_str(value);
    wrap(&format!(
        "const el = document.querySelector({q});\n\
         if (!el) {{ return {{ status: 'missing' }}; }}\n\
         setNativeValue(el, {v});\n\
         return {{ status: 'ok' }};"
    ))
}

pub(crate) fn replace_text(selector: &str, text: &str) -> String {
    let q = js_str(selector);
    let v = js_str(text);
    wrap(&format!(
        "const el = document.querySelector({q});\n\
         if (!el) {{ return {{ status: 'missing' }}; }}\n\
         el.focus();\n\
         if (typeof el.select === 'function') {{ el.select(); }}\n\
         setNativeValue(el, '');\n\
         setNativeValue(el, {v});\n\
         return {{ status: 'ok' }};"
    ))
}

pub(crate) fn set_checked(selector: &str, on: bool) -> String {
    let q = js_str(selector);
    wrap(&format!(
        "const el = document.querySelector({q});\n\
         if (!el) {{ return {{ status: 'missing' }}; }}\n\
         const current = !!el.checked || el.getAttribute('aria-checked') === 'true';\n\
         if (current === {on}) {{ return {{ status: 'noop' }}; }}\n\
         fireSequence(el);\n\
         return {{ status: 'ok' }};"
    ))
}

/// Map a `{ status, ... }` script result into an action result.
pub(crate) fn decode_status(value: &Value, context: &str) -> Result<(), ActionError> {
    match value.get("status").and_then(Value::as_str) {
        Some("ok") | Some("noop") => Ok(()),
        Some("missing") => Err(ActionError::TargetNotFound(context.to_string())),
        Some("target-missing") => Err(ActionError::NotInteractable(format!(
            "{context}: row matched but its control is missing"
        ))),
        Some("error") => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown script error");
            Err(ActionError::Internal(format!("{context}: {message}")))
        }
        other => Err(ActionError::Internal(format!(
            "{context}: unexpected script status {other:?}"
        ))),
    }
}
