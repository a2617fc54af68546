use bytes::Bytes;
use http::{Response, StatusCode, header};
use http_body_util::Full;
use waypoint::WizardStep;
use waypoint::session::CookieSessionStorage;

type Step<'w> = WizardStep<'w, CookieSessionStorage>;

pub fn html(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from(body)));
    *res.status_mut() = status;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );
    res
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn layout(title: &str, index: usize, total: usize, body: &str) -> String {
    format!(
        "<!doctype html><html><head><title>{title}</title></head><body>\
         <h1>{title}</h1><p>Step {} of {total}</p>{body}</body></html>",
        index + 1
    )
}

fn stored(step: &Step<'_>, name: &str) -> String {
    escape(&step.form_value(name).unwrap_or_default())
}

pub fn account(step: &Step<'_>, total: usize) -> String {
    let body = format!(
        r#"<form method="post">
<label>Email <input name="email" type="email" value="{}"></label>
<button>Next</button>
</form>"#,
        stored(step, "email")
    );
    layout("Account", 0, total, &body)
}

pub fn profile(step: &Step<'_>, total: usize) -> String {
    let interests: Vec<String> = step.get_as("interests").ok().flatten().unwrap_or_default();
    let checkbox = |value: &str| {
        let checked = if interests.iter().any(|i| i == value) { " checked" } else { "" };
        format!(r#"<label><input type="checkbox" name="interests" value="{value}"{checked}> {value}</label>"#)
    };
    let body = format!(
        r#"<form method="post">
<label>Display name <input name="display_name" value="{}"></label>
<label>Plan <select name="plan"><option value="free">free</option><option value="pro">pro</option></select></label>
<fieldset>{}{}{}</fieldset>
<button name="action" value="back">Back</button>
<button>Next</button>
</form>"#,
        stored(step, "display_name"),
        checkbox("rust"),
        checkbox("forms"),
        checkbox("cookies"),
    );
    layout("Profile", 1, total, &body)
}

pub fn confirm(step: &Step<'_>, total: usize) -> String {
    let body = format!(
        r#"<dl><dt>Email</dt><dd>{}</dd><dt>Name</dt><dd>{}</dd><dt>Plan</dt><dd>{}</dd><dt>Interests</dt><dd>{}</dd></dl>
<form method="post">
<button name="action" value="edit">Edit account</button>
<button name="action" value="back">Back</button>
<button>Create account</button>
</form>"#,
        stored(step, "email"),
        stored(step, "display_name"),
        stored(step, "plan"),
        stored(step, "interests"),
    );
    layout("Confirm", 2, total, &body)
}

pub fn done() -> String {
    "<!doctype html><html><body><h1>All done</h1><a href=\"/signup/account\">Start again</a></body></html>"
        .to_string()
}
