/*!
# Signup Wizard Demo

Three-step signup form driven by a Waypoint wizard and served with hyper.

- `/signup/account` stores a single form value (`parse_form_value`)
- `/signup/profile` parses the form through a `TypedSchema` and keeps checkbox groups as arrays
- `/signup/confirm` jumps back to the first step for edits, or finishes and clears the session

## Run
```bash
RUST_LOG=debug cargo run --bin wizard-demo
# open http://127.0.0.1:3000/signup/account
```

`WAYPOINT_ADDR` changes the bind address; `WAYPOINT_MODE=production` marks the cookie `Secure`.
*/

mod pages;

use bytes::Bytes;
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing_subscriber::EnvFilter;
use waypoint::prelude::*;
use waypoint::session::CookieSessionStorage;

const WIZARD_TOML: &str = r#"
name = "signup"
routes = ["/signup/account", "/signup/profile", "/signup/confirm"]

[cookie]
max_age_secs = 1800
"#;

const DONE: &str = "/signup/done";

type SignupWizard = Wizard<CookieSessionStorage>;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Plan {
    Free,
    Pro,
}

#[derive(Debug, Serialize, Deserialize)]
struct Profile {
    display_name: String,
    plan: Plan,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,waypoint_http=debug")),
        )
        .init();

    let addr: SocketAddr = std::env::var("WAYPOINT_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    let wizard = create_wizard(WizardConfig::from_toml_str(WIZARD_TOML)?)?
        .with_schema(TypedSchema::<Profile>::new());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Signup wizard listening on http://{}{}", addr, wizard.routes().first());

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let wizard = wizard.clone();

        tokio::task::spawn(async move {
            let svc = ServiceBuilder::new().service_fn(move |req| handle(wizard.clone(), req));
            let svc = TowerToHyperService::new(svc);

            if let Err(err) = http1::Builder::new().serve_connection(io, svc).await {
                tracing::error!("Error serving connection: {:?}", err);
            }
        });
    }
}

async fn handle(wizard: SignupWizard, req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let result = match method {
        Method::GET => render(&wizard, req).await,
        Method::POST => submit(&wizard, req).await,
        _ => Ok(pages::html(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())),
    };

    Ok(result.unwrap_or_else(|e| {
        tracing::warn!(%method, %path, error = %e, "Request failed");
        e.into_response()
    }))
}

async fn render(wizard: &SignupWizard, req: Request<Incoming>) -> Result<Response<Full<Bytes>>, WizardError> {
    if req.uri().path() == DONE {
        return Ok(pages::html(StatusCode::OK, pages::done()));
    }

    // Pages never read the body
    let (parts, _body) = req.into_parts();
    let req = Request::from_parts(parts, ());

    let step = wizard.register(&req).await?;
    let total = wizard.routes().len();
    let page = match step.current_step()? {
        0 => pages::account(&step, total),
        1 => pages::profile(&step, total),
        _ => pages::confirm(&step, total),
    };
    Ok(pages::html(StatusCode::OK, page))
}

async fn submit(wizard: &SignupWizard, req: Request<Incoming>) -> Result<Response<Full<Bytes>>, WizardError> {
    let mut step = wizard.register_form(req).await?;
    let action = step.form().get("action").map(str::to_string);

    match (step.current_step()?, action.as_deref()) {
        (_, Some("back")) => step.prev_step().await,
        (_, Some("edit")) => step.jump_to_step(0usize).await,
        (0, _) => {
            step.parse_form_value("email")?;
            step.next_step().await
        }
        (1, _) => {
            step.parse_form_with_schema()?;
            if step.form().contains("interests") {
                step.parse_form_value("interests")?;
            } else {
                step.save("interests", Vec::<String>::new())?;
            }
            step.next_step().await
        }
        _ => {
            tracing::info!(account = ?step.data(), "Account created");
            step.finish(DONE).await
        }
    }
}
