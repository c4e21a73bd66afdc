//! RPC method handler for the Link Saver JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method name and its params to the `App`.

use serde_json::{json, Value};
use zeroize::Zeroizing;

use crate::app::App;
use crate::types::bookmark::Bookmark;
use crate::types::session::SessionState;
use crate::types::user::User;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Password params are copied into a buffer that is wiped on drop.
fn password_param(params: &Value) -> Result<Zeroizing<String>, String> {
    str_param(params, "password").map(|p| Zeroizing::new(p.to_string()))
}

/// Public view of a user; the password hash never leaves the process.
fn user_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "createdAt": user.created_at,
    })
}

fn bookmarks_json(bookmarks: &[Bookmark]) -> Value {
    json!({ "items": bookmarks, "total": bookmarks.len() })
}

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with a short message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Auth ───
        "auth.register" => {
            let name = str_param(params, "name")?;
            let email = str_param(params, "email")?;
            let password = password_param(params)?;
            let user = app
                .session
                .register(name, email, &password)
                .await
                .map_err(|e| e.user_message().to_string())?;
            Ok(user_json(&user))
        }
        "auth.login" => {
            let email = str_param(params, "email")?;
            let password = password_param(params)?;
            let user = app
                .session
                .login(email, &password)
                .await
                .map_err(|e| e.user_message().to_string())?;
            Ok(user_json(&user))
        }
        "auth.logout" => {
            app.session.logout().await;
            Ok(json!({"ok": true}))
        }
        "auth.session" => match app.session.state().await {
            SessionState::Authenticated(session) => Ok(json!({
                "state": "authenticated",
                "user": user_json(&session.user),
            })),
            SessionState::Unauthenticated => Ok(json!({"state": "unauthenticated"})),
            SessionState::Loading => Ok(json!({"state": "loading"})),
        },

        // ─── Bookmarks ───
        "bookmark.add" => {
            let url = str_param(params, "url")?;
            let bookmark = app.add_bookmark(url).await.map_err(|e| e.to_string())?;
            serde_json::to_value(bookmark).map_err(|e| e.to_string())
        }
        "bookmark.list" => {
            let bookmarks = app.my_bookmarks().await.map_err(|e| e.to_string())?;
            Ok(bookmarks_json(&bookmarks))
        }
        "bookmark.search" => {
            let query = str_param(params, "query")?;
            let bookmarks = app.search_bookmarks(query).await.map_err(|e| e.to_string())?;
            Ok(bookmarks_json(&bookmarks))
        }
        "bookmark.delete" => {
            let id = str_param(params, "id")?;
            app.delete_bookmark(id).await.map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "bookmark.reorder" => {
            let ids: Vec<String> = params
                .get("ids")
                .cloned()
                .ok_or("missing ids")
                .and_then(|v| serde_json::from_value(v).map_err(|_| "ids must be an array of strings"))?;
            let outcome = app.reorder_by_ids(&ids).await.map_err(|e| e.to_string())?;
            Ok(json!({
                "ok": true,
                "exact": outcome.is_exact(),
                "ignored": outcome.ignored,
                "refilled": outcome.refilled,
            }))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
