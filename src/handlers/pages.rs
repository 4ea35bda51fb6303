// Minimal server-rendered pages for the browser flows.

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn home(title: &str) -> String {
    layout(
        title,
        &format!(
            r#"<h1>{}</h1>
<p><a href="/auth/login">Sign in</a> or <a href="/auth/register">create an account</a>.</p>
<p><a href="/api/docs">API documentation</a></p>"#,
            escape(title)
        ),
    )
}

pub fn login() -> String {
    layout(
        "Sign in",
        r#"<h1>Sign in</h1>
<form method="post" action="/auth/login">
  <label>Email address <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Sign in</button>
</form>
<p>No account yet? <a href="/auth/register">Register</a></p>"#,
    )
}

pub fn register() -> String {
    layout(
        "Register",
        r#"<h1>Register</h1>
<form method="post" action="/auth/register">
  <label>Name <input type="text" name="name" required></label>
  <label>Email address <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" minlength="8" required></label>
  <label>Confirm password <input type="password" name="confirm_password" minlength="8" required></label>
  <button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/auth/login">Sign in</a></p>"#,
    )
}

pub fn admin(user_name: &str) -> String {
    layout(
        "Admin",
        &format!(
            r#"<h1>Welcome, {}</h1>
<p><a href="/api/docs">API documentation</a></p>
<form method="post" action="/logout"><button type="submit">Sign out</button></form>"#,
            escape(user_name)
        ),
    )
}

/// Scalar API reference over the generated and authentication documents.
pub fn api_reference() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>API Documentation</title>
</head>
<body>
  <div id="app"></div>
  <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
  <script>
    Scalar.createApiReference('#app', {
      sources: [
        { url: '/api/openapi.json', title: 'Planets API' },
        { url: '/api/auth/open-api/generate-schema', title: 'Authentication' }
      ]
    })
  </script>
</body>
</html>
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_user_content() {
        let page = admin("<script>alert('x')</script>");
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn reference_lists_both_documents() {
        let page = api_reference();
        assert!(page.contains("/api/openapi.json"));
        assert!(page.contains("/api/auth/open-api/generate-schema"));
    }
}
