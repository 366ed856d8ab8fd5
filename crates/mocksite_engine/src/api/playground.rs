//! The embedded query-exploration page served on plain GET requests to the
//! layout endpoint. Posts the form values back to the same endpoint and
//! pretty-prints the JSON result.

pub const PLAYGROUND_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>mocksite layout playground</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 48rem; }
    label { display: block; margin-top: 0.75rem; }
    input { width: 100%; padding: 0.3rem; font-family: monospace; }
    button { margin-top: 1rem; padding: 0.4rem 1.2rem; }
    pre { background: #f4f4f4; padding: 1rem; overflow-x: auto; }
  </style>
</head>
<body>
  <h1>mocksite layout playground</h1>
  <p>Query the layout service. Results come back exactly as the layout API
  returns them to your front-end.</p>
  <form id="query-form">
    <label>site <input name="site" value="mocksite"></label>
    <label>routePath <input name="routePath" value="/"></label>
    <label>language <input name="language" value="en"></label>
    <button type="submit">Run query</button>
  </form>
  <pre id="result">–</pre>
  <script>
    const form = document.getElementById('query-form');
    const result = document.getElementById('result');
    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      const data = Object.fromEntries(new FormData(form).entries());
      try {
        const response = await fetch(window.location.pathname, {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(data),
        });
        result.textContent = JSON.stringify(await response.json(), null, 2);
      } catch (error) {
        result.textContent = String(error);
      }
    });
  </script>
</body>
</html>
"#;
