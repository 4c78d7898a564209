//! Single-page chat UI served at `/`

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{TITLE}}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🌍</text></svg>">
<style>
  body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
  .header { text-align: center; }
  .row { display: flex; gap: .5rem; align-items: flex-end; }
  .row input { flex: 4; padding: .6rem; font-size: 1rem; }
  .row button { flex: 1; padding: .6rem; }
  .languages { display: flex; flex-wrap: wrap; gap: 1rem; margin: .5rem 0 1rem; }
  .preview { background: #e8f1fb; border-radius: 6px; padding: .6rem .8rem; display: none; }
  .history p { margin: .4rem 0; }
  .error { color: #b00020; }
</style>
</head>
<body>
<div class="header">
  {{LOGO}}
  <h1>{{TITLE}}</h1>
</div>
<p>{{SUBTITLE}}</p>

<form id="chat-form" class="row">
  <label style="flex:4">💬 Your Message:<br>
    <input id="message" type="text" autocomplete="off" placeholder="Type your message..." style="width:100%">
  </label>
  <button id="clear" type="button">🗑️ Clear Chat</button>
</form>

<p>🌐 <strong>Language Settings</strong></p>
<div id="languages" class="languages"></div>

<div id="preview-block" class="preview">
  🔎 <strong>English Translation (for processing):</strong>
  <div id="preview"></div>
</div>

<hr>
<div id="history" class="history"></div>

<script>
const state = { sessionId: localStorage.getItem("polyglot-session") };

function escapeHtml(text) {
  const div = document.createElement("div");
  div.textContent = text;
  return div.innerHTML;
}

function renderHistory(turns) {
  const icons = { You: "👤", Bot: "🤖" };
  document.getElementById("history").innerHTML = turns
    .map(t => `<p><strong>${icons[t.speaker]} ${t.speaker}:</strong> ${escapeHtml(t.message)}</p>`)
    .join("");
}

async function loadLanguages() {
  const options = await (await fetch("/api/languages")).json();
  document.getElementById("languages").innerHTML = options
    .map((o, i) => `<label><input type="radio" name="language" value="${o.label}" ${i === 0 ? "checked" : ""}> ${o.label}</label>`)
    .join("");
}

async function loadHistory() {
  if (!state.sessionId) return;
  const response = await fetch(`/api/sessions/${state.sessionId}/history`);
  if (response.ok) {
    renderHistory((await response.json()).turns);
  } else {
    state.sessionId = null;
    localStorage.removeItem("polyglot-session");
  }
}

document.getElementById("chat-form").addEventListener("submit", async event => {
  event.preventDefault();
  const input = document.getElementById("message");
  const language = document.querySelector("input[name=language]:checked");
  const response = await fetch("/api/chat", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({
      session_id: state.sessionId,
      message: input.value,
      language: language ? language.value : null,
    }),
  });
  const reply = await response.json();
  if (!response.ok) {
    document.getElementById("history").insertAdjacentHTML("afterbegin",
      `<p class="error">${escapeHtml(reply.error.message)}</p>`);
    return;
  }
  if (reply.session_id) {
    state.sessionId = reply.session_id;
    localStorage.setItem("polyglot-session", reply.session_id);
  }
  if (reply.english_query !== null) {
    document.getElementById("preview").textContent = reply.english_query;
    document.getElementById("preview-block").style.display = "block";
  }
  renderHistory(reply.history);
  input.value = "";
});

document.getElementById("clear").addEventListener("click", async () => {
  if (state.sessionId) {
    await fetch(`/api/sessions/${state.sessionId}/clear`, { method: "POST" });
  }
  document.getElementById("preview-block").style.display = "none";
  renderHistory([]);
});

loadLanguages();
loadHistory();
</script>
</body>
</html>
"#;

/// Render the chat page. Without a logo the image is left out.
pub fn render(title: &str, subtitle: &str, logo_base64: Option<&str>) -> String {
    let logo = logo_base64
        .map(|data| format!(r#"<img src="data:image/png;base64,{}" width="250"><br>"#, data))
        .unwrap_or_default();

    TEMPLATE
        .replace("{{LOGO}}", &logo)
        .replace("{{TITLE}}", &escape_html(title))
        .replace("{{SUBTITLE}}", &escape_html(subtitle))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_embedded_as_data_uri() {
        let html = render("Bot", "Ask me", Some("iVBORw=="));
        assert!(html.contains(r#"<img src="data:image/png;base64,iVBORw==" width="250">"#));
    }

    #[test]
    fn test_title_escaped() {
        let html = render("Q&A <bot>", "RAG + LLMs", None);
        assert!(html.contains("<h1>Q&amp;A &lt;bot&gt;</h1>"));
        assert!(html.contains("<title>Q&amp;A &lt;bot&gt;</title>"));
        assert!(!html.contains("{{"));
    }
}
