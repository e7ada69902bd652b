use crate::models::{QuickPreset, TimeRemaining};
use crate::themes::{THEMES, catalog};
use crate::view::CountdownView;

pub struct PageModel {
    pub view: CountdownView,
    pub share_url: String,
    pub remaining: TimeRemaining,
    pub target_label: String,
    pub presets: Vec<QuickPreset>,
}

pub fn render_index(page: &PageModel) -> Result<String, serde_json::Error> {
    let state = page.view.state();
    let theme = page.view.theme();
    // Keep `</script>` out of the embedded catalog.
    let themes_json = serde_json::to_string(&catalog())?.replace("</", "<\\/");

    Ok(INDEX_HTML
        .replace("{{THEMES_JSON}}", &themes_json)
        .replace("{{THEME_BUTTONS}}", &theme_buttons(state.theme))
        .replace("{{PRESETS}}", &preset_buttons(&page.presets))
        .replace("{{EDITING_HIDDEN}}", if page.view.is_editing() { "" } else { "hidden" })
        .replace("{{COMPLETE_HIDDEN}}", if page.remaining.is_complete() { "" } else { "hidden" })
        .replace("{{BLOCKS_HIDDEN}}", if page.remaining.is_complete() { "hidden" } else { "" })
        .replace("{{EDIT_LABEL}}", if page.view.is_editing() { "Hide settings" } else { "✏️ Edit" })
        .replace("{{DAYS}}", &two_digits(page.remaining.days))
        .replace("{{HOURS}}", &two_digits(page.remaining.hours))
        .replace("{{MINUTES}}", &two_digits(page.remaining.minutes))
        .replace("{{SECONDS}}", &two_digits(page.remaining.seconds))
        .replace("{{THEME_INDEX}}", &state.theme.to_string())
        .replace("{{THEME_EMOJI}}", theme.emoji)
        .replace("{{THEME_GRADIENT}}", theme.gradient)
        .replace("{{THEME_BACKGROUND}}", theme.background)
        .replace("{{TARGET_LABEL}}", &escape_html(&page.target_label))
        .replace("{{SHARE_URL}}", &escape_html(&page.share_url))
        .replace("{{TARGET}}", &escape_html(&state.target))
        // Title last: user text must not be scanned for placeholders.
        .replace("{{TITLE}}", &escape_html(&state.title)))
}

fn two_digits(value: u64) -> String {
    format!("{value:02}")
}

fn theme_buttons(selected: usize) -> String {
    THEMES
        .iter()
        .enumerate()
        .map(|(index, theme)| {
            let active = if index == selected { " active" } else { "" };
            format!(
                r#"<button type="button" class="theme{active}" data-theme="{index}"><span>{}</span> {}</button>"#,
                theme.emoji,
                escape_html(theme.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

fn preset_buttons(presets: &[QuickPreset]) -> String {
    presets
        .iter()
        .map(|preset| {
            format!(
                r#"<button type="button" class="preset" data-title="{label}" data-target="{}" data-theme="{}">{label}</button>"#,
                escape_html(&preset.target),
                preset.theme,
                label = escape_html(preset.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Countdown Timer</title>
  <style>
    :root {
      --accent: {{THEME_GRADIENT}};
      --page: {{THEME_BACKGROUND}};
      --ink: #1f2937;
      --muted: #6b7280;
      --card: #ffffff;
      --shadow: 0 20px 50px rgba(31, 41, 55, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--page);
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle,
    .muted {
      margin: 6px 0 0;
      color: var(--muted);
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      font-weight: 600;
    }

    input {
      padding: 10px 14px;
      border: 1px solid #d1d5db;
      border-radius: 10px;
      font-size: 1rem;
    }

    .settings {
      display: grid;
      gap: 16px;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      font-size: 0.95rem;
      cursor: pointer;
      background: #f3f4f6;
      color: var(--ink);
    }

    button.primary,
    .theme.active {
      background: var(--accent);
      color: white;
    }

    button.copied {
      background: #22c55e;
      color: white;
    }

    .display {
      text-align: center;
    }

    .emoji {
      font-size: 3.5rem;
      display: block;
    }

    .blocks {
      display: flex;
      justify-content: center;
      flex-wrap: wrap;
      gap: 16px;
      margin-top: 24px;
    }

    .block {
      display: grid;
      gap: 8px;
    }

    .block .value {
      background: var(--accent);
      color: white;
      border-radius: 16px;
      padding: 18px;
      min-width: 96px;
      font-size: clamp(2.2rem, 6vw, 3.6rem);
      font-weight: 700;
    }

    .share {
      display: flex;
      gap: 8px;
    }

    .share input {
      flex: 1;
      background: #f9fafb;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <main class="app" id="app" data-title="{{TITLE}}" data-target="{{TARGET}}" data-theme="{{THEME_INDEX}}">
    <header class="card">
      <h1>Countdown Timer ⏱️</h1>
      <p class="subtitle">Count down to your big day, then share it with a link.</p>
    </header>

    <section class="card settings" id="settings" {{EDITING_HIDDEN}}>
      <h2>⚙️ Settings</h2>
      <label>Title
        <input type="text" id="title-input" value="{{TITLE}}" placeholder="e.g. Our wedding" />
      </label>
      <label>Date and time
        <input type="datetime-local" id="target-input" value="{{TARGET}}" />
      </label>
      <div>
        <span class="muted">Theme</span>
        <div class="row" id="themes">
          {{THEME_BUTTONS}}
        </div>
      </div>
      <button type="button" class="primary" id="start-btn">✓ Start countdown</button>
    </section>

    <section class="card display">
      <span class="emoji" id="theme-emoji">{{THEME_EMOJI}}</span>
      <h2 id="title">{{TITLE}}</h2>
      <p class="muted" id="target-label">{{TARGET_LABEL}}</p>

      <div id="complete" {{COMPLETE_HIDDEN}}>
        <span class="emoji">🎉</span>
        <h3>The time has come!</h3>
        <p class="muted">The countdown is over. Congratulations!</p>
      </div>

      <div class="blocks" id="blocks" {{BLOCKS_HIDDEN}}>
        <div class="block"><span class="value" id="days">{{DAYS}}</span><span class="muted">Days</span></div>
        <div class="block"><span class="value" id="hours">{{HOURS}}</span><span class="muted">Hours</span></div>
        <div class="block"><span class="value" id="minutes">{{MINUTES}}</span><span class="muted">Minutes</span></div>
        <div class="block"><span class="value" id="seconds">{{SECONDS}}</span><span class="muted">Seconds</span></div>
      </div>

      <div class="row" style="justify-content: center; margin-top: 24px;">
        <button type="button" id="edit-btn">{{EDIT_LABEL}}</button>
        <button type="button" class="primary" id="share-btn">🔗 Share countdown</button>
      </div>
    </section>

    <section class="card">
      <h3>📤 Share with others</h3>
      <p class="muted">Copy the link and send it to friends and family:</p>
      <div class="share">
        <input type="text" id="share-url" value="{{SHARE_URL}}" readonly />
        <button type="button" id="copy-btn">Copy</button>
      </div>
    </section>

    <section class="card">
      <h3>⚡ Quick countdowns</h3>
      <div class="row">
        {{PRESETS}}
      </div>
    </section>
  </main>

  <script type="application/json" id="theme-data">{{THEMES_JSON}}</script>
  <script>
    const THEMES = JSON.parse(document.getElementById('theme-data').textContent);
    const app = document.getElementById('app');
    const settingsEl = document.getElementById('settings');
    const titleInput = document.getElementById('title-input');
    const targetInput = document.getElementById('target-input');
    const titleEl = document.getElementById('title');
    const targetLabelEl = document.getElementById('target-label');
    const emojiEl = document.getElementById('theme-emoji');
    const completeEl = document.getElementById('complete');
    const blocksEl = document.getElementById('blocks');
    const shareUrlEl = document.getElementById('share-url');
    const shareBtn = document.getElementById('share-btn');
    const editBtn = document.getElementById('edit-btn');
    const units = ['days', 'hours', 'minutes', 'seconds'].map((id) => document.getElementById(id));

    const state = {
      title: app.dataset.title,
      target: app.dataset.target,
      theme: Number(app.dataset.theme) || 0,
      editing: !settingsEl.hidden
    };

    const calculateTimeLeft = (target, now) => {
      const difference = target.getTime() - now;
      if (!(difference > 0)) {
        return { days: 0, hours: 0, minutes: 0, seconds: 0, total: 0 };
      }
      return {
        days: Math.floor(difference / 86400000),
        hours: Math.floor(difference / 3600000) % 24,
        minutes: Math.floor(difference / 60000) % 60,
        seconds: Math.floor(difference / 1000) % 60,
        total: difference
      };
    };

    const shareUrl = () => {
      const params = new URLSearchParams({ t: state.title, d: state.target, th: String(state.theme) });
      return `${window.location.origin}/?${params.toString()}`;
    };

    const renderTime = () => {
      const left = calculateTimeLeft(new Date(state.target), Date.now());
      const complete = left.total <= 0;
      completeEl.hidden = !complete;
      blocksEl.hidden = complete;
      [left.days, left.hours, left.minutes, left.seconds].forEach((value, i) => {
        units[i].textContent = String(value).padStart(2, '0');
      });
    };

    let timer = null;
    const restartTicker = () => {
      if (timer !== null) {
        clearInterval(timer);
      }
      renderTime();
      timer = setInterval(renderTime, 1000);
    };

    const render = () => {
      const theme = THEMES[state.theme] || THEMES[0];
      document.documentElement.style.setProperty('--accent', theme.gradient);
      document.documentElement.style.setProperty('--page', theme.background);
      emojiEl.textContent = theme.emoji;
      titleEl.textContent = state.title;
      titleInput.value = state.title;
      targetInput.value = state.target;
      const target = new Date(state.target);
      targetLabelEl.textContent = Number.isNaN(target.getTime()) ? '' : target.toLocaleString();
      settingsEl.hidden = !state.editing;
      editBtn.textContent = state.editing ? 'Hide settings' : '✏️ Edit';
      document.querySelectorAll('.theme').forEach((button) => {
        button.classList.toggle('active', Number(button.dataset.theme) === state.theme);
      });
      shareUrlEl.value = shareUrl();
    };

    const copyShareLink = async () => {
      try {
        await navigator.clipboard.writeText(shareUrl());
        shareBtn.classList.add('copied');
        shareBtn.textContent = '✓ Link copied!';
        setTimeout(() => {
          shareBtn.classList.remove('copied');
          shareBtn.textContent = '🔗 Share countdown';
        }, 2000);
      } catch {
        alert('Could not copy link');
      }
    };

    titleInput.addEventListener('input', () => {
      state.title = titleInput.value;
      render();
    });

    targetInput.addEventListener('input', () => {
      if (Number.isNaN(new Date(targetInput.value).getTime())) {
        return;
      }
      state.target = targetInput.value;
      render();
      restartTicker();
    });

    document.querySelectorAll('.theme').forEach((button) => {
      button.addEventListener('click', () => {
        state.theme = Number(button.dataset.theme) || 0;
        render();
      });
    });

    document.querySelectorAll('.preset').forEach((button) => {
      button.addEventListener('click', () => {
        state.title = button.dataset.title;
        state.target = button.dataset.target;
        state.theme = Number(button.dataset.theme) || 0;
        state.editing = false;
        render();
        restartTicker();
      });
    });

    document.getElementById('start-btn').addEventListener('click', () => {
      state.editing = false;
      render();
    });

    editBtn.addEventListener('click', () => {
      state.editing = !state.editing;
      render();
    });

    shareBtn.addEventListener('click', copyShareLink);
    document.getElementById('copy-btn').addEventListener('click', copyShareLink);
    window.addEventListener('pagehide', () => clearInterval(timer));

    render();
    restartTicker();
  </script>
</body>
</html>
"#;
