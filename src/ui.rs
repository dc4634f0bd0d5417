pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Mood Check-in</title>
  <style>
    :root {
      --bg: #f8fafc;
      --ink: #1f2937;
      --primary: #3b82f6;
      --card: #ffffff;
      --shadow: 0 4px 6px rgba(0, 0, 0, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      display: grid;
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 12px;
    }

    .mood {
      text-align: center;
      font-size: 1.2rem;
      font-weight: bold;
    }

    .mood .emoji {
      display: block;
      font-size: 3rem;
    }

    textarea, input[type="text"], input[type="date"] {
      width: 100%;
      padding: 8px;
      font: inherit;
    }

    button {
      background: var(--primary);
      color: white;
      border: none;
      border-radius: 8px;
      padding: 10px 16px;
      font: inherit;
      cursor: pointer;
    }

    .hint {
      white-space: pre-wrap;
      background: #eff6ff;
      border-radius: 8px;
      padding: 12px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    td, th {
      text-align: left;
      padding: 6px;
      border-bottom: 1px solid #e5e7eb;
    }

    .status {
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <main class="app">
    <section class="card">
      <h1>How are you feeling right now?</h1>
      <label>Your name <input type="text" id="user" placeholder="e.g. sam" /></label>
      <label>Check-in date <input type="date" id="date" value="{{DATE}}" max="{{DATE}}" /></label>
      <label>Mood (0 = very low, 10 = very high)
        <input type="range" id="score" min="0" max="10" value="5" />
      </label>
      <div class="mood"><span class="emoji" id="emoji"></span><span id="label"></span></div>
      <textarea id="note" rows="4" placeholder="Add any details about your day..."></textarea>
      <input type="text" id="tags" placeholder="Tags (comma-separated)" />
      <button id="submit">Submit Check-in</button>
      <div class="status" id="status"></div>
      <div class="hint" id="hint"></div>
    </section>

    <section class="card">
      <h2>Your check-ins</h2>
      <div id="summary"></div>
      <table>
        <thead><tr><th>Date</th><th>Mood</th><th>Note</th><th>Tags</th></tr></thead>
        <tbody id="history"></tbody>
      </table>
    </section>
  </main>

  <script>
    const $ = (id) => document.getElementById(id);
    let buckets = [];

    const setStatus = (text) => { $('status').textContent = text; };

    const showBucket = () => {
      const score = Number($('score').value);
      const bucket = buckets.find((b) => score >= b.min && score <= b.max);
      if (bucket) {
        $('emoji').textContent = bucket.emoji;
        $('label').textContent = `${bucket.label} (${score}/10)`;
      }
    };

    const user = () => $('user').value.trim();

    const loadHistory = async () => {
      if (!user()) return;
      const base = `/api/users/${encodeURIComponent(user())}`;
      const [entries, stats] = await Promise.all([
        fetch(`${base}/entries`).then((r) => r.json()),
        fetch(`${base}/stats`).then((r) => r.json()),
      ]);
      $('summary').textContent =
        `Streak: ${stats.streak} · Check-ins: ${stats.total_checkins} · ` +
        `Average: ${stats.avg_mood.toFixed(1)} · Last 7: ${stats.recent_avg.toFixed(1)}`;
      $('history').innerHTML = '';
      entries.slice().reverse().forEach((entry) => {
        const row = document.createElement('tr');
        [entry.date, entry.score, entry.note || '', entry.tags.join(', ')].forEach((value) => {
          const cell = document.createElement('td');
          cell.textContent = value;
          row.appendChild(cell);
        });
        $('history').appendChild(row);
      });
    };

    const submit = async () => {
      if (!user()) {
        setStatus('Enter your name first.');
        return;
      }
      setStatus('Saving...');
      const res = await fetch(`/api/users/${encodeURIComponent(user())}/entries`, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          date: $('date').value || null,
          score: Number($('score').value),
          note: $('note').value,
          tags: [$('tags').value],
        }),
      });
      if (!res.ok) {
        setStatus(await res.text());
        return;
      }
      const saved = await res.json();
      $('hint').textContent = [saved.entry.hint, saved.entry.generated_message]
        .filter(Boolean)
        .join('\n\n');
      setStatus(`Check-in saved for ${saved.entry.date}!`);
      localStorage.setItem('mood-user', user());
      await loadHistory();
    };

    $('score').addEventListener('input', showBucket);
    $('user').addEventListener('change', () => loadHistory().catch((err) => setStatus(err.message)));
    $('submit').addEventListener('click', () => submit().catch((err) => setStatus(err.message)));

    $('user').value = localStorage.getItem('mood-user') || '';
    fetch('/api/buckets')
      .then((r) => r.json())
      .then((data) => { buckets = data; showBucket(); })
      .then(loadHistory)
      .catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
